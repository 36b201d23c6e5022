//! Static site rendering: card fragments, page composition, asset copy.
//!
//! The renderer is a pure transform over an already-loaded archive. It builds
//! one HTML card per retained item, concatenates them into the page
//! template's `NEWS_CARDS` region, and binds page-level metadata (counts,
//! last-updated date, year). All file I/O stays at the edges: templates come
//! in pre-loaded via [`TemplateSet`], and the finished page goes back to the
//! caller as a string.
//!
//! Missing template content does not silently produce a blank page. The
//! outcome is explicit: a missing card template degrades the page (empty
//! cards region, reason attached), a missing page template is fatal and no
//! page is produced. Callers decide whether degraded output ships.

use chrono::{Datelike, NaiveDate};
use itertools::Itertools;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument, warn};

use crate::config::SiteConfig;
use crate::models::NewsItem;
use crate::outputs::template::ExpandTemplate;
use crate::utils::format_long_date;

/// Template file names resolved under the templates directory.
pub const PAGE_TEMPLATE: &str = "index.html";
pub const CARD_TEMPLATE: &str = "news_card.html";
pub const STYLESHEET: &str = "styles.css";

/// The two named templates the renderer needs, loaded up front.
///
/// A `None` field means the file was absent or unreadable; the renderer turns
/// that into a [`RenderOutcome::Degraded`] or [`RenderOutcome::Fatal`].
#[derive(Debug, Default)]
pub struct TemplateSet {
    pub page: Option<String>,
    pub card: Option<String>,
}

impl TemplateSet {
    /// Load the page and card templates from `templates_dir`.
    ///
    /// Each file is attempted once; a missing or unreadable file is logged
    /// and recorded as `None` rather than failing the load.
    #[instrument(level = "info", skip_all, fields(%templates_dir))]
    pub async fn load(templates_dir: &str) -> Self {
        Self {
            page: read_template(templates_dir, PAGE_TEMPLATE).await,
            card: read_template(templates_dir, CARD_TEMPLATE).await,
        }
    }
}

async fn read_template(templates_dir: &str, name: &str) -> Option<String> {
    let path = format!("{}/{}", templates_dir.trim_end_matches('/'), name);
    match fs::read_to_string(&path).await {
        Ok(content) => {
            info!(%path, bytes = content.len(), "Loaded template");
            Some(content)
        }
        Err(e) => {
            warn!(%path, error = %e, "Template not available");
            None
        }
    }
}

/// Result of a render pass.
///
/// `Degraded` still carries a complete page string; the reason says what was
/// missing so the caller can choose between publishing and aborting.
#[derive(Debug)]
pub enum RenderOutcome {
    /// Fully rendered page.
    Ok(String),
    /// Page rendered with gaps (e.g. no card template, so an empty cards region).
    Degraded { html: String, reason: String },
    /// Nothing worth shipping; no page was produced.
    Fatal(String),
}

/// Render the news page for one day's archive.
///
/// At most `max_items` items are rendered, in archive order, each with a
/// 1-based ordinal. The `TOTAL_NEWS` and `TOTAL_CATEGORIES` stats are
/// computed over the full archive, not the truncated view, so the header
/// reflects the whole day even when the card list is capped.
pub fn render_site(
    engine: &impl ExpandTemplate,
    archive: &[NewsItem],
    templates: &TemplateSet,
    site: &SiteConfig,
    max_items: usize,
    today: NaiveDate,
) -> RenderOutcome {
    let Some(page_template) = templates.page.as_deref() else {
        return RenderOutcome::Fatal(format!("page template {PAGE_TEMPLATE} is missing"));
    };
    if page_template.is_empty() {
        return RenderOutcome::Fatal(format!("page template {PAGE_TEMPLATE} is empty"));
    }

    let total_news = archive.len();
    let total_categories = archive
        .iter()
        .map(|item| item.category.as_str())
        .unique()
        .count();

    let (news_cards, degraded_reason) = match templates.card.as_deref() {
        Some(card_template) => {
            let cards = archive
                .iter()
                .take(max_items)
                .enumerate()
                .map(|(index, item)| render_card(engine, card_template, item, index + 1))
                .collect::<String>();
            (cards, None)
        }
        None => (
            String::new(),
            Some(format!("card template {CARD_TEMPLATE} is missing; cards region left empty")),
        ),
    };

    let last_update = format!("Última actualización: {}", format_long_date(today));
    let html = engine.expand(
        page_template,
        &[
            ("TITLE", site.site_title.clone()),
            ("DESCRIPTION", site.site_description.clone()),
            ("LAST_UPDATE", last_update),
            ("TOTAL_NEWS", total_news.to_string()),
            ("TOTAL_CATEGORIES", total_categories.to_string()),
            ("NEWS_CARDS", news_cards),
            ("CURRENT_YEAR", today.year().to_string()),
        ],
    );

    match degraded_reason {
        None => RenderOutcome::Ok(html),
        Some(reason) => RenderOutcome::Degraded { html, reason },
    }
}

/// Render a single news card.
///
/// Conditional regions (image, time, description) are pre-built fragments:
/// either the full markup or an empty string, bound as opaque values.
/// `ordinal` is the item's 1-based position in the rendered list, not a
/// stable content-derived id.
fn render_card(
    engine: &impl ExpandTemplate,
    card_template: &str,
    item: &NewsItem,
    ordinal: usize,
) -> String {
    let thumbnail_html = match item.thumbnail.as_deref() {
        Some(src) if !src.is_empty() => format!(
            r#"<div class="news-card-image"><img src="{}" alt="{}" loading="lazy"></div>"#,
            src, item.title
        ),
        _ => String::new(),
    };

    let (time_html, time_meta) = match item.time.as_deref() {
        Some(time) if !time.is_empty() => (
            format!(r#"<div class="news-time">{time}</div>"#),
            format!(" • <strong>Hora:</strong> {time}"),
        ),
        _ => (String::new(), String::new()),
    };

    let description_html = match item.display_description() {
        Some(description) => {
            format!(r#"<div class="news-description"><p>{description}</p></div>"#)
        }
        None => String::new(),
    };

    engine.expand(
        card_template,
        &[
            ("THUMBNAIL_HTML", thumbnail_html),
            ("NEWS_ID", ordinal.to_string()),
            ("CATEGORY", item.category.clone()),
            ("TIME_HTML", time_html),
            ("LINK", item.link.clone()),
            ("TITLE", item.title.clone()),
            ("DESCRIPTION_HTML", description_html),
            ("DATE", item.date.to_string()),
            ("TIME_META", time_meta),
        ],
    )
}

/// Copy the stylesheet asset into the output directory, overwriting any
/// prior copy. Returns `false` (without error) when no stylesheet exists at
/// the known location.
#[instrument(level = "info", skip_all, fields(%templates_dir, %output_dir))]
pub async fn copy_stylesheet(
    templates_dir: &str,
    output_dir: &str,
) -> Result<bool, Box<dyn Error>> {
    let source = format!("{}/{}", templates_dir.trim_end_matches('/'), STYLESHEET);
    let dest = format!("{}/{}", output_dir.trim_end_matches('/'), STYLESHEET);

    if !Path::new(&source).exists() {
        warn!(path = %source, "Stylesheet not found; skipping copy");
        return Ok(false);
    }

    fs::copy(&source, &dest).await?;
    info!(from = %source, to = %dest, "Copied stylesheet");
    Ok(true)
}
