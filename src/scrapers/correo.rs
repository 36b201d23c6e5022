//! Diario Correo daily-archive extractor.
//!
//! The site lists one day's stories at
//! `https://diariocorreo.pe/archivo/todas/YYYY-MM-DD/`. Story markup hangs
//! off `story-item` class names with modifier suffixes the site appends
//! freely (`story-item--featured`, `story-item__title-link`, ...), so all
//! class matching here is prefix matching on class tokens, never exact.
//!
//! Extraction is a pure transform over already-fetched HTML; the network
//! side lives in [`crate::fetch`].

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use tracing::{debug, info, instrument};

use crate::models::NewsItem;

/// Class-token prefixes for the story markup.
const STORY_CLASS: &str = "story-item";
const TITLE_CLASS: &str = "story-item__title";
const SECTION_CLASS: &str = "story-item__section";

static DIV_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("div").unwrap());
static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());

/// URL of the site's archive page for one date.
pub fn archive_url(base_url: &str, date: NaiveDate) -> String {
    format!("{}/archivo/todas/{}/", base_url.trim_end_matches('/'), date)
}

/// Extract deduplicated news items from a rendered archive page.
///
/// Containers are `div` elements carrying a `story-item`-prefixed class. A
/// container without a title anchor cannot be keyed or displayed and is
/// skipped. The seen-links set lives only for the duration of this call:
/// the first occurrence of a link wins and later duplicates are discarded,
/// not merged. Items come back in document order; zero items is a valid
/// outcome, not an error.
#[instrument(level = "info", skip_all, fields(%ingestion_date, bytes = raw_html.len()))]
pub fn extract_news(raw_html: &str, base_url: &str, ingestion_date: NaiveDate) -> Vec<NewsItem> {
    let document = Html::parse_document(raw_html);

    let mut seen_links: HashSet<String> = HashSet::new();
    let mut items = Vec::new();

    for container in document.select(&DIV_SELECTOR) {
        if !has_class_prefix(&container, STORY_CLASS) {
            continue;
        }

        // A container without a title anchor is unusable; skip it entirely.
        let Some(title_anchor) = container
            .select(&ANCHOR_SELECTOR)
            .find(|a| has_class_prefix(a, TITLE_CLASS))
        else {
            continue;
        };

        let href = title_anchor.value().attr("href").unwrap_or("");
        if href.is_empty() {
            continue;
        }

        let link = normalize_link(base_url, href);
        if !seen_links.insert(link.clone()) {
            debug!(%link, "Duplicate link; keeping first occurrence");
            continue;
        }

        let title = match collapse_text(&title_anchor) {
            text if text.is_empty() => "Untitled".to_string(),
            text => text,
        };

        let category = container
            .select(&ANCHOR_SELECTOR)
            .find(|a| has_class_prefix(a, SECTION_CLASS))
            .map(|a| collapse_text(&a))
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| "General".to_string());

        items.push(NewsItem {
            title,
            link,
            category,
            date: ingestion_date,
            description: None,
            thumbnail: None,
            time: None,
            content: None,
        });
    }

    info!(count = items.len(), "Extracted news items");
    items
}

/// True when any class token on the element starts with `prefix`.
fn has_class_prefix(element: &ElementRef, prefix: &str) -> bool {
    element.value().classes().any(|class| class.starts_with(prefix))
}

/// Join all text under the element and collapse runs of whitespace.
fn collapse_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Prefix site-relative links with the base origin; leave absolute links as-is.
fn normalize_link(base_url: &str, href: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else {
        format!("{}{}", base_url.trim_end_matches('/'), href)
    }
}
