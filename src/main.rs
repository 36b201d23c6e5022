//! # Diario Digital
//!
//! A daily news pipeline that scrapes the Diario Correo archive page,
//! deduplicates the stories into dated JSON editions, and renders them into
//! a static newspaper-style HTML site.
//!
//! ## Usage
//!
//! ```sh
//! diario_digital -d ./data -t ./templates -o ./docs
//! ```
//!
//! ## Architecture
//!
//! One invocation is one sequential pass:
//! 1. **Fetch**: Download the day's archive page (skippable with `--skip-fetch`)
//! 2. **Extract**: Parse story containers into deduplicated [`models::NewsItem`]s
//! 3. **Persist**: Replace the day's JSON archive with the extracted items
//! 4. **Render**: Reload the archive and compose the page from templates
//! 5. **Publish**: Write `index.html` and copy the stylesheet to the output dir
//!
//! Concurrent runs against the same output directory are unsafe; schedule
//! one run at a time.

use chrono::Local;
use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod archive;
mod cli;
mod config;
mod fetch;
mod models;
mod outputs;
mod scrapers;
mod utils;

use cli::Cli;
use config::SiteConfig;
use outputs::site::{RenderOutcome, TemplateSet, copy_stylesheet, render_site};
use outputs::template::FlatTemplate;
use utils::{ensure_writable_dir, truncate_for_log};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("diario_digital starting up");

    // Parse CLI and load site config
    let args = Cli::parse();
    debug!(?args.data_dir, ?args.templates_dir, ?args.output_dir, "Parsed CLI arguments");

    let mut site = SiteConfig::load(args.config.as_deref())?;
    if let Some(max_items) = args.max_items {
        site.max_items = max_items;
    }

    // Early check: ensure the output dir is writable
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let ingestion_date = args.date.unwrap_or_else(|| Local::now().date_naive());
    info!(%ingestion_date, "Ingestion date resolved");

    // ---- Fetch and extract ----
    if args.skip_fetch {
        info!("Skipping fetch; rendering from stored archives");
    } else {
        let url = scrapers::correo::archive_url(&site.base_url, ingestion_date);
        info!(%url, "Fetching archive page");
        let html = fetch::fetch_with_backoff(&url).await?;
        debug!(preview = %truncate_for_log(&html, 200), "Fetched archive page");

        let items = scrapers::correo::extract_news(&html, &site.base_url, ingestion_date);
        if items.is_empty() {
            warn!("Extraction produced zero items; persisting an empty edition");
        }

        archive::write_day(&args.data_dir, ingestion_date, &items).await?;
    }

    // ---- Reload the archive for rendering ----
    let loaded = if args.all_dates {
        archive::read_all_days(&args.data_dir).await
    } else {
        archive::read_day(&args.data_dir, ingestion_date).await
    };
    let items = match loaded {
        Ok(items) => items,
        Err(e) => {
            error!(
                date = %ingestion_date,
                error = %e,
                "No archive data available for the target date; aborting without output"
            );
            return Err(e);
        }
    };
    info!(count = items.len(), "Loaded items for rendering");

    // ---- Render ----
    let templates = TemplateSet::load(&args.templates_dir).await;
    let page = match render_site(
        &FlatTemplate,
        &items,
        &templates,
        &site,
        site.max_items,
        ingestion_date,
    ) {
        RenderOutcome::Ok(html) => html,
        RenderOutcome::Degraded { html, reason } => {
            warn!(%reason, "Rendering degraded; publishing the page anyway");
            html
        }
        RenderOutcome::Fatal(reason) => {
            error!(%reason, "Rendering failed; no page produced");
            return Err(reason.into());
        }
    };

    let page_path = format!("{}/index.html", args.output_dir.trim_end_matches('/'));
    tokio::fs::write(&page_path, &page).await?;
    info!(path = %page_path, bytes = page.len(), "Wrote site page");

    // Asset copy is attempted once; a failure degrades rather than aborts.
    match copy_stylesheet(&args.templates_dir, &args.output_dir).await {
        Ok(true) => {}
        Ok(false) => warn!("Site published without a stylesheet"),
        Err(e) => warn!(error = %e, "Stylesheet copy failed; site published without it"),
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        items = items.len(),
        "Execution complete"
    );

    Ok(())
}
