//! Command-line interface definitions for Diario Digital.
//!
//! All paths default to the conventional repo layout (`data/`, `templates/`,
//! `docs/`), so a bare invocation scrapes today's archive and regenerates
//! the site in place.

use chrono::NaiveDate;
use clap::Parser;

/// Command-line arguments for the Diario Digital pipeline.
///
/// # Examples
///
/// ```sh
/// # Scrape today's archive and publish the site
/// diario_digital
///
/// # Re-render yesterday's edition without touching the network
/// diario_digital --date 2026-08-07 --skip-fetch
///
/// # Aggregate every stored edition into one page, newest first
/// diario_digital --skip-fetch --all-dates
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory holding the dated JSON archives
    #[arg(short, long, default_value = "data")]
    pub data_dir: String,

    /// Directory holding the page/card templates and the stylesheet
    #[arg(short, long, default_value = "templates")]
    pub templates_dir: String,

    /// Output directory for the generated site
    #[arg(short, long, default_value = "docs")]
    pub output_dir: String,

    /// Optional path to a site.yaml configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Ingestion date override (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Skip fetching and extraction; render from the stored archive only
    #[arg(long)]
    pub skip_fetch: bool,

    /// Render every stored edition, newest first, instead of one day
    #[arg(long)]
    pub all_dates: bool,

    /// Override the configured maximum number of rendered cards
    #[arg(long)]
    pub max_items: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["diario_digital"]);

        assert_eq!(cli.data_dir, "data");
        assert_eq!(cli.templates_dir, "templates");
        assert_eq!(cli.output_dir, "docs");
        assert_eq!(cli.config, None);
        assert_eq!(cli.date, None);
        assert!(!cli.skip_fetch);
        assert!(!cli.all_dates);
    }

    #[test]
    fn test_cli_long_flags() {
        let cli = Cli::parse_from([
            "diario_digital",
            "--data-dir",
            "/tmp/data",
            "--output-dir",
            "/tmp/site",
            "--date",
            "2026-08-07",
            "--skip-fetch",
            "--max-items",
            "10",
        ]);

        assert_eq!(cli.data_dir, "/tmp/data");
        assert_eq!(cli.output_dir, "/tmp/site");
        assert_eq!(cli.date, Some("2026-08-07".parse().unwrap()));
        assert!(cli.skip_fetch);
        assert_eq!(cli.max_items, Some(10));
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["diario_digital", "-d", "d1", "-t", "t1", "-o", "o1"]);

        assert_eq!(cli.data_dir, "d1");
        assert_eq!(cli.templates_dir, "t1");
        assert_eq!(cli.output_dir, "o1");
    }

    #[test]
    fn test_cli_rejects_bad_date() {
        assert!(Cli::try_parse_from(["diario_digital", "--date", "08/08/2026"]).is_err());
    }
}
