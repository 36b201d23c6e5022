//! Data model for extracted news items and their dated archives.
//!
//! A [`NewsItem`] is one article pulled out of the source site's daily
//! archive page. Items are written once per ingestion run, read back for
//! rendering, and never updated in place. The serialized shape matches the
//! on-disk archive files (`news_YYYY-MM-DD.json`), where optional fields are
//! simply absent rather than null or empty.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::utils::truncate_chars;

/// Maximum length of a rendered description, in characters. Longer text is
/// cut at this boundary and suffixed with `"..."`.
pub const DESCRIPTION_MAX_CHARS: usize = 180;

/// Number of leading words kept when deriving a description from raw content.
const DERIVED_DESCRIPTION_WORDS: usize = 25;

/// Markup markers stripped from raw content before word-splitting: `*`, `[`, `]`.
static MARKUP_MARKERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[*\[\]]").unwrap());

/// One news article extracted from the source site.
///
/// `link` is the dedup key: within a single extraction run no two items share
/// a link. `date` is the ingestion date, not the article's publish date.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewsItem {
    /// Headline text. `"Untitled"` when the title anchor had no text.
    pub title: String,
    /// Absolute article URL. Unique within one extraction run.
    pub link: String,
    /// Section name from the site, `"General"` when the page had none.
    pub category: String,
    /// Ingestion date (the day the archive page was scraped).
    pub date: NaiveDate,
    /// Explicit summary, when the archive carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Image URL for the card, when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Display time string, when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Raw article body. Only used as a fallback source for the description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl NewsItem {
    /// Resolve the description shown on the rendered card.
    ///
    /// Prefers the explicit `description`; otherwise derives one from
    /// `content` by stripping markup markers and keeping the first 25 words.
    /// The resolved text is truncated to [`DESCRIPTION_MAX_CHARS`] characters
    /// with an ellipsis appended only when truncation occurred. Returns
    /// `None` when neither field yields any text.
    pub fn display_description(&self) -> Option<String> {
        let resolved = match self.description.as_deref() {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => {
                let content = self.content.as_deref().unwrap_or("");
                let stripped = MARKUP_MARKERS.replace_all(content, "");
                stripped
                    .split_whitespace()
                    .take(DERIVED_DESCRIPTION_WORDS)
                    .collect::<Vec<_>>()
                    .join(" ")
            }
        };

        if resolved.is_empty() {
            None
        } else {
            Some(truncate_chars(&resolved, DESCRIPTION_MAX_CHARS))
        }
    }
}
