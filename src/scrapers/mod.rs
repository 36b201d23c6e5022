//! Source-site extraction.
//!
//! One submodule per source. The pipeline is single-source by design, so
//! today that is just [`correo`], which exports:
//!
//! - `archive_url(base, date)`: the day's archive page URL
//! - `extract_news(html, base, date)`: rendered HTML → deduplicated items
//!
//! Extraction is pure and synchronous; fetching belongs to [`crate::fetch`].

pub mod correo;
