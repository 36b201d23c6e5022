//! Site configuration.
//!
//! A small YAML file (`site.yaml`) controls the published site's identity
//! and the card cap. Every field has a default, so a missing file or a
//! partial file both work; the CLI's `--max-items` flag overrides the
//! configured cap last.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use tracing::{info, instrument};
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Page `<title>` and masthead text.
    #[serde(default = "default_site_title")]
    pub site_title: String,

    /// Meta description bound into the page template.
    #[serde(default = "default_site_description")]
    pub site_description: String,

    /// Origin of the source site; relative story links are prefixed with it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Maximum number of cards on the rendered page.
    #[serde(default = "default_max_items")]
    pub max_items: usize,
}

fn default_site_title() -> String {
    "Diario Digital - Noticias del Perú".to_string()
}

fn default_site_description() -> String {
    "Noticias diarias extraídas automáticamente del Diario Correo".to_string()
}

fn default_base_url() -> String {
    "https://diariocorreo.pe".to_string()
}

fn default_max_items() -> usize {
    50
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_title: default_site_title(),
            site_description: default_site_description(),
            base_url: default_base_url(),
            max_items: default_max_items(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from an optional YAML file path.
    ///
    /// No path means defaults. A path that cannot be read or parsed is an
    /// error; a configured `base_url` that is not a valid URL is too.
    #[instrument(level = "info", skip_all, fields(path = ?path))]
    pub fn load(path: Option<&str>) -> Result<Self, Box<dyn Error>> {
        let config = match path {
            Some(path) => {
                let raw = fs::read_to_string(path)?;
                let config: SiteConfig = serde_yaml::from_str(&raw)?;
                info!(%path, "Loaded site configuration");
                config
            }
            None => {
                info!("No config file given; using defaults");
                SiteConfig::default()
            }
        };

        Url::parse(&config.base_url)
            .map_err(|e| format!("invalid base_url {:?}: {e}", config.base_url))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_diario_correo() {
        let config = SiteConfig::default();
        assert_eq!(config.base_url, "https://diariocorreo.pe");
        assert_eq!(config.max_items, 50);
        assert!(config.site_title.contains("Diario Digital"));
    }

    #[test]
    fn load_without_path_uses_defaults() {
        let config = SiteConfig::load(None).unwrap();
        assert_eq!(config.max_items, 50);
    }

    #[test]
    fn partial_yaml_fills_remaining_fields_with_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("site.yaml");
        std::fs::write(&path, "site_title: Mi Diario\nmax_items: 10\n").unwrap();

        let config = SiteConfig::load(path.to_str()).unwrap();
        assert_eq!(config.site_title, "Mi Diario");
        assert_eq!(config.max_items, 10);
        assert_eq!(config.base_url, "https://diariocorreo.pe");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("site.yaml");
        std::fs::write(&path, "base_url: not a url\n").unwrap();

        assert!(SiteConfig::load(path.to_str()).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(SiteConfig::load(Some("/definitely/not/here.yaml")).is_err());
    }
}
