//! Configuration file support.
//!
//! Everything has a default, so an empty JSON object (or no file at all) yields a
//! working setup pointed at the Japanese Wikipedia.

use std::path::Path;

use serde::Deserialize;

use crate::{Result, DEFAULT_START, DEFAULT_WIKI_URL};

/// Text tokens the extractor keys on inside an info block.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Markers {
    /// Exact `class` attribute of an info block `<table>`.
    pub block_class: String,
    pub latitude: String,
    pub longitude: String,
    pub degree: String,
    pub minute: String,
    pub second: String,
    /// Label of a ridership row.
    pub passengers: String,
    /// Unit that ends the ridership figure.
    pub passengers_unit: String,
    pub prev_glyph: String,
    pub next_glyph: String,
    /// Pattern a raw `href` must match to count as an outbound article link.
    pub link_pattern: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            block_class: "infobox bordered".to_string(),
            latitude: "北緯".to_string(),
            longitude: "東経".to_string(),
            degree: "度".to_string(),
            minute: "分".to_string(),
            second: "秒".to_string(),
            passengers: "人員".to_string(),
            passengers_unit: "人/日".to_string(),
            prev_glyph: "◄".to_string(),
            next_glyph: "►".to_string(),
            link_pattern: "^/wiki/[^:]*$".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub wiki_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Article the walk starts from.
    pub start: String,
    /// 0 means no limit.
    pub max_steps: usize,
    pub seed: Option<u64>,
    pub stop_on_revisit: bool,
    pub markers: Markers,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wiki_url: DEFAULT_WIKI_URL.to_string(),
            user_agent: concat!("station-scrap/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 30,
            start: DEFAULT_START.to_string(),
            max_steps: 20,
            seed: None,
            stop_on_revisit: false,
            markers: Markers::default(),
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::info!("reading config: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        tracing::debug!(?config, "loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::Error;

    #[test]
    fn empty_object_is_all_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.wiki_url, "https://ja.wikipedia.org");
        assert_eq!(config.markers.latitude, "北緯");
    }

    #[test]
    fn partial_markers_keep_other_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"max_steps": 3, "markers": {"latitude": "N"}}"#).unwrap();
        assert_eq!(config.max_steps, 3);
        assert_eq!(config.markers.latitude, "N");
        assert_eq!(config.markers.longitude, "東経");
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"seed": 7, "start": "/wiki/東京駅"}}"#).unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.start, "/wiki/東京駅");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Config::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn invalid_json_is_json_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "max_steps: 3").unwrap();
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
