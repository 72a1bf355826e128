use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Contents of the optional TOML config file. Every key is optional.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Job source
    pub endpoint: Option<String>,
    pub timeout_sec: Option<u64>,

    // Paging
    pub page_limit: Option<usize>,
    pub page_stride: Option<usize>,

    // Filtering
    pub search_debounce_ms: Option<u64>,
    /// "replace" or "accumulate"
    pub unfiltered_pages: Option<String>,
    /// "latest-page" or "all-pages"
    pub vocabulary: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
