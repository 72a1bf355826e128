mod file_config;

pub use file_config::FileConfig;

use crate::board::{BoardConfig, UnfilteredPagePolicy, VocabularyScope};
use crate::source::{SourceConfig, DEFAULT_ENDPOINT};
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::time::Duration;

/// Settings given on the command line.
/// Each of them can be overridden by the TOML config file.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub endpoint: String,
    pub timeout_sec: u64,
    pub page_limit: usize,
    pub page_stride: usize,
    pub search_debounce_ms: u64,
    pub unfiltered_pages: UnfilteredPagePolicy,
    pub vocabulary: VocabularyScope,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_sec: 30,
            page_limit: 12,
            page_stride: 10,
            search_debounce_ms: 500,
            unfiltered_pages: UnfilteredPagePolicy::default(),
            vocabulary: VocabularyScope::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub endpoint: String,
    pub timeout_sec: u64,
    pub page_limit: usize,
    pub page_stride: usize,
    pub search_debounce_ms: u64,
    pub unfiltered_pages: UnfilteredPagePolicy,
    pub vocabulary: VocabularyScope,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let endpoint = file.endpoint.unwrap_or_else(|| cli.endpoint.clone());
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            bail!("Endpoint must be an http(s) URL: {:?}", endpoint);
        }

        let timeout_sec = file.timeout_sec.unwrap_or(cli.timeout_sec);
        if timeout_sec == 0 {
            bail!("timeout_sec must be greater than zero");
        }

        let page_limit = file.page_limit.unwrap_or(cli.page_limit);
        if page_limit == 0 {
            bail!("page_limit must be greater than zero");
        }
        let page_stride = file.page_stride.unwrap_or(cli.page_stride);
        if page_stride == 0 {
            bail!("page_stride must be greater than zero");
        }

        let search_debounce_ms = file.search_debounce_ms.unwrap_or(cli.search_debounce_ms);

        let unfiltered_pages = match file.unfiltered_pages {
            Some(s) => parse_value_enum::<UnfilteredPagePolicy>("unfiltered_pages", &s)?,
            None => cli.unfiltered_pages,
        };
        let vocabulary = match file.vocabulary {
            Some(s) => parse_value_enum::<VocabularyScope>("vocabulary", &s)?,
            None => cli.vocabulary,
        };

        Ok(Self {
            endpoint,
            timeout_sec,
            page_limit,
            page_stride,
            search_debounce_ms,
            unfiltered_pages,
            vocabulary,
        })
    }

    pub fn board_config(&self) -> BoardConfig {
        BoardConfig {
            page_limit: self.page_limit,
            page_stride: self.page_stride,
            search_debounce: Duration::from_millis(self.search_debounce_ms),
            unfiltered_pages: self.unfiltered_pages,
            vocabulary: self.vocabulary,
        }
    }

    pub fn source_config(&self) -> SourceConfig {
        SourceConfig {
            endpoint: self.endpoint.clone(),
            timeout: Duration::from_secs(self.timeout_sec),
        }
    }
}

/// Parses a config string with clap's ValueEnum names, case-insensitively.
fn parse_value_enum<T: ValueEnum>(key: &str, s: &str) -> Result<T> {
    match T::from_str(s, true) {
        Ok(value) => Ok(value),
        Err(_) => {
            let accepted: Vec<String> = T::value_variants()
                .iter()
                .filter_map(|v| v.to_possible_value())
                .map(|v| v.get_name().to_string())
                .collect();
            bail!(
                "Invalid value {:?} for {}, expected one of: {}",
                s,
                key,
                accepted.join(", ")
            )
        }
    }
}
