use crate::core::lines::{
    DEFAULT_MAX_HEADER_LEN, DEFAULT_MAX_HEADER_WORDS, DEFAULT_MIN_DESCRIPTION_LEN,
};
use crate::utils::error::{Result, ScrapeError};
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_source_id, validate_url, Validate,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid")
});

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub http: HttpConfig,
    pub heuristics: HeuristicsConfig,
    /// Date used to pick the weekday; defaults to the local date.
    pub target_date: Option<NaiveDate>,
    pub sources: BTreeMap<String, SourceSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Prefix the percent-encoded page URL is appended to, e.g. `https://corsproxy.io/?`.
    pub proxy: Option<String>,
    pub timeout_seconds: u64,
    pub user_agent: String,
    pub concurrent_requests: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            proxy: None,
            timeout_seconds: 15,
            user_agent: concat!("lunch-scraper/", env!("CARGO_PKG_VERSION")).to_string(),
            concurrent_requests: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicsConfig {
    pub max_header_len: usize,
    pub max_header_words: usize,
    pub min_description_len: usize,
}

impl Default for HeuristicsConfig {
    fn default() -> Self {
        Self {
            max_header_len: DEFAULT_MAX_HEADER_LEN,
            max_header_words: DEFAULT_MAX_HEADER_WORDS,
            min_description_len: DEFAULT_MIN_DESCRIPTION_LEN,
        }
    }
}

/// Per-source overrides from a `[sources.<id>]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    pub enabled: Option<bool>,
    pub url: Option<String>,
    pub max_header_len: Option<usize>,
    pub max_header_words: Option<usize>,
    pub min_description_len: Option<usize>,
}

impl ScraperConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScrapeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content)
            .map_err(|e| ScrapeError::config(format!("TOML parsing error: {}", e)))
    }

    /// 替換環境變數 (例如 ${LUNCH_PROXY})
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn source_enabled(&self, id: &str) -> bool {
        self.sources
            .get(id)
            .and_then(|s| s.enabled)
            .unwrap_or(true)
    }

    pub fn source_settings(&self, id: &str) -> Option<&SourceSettings> {
        self.sources.get(id)
    }

    /// Global heuristics with the overrides of one source applied.
    pub fn heuristics_for(&self, id: &str) -> HeuristicsConfig {
        let mut heuristics = self.heuristics;
        if let Some(settings) = self.sources.get(id) {
            if let Some(len) = settings.max_header_len {
                heuristics.max_header_len = len;
            }
            if let Some(words) = settings.max_header_words {
                heuristics.max_header_words = words;
            }
            if let Some(len) = settings.min_description_len {
                heuristics.min_description_len = len;
            }
        }
        heuristics
    }
}

impl Validate for HeuristicsConfig {
    fn validate(&self) -> Result<()> {
        validate_range("heuristics.max_header_len", self.max_header_len, 5, 500)?;
        validate_range("heuristics.max_header_words", self.max_header_words, 1, 50)?;
        validate_range("heuristics.min_description_len", self.min_description_len, 0, 500)?;
        Ok(())
    }
}

impl Validate for ScraperConfig {
    fn validate(&self) -> Result<()> {
        if let Some(proxy) = &self.http.proxy {
            validate_url("http.proxy", proxy)?;
        }
        validate_range("http.timeout_seconds", self.http.timeout_seconds, 1, 300)?;
        validate_range("http.concurrent_requests", self.http.concurrent_requests, 1, 32)?;
        validate_non_empty_string("http.user_agent", &self.http.user_agent)?;

        self.heuristics.validate()?;

        for (id, settings) in &self.sources {
            validate_source_id("sources", id)?;
            if let Some(url) = &settings.url {
                validate_url(&format!("sources.{}.url", id), url)?;
            }
            self.heuristics_for(id).validate()?;
        }

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }
}
