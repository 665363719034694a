use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub dictionary: DictionarySettings,
}

/// Settings for the search engine itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Quiet period after the last keystroke before a lookup is issued (default: 300).
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Regex a trimmed query must match to be submitted.
    #[serde(default = "default_query_pattern")]
    pub query_pattern: String,
    /// What happens to the typed query and results when a lookup fails.
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

/// Dictionary endpoint configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionarySettings {
    /// Base URL for the dictionary API (e.g., "https://dictionary.skyeng.ru").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 10).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// Number of queries kept in the response cache; 0 disables it (default: 10).
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

/// Policy applied by the reducer when a lookup fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Drop the typed query and previous results; the user starts over.
    #[default]
    ResetContext,
    /// Keep query and results, only mark the phase as failed.
    KeepContext,
}

pub(crate) const DEFAULT_QUERY_PATTERN: &str = "^[a-zA-Z]{2,}[a-zA-Z ]*$";

fn default_debounce_ms() -> u64 {
    300
}

fn default_query_pattern() -> String {
    DEFAULT_QUERY_PATTERN.to_string()
}

fn default_base_url() -> String {
    "https://dictionary.skyeng.ru".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_cache_capacity() -> usize {
    10
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            query_pattern: default_query_pattern(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl Default for DictionarySettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            cache_capacity: default_cache_capacity(),
        }
    }
}
