mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, DictionarySettings, FailurePolicy, SearchSettings};
pub(crate) use types::DEFAULT_QUERY_PATTERN;
