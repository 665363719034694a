use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use translate_search::config::{Config, FailurePolicy};
use translate_search::logging::init_tracing;
use translate_search::search::{
    RequestPhase, SearchConfig, SearchFeature, SearchIntent, SearchState, StateSubscription,
};
use translate_search::translation::{CachedSource, DictionaryClient, TranslationSource};

const CLEAR_COMMAND: &str = ":clear";
const QUIT_COMMAND: &str = ":quit";

/// Search a remote dictionary as you type.
///
/// Every line read from stdin replaces the search text. `:clear` resets the
/// search, `:quit` (or end of input) exits.
#[derive(Debug, Parser)]
#[command(name = "translate-search", version, about)]
struct Args {
    /// Config file (default: ~/.config/translate-search/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the dictionary base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Override the debounce interval in milliseconds
    #[arg(long)]
    debounce_ms: Option<u64>,

    /// Keep the typed query and results when a lookup fails
    #[arg(long)]
    keep_context_on_failure: bool,

    /// Print image URLs under each meaning
    #[arg(long)]
    details: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file.as_deref());

    let config = load_config(&args)?;
    let search_config =
        SearchConfig::from_settings(&config.search).context("Invalid search settings")?;

    let client = DictionaryClient::new(&config.dictionary)
        .context("Failed to create dictionary client")?;
    let source: Arc<dyn TranslationSource> = Arc::new(CachedSource::new(
        client,
        config.dictionary.cache_capacity,
    ));

    tracing::info!(
        base_url = %config.dictionary.base_url,
        debounce_ms = search_config.debounce.as_millis() as u64,
        "Starting search"
    );

    let feature = SearchFeature::spawn(source, search_config);
    let renderer = tokio::spawn(render_states(feature.subscribe(), args.details));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    break;
                };
                let command = line.trim();
                if command == QUIT_COMMAND {
                    break;
                } else if command == CLEAR_COMMAND {
                    feature.accept(SearchIntent::Clear);
                } else {
                    feature.accept(SearchIntent::UpdateQuery(line));
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    feature.shutdown().await;
    // The subscription ends once the engine is gone.
    let _ = tokio::time::timeout(Duration::from_secs(1), renderer).await;
    Ok(())
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(base_url) = &args.base_url {
        config.dictionary.base_url = base_url.clone();
    }
    if let Some(debounce_ms) = args.debounce_ms {
        config.search.debounce_ms = debounce_ms;
    }
    if args.keep_context_on_failure {
        config.search.failure_policy = FailurePolicy::KeepContext;
    }

    config.validate()?;
    Ok(config)
}

async fn render_states(mut states: StateSubscription<SearchState>, details: bool) {
    let mut previous: Option<SearchState> = None;
    while let Some(state) = states.next().await {
        if previous.as_ref() == Some(&state) {
            continue;
        }
        print!("{}", render(&state, details));
        previous = Some(state);
    }
}

fn render(state: &SearchState, details: bool) -> String {
    match &state.phase {
        RequestPhase::Running => format!(
            "searching \"{}\"...\n",
            state.query.as_deref().unwrap_or_default()
        ),
        RequestPhase::Failed(cause) => format!("error: {}\n", cause),
        RequestPhase::Idle => {
            let mut out = String::new();
            for translation in state.results() {
                out.push_str(&translation.original_text);
                out.push('\n');
                for meaning in &translation.meanings {
                    out.push_str("    ");
                    out.push_str(&meaning.translated_text);
                    out.push('\n');
                    if details && !meaning.image_url.is_empty() {
                        out.push_str("      ");
                        out.push_str(&meaning.image_url);
                        out.push('\n');
                    }
                }
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use translate_search::translation::{Meaning, SourceError, Translation};

    fn dog() -> Vec<Translation> {
        vec![Translation::new(
            "dog",
            vec![Meaning::new("собака", "https://cdn.example.com/dog.png")],
        )]
    }

    #[test]
    fn renders_running_with_query() {
        let state = SearchState {
            query: Some("dog".to_string()),
            submit_allowed: true,
            phase: RequestPhase::Running,
            ..SearchState::default()
        };
        assert_eq!(render(&state, false), "searching \"dog\"...\n");
    }

    #[test]
    fn renders_results_with_optional_details() {
        let state = SearchState {
            query: Some("dog".to_string()),
            results: Some(dog()),
            submit_allowed: true,
            phase: RequestPhase::Idle,
        };
        assert_eq!(render(&state, false), "dog\n    собака\n");
        assert_eq!(
            render(&state, true),
            "dog\n    собака\n      https://cdn.example.com/dog.png\n"
        );
    }

    #[test]
    fn renders_failure() {
        let state = SearchState {
            phase: RequestPhase::Failed(SourceError::Transport("offline".to_string())),
            ..SearchState::default()
        };
        assert_eq!(render(&state, false), "error: Transport error: offline\n");
    }

    #[test]
    fn idle_without_results_renders_nothing() {
        assert_eq!(render(&SearchState::default(), false), "");
    }

    #[test]
    fn args_parse_overrides() {
        let args = Args::parse_from([
            "translate-search",
            "--base-url",
            "http://localhost:8080",
            "--debounce-ms",
            "50",
            "--keep-context-on-failure",
        ]);
        assert_eq!(args.base_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(args.debounce_ms, Some(50));
        assert!(args.keep_context_on_failure);
        assert!(!args.details);
    }
}
