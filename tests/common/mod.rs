//! Shared test utilities: a scripted translation source and state helpers.

#![allow(dead_code, unused_imports)]

pub mod mock_dictionary;

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use translate_search::search::{RequestPhase, SearchState};
use translate_search::translation::{Meaning, SourceError, Translation, TranslationSource};

/// What the scripted source answers for one lookup.
#[derive(Debug, Clone)]
pub enum Reply {
    Ok(Vec<Translation>),
    Err(SourceError),
    /// Never completes; only cancellation ends the lookup.
    Never,
}

#[derive(Debug, Clone)]
struct Scripted {
    reply: Reply,
    delay: Duration,
}

/// In-memory source answering from a queue of scripted replies.
///
/// Unscripted lookups succeed with no results. Tracks every query it was
/// asked and how many lookups were alive at the same time.
#[derive(Default)]
pub struct ScriptedSource {
    replies: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<String>>,
    active: AtomicUsize,
    max_active: AtomicUsize,
    completed: AtomicUsize,
}

impl ScriptedSource {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, reply: Reply) {
        self.reply_after(reply, Duration::ZERO);
    }

    pub fn reply_after(&self, reply: Reply, delay: Duration) {
        self.replies.lock().push_back(Scripted { reply, delay });
    }

    /// Queries looked up so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// Highest number of lookups alive at once.
    pub fn max_active(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }

    /// Lookups that ran to completion (not cancelled).
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

struct ActiveGuard<'a>(&'a AtomicUsize);

impl Drop for ActiveGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl TranslationSource for ScriptedSource {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn lookup(&self, query: &str) -> Result<Vec<Translation>, SourceError> {
        self.calls.lock().push(query.to_string());
        let scripted = self.replies.lock().pop_front().unwrap_or(Scripted {
            reply: Reply::Ok(Vec::new()),
            delay: Duration::ZERO,
        });

        let now_active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(now_active, Ordering::SeqCst);
        let _guard = ActiveGuard(&self.active);

        if !scripted.delay.is_zero() {
            tokio::time::sleep(scripted.delay).await;
        }

        let result = match scripted.reply {
            Reply::Ok(results) => Ok(results),
            Reply::Err(cause) => Err(cause),
            Reply::Never => std::future::pending().await,
        };
        self.completed.fetch_add(1, Ordering::SeqCst);
        result
    }
}

pub fn translations(word: &str) -> Vec<Translation> {
    vec![Translation::new(
        word,
        vec![Meaning::new(
            format!("{} translated", word),
            format!("https://cdn.example.com/{}.png", word),
        )],
    )]
}

pub fn state(query: &str, submit_allowed: bool, phase: RequestPhase) -> SearchState {
    SearchState {
        query: Some(query.to_string()),
        results: None,
        submit_allowed,
        phase,
    }
}

pub fn with_results(mut state: SearchState, results: Vec<Translation>) -> SearchState {
    state.results = Some(results);
    state
}
