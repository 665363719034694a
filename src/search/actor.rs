//! Request lifecycle controller.
//!
//! The actor turns intents into effects and owns the single in-flight lookup.
//! It is driven by the engine task: intents arrive through [`SearchActor::handle`],
//! debounce expiries through [`SearchActor::on_debounced`] and lookup
//! completions through [`SearchActor::on_lookup_finished`]. Every asynchronous
//! completion carries the generation it was started with and is dropped when a
//! newer intent superseded it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::search::debounce::{Debouncer, Fired};
use crate::search::effect::SearchEffect;
use crate::search::intent::SearchIntent;
use crate::search::state::SearchState;
use crate::search::validator::QueryValidator;
use crate::translation::{SourceError, Translation, TranslationSource};

/// Completion of one lookup task.
#[derive(Debug)]
pub struct LookupFinished {
    id: u64,
    result: Result<Vec<Translation>, SourceError>,
}

/// Receivers the engine must poll and feed back into the actor.
pub struct ActorChannels {
    pub debounced: mpsc::UnboundedReceiver<Fired<String>>,
    pub lookups: mpsc::UnboundedReceiver<LookupFinished>,
}

struct InFlight {
    id: u64,
    query: String,
    token: CancellationToken,
}

pub struct SearchActor {
    source: Arc<dyn TranslationSource>,
    validator: QueryValidator,
    gate: Debouncer<String>,
    /// Set by `Initialize`; candidates offered before that are dropped.
    gate_open: bool,
    lookups_tx: mpsc::UnboundedSender<LookupFinished>,
    next_lookup_id: u64,
    in_flight: Option<InFlight>,
}

impl SearchActor {
    /// Create an actor. Must be called from within a tokio runtime.
    pub fn new(
        source: Arc<dyn TranslationSource>,
        validator: QueryValidator,
        debounce: Duration,
    ) -> (Self, ActorChannels) {
        let (gate, debounced) = Debouncer::new(debounce);
        let (lookups_tx, lookups) = mpsc::unbounded_channel();

        let actor = Self {
            source,
            validator,
            gate,
            gate_open: false,
            lookups_tx,
            next_lookup_id: 0,
            in_flight: None,
        };
        (actor, ActorChannels { debounced, lookups })
    }

    /// Handle one intent and return its immediate effects, in order.
    pub fn handle(&mut self, state: &SearchState, intent: SearchIntent) -> Vec<SearchEffect> {
        match intent {
            SearchIntent::Initialize => {
                if self.gate_open {
                    tracing::debug!("Search actor already initialized");
                } else {
                    self.gate_open = true;
                    tracing::debug!(
                        debounce_ms = self.gate.interval().as_millis() as u64,
                        source = self.source.name(),
                        "Search actor initialized"
                    );
                }
                Vec::new()
            }
            SearchIntent::UpdateQuery(query) => {
                let mut effects: Vec<SearchEffect> = self.abort().into_iter().collect();
                let submit_allowed = self.validator.is_submittable(&query);
                effects.push(SearchEffect::QueryUpdated {
                    query,
                    submit_allowed,
                });
                effects
            }
            SearchIntent::ScheduleSubmit(query) => {
                if self.gate_open {
                    tracing::debug!(query = %query, phase = ?state.phase, "Submission scheduled");
                    self.gate.push(query);
                } else {
                    tracing::debug!(query = %query, "Dropping submission before initialization");
                }
                Vec::new()
            }
            SearchIntent::Clear => {
                let mut effects: Vec<SearchEffect> = self.abort().into_iter().collect();
                effects.push(SearchEffect::ResultsCleared);
                effects
            }
        }
    }

    /// A debounce timer expired. Starts the lookup if the candidate is current.
    pub fn on_debounced(&mut self, fired: Fired<String>) -> Vec<SearchEffect> {
        let Some(query) = self.gate.accept(fired) else {
            tracing::debug!("Discarding stale debounce expiry");
            return Vec::new();
        };

        let mut effects = Vec::with_capacity(2);
        // The previous lookup must be visibly cancelled before the next one starts.
        if let Some(previous) = self.in_flight.take() {
            previous.token.cancel();
            tracing::debug!(
                lookup = previous.id,
                query = %previous.query,
                "Lookup superseded by newer submission"
            );
            effects.push(SearchEffect::SubmissionCancelled);
        }

        self.start_lookup(query);
        effects.push(SearchEffect::SubmissionStarted);
        effects
    }

    /// A lookup task completed. Stale completions produce nothing.
    pub fn on_lookup_finished(&mut self, finished: LookupFinished) -> Option<SearchEffect> {
        let current = self.in_flight.as_ref().map(|lookup| lookup.id);
        if current != Some(finished.id) {
            tracing::debug!(lookup = finished.id, "Discarding stale lookup completion");
            return None;
        }

        let lookup = self.in_flight.take()?;
        match finished.result {
            Ok(results) => {
                tracing::info!(
                    lookup = lookup.id,
                    query = %lookup.query,
                    results = results.len(),
                    "Lookup finished"
                );
                Some(SearchEffect::ResultsReceived(results))
            }
            Err(cause) => {
                tracing::warn!(
                    lookup = lookup.id,
                    query = %lookup.query,
                    error = %cause,
                    "Lookup failed"
                );
                Some(SearchEffect::SubmissionFailed(cause))
            }
        }
    }

    /// Whether a lookup is currently outstanding.
    pub fn has_lookup_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether a candidate is waiting for its quiet period to elapse.
    pub fn has_pending_submission(&self) -> bool {
        self.gate.is_pending()
    }

    /// Abort signal shared by `UpdateQuery` and `Clear`.
    ///
    /// Cancels the pending debounce and the in-flight lookup. Only the latter
    /// is observable, as `SubmissionCancelled`.
    fn abort(&mut self) -> Option<SearchEffect> {
        if self.gate.cancel() {
            tracing::debug!("Pending submission cancelled");
        }

        let lookup = self.in_flight.take()?;
        lookup.token.cancel();
        tracing::info!(lookup = lookup.id, query = %lookup.query, "Lookup cancelled");
        Some(SearchEffect::SubmissionCancelled)
    }

    fn start_lookup(&mut self, query: String) {
        self.next_lookup_id += 1;
        let id = self.next_lookup_id;
        let token = CancellationToken::new();

        let task_token = token.clone();
        let source = Arc::clone(&self.source);
        let tx = self.lookups_tx.clone();
        let task_query = query.clone();
        tokio::spawn(async move {
            // Losing the race to cancellation drops the lookup future, which
            // abandons the request mid-flight.
            tokio::select! {
                _ = task_token.cancelled() => {}
                result = source.lookup(&task_query) => {
                    let _ = tx.send(LookupFinished { id, result });
                }
            }
        });

        tracing::info!(lookup = id, query = %query, "Lookup started");
        self.in_flight = Some(InFlight { id, query, token });
    }
}

impl Drop for SearchActor {
    fn drop(&mut self) {
        if let Some(lookup) = self.in_flight.take() {
            lookup.token.cancel();
        }
    }
}
