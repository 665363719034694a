//! Search feature: actor, reducer and post-processor wired into one unit.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::{FailurePolicy, SearchSettings};
use crate::mvi::{PostProcessor, Reducer};
use crate::search::actor::{ActorChannels, SearchActor};
use crate::search::effect::SearchEffect;
use crate::search::intent::SearchIntent;
use crate::search::post_processor::SearchPostProcessor;
use crate::search::reducer::SearchReducer;
use crate::search::state::SearchState;
use crate::search::store::{StateStore, StateSubscription};
use crate::search::validator::{QueryValidator, ValidatorError};
use crate::translation::TranslationSource;

/// Construction-time settings of the search engine.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Quiet period before a scheduled submission fires.
    pub debounce: Duration,
    pub validator: QueryValidator,
    pub failure_policy: FailurePolicy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            validator: QueryValidator::default(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl SearchConfig {
    /// Build from the `[search]` config section.
    pub fn from_settings(settings: &SearchSettings) -> Result<Self, ValidatorError> {
        Ok(Self {
            debounce: Duration::from_millis(settings.debounce_ms),
            validator: QueryValidator::new(&settings.query_pattern)?,
            failure_policy: settings.failure_policy,
        })
    }
}

/// Intents in, states out.
///
/// A single engine task owns the state and applies every effect one at a
/// time. `accept` is fire-and-forget and can be called from any thread;
/// `subscribe` replays the current state and then every later one.
pub struct SearchFeature {
    intents: mpsc::UnboundedSender<SearchIntent>,
    store: Arc<StateStore<SearchState>>,
    engine: JoinHandle<()>,
}

impl SearchFeature {
    /// Start the engine task. Must be called from within a tokio runtime.
    ///
    /// `Initialize` is queued before this returns, so it is processed ahead
    /// of any intent accepted afterwards.
    pub fn spawn(source: Arc<dyn TranslationSource>, config: SearchConfig) -> Self {
        let (intents, intents_rx) = mpsc::unbounded_channel();
        let store = Arc::new(StateStore::new(SearchState::default()));
        let (actor, channels) = SearchActor::new(source, config.validator, config.debounce);

        let engine = Engine {
            state: SearchState::default(),
            actor,
            reducer: SearchReducer::new(config.failure_policy),
            store: Arc::clone(&store),
        };

        let _ = intents.send(SearchIntent::Initialize);
        let engine = tokio::spawn(engine.run(intents_rx, channels));

        Self {
            intents,
            store,
            engine,
        }
    }

    /// Queue an intent for the engine.
    pub fn accept(&self, intent: SearchIntent) {
        if self.intents.send(intent).is_err() {
            tracing::warn!("Search engine stopped; intent dropped");
        }
    }

    /// Subscribe to state snapshots, starting with the current one.
    pub fn subscribe(&self) -> StateSubscription<SearchState> {
        self.store.subscribe()
    }

    /// Get the current state snapshot.
    pub fn state(&self) -> SearchState {
        self.store.current()
    }

    /// Stop the engine and wait for it to exit.
    ///
    /// Pending timers and the in-flight lookup are cancelled; subscriptions
    /// end after the last published state.
    pub async fn shutdown(self) {
        let Self { intents, engine, .. } = self;
        drop(intents);
        if let Err(e) = engine.await {
            tracing::warn!(error = %e, "Search engine task failed");
        }
    }
}

struct Engine {
    state: SearchState,
    actor: SearchActor,
    reducer: SearchReducer,
    store: Arc<StateStore<SearchState>>,
}

impl Engine {
    async fn run(
        mut self,
        mut intents: mpsc::UnboundedReceiver<SearchIntent>,
        mut channels: ActorChannels,
    ) {
        loop {
            tokio::select! {
                intent = intents.recv() => match intent {
                    Some(intent) => self.dispatch(intent),
                    None => break,
                },
                Some(fired) = channels.debounced.recv() => {
                    let effects = self.actor.on_debounced(fired);
                    self.apply_all(SearchIntent::Initialize, effects);
                }
                Some(finished) = channels.lookups.recv() => {
                    let effects = self.actor.on_lookup_finished(finished).into_iter().collect();
                    self.apply_all(SearchIntent::Initialize, effects);
                }
            }
        }

        tracing::debug!("Search engine stopped");
    }

    /// Run an intent and every follow-up it synthesizes, in FIFO order.
    fn dispatch(&mut self, intent: SearchIntent) {
        let mut queue = VecDeque::from([intent]);
        while let Some(intent) = queue.pop_front() {
            tracing::debug!(intent = ?intent, "Handling intent");
            let effects = self.actor.handle(&self.state, intent.clone());
            for effect in effects {
                if let Some(next) = self.apply(&intent, effect) {
                    queue.push_back(next);
                }
            }
        }
    }

    /// Apply effects that did not come straight from an intent.
    ///
    /// Debounce and lookup completions belong to the `Initialize`
    /// subscription, so that is the intent the post-processor sees.
    fn apply_all(&mut self, origin: SearchIntent, effects: Vec<SearchEffect>) {
        for effect in effects {
            if let Some(next) = self.apply(&origin, effect) {
                self.dispatch(next);
            }
        }
    }

    fn apply(&mut self, intent: &SearchIntent, effect: SearchEffect) -> Option<SearchIntent> {
        tracing::debug!(effect = ?effect, "Applying effect");
        let state = std::mem::take(&mut self.state);
        self.state = self.reducer.reduce(state, effect.clone());
        self.store.publish(self.state.clone());
        SearchPostProcessor::process(intent, &effect, &self.state)
    }
}
