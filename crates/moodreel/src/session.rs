use std::collections::HashMap;
use std::sync::Arc;

use moodreel_cache::FlowCache;
use moodreel_core::{
    FlowKey, IntentionCatalog, JourneyApi, JourneyFlow, MainSentiment, MoodreelError,
};
use moodreel_graph::{
    log_defects, resolve, validate, BackOutcome, ControllerConfig, Defect, NavigationController,
    NavigationSnapshot, NavigationState, Rejection, SuggestionBundle, Transition,
};
use tokio::sync::watch;

/// One visitor's journey, from mood selection to suggestions.
///
/// Graphs are fetched through the shared [`FlowCache`], checked by the
/// validator and handed to a [`NavigationController`] owned by the session.
/// Each graph instance is validated once per session.
pub struct JourneySession {
    api: Arc<dyn JourneyApi>,
    cache: Arc<FlowCache>,
    controller: NavigationController,
    reports: HashMap<FlowKey, Report>,
    current: Option<FlowKey>,
}

struct Report {
    graph: Arc<JourneyFlow>,
    defects: Arc<[Defect]>,
}

impl JourneySession {
    pub fn new(api: Arc<dyn JourneyApi>, cache: Arc<FlowCache>) -> Self {
        Self::with_config(api, cache, ControllerConfig::default())
    }

    pub fn with_config(
        api: Arc<dyn JourneyApi>,
        cache: Arc<FlowCache>,
        config: ControllerConfig,
    ) -> Self {
        Self {
            api,
            cache,
            controller: NavigationController::with_config(config),
            reports: HashMap::new(),
            current: None,
        }
    }

    pub fn cache(&self) -> &Arc<FlowCache> {
        &self.cache
    }

    pub fn controller(&self) -> &NavigationController {
        &self.controller
    }

    pub fn state(&self) -> &NavigationState {
        self.controller.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<NavigationSnapshot> {
        self.controller.subscribe()
    }

    /// Graph of the current journey, once loaded.
    pub fn graph(&self) -> Option<&Arc<JourneyFlow>> {
        self.controller.graph()
    }

    pub async fn sentiments(&self) -> Result<Vec<MainSentiment>, MoodreelError> {
        self.api.main_sentiments().await
    }

    pub async fn intentions(&self, mood_id: &str) -> Result<IntentionCatalog, MoodreelError> {
        self.api.emotional_intentions(mood_id).await
    }

    /// Start a journey for `mood_id`, personalized when `intention_id` is given.
    ///
    /// Fetch failures end in the `Failed` state; call again to retry.
    pub async fn begin(
        &mut self,
        mood_id: &str,
        intention_id: Option<&str>,
    ) -> &NavigationState {
        let key = FlowKey::new(mood_id, intention_id.map(str::to_string));
        let ticket = self.controller.await_graph(key.clone());
        self.current = Some(key.clone());

        let api = self.api.clone();
        let fetch_key = key.clone();
        let result = self
            .cache
            .get_or_fetch(&key, move || async move { api.fetch_flow(&fetch_key).await })
            .await;

        let applied = match result {
            Ok(graph) => {
                self.review(&key, &graph);
                self.controller.apply_fetched(ticket, graph)
            }
            Err(error) => self.controller.apply_fetch_error(ticket, error),
        };
        if let Err(stale) = applied {
            tracing::debug!(
                key = %key,
                ticket = %stale.0,
                "journey superseded before its graph arrived"
            );
        }
        self.controller.state()
    }

    /// Validate `graph` unless this exact instance was already validated for `key`.
    fn review(&mut self, key: &FlowKey, graph: &Arc<JourneyFlow>) {
        if let Some(report) = self.reports.get(key) {
            if Arc::ptr_eq(&report.graph, graph) {
                return;
            }
        }
        let defects: Arc<[Defect]> = validate(graph).into();
        log_defects(graph, &defects);
        self.reports.insert(
            key.clone(),
            Report {
                graph: graph.clone(),
                defects,
            },
        );
    }

    /// Defects found in the graph of the current journey.
    pub fn defects(&self) -> Option<Arc<[Defect]>> {
        let key = self.current.as_ref()?;
        self.reports.get(key).map(|report| report.defects.clone())
    }

    pub fn select(&mut self, option_id: &str) -> Transition {
        self.controller.select(option_id)
    }

    pub fn choose(&mut self, option_id: &str) -> Result<(), Rejection> {
        self.controller.choose(option_id)
    }

    pub fn confirm(&mut self) -> Transition {
        self.controller.confirm()
    }

    pub fn back(&mut self) -> BackOutcome {
        self.controller.back()
    }

    pub fn restart(&mut self) {
        self.current = None;
        self.controller.restart()
    }

    /// Suggestions for a finished journey.
    pub fn suggestions(&self) -> Option<SuggestionBundle> {
        self.suggestions_labelled(None)
    }

    /// Like [`suggestions`](Self::suggestions), with `label` shown as the visitor's choice.
    pub fn suggestions_labelled(&self, label: Option<&str>) -> Option<SuggestionBundle> {
        match self.controller.state() {
            NavigationState::Terminal(outcome) => Some(resolve(outcome, label)),
            _ => None,
        }
    }
}
