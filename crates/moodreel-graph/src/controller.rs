use std::sync::Arc;

use moodreel_core::{EndState, FlowKey, JourneyFlow, JourneyOption, MoodreelError, Step};
use tokio::sync::watch;

use crate::entry::entry_step;
use crate::state::{
    AmbiguityPolicy, BackOutcome, Breadcrumb, FailureReason, JourneyTicket, NavigationSnapshot,
    NavigationState, Rejection, StaleTicket, TerminalOutcome, Transition,
};

/// Where a selection leads, before it is committed to the controller state.
enum Next {
    Step(Step),
    Terminal(TerminalOutcome),
    Failed(FailureReason),
}

/// Tunables for a [`NavigationController`].
#[derive(Debug, Clone, Default)]
pub struct ControllerConfig {
    pub ambiguity: AmbiguityPolicy,
}

impl ControllerConfig {
    pub fn with_ambiguity(mut self, policy: AmbiguityPolicy) -> Self {
        self.ambiguity = policy;
        self
    }
}

/// Walks one journey graph on behalf of one visitor.
///
/// Every transition takes `&mut self`, so a controller can never be driven
/// by two callers at once. Faults become the `Failed` state instead of
/// errors; the host renders whatever `state()` says after each call.
pub struct NavigationController {
    config: ControllerConfig,
    graph: Option<Arc<JourneyFlow>>,
    state: NavigationState,
    history: Vec<Step>,
    path: Vec<Breadcrumb>,
    selection: Option<String>,
    generation: u64,
    notifier: watch::Sender<NavigationSnapshot>,
}

impl std::fmt::Debug for NavigationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationController")
            .field("state", &self.state.name())
            .field("history_depth", &self.history.len())
            .field("selection", &self.selection)
            .field("generation", &self.generation)
            .finish()
    }
}

impl NavigationController {
    pub fn new() -> Self {
        Self::with_config(ControllerConfig::default())
    }

    pub fn with_config(config: ControllerConfig) -> Self {
        let (notifier, _) = watch::channel(NavigationSnapshot {
            state: NavigationState::Idle,
            history_depth: 0,
            selection: None,
        });
        Self {
            config,
            graph: None,
            state: NavigationState::Idle,
            history: Vec::new(),
            path: Vec::new(),
            selection: None,
            generation: 0,
            notifier,
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.state.step()
    }

    /// Steps visited before the current one, oldest first.
    pub fn history(&self) -> &[Step] {
        &self.history
    }

    /// Answers given so far, oldest first.
    pub fn path(&self) -> &[Breadcrumb] {
        &self.path
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn graph(&self) -> Option<&Arc<JourneyFlow>> {
        self.graph.as_ref()
    }

    pub fn snapshot(&self) -> NavigationSnapshot {
        NavigationSnapshot {
            state: self.state.clone(),
            history_depth: self.history.len(),
            selection: self.selection.clone(),
        }
    }

    /// Receive a snapshot after every operation.
    pub fn subscribe(&self) -> watch::Receiver<NavigationSnapshot> {
        self.notifier.subscribe()
    }

    // -- Loading -------------------------------------------------------------

    /// Begin a new journey whose graph is still being fetched.
    ///
    /// The returned ticket must accompany the fetch result; results carrying
    /// an older ticket are discarded.
    pub fn await_graph(&mut self, key: FlowKey) -> JourneyTicket {
        self.reset();
        tracing::debug!(key = %key, generation = self.generation, "awaiting journey graph");
        self.state = NavigationState::AwaitingGraph(key);
        self.publish();
        JourneyTicket(self.generation)
    }

    /// Whether a fetch started with `ticket` may still be applied.
    pub fn is_current(&self, ticket: JourneyTicket) -> bool {
        ticket.0 == self.generation && matches!(self.state, NavigationState::AwaitingGraph(_))
    }

    /// Apply a fetched graph to the journey identified by `ticket`.
    pub fn apply_fetched(
        &mut self,
        ticket: JourneyTicket,
        graph: Arc<JourneyFlow>,
    ) -> Result<(), StaleTicket> {
        if !self.is_current(ticket) {
            tracing::debug!(
                ticket = %ticket,
                generation = self.generation,
                "discarding stale graph"
            );
            return Err(StaleTicket(ticket));
        }
        self.enter(graph);
        Ok(())
    }

    /// Record a failed fetch for the journey identified by `ticket`.
    pub fn apply_fetch_error(
        &mut self,
        ticket: JourneyTicket,
        error: MoodreelError,
    ) -> Result<(), StaleTicket> {
        if !self.is_current(ticket) {
            tracing::debug!(ticket = %ticket, "discarding stale fetch error");
            return Err(StaleTicket(ticket));
        }
        self.fail(FailureReason::NetworkFailure(error));
        Ok(())
    }

    // -- The four operations -------------------------------------------------

    /// Start a journey at the graph's entry step.
    pub fn start(&mut self, graph: Arc<JourneyFlow>) {
        self.reset();
        self.enter(graph);
    }

    /// Apply the visitor's choice at the current step.
    pub fn select(&mut self, option_id: &str) -> Transition {
        let current = match &self.state {
            NavigationState::AtStep(step) => step.clone(),
            other => {
                tracing::debug!(
                    state = other.name(),
                    option_id,
                    "selection outside a step ignored"
                );
                return Transition::Rejected(Rejection::NotAtStep);
            }
        };
        let Some(option) = current.option(option_id).cloned() else {
            tracing::warn!(
                step_id = %current.step_id,
                option_id,
                "selection does not belong to the current step"
            );
            return Transition::Rejected(Rejection::OptionNotInStep {
                option_id: option_id.to_string(),
            });
        };

        self.selection = None;
        self.path.push(Breadcrumb::new(&current, &option));
        self.history.push(current);

        let transition = match self.follow(&option) {
            Next::Step(step) => {
                tracing::debug!(option_id, step_id = %step.step_id, "advanced");
                self.state = NavigationState::AtStep(step);
                Transition::Advanced
            }
            Next::Terminal(outcome) => {
                tracing::debug!(
                    option_id,
                    suggestions = outcome.suggestions.len(),
                    "journey reached a terminal option"
                );
                self.state = NavigationState::Terminal(outcome);
                Transition::Terminal
            }
            Next::Failed(reason) => {
                tracing::warn!(option_id, reason = %reason, "journey cannot continue");
                self.state = NavigationState::Failed(reason.clone());
                Transition::Failed(reason)
            }
        };
        self.publish();
        transition
    }

    /// Return to the previous step.
    pub fn back(&mut self) -> BackOutcome {
        if matches!(
            self.state,
            NavigationState::Idle | NavigationState::AwaitingGraph(_)
        ) {
            return BackOutcome::ExitJourney;
        }
        match self.history.pop() {
            Some(step) => {
                self.path.pop();
                self.selection = None;
                tracing::debug!(step_id = %step.step_id, "stepped back");
                self.state = NavigationState::AtStep(step);
                self.publish();
                BackOutcome::SteppedBack
            }
            None => BackOutcome::ExitJourney,
        }
    }

    /// Drop the journey. Pending fetches for it become stale.
    pub fn restart(&mut self) {
        self.reset();
        tracing::debug!(generation = self.generation, "journey restarted");
        self.publish();
    }

    // -- Two-phase selection -------------------------------------------------

    /// Mark an option of the current step as chosen without committing to it.
    pub fn choose(&mut self, option_id: &str) -> Result<(), Rejection> {
        let step = self.state.step().ok_or(Rejection::NotAtStep)?;
        if step.option(option_id).is_none() {
            return Err(Rejection::OptionNotInStep {
                option_id: option_id.to_string(),
            });
        }
        self.selection = Some(option_id.to_string());
        self.publish();
        Ok(())
    }

    /// Commit the option marked by [`choose`](Self::choose).
    pub fn confirm(&mut self) -> Transition {
        match self.selection.clone() {
            Some(option_id) => self.select(&option_id),
            None => Transition::Rejected(Rejection::NoSelection),
        }
    }

    // -- Internals -----------------------------------------------------------

    fn reset(&mut self) {
        self.generation += 1;
        self.graph = None;
        self.history.clear();
        self.path.clear();
        self.selection = None;
        self.state = NavigationState::Idle;
    }

    fn enter(&mut self, graph: Arc<JourneyFlow>) {
        let entry = entry_step(&graph).cloned();
        self.graph = Some(graph);
        match entry {
            Some(step) => {
                tracing::debug!(step_id = %step.step_id, "journey started");
                self.state = NavigationState::AtStep(step);
                self.publish();
            }
            None => self.fail(FailureReason::NoEntryStep),
        }
    }

    fn fail(&mut self, reason: FailureReason) {
        tracing::warn!(reason = %reason, "journey failed");
        self.state = NavigationState::Failed(reason);
        self.publish();
    }

    fn follow(&self, option: &JourneyOption) -> Next {
        match option.end_state {
            EndState::Terminal => self.finish(option),
            EndState::Continue => self.advance(option),
            EndState::Ambiguous => match self.config.ambiguity {
                AmbiguityPolicy::Strict => Next::Failed(FailureReason::AmbiguousOption {
                    option_id: option.id.clone(),
                }),
                AmbiguityPolicy::Tolerant => {
                    if option.target_step_id().is_some() {
                        self.advance(option)
                    } else if option.has_suggestions() {
                        self.finish(option)
                    } else {
                        Next::Failed(FailureReason::AmbiguousOption {
                            option_id: option.id.clone(),
                        })
                    }
                }
            },
        }
    }

    fn finish(&self, option: &JourneyOption) -> Next {
        if !option.has_suggestions() {
            return Next::Failed(FailureReason::TerminalWithoutSuggestions {
                option_id: option.id.clone(),
            });
        }
        let (step_id, question) = match self.path.last() {
            Some(crumb) => (crumb.step_id.clone(), crumb.question.clone()),
            None => (String::new(), String::new()),
        };
        Next::Terminal(TerminalOutcome {
            step_id,
            question,
            option_id: option.id.clone(),
            option_text: option.text.clone(),
            suggestions: option.movie_suggestions.clone(),
            path: self.path.clone(),
        })
    }

    fn advance(&self, option: &JourneyOption) -> Next {
        let Some(target) = option.target_step_id() else {
            return Next::Failed(FailureReason::MissingNextStep {
                option_id: option.id.clone(),
            });
        };
        let resolved = self.graph.as_ref().and_then(|g| g.resolve_step(target));
        match resolved {
            None => Next::Failed(FailureReason::DanglingNextStep {
                option_id: option.id.clone(),
                next_step_id: target.to_string(),
            }),
            Some(step) if !step.has_options() => {
                Next::Failed(FailureReason::EmptyNextStep {
                    step_id: step.step_id.clone(),
                })
            }
            Some(step) => Next::Step(step.clone()),
        }
    }

    fn publish(&self) {
        self.notifier.send_replace(self.snapshot());
    }
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new()
    }
}
