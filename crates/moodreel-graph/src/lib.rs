mod controller;
mod entry;
mod resolver;
mod state;
mod validate;
mod visualization;

pub use controller::{ControllerConfig, NavigationController};
pub use entry::entry_step;
pub use resolver::{resolve, resolve_state, SuggestionBundle};
pub use state::{
    AmbiguityPolicy, BackOutcome, Breadcrumb, FailureReason, JourneyTicket, NavigationSnapshot,
    NavigationState, Rejection, StaleTicket, TerminalOutcome, Transition,
};
pub use validate::{log_defects, validate, Defect, DefectKind};
pub use visualization::{draw_ascii, draw_mermaid, MISSING_NODE, RESULTS_NODE};
