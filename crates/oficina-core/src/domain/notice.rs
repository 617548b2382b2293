//! User-facing notices.
//!
//! Every recoverable failure ends in one of these; the presentation layer
//! renders them as transient alerts. Nothing here is fatal and nothing is
//! retried: after a notice the app keeps running with its defined fallback
//! state.

/// A transient alert for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Add was attempted with text that trims to empty. No state change.
    EmptyInput,
    /// Startup read or parse failed; the list fell back to empty.
    LoadFailed { reason: String },
    /// A background save failed; the in-memory list is unaffected.
    SaveFailed { reason: String },
}

impl Notice {
    /// Default human-readable rendering for display sinks.
    pub fn message(&self) -> String {
        match self {
            Notice::EmptyInput => "please enter a task".to_string(),
            Notice::LoadFailed { reason } => {
                format!("could not load saved tasks: {reason}")
            }
            Notice::SaveFailed { reason } => {
                format!("could not save tasks: {reason}")
            }
        }
    }
}
