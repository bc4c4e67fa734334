//! Errors surfaced by the transition engine.

use thiserror::Error;

/// Why a `try_fire` call did not transition.
///
/// The permissive [`fire`](crate::machine::Machine::fire) wrapper degrades
/// both variants to `false`. Neither ever leaves the machine in a changed
/// state.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FireError {
    /// The event name is not declared anywhere in the table.
    #[error("unknown event '{event}'")]
    UnknownEvent { event: String },

    /// The event exists but has no edge from the current state.
    #[error("event '{event}' cannot fire from state '{from}'")]
    Unreachable { event: String, from: String },
}
