//! Core data model for the transition engine.
//!
//! This module contains the immutable-after-build pieces of a machine:
//! - Event declarations and the expanded [`TransitionTable`]
//! - The append-only [`HistoryLog`]
//!
//! Everything here is plain data; dispatch and callbacks live in the
//! `hooks` and `machine` modules.

mod history;
mod table;

pub use history::{HistoryLog, TransitionRecord};
pub use table::{EventDecl, StateList, TransitionTable};
