//! The transition engine: current state, dispatch, and introspection.
//!
//! A [`Machine`] owns its transition table, hook registry, and history log,
//! and mutates exactly one field of consequence: the current state. All
//! operations are synchronous and single-threaded; callers sharing a
//! machine across threads must serialize access externally.

mod engine;
mod error;

pub use engine::{Definition, Machine};
pub use error::FireError;
