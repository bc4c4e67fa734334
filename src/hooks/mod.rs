//! Lifecycle hooks: dispatch points, name parsing, and callback storage.
//!
//! Hooks observe transitions from eight well-defined points bracketing the
//! state mutation. Names are parsed generically ([`HookPoint::parse`])
//! against the machine's transition table, so registration is a single
//! string-based entry point rather than one method per phase.

mod point;
mod registry;

pub use point::HookPoint;
pub use registry::{HookContext, HookFn, HookRegistry};
