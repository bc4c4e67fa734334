//! Builder API for ergonomic machine construction.
//!
//! A fluent builder and a declaration macro over the core construction
//! primitives. This is the strict surface: it validates that the required
//! pieces are present, while [`Machine::from_definition`] keeps the
//! permissive construction contract.
//!
//! [`Machine::from_definition`]: crate::machine::Machine::from_definition

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::MachineBuilder;
