//! Transit: a declarative finite-state-machine engine.
//!
//! A machine is built from named states and named events between them. It
//! tracks a single current state, validates and performs transitions,
//! records an append-only history log, and invokes lifecycle hooks at
//! eight well-defined points around each transition. States are discovered
//! implicitly from the event declarations; there is no separate
//! registration step.
//!
//! # Core Concepts
//!
//! - **Event**: a named, directed edge between states; one declaration may
//!   fan in from several sources or fan out to several destinations
//! - **Hook**: a callback bound to a dispatch point by a registration name
//!   such as `"before-pay"`, `"leave-state"`, or `"onShipped"`
//! - **History**: the ordered record of every state occupied, oldest first
//!
//! Invalid operations are permissive by design: firing an unresolvable
//! event and registering an unparseable hook name both degrade to `false`
//! rather than panicking, with the machine left untouched.
//!
//! # Example
//!
//! ```rust
//! use transit::builder::MachineBuilder;
//!
//! let mut order = MachineBuilder::new()
//!     .initial("new")
//!     .event("pay", "new", "paid")
//!     .event("ship", "paid", "shipped")
//!     .event("deliver", "shipped", "done")
//!     .build()
//!     .unwrap();
//!
//! order.on("enter-shipped", |ctx| println!("{} left the warehouse", ctx.to));
//!
//! assert!(!order.fire("ship"));          // not paid yet: ignored
//! assert!(order.fire("pay"));
//! assert!(order.can("shipped"));
//! assert!(order.fire("ship"));
//! assert_eq!(order.history(), ["new", "paid", "shipped"]);
//! ```

pub mod builder;
pub mod core;
pub mod hooks;
pub mod machine;

// Re-export commonly used types
pub use builder::{BuildError, MachineBuilder};
pub use core::{EventDecl, HistoryLog, StateList, TransitionRecord, TransitionTable};
pub use hooks::{HookContext, HookPoint, HookRegistry};
pub use machine::{Definition, FireError, Machine};
