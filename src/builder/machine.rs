//! Builder for constructing machines.

use crate::builder::error::BuildError;
use crate::core::{EventDecl, StateList, TransitionTable};
use crate::machine::Machine;

/// Builder assembling a machine from event declarations with a fluent API.
///
/// Unlike [`Machine::from_definition`], the builder insists on an initial
/// state and at least one declaration; the table expansion itself stays
/// permissive.
pub struct MachineBuilder {
    initial: Option<String>,
    events: Vec<EventDecl>,
}

impl MachineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            events: Vec::new(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: impl Into<String>) -> Self {
        self.initial = Some(state.into());
        self
    }

    /// Declare an event. `from` and `to` each accept a single state or a
    /// list of states.
    pub fn event(
        mut self,
        name: impl Into<String>,
        from: impl Into<StateList>,
        to: impl Into<StateList>,
    ) -> Self {
        self.events.push(EventDecl::new(name, from, to));
        self
    }

    /// Declare several events at once.
    pub fn events(mut self, events: impl IntoIterator<Item = EventDecl>) -> Self {
        self.events.extend(events);
        self
    }

    /// Build the machine.
    /// Returns an error if required fields are missing.
    pub fn build(self) -> Result<Machine, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if self.events.is_empty() {
            return Err(BuildError::NoTransitions);
        }

        Ok(Machine::new(initial, TransitionTable::build(&self.events)))
    }
}

impl Default for MachineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
