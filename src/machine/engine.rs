//! The machine that validates and performs transitions.

use crate::core::{EventDecl, HistoryLog, TransitionRecord, TransitionTable};
use crate::hooks::{HookContext, HookPoint, HookRegistry};
use crate::machine::error::FireError;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Construction record for a machine: the initial state plus the ordered
/// event declarations.
///
/// Derives `Deserialize`, so a definition can be loaded straight from
/// configuration:
///
/// ```rust
/// use transit::machine::{Definition, Machine};
///
/// let def: Definition = serde_json::from_str(
///     r#"{
///         "initial": "new",
///         "events": [
///             {"name": "pay", "from": "new", "to": "paid"},
///             {"name": "cancel", "from": ["new", "paid"], "to": "cancelled"}
///         ]
///     }"#,
/// )
/// .unwrap();
///
/// let mut order = Machine::from_definition(def);
/// assert!(order.fire("pay"));
/// assert!(order.can("cancelled"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    /// State the machine starts in
    pub initial: String,
    /// Declarative transitions
    #[serde(default)]
    pub events: Vec<EventDecl>,
}

/// A finite-state machine: one current state, an immutable transition
/// table, a hook registry, and an append-only history log.
///
/// Invalid operations never panic and never corrupt the machine:
/// [`fire`](Machine::fire) on an unresolvable event returns `false` with
/// state and history untouched, and [`on`](Machine::on) with an
/// unparseable name returns `false` and drops the registration.
///
/// Hook callbacks receive only a [`HookContext`], never the machine, and
/// `fire` holds the machine exclusively for the whole dispatch, so a
/// callback cannot re-enter the same machine.
pub struct Machine {
    current: String,
    table: TransitionTable,
    hooks: HookRegistry,
    history: HistoryLog,
}

impl Machine {
    /// Create a machine in `initial` over a pre-built table.
    ///
    /// The history log is seeded with the initial state. The initial state
    /// is not required to appear in the table; a machine parked outside
    /// its own graph simply has no reachable events.
    pub fn new(initial: impl Into<String>, table: TransitionTable) -> Self {
        let current = initial.into();
        let history = HistoryLog::new(current.clone());
        Self {
            current,
            table,
            hooks: HookRegistry::new(),
            history,
        }
    }

    /// Build a machine from a construction record.
    ///
    /// Construction is permissive: declarations missing a field, or
    /// listing several states on both sides, are skipped rather than
    /// rejected. Use [`MachineBuilder`](crate::builder::MachineBuilder)
    /// for the strict fluent surface.
    pub fn from_definition(def: Definition) -> Self {
        let table = TransitionTable::build(&def.events);
        Self::new(def.initial, table)
    }

    /// The state the machine currently occupies.
    pub fn current_state(&self) -> &str {
        &self.current
    }

    /// Whether `state` is the current state.
    pub fn is(&self, state: &str) -> bool {
        self.current == state
    }

    /// Whether some event leads from the current state to `to`.
    pub fn can(&self, to: &str) -> bool {
        self.table.reverse_resolve(&self.current, to).is_some()
    }

    /// Events that can fire from the current state, in declaration order.
    pub fn reachable_events(&self) -> Vec<&str> {
        self.table.outgoing(&self.current)
    }

    /// Every declared event name.
    pub fn all_events(&self) -> &[String] {
        self.table.events()
    }

    /// Every known state name.
    pub fn all_states(&self) -> &[String] {
        self.table.states()
    }

    /// States visited so far, oldest first, starting with the initial
    /// state.
    pub fn history(&self) -> Vec<&str> {
        self.history.states()
    }

    /// The timestamped transition log behind [`history`](Machine::history).
    pub fn log(&self) -> &HistoryLog {
        &self.history
    }

    /// The transition table the machine was built over.
    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Register a lifecycle hook under a registration name.
    ///
    /// The name is parsed with [`HookPoint::parse`]; see there for the
    /// accepted forms. Returns `false` when the name resolves to no
    /// dispatch point, in which case the registration is dropped.
    /// Registering twice on the same point replaces the earlier callback.
    ///
    /// # Example
    ///
    /// ```rust
    /// use transit::builder::MachineBuilder;
    ///
    /// let mut order = MachineBuilder::new()
    ///     .initial("new")
    ///     .event("pay", "new", "paid")
    ///     .build()
    ///     .unwrap();
    ///
    /// assert!(order.on("before-pay", |ctx| println!("charging for {}", ctx.event)));
    /// assert!(order.on("onPaid", |_| println!("funds received")));
    /// assert!(!order.on("onRefund", |_| ()));
    /// ```
    pub fn on<F>(&mut self, name: &str, callback: F) -> bool
    where
        F: FnMut(&HookContext<'_>) + Send + 'static,
    {
        match HookPoint::parse(name, &self.table) {
            Some(point) => {
                self.hooks.insert(point, Box::new(callback));
                true
            }
            None => {
                tracing::debug!(name, "dropping unparseable hook registration");
                false
            }
        }
    }

    /// Fire `event`, surfacing failure as an error.
    ///
    /// On success the dispatch points run in order around the state
    /// mutation: `before-transition`, `before-<event>`, `leave-state`,
    /// `leave-<from>`, the mutation and history append, `enter-<to>`,
    /// `enter-state`, `after-<event>`, `after-transition`. Each point is
    /// invoked only if a callback is registered there.
    ///
    /// On any error the current state, history, and hooks are untouched
    /// and no callback runs.
    pub fn try_fire(&mut self, event: &str) -> Result<(), FireError> {
        let Some(to) = self.table.resolve(&self.current, event) else {
            return Err(if self.table.has_event(event) {
                FireError::Unreachable {
                    event: event.to_string(),
                    from: self.current.clone(),
                }
            } else {
                FireError::UnknownEvent {
                    event: event.to_string(),
                }
            });
        };

        let to = to.to_string();
        let from = self.current.clone();
        let ctx = HookContext {
            event,
            from: &from,
            to: &to,
        };

        self.hooks.invoke(&HookPoint::BeforeAny, &ctx);
        self.hooks
            .invoke(&HookPoint::BeforeEvent(event.to_string()), &ctx);
        self.hooks.invoke(&HookPoint::LeaveAny, &ctx);
        self.hooks
            .invoke(&HookPoint::LeaveState(from.clone()), &ctx);

        self.current = to.clone();
        self.history = self.history.record(TransitionRecord {
            event: event.to_string(),
            from: from.clone(),
            to: to.clone(),
            timestamp: Utc::now(),
        });

        self.hooks.invoke(&HookPoint::EnterState(to.clone()), &ctx);
        self.hooks.invoke(&HookPoint::EnterAny, &ctx);
        self.hooks
            .invoke(&HookPoint::AfterEvent(event.to_string()), &ctx);
        self.hooks.invoke(&HookPoint::AfterAny, &ctx);

        tracing::debug!(event, from = %from, to = %to, "transitioned");
        Ok(())
    }

    /// Fire `event`, returning whether a transition happened.
    ///
    /// The permissive surface: unknown events and unreachable transitions
    /// degrade to `false` with the machine unchanged.
    pub fn fire(&mut self, event: &str) -> bool {
        match self.try_fire(event) {
            Ok(()) => true,
            Err(err) => {
                tracing::trace!(%err, "fire ignored");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::MachineBuilder;

    fn order_machine() -> Machine {
        MachineBuilder::new()
            .initial("new")
            .event("pay", "new", "paid")
            .event("ship", "paid", "shipped")
            .event("deliver", "shipped", "done")
            .build()
            .unwrap()
    }

    #[test]
    fn starts_in_the_initial_state() {
        let machine = order_machine();

        assert_eq!(machine.current_state(), "new");
        assert!(machine.is("new"));
        assert!(!machine.is("paid"));
        assert_eq!(machine.history(), ["new"]);
    }

    #[test]
    fn fire_walks_the_declared_path() {
        let mut machine = order_machine();

        assert!(machine.fire("pay"));
        assert_eq!(machine.current_state(), "paid");

        assert!(machine.fire("ship"));
        assert!(machine.fire("deliver"));
        assert!(machine.is("done"));
        assert_eq!(machine.history(), ["new", "paid", "shipped", "done"]);
    }

    #[test]
    fn unreachable_event_is_a_no_op() {
        let mut machine = order_machine();

        assert!(!machine.fire("ship"));
        assert_eq!(machine.current_state(), "new");
        assert_eq!(machine.history(), ["new"]);
    }

    #[test]
    fn unknown_event_is_a_no_op() {
        let mut machine = order_machine();

        assert!(!machine.fire("refund"));
        assert_eq!(machine.current_state(), "new");
        assert_eq!(machine.history(), ["new"]);
    }

    #[test]
    fn try_fire_distinguishes_the_failure_modes() {
        let mut machine = order_machine();

        assert_eq!(
            machine.try_fire("refund"),
            Err(FireError::UnknownEvent {
                event: "refund".to_string()
            })
        );
        assert_eq!(
            machine.try_fire("ship"),
            Err(FireError::Unreachable {
                event: "ship".to_string(),
                from: "new".to_string()
            })
        );
        assert_eq!(machine.try_fire("pay"), Ok(()));
    }

    #[test]
    fn can_reports_reverse_resolvable_targets() {
        let mut machine = order_machine();

        assert!(machine.can("paid"));
        assert!(!machine.can("shipped"));
        assert!(!machine.can("new"));

        machine.fire("pay");
        assert!(machine.can("shipped"));
        assert!(!machine.can("paid"));
    }

    #[test]
    fn reachable_events_follow_the_current_state() {
        let mut machine = MachineBuilder::new()
            .initial("paid")
            .event("ship", "paid", "shipped")
            .event("refund", "paid", "refunded")
            .event("pay", "new", "paid")
            .build()
            .unwrap();

        assert_eq!(machine.reachable_events(), ["ship", "refund"]);

        machine.fire("ship");
        assert!(machine.reachable_events().is_empty());
    }

    #[test]
    fn registries_are_exposed_through_the_machine() {
        let machine = order_machine();

        assert_eq!(machine.all_states(), ["new", "paid", "shipped", "done"]);
        assert_eq!(machine.all_events(), ["pay", "ship", "deliver"]);
    }

    #[test]
    fn log_records_carry_the_full_transition() {
        let mut machine = order_machine();
        machine.fire("pay");

        let records = machine.log().records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].event, "pay");
        assert_eq!(records[0].from, "new");
        assert_eq!(records[0].to, "paid");
    }

    #[test]
    fn from_definition_skips_invalid_declarations() {
        let machine = Machine::from_definition(Definition {
            initial: "new".to_string(),
            events: vec![
                EventDecl::new("", "new", "paid"),
                EventDecl::new("pay", "new", "paid"),
            ],
        });

        assert_eq!(machine.all_events(), ["pay"]);
        assert!(machine.can("paid"));
    }

    #[test]
    fn initial_state_outside_the_table_is_inert() {
        let machine = Machine::from_definition(Definition {
            initial: "limbo".to_string(),
            events: vec![EventDecl::new("pay", "new", "paid")],
        });

        assert!(machine.reachable_events().is_empty());
        assert!(!machine.all_states().contains(&"limbo".to_string()));
        assert_eq!(machine.history(), ["limbo"]);
    }

    #[test]
    fn order_scenario_matches_the_lifecycle() {
        let mut machine = order_machine();

        assert!(!machine.fire("ship"));
        assert_eq!(machine.current_state(), "new");

        assert!(machine.fire("pay"));
        assert_eq!(machine.current_state(), "paid");
        assert_eq!(machine.history(), ["new", "paid"]);

        assert!(machine.fire("ship"));
        assert_eq!(machine.current_state(), "shipped");
        assert!(machine.can("done"));

        assert!(machine.fire("deliver"));
        assert!(!machine.can("new"));
        assert!(machine.reachable_events().is_empty());
    }
}
