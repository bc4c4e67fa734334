//! Transition table construction and lookup.
//!
//! A [`TransitionTable`] is built once from declarative event descriptions
//! and never changes afterwards. A declaration may fan in from several
//! source states or fan out to several destinations; the table expands
//! these into individual edges and keeps deduplicated registries of every
//! state and event name it has seen, in first-seen order.

use serde::{Deserialize, Serialize};

/// One or more state names on either side of an event declaration.
///
/// Deserializes from either a bare string or a list of strings, so both
/// `"packed"` and `["sent", "returned"]` are valid in a definition.
///
/// # Example
///
/// ```rust
/// use transit::core::StateList;
///
/// let one: StateList = serde_json::from_str("\"packed\"").unwrap();
/// let many: StateList = serde_json::from_str("[\"sent\", \"returned\"]").unwrap();
///
/// assert_eq!(one.as_slice(), ["packed"]);
/// assert_eq!(many.as_slice(), ["sent", "returned"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateList {
    /// A single state name.
    One(String),
    /// Several state names.
    Many(Vec<String>),
}

impl StateList {
    /// View the names as a slice.
    pub fn as_slice(&self) -> &[String] {
        match self {
            Self::One(name) => std::slice::from_ref(name),
            Self::Many(names) => names,
        }
    }

    /// Whether this side was declared in list form.
    pub fn is_list(&self) -> bool {
        matches!(self, Self::Many(_))
    }

    /// Whether there is no usable name at all.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::One(name) => name.is_empty(),
            Self::Many(names) => names.is_empty(),
        }
    }
}

impl From<&str> for StateList {
    fn from(name: &str) -> Self {
        Self::One(name.to_string())
    }
}

impl From<String> for StateList {
    fn from(name: String) -> Self {
        Self::One(name)
    }
}

impl From<Vec<String>> for StateList {
    fn from(names: Vec<String>) -> Self {
        Self::Many(names)
    }
}

impl From<Vec<&str>> for StateList {
    fn from(names: Vec<&str>) -> Self {
        Self::Many(names.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for StateList {
    fn from(names: [&str; N]) -> Self {
        Self::Many(names.iter().map(|n| n.to_string()).collect())
    }
}

/// A single declarative transition.
///
/// `name` moves the machine from each `from` state to the `to` state when
/// `from` is a list (fan-in), or from the `from` state to each `to` state
/// when `to` is a list (fan-out). Listing several states on both sides is
/// not supported; such a declaration is skipped at build time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDecl {
    /// Event name, unique within the table's event registry
    pub name: String,
    /// Source state or states
    pub from: StateList,
    /// Destination state or states
    pub to: StateList,
}

impl EventDecl {
    /// Create a declaration. Both sides accept a single name or a list.
    pub fn new(
        name: impl Into<String>,
        from: impl Into<StateList>,
        to: impl Into<StateList>,
    ) -> Self {
        Self {
            name: name.into(),
            from: from.into(),
            to: to.into(),
        }
    }
}

/// One expanded `(from, to, event)` edge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct Edge {
    from: String,
    to: String,
    event: String,
}

/// Immutable-after-build mapping from `(from, event)` to a destination
/// state, with the inverse query from `(from, to)` back to an event name.
///
/// # Example
///
/// ```rust
/// use transit::core::{EventDecl, TransitionTable};
///
/// let table = TransitionTable::build(&[
///     EventDecl::new("pay", "new", "paid"),
///     EventDecl::new("ship", "paid", ["sent", "returned"]),
/// ]);
///
/// assert_eq!(table.resolve("new", "pay"), Some("paid"));
/// assert_eq!(table.reverse_resolve("paid", "returned"), Some("ship"));
/// assert_eq!(table.outgoing("paid"), ["ship"]);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TransitionTable {
    edges: Vec<Edge>,
    states: Vec<String>,
    events: Vec<String>,
}

impl TransitionTable {
    /// Build a table from an ordered sequence of declarations.
    ///
    /// Construction is permissive and never fails: declarations missing a
    /// name, source, or destination are skipped, as are declarations
    /// listing several states on both sides. Skips are reported at debug
    /// level only.
    pub fn build(decls: &[EventDecl]) -> Self {
        let mut table = Self::default();
        for decl in decls {
            table.add(decl);
        }
        table
    }

    fn add(&mut self, decl: &EventDecl) {
        if decl.name.is_empty() || decl.from.is_empty() || decl.to.is_empty() {
            tracing::debug!(name = %decl.name, "skipping incomplete event declaration");
            return;
        }
        if decl.from.is_list() && decl.to.is_list() {
            tracing::debug!(
                name = %decl.name,
                "skipping event declared with lists on both sides"
            );
            return;
        }

        self.register_event(&decl.name);
        for from in decl.from.as_slice() {
            self.register_state(from);
        }
        for to in decl.to.as_slice() {
            self.register_state(to);
        }
        for from in decl.from.as_slice() {
            for to in decl.to.as_slice() {
                self.add_edge(from, to, &decl.name);
            }
        }
    }

    fn register_state(&mut self, name: &str) {
        if !self.states.iter().any(|s| s == name) {
            self.states.push(name.to_string());
        }
    }

    fn register_event(&mut self, name: &str) {
        if !self.events.iter().any(|e| e == name) {
            self.events.push(name.to_string());
        }
    }

    // A later declaration of the same ordered pair replaces the edge's
    // event name in place.
    fn add_edge(&mut self, from: &str, to: &str, event: &str) {
        if let Some(edge) = self
            .edges
            .iter_mut()
            .find(|e| e.from == from && e.to == to)
        {
            edge.event = event.to_string();
        } else {
            self.edges.push(Edge {
                from: from.to_string(),
                to: to.to_string(),
                event: event.to_string(),
            });
        }
    }

    /// Destination reached by firing `event` from `from`, if any.
    ///
    /// A fan-out event pairs the same `(from, event)` with several
    /// destinations; the first declared destination wins.
    pub fn resolve(&self, from: &str, event: &str) -> Option<&str> {
        self.edges
            .iter()
            .find(|e| e.from == from && e.event == event)
            .map(|e| e.to.as_str())
    }

    /// Event connecting the ordered pair `(from, to)`, if any.
    ///
    /// At most one edge exists per ordered pair by construction, so the
    /// answer is never ambiguous.
    pub fn reverse_resolve(&self, from: &str, to: &str) -> Option<&str> {
        self.edges
            .iter()
            .find(|e| e.from == from && e.to == to)
            .map(|e| e.event.as_str())
    }

    /// Events that can fire from `from`, in declaration order.
    ///
    /// A fan-out event is listed once even though it owns several edges.
    pub fn outgoing(&self, from: &str) -> Vec<&str> {
        let mut events = Vec::new();
        for edge in self.edges.iter().filter(|e| e.from == from) {
            if !events.contains(&edge.event.as_str()) {
                events.push(edge.event.as_str());
            }
        }
        events
    }

    /// Every state touched by a declaration, first-seen order.
    pub fn states(&self) -> &[String] {
        &self.states
    }

    /// Every declared event name, first-seen order.
    pub fn events(&self) -> &[String] {
        &self.events
    }

    /// Whether `name` is a declared event.
    pub fn has_event(&self, name: &str) -> bool {
        self.events.iter().any(|e| e == name)
    }

    /// Whether `name` is a known state.
    pub fn has_state(&self, name: &str) -> bool {
        self.states.iter().any(|s| s == name)
    }

    /// Registered spelling of an event name, matched case-insensitively.
    /// An exact match wins over a case-insensitive one.
    pub fn canonical_event(&self, name: &str) -> Option<&str> {
        if let Some(event) = self.events.iter().find(|e| e.as_str() == name) {
            return Some(event);
        }
        self.events
            .iter()
            .find(|e| e.eq_ignore_ascii_case(name))
            .map(String::as_str)
    }

    /// Registered spelling of a state name, matched case-insensitively.
    /// An exact match wins over a case-insensitive one.
    pub fn canonical_state(&self, name: &str) -> Option<&str> {
        if let Some(state) = self.states.iter().find(|s| s.as_str() == name) {
            return Some(state);
        }
        self.states
            .iter()
            .find(|s| s.eq_ignore_ascii_case(name))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_declaration_adds_one_edge() {
        let table = TransitionTable::build(&[EventDecl::new("pay", "new", "paid")]);

        assert_eq!(table.resolve("new", "pay"), Some("paid"));
        assert_eq!(table.resolve("paid", "pay"), None);
        assert_eq!(table.states(), ["new", "paid"]);
        assert_eq!(table.events(), ["pay"]);
    }

    #[test]
    fn fan_out_expands_one_edge_per_destination() {
        let table = TransitionTable::build(&[EventDecl::new(
            "ship",
            "packed",
            ["sent", "returned"],
        )]);

        assert_eq!(table.reverse_resolve("packed", "sent"), Some("ship"));
        assert_eq!(table.reverse_resolve("packed", "returned"), Some("ship"));
        assert_eq!(table.states(), ["packed", "sent", "returned"]);
        assert_eq!(table.events(), ["ship"]);
    }

    #[test]
    fn fan_out_resolution_prefers_first_destination() {
        let table = TransitionTable::build(&[EventDecl::new(
            "ship",
            "packed",
            ["sent", "returned"],
        )]);

        assert_eq!(table.resolve("packed", "ship"), Some("sent"));
    }

    #[test]
    fn fan_in_expands_one_edge_per_source() {
        let table =
            TransitionTable::build(&[EventDecl::new("cancel", ["new", "paid"], "cancelled")]);

        assert_eq!(table.resolve("new", "cancel"), Some("cancelled"));
        assert_eq!(table.resolve("paid", "cancel"), Some("cancelled"));
        assert_eq!(table.states(), ["new", "paid", "cancelled"]);
    }

    #[test]
    fn incomplete_declarations_are_skipped() {
        let table = TransitionTable::build(&[
            EventDecl::new("", "a", "b"),
            EventDecl::new("go", "", "b"),
            EventDecl::new("go", "a", StateList::Many(vec![])),
            EventDecl::new("go", "a", "b"),
        ]);

        assert_eq!(table.events(), ["go"]);
        assert_eq!(table.states(), ["a", "b"]);
        assert_eq!(table.resolve("a", "go"), Some("b"));
    }

    #[test]
    fn lists_on_both_sides_are_skipped() {
        let table = TransitionTable::build(&[
            EventDecl::new("split", ["a", "b"], ["c", "d"]),
            EventDecl::new("go", "a", "c"),
        ]);

        assert!(!table.has_event("split"));
        assert!(!table.has_state("b"));
        assert_eq!(table.resolve("a", "go"), Some("c"));
    }

    #[test]
    fn redeclared_pair_takes_the_last_event_name() {
        let table = TransitionTable::build(&[
            EventDecl::new("go", "a", "b"),
            EventDecl::new("jump", "a", "b"),
        ]);

        assert_eq!(table.reverse_resolve("a", "b"), Some("jump"));
        assert_eq!(table.resolve("a", "go"), None);
        assert_eq!(table.events(), ["go", "jump"]);
    }

    #[test]
    fn same_event_name_may_connect_different_pairs() {
        let table = TransitionTable::build(&[
            EventDecl::new("advance", "red", "green"),
            EventDecl::new("advance", "green", "yellow"),
            EventDecl::new("advance", "yellow", "red"),
        ]);

        assert_eq!(table.resolve("red", "advance"), Some("green"));
        assert_eq!(table.resolve("green", "advance"), Some("yellow"));
        assert_eq!(table.resolve("yellow", "advance"), Some("red"));
        assert_eq!(table.events(), ["advance"]);
    }

    #[test]
    fn registries_deduplicate_in_first_seen_order() {
        let table = TransitionTable::build(&[
            EventDecl::new("pay", "new", "paid"),
            EventDecl::new("refund", "paid", "new"),
            EventDecl::new("pay", "retry", "paid"),
        ]);

        assert_eq!(table.states(), ["new", "paid", "retry"]);
        assert_eq!(table.events(), ["pay", "refund"]);
    }

    #[test]
    fn outgoing_lists_events_in_declaration_order() {
        let table = TransitionTable::build(&[
            EventDecl::new("ship", "paid", "shipped"),
            EventDecl::new("refund", "paid", "refunded"),
            EventDecl::new("pay", "new", "paid"),
        ]);

        assert_eq!(table.outgoing("paid"), ["ship", "refund"]);
        assert_eq!(table.outgoing("new"), ["pay"]);
        assert!(table.outgoing("shipped").is_empty());
    }

    #[test]
    fn outgoing_lists_a_fan_out_event_once() {
        let table = TransitionTable::build(&[EventDecl::new(
            "ship",
            "packed",
            ["sent", "returned"],
        )]);

        assert_eq!(table.outgoing("packed"), ["ship"]);
    }

    #[test]
    fn canonical_lookup_is_case_insensitive() {
        let table = TransitionTable::build(&[EventDecl::new("Pay", "New", "Paid")]);

        assert_eq!(table.canonical_event("pay"), Some("Pay"));
        assert_eq!(table.canonical_state("PAID"), Some("Paid"));
        assert_eq!(table.canonical_event("ship"), None);
    }

    #[test]
    fn canonical_lookup_prefers_exact_match() {
        let table = TransitionTable::build(&[
            EventDecl::new("go", "a", "b"),
            EventDecl::new("GO", "b", "a"),
        ]);

        assert_eq!(table.canonical_event("GO"), Some("GO"));
        assert_eq!(table.canonical_event("Go"), Some("go"));
    }

    #[test]
    fn event_decl_deserializes_scalar_and_list_forms() {
        let decl: EventDecl =
            serde_json::from_str(r#"{"name": "ship", "from": "packed", "to": ["sent", "returned"]}"#)
                .unwrap();

        assert_eq!(decl.name, "ship");
        assert_eq!(decl.from, StateList::One("packed".to_string()));
        assert_eq!(decl.to.as_slice(), ["sent", "returned"]);
    }

    #[test]
    fn table_roundtrips_through_serde() {
        let table = TransitionTable::build(&[
            EventDecl::new("pay", "new", "paid"),
            EventDecl::new("cancel", ["new", "paid"], "cancelled"),
        ]);

        let json = serde_json::to_string(&table).unwrap();
        let back: TransitionTable = serde_json::from_str(&json).unwrap();

        assert_eq!(back.resolve("new", "pay"), Some("paid"));
        assert_eq!(back.resolve("paid", "cancel"), Some("cancelled"));
        assert_eq!(back.states(), table.states());
        assert_eq!(back.events(), table.events());
    }
}
