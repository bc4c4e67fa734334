//! Lifecycle dispatch points and hook-name parsing.
//!
//! A successful transition passes through eight dispatch points, each a
//! [`HookPoint`]. Registration names such as `"before-pay"`,
//! `"enter_state"`, or `"onShipped"` are parsed into points against the
//! machine's transition table, so a name only resolves when its target is
//! actually declared.

use crate::core::TransitionTable;
use serde::{Deserialize, Serialize};

/// One of the eight dispatch points bracketing a transition.
///
/// Invoked in this order around a successful transition: `BeforeAny`,
/// `BeforeEvent`, `LeaveAny`, `LeaveState`, the state mutation itself,
/// `EnterState`, `EnterAny`, `AfterEvent`, `AfterAny`. Wildcard observers
/// always see the outermost bracket; event- and state-specific observers
/// fire immediately adjacent to the mutation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HookPoint {
    /// `before-transition`: any event is about to fire.
    BeforeAny,
    /// `before-<event>`: the named event is about to fire.
    BeforeEvent(String),
    /// `leave-state`: the machine is about to leave any state.
    LeaveAny,
    /// `leave-<state>`: the machine is about to leave the named state.
    LeaveState(String),
    /// `enter-<state>`: the machine has entered the named state.
    EnterState(String),
    /// `enter-state`: the machine has entered any state.
    EnterAny,
    /// `after-<event>`: the named event has finished firing.
    AfterEvent(String),
    /// `after-transition`: any event has finished firing.
    AfterAny,
}

impl HookPoint {
    /// Parse a registration name against the table's known states and
    /// events.
    ///
    /// Phase prefixes (`before`, `leave`, `enter`, `after`, bare `on`) are
    /// matched case-insensitively, and one `-` or `_` separator after the
    /// prefix is optional, so `"before-pay"`, `"before_pay"`, and
    /// `"beforePay"` are the same registration. The target is matched
    /// case-insensitively too and canonicalized to its declared spelling.
    ///
    /// The wildcard words win over declared names: `before-transition` and
    /// `after-transition` are the any-event points even when an event is
    /// literally named "transition", and likewise `leave-state` and
    /// `enter-state` for a state named "state".
    ///
    /// The bare form `on<Name>` resolves to [`AfterEvent`] when `<Name>` is
    /// a declared event, falling back to [`EnterState`] when it is a known
    /// state; events shadow states on collision. Anything else parses to
    /// `None`.
    ///
    /// [`AfterEvent`]: HookPoint::AfterEvent
    /// [`EnterState`]: HookPoint::EnterState
    pub fn parse(name: &str, table: &TransitionTable) -> Option<Self> {
        let name = name.trim();

        if let Some(target) = strip_phase(name, "before") {
            return if target.eq_ignore_ascii_case("transition") {
                Some(Self::BeforeAny)
            } else {
                table
                    .canonical_event(target)
                    .map(|e| Self::BeforeEvent(e.to_string()))
            };
        }
        if let Some(target) = strip_phase(name, "leave") {
            return if target.eq_ignore_ascii_case("state") {
                Some(Self::LeaveAny)
            } else {
                table
                    .canonical_state(target)
                    .map(|s| Self::LeaveState(s.to_string()))
            };
        }
        if let Some(target) = strip_phase(name, "enter") {
            return if target.eq_ignore_ascii_case("state") {
                Some(Self::EnterAny)
            } else {
                table
                    .canonical_state(target)
                    .map(|s| Self::EnterState(s.to_string()))
            };
        }
        if let Some(target) = strip_phase(name, "after") {
            return if target.eq_ignore_ascii_case("transition") {
                Some(Self::AfterAny)
            } else {
                table
                    .canonical_event(target)
                    .map(|e| Self::AfterEvent(e.to_string()))
            };
        }
        if let Some(target) = strip_phase(name, "on") {
            if let Some(event) = table.canonical_event(target) {
                return Some(Self::AfterEvent(event.to_string()));
            }
            return table
                .canonical_state(target)
                .map(|s| Self::EnterState(s.to_string()));
        }

        None
    }
}

/// Strip a case-insensitive phase prefix plus at most one `-` or `_`
/// separator. Returns the non-empty remainder.
fn strip_phase<'a>(name: &'a str, phase: &str) -> Option<&'a str> {
    let head = name.get(..phase.len())?;
    if !head.eq_ignore_ascii_case(phase) {
        return None;
    }
    let rest = &name[phase.len()..];
    let rest = rest.strip_prefix(['-', '_']).unwrap_or(rest);
    (!rest.is_empty()).then_some(rest)
}
