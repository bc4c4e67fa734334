//! Callback storage for lifecycle hooks.

use super::point::HookPoint;
use std::collections::HashMap;

/// View of the in-flight transition handed to every hook callback.
///
/// Callbacks never receive the machine itself; this narrow view plus
/// whatever state the closure captures is the whole interface. `from` and
/// `to` describe the full transition at every dispatch point, including
/// the ones that run before the mutation.
#[derive(Clone, Copy, Debug)]
pub struct HookContext<'a> {
    /// Name of the event being fired
    pub event: &'a str,
    /// State the machine is leaving
    pub from: &'a str,
    /// State the machine is entering
    pub to: &'a str,
}

/// Boxed hook callback.
///
/// Owned exclusively by the registry and invoked only during `fire`
/// dispatch.
pub type HookFn = Box<dyn FnMut(&HookContext<'_>) + Send>;

/// Mapping from dispatch point to the single callback registered there.
///
/// At most one callback is stored per point; registering a second one on
/// the same point replaces the first.
#[derive(Default)]
pub struct HookRegistry {
    hooks: HashMap<HookPoint, HookFn>,
}

impl HookRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `callback` at `point`, replacing any previous callback.
    pub fn insert(&mut self, point: HookPoint, callback: HookFn) {
        self.hooks.insert(point, callback);
    }

    /// Whether a callback is registered at `point`.
    pub fn contains(&self, point: &HookPoint) -> bool {
        self.hooks.contains_key(point)
    }

    /// Invoke the callback at `point`, if one is registered.
    pub fn invoke(&mut self, point: &HookPoint, ctx: &HookContext<'_>) {
        if let Some(callback) = self.hooks.get_mut(point) {
            callback(ctx);
        }
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Whether no callbacks are registered.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRegistry")
            .field("points", &self.hooks.keys().collect::<Vec<_>>())
            .finish()
    }
}
