//! Generic intent fan-out
//!
//! Intents that are not media-mounted go to listeners registered for
//! their action, then to wildcard listeners that want every intent.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::intent::Intent;

/// Intent listener function type
pub type IntentListener = Arc<dyn Fn(&Intent) + Send + Sync>;

/// Listeners keyed by action
#[derive(Default)]
pub struct IntentListeners {
    by_action: FxHashMap<String, Vec<IntentListener>>,
    wildcard: Vec<IntentListener>,
}

impl IntentListeners {
    pub fn new() -> Self {
        Self {
            by_action: FxHashMap::default(),
            wildcard: Vec::new(),
        }
    }

    /// Register a listener for one action
    pub fn register<F>(&mut self, action: impl Into<String>, listener: F)
    where
        F: Fn(&Intent) + Send + Sync + 'static,
    {
        self.by_action
            .entry(action.into())
            .or_default()
            .push(Arc::new(listener));
    }

    /// Register a listener for every generic intent
    pub fn register_any<F>(&mut self, listener: F)
    where
        F: Fn(&Intent) + Send + Sync + 'static,
    {
        self.wildcard.push(Arc::new(listener));
    }

    pub fn len(&self) -> usize {
        self.by_action.values().map(Vec::len).sum::<usize>() + self.wildcard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Listeners an intent would reach: action listeners first, then wildcards
    pub fn matching(&self, intent: &Intent) -> Vec<IntentListener> {
        intent
            .action()
            .and_then(|a| self.by_action.get(a))
            .into_iter()
            .flatten()
            .chain(self.wildcard.iter())
            .cloned()
            .collect()
    }

    /// Dispatch an intent; returns how many listeners ran
    pub fn dispatch(&self, intent: &Intent) -> usize {
        let listeners = self.matching(intent);
        for listener in &listeners {
            listener(intent);
        }
        listeners.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_dispatch_by_action_then_wildcard() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut listeners = IntentListeners::new();

        let s = seen.clone();
        listeners.register("a", move |_| s.lock().unwrap().push("a"));
        let s = seen.clone();
        listeners.register("b", move |_| s.lock().unwrap().push("b"));
        let s = seen.clone();
        listeners.register_any(move |_| s.lock().unwrap().push("*"));

        assert_eq!(listeners.len(), 3);
        assert_eq!(listeners.dispatch(&Intent::new("a")), 2);
        assert_eq!(*seen.lock().unwrap(), vec!["a", "*"]);
    }

    #[test]
    fn test_unknown_action_reaches_only_wildcards() {
        let mut listeners = IntentListeners::new();
        listeners.register("a", |_| {});
        assert_eq!(listeners.dispatch(&Intent::new("z")), 0);
        listeners.register_any(|_| {});
        assert_eq!(listeners.dispatch(&Intent::new("z")), 1);
    }
}
