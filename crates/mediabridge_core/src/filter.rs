//! Intent filters
//!
//! A filter is the predicate a receiver is registered against. Matching
//! mirrors the host: the intent's action must be one of the filter's
//! actions, and when the filter names data schemes the intent's data must
//! use one of them. A filter without schemes only accepts intents that
//! carry no data.

use crate::intent::Intent;

/// A single match condition
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MatchRule {
    /// Data URI scheme, e.g. `file`
    DataScheme(String),
    /// Action tag
    Action(String),
}

/// Immutable set of match rules
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntentFilter {
    rules: Vec<MatchRule>,
}

impl IntentFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a data scheme rule (duplicates are ignored)
    pub fn add_data_scheme(self, scheme: impl Into<String>) -> Self {
        self.add_rule(MatchRule::DataScheme(scheme.into()))
    }

    /// Add an action rule (duplicates are ignored)
    pub fn add_action(self, action: impl Into<String>) -> Self {
        self.add_rule(MatchRule::Action(action.into()))
    }

    fn add_rule(mut self, rule: MatchRule) -> Self {
        if !self.rules.contains(&rule) {
            self.rules.push(rule);
        }
        self
    }

    pub fn rules(&self) -> &[MatchRule] {
        &self.rules
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn actions(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().filter_map(|rule| match rule {
            MatchRule::Action(action) => Some(action.as_str()),
            _ => None,
        })
    }

    pub fn data_schemes(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().filter_map(|rule| match rule {
            MatchRule::DataScheme(scheme) => Some(scheme.as_str()),
            _ => None,
        })
    }

    pub fn has_action(&self, action: &str) -> bool {
        self.actions().any(|a| a == action)
    }

    pub fn has_data_scheme(&self, scheme: &str) -> bool {
        self.data_schemes().any(|s| s == scheme)
    }

    /// Whether the host would deliver `intent` to a receiver with this filter
    pub fn matches(&self, intent: &Intent) -> bool {
        let Some(action) = intent.action() else {
            return false;
        };
        if !self.has_action(action) {
            return false;
        }

        if self.data_schemes().next().is_none() {
            return intent.data().is_none();
        }
        intent
            .scheme()
            .map(|scheme| self.has_data_scheme(scheme))
            .unwrap_or(false)
    }
}
