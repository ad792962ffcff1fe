//! Event bus abstraction
//!
//! The host owns broadcast delivery. Code that wants intents registers a
//! receiver against a filter and gets back a [`SubscriptionId`], which it
//! must hand back to [`EventBus::unregister`] on teardown.
//!
//! [`LocalEventBus`] is an in-process bus used off-device and in tests.

use std::sync::Arc;

use slotmap::{new_key_type, SlotMap};

use crate::error::{BridgeError, Result};
use crate::filter::IntentFilter;
use crate::intent::Intent;
use crate::receiver::{BroadcastReceiver, Dispatch};

new_key_type! {
    /// Handle for a live receiver registration
    pub struct SubscriptionId;
}

/// Host dispatch registry
pub trait EventBus {
    /// Subscribe `receiver` to every intent matching `filter`
    fn register(
        &mut self,
        filter: IntentFilter,
        receiver: Arc<BroadcastReceiver>,
    ) -> Result<SubscriptionId>;

    /// Remove a subscription
    fn unregister(&mut self, id: SubscriptionId) -> Result<()>;

    /// Number of live subscriptions
    fn subscription_count(&self) -> usize;
}

/// A registered receiver and its filter
#[derive(Debug)]
pub struct Subscription {
    pub filter: IntentFilter,
    pub receiver: Arc<BroadcastReceiver>,
}

/// In-process event bus
#[derive(Debug, Default)]
pub struct LocalEventBus {
    subscriptions: SlotMap<SubscriptionId, Subscription>,
}

impl LocalEventBus {
    pub fn new() -> Self {
        Self {
            subscriptions: SlotMap::with_key(),
        }
    }

    pub fn subscription(&self, id: SubscriptionId) -> Option<&Subscription> {
        self.subscriptions.get(id)
    }

    pub fn subscriptions(&self) -> impl Iterator<Item = (SubscriptionId, &Subscription)> {
        self.subscriptions.iter()
    }

    /// Deliver an intent to every matching receiver
    ///
    /// Returns how each receiver the intent reached dispatched it; empty
    /// when no filter matched.
    pub fn broadcast(&self, intent: &Intent) -> Vec<Dispatch> {
        let dispatches: Vec<Dispatch> = self
            .subscriptions
            .values()
            .filter(|subscription| subscription.filter.matches(intent))
            .map(|subscription| subscription.receiver.on_receive(intent))
            .collect();
        tracing::trace!(
            action = ?intent.action(),
            delivered = dispatches.len(),
            "Broadcast delivered"
        );
        dispatches
    }
}

impl EventBus for LocalEventBus {
    fn register(
        &mut self,
        filter: IntentFilter,
        receiver: Arc<BroadcastReceiver>,
    ) -> Result<SubscriptionId> {
        Ok(self.subscriptions.insert(Subscription { filter, receiver }))
    }

    fn unregister(&mut self, id: SubscriptionId) -> Result<()> {
        self.subscriptions
            .remove(id)
            .map(|_| ())
            .ok_or(BridgeError::UnknownSubscription)
    }

    fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }
}
