//! Activity bootstrap
//!
//! Runs when the host creates the native activity: builds the media
//! filter (data scheme + mounted action) and subscribes a single
//! [`BroadcastReceiver`] with the injected [`EventBus`]. The subscription
//! is released in [`ActivityBootstrap::on_destroy`], or on drop if the
//! host never delivered a destroy event.

use std::sync::Arc;

use crate::bus::{EventBus, SubscriptionId};
use crate::config::BridgeConfig;
use crate::error::{BridgeError, Result};
use crate::filter::IntentFilter;
use crate::receiver::{BroadcastReceiver, MediaHandler};

/// Filter the bootstrap registers its receiver against
pub fn media_filter(config: &BridgeConfig) -> IntentFilter {
    IntentFilter::new()
        .add_data_scheme(config.receiver.data_scheme.as_str())
        .add_action(config.receiver.mounted_action.as_str())
}

pub struct ActivityBootstrap<B: EventBus> {
    bus: B,
    filter: IntentFilter,
    receiver: Arc<BroadcastReceiver>,
    subscription: Option<SubscriptionId>,
}

impl<B: EventBus> ActivityBootstrap<B> {
    pub fn new(bus: B, config: &BridgeConfig, handler: Arc<dyn MediaHandler>) -> Self {
        let receiver = BroadcastReceiver::new(handler, config.receiver.mounted_action.as_str());
        Self {
            bus,
            filter: media_filter(config),
            receiver: Arc::new(receiver),
            subscription: None,
        }
    }

    /// Register the receiver
    ///
    /// Saved instance state is accepted for parity with the host lifecycle
    /// and otherwise unused.
    pub fn on_create(&mut self, _saved_state: Option<&[u8]>) -> Result<SubscriptionId> {
        if self.subscription.is_some() {
            return Err(BridgeError::AlreadyRegistered);
        }
        let id = self
            .bus
            .register(self.filter.clone(), Arc::clone(&self.receiver))?;
        tracing::info!(
            rules = self.filter.rule_count(),
            "Registered media broadcast receiver"
        );
        self.subscription = Some(id);
        Ok(id)
    }

    /// Unregister the receiver; returns `false` if none was registered
    pub fn on_destroy(&mut self) -> Result<bool> {
        let Some(id) = self.subscription else {
            return Ok(false);
        };
        // Keep the id on failure so a retry or drop can still release it
        self.bus.unregister(id)?;
        self.subscription = None;
        tracing::info!("Unregistered media broadcast receiver");
        Ok(true)
    }

    pub fn is_registered(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn subscription(&self) -> Option<SubscriptionId> {
        self.subscription
    }

    pub fn filter(&self) -> &IntentFilter {
        &self.filter
    }

    pub fn receiver(&self) -> &Arc<BroadcastReceiver> {
        &self.receiver
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }
}

impl<B: EventBus> Drop for ActivityBootstrap<B> {
    fn drop(&mut self) {
        if let Some(id) = self.subscription.take() {
            if let Err(e) = self.bus.unregister(id) {
                tracing::warn!("Failed to unregister receiver on drop: {}", e);
            }
        }
    }
}
