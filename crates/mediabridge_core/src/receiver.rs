//! Broadcast receiver dispatch
//!
//! The receiver classifies each delivered intent by its action tag and
//! forwards it to exactly one method of the injected [`MediaHandler`]:
//!
//! - no action: ignored
//! - the configured media-mounted action: [`MediaHandler::on_media_mounted`]
//! - anything else: [`MediaHandler::on_generic_event`]

use std::sync::Arc;

use crate::intent::{actions, Intent};

/// Native-side handling of forwarded intents
///
/// Implementations run on whatever thread the host delivers broadcasts on.
pub trait MediaHandler: Send + Sync {
    /// Any intent other than media-mounted
    fn on_generic_event(&self, intent: &Intent);

    /// External media became available
    fn on_media_mounted(&self, intent: &Intent);
}

/// Where an intent was routed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// Intent had no action tag
    Ignored,
    MediaMounted,
    Generic,
}

/// Stateless intent classifier bound to a handler
pub struct BroadcastReceiver {
    handler: Arc<dyn MediaHandler>,
    mounted_action: String,
}

impl BroadcastReceiver {
    /// Create a receiver that treats `mounted_action` as the media-mounted tag
    pub fn new(handler: Arc<dyn MediaHandler>, mounted_action: impl Into<String>) -> Self {
        Self {
            handler,
            mounted_action: mounted_action.into(),
        }
    }

    /// Create a receiver using the host's standard media-mounted action
    pub fn with_default_action(handler: Arc<dyn MediaHandler>) -> Self {
        Self::new(handler, actions::MEDIA_MOUNTED)
    }

    pub fn mounted_action(&self) -> &str {
        &self.mounted_action
    }

    /// Decide where an intent goes without delivering it
    pub fn classify(&self, intent: &Intent) -> Dispatch {
        match intent.action() {
            None => Dispatch::Ignored,
            Some(action) if action == self.mounted_action => Dispatch::MediaMounted,
            Some(_) => Dispatch::Generic,
        }
    }

    /// Deliver an intent to the handler
    pub fn on_receive(&self, intent: &Intent) -> Dispatch {
        let dispatch = self.classify(intent);
        match dispatch {
            Dispatch::Ignored => {
                tracing::trace!("Ignoring intent without action");
            }
            Dispatch::MediaMounted => {
                tracing::debug!(data = ?intent.data(), "Dispatching media mounted");
                self.handler.on_media_mounted(intent);
            }
            Dispatch::Generic => {
                tracing::debug!(action = ?intent.action(), "Dispatching generic intent");
                self.handler.on_generic_event(intent);
            }
        }
        dispatch
    }
}

impl std::fmt::Debug for BroadcastReceiver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BroadcastReceiver")
            .field("mounted_action", &self.mounted_action)
            .finish_non_exhaustive()
    }
}
