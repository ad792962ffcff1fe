//! mediabridge core
//!
//! Platform-independent half of the native media bridge:
//!
//! - **Intents and filters**: the host's broadcast records and the
//!   predicates receivers subscribe with
//! - **Receiver dispatch**: routes media-mounted intents and everything
//!   else to an injected [`MediaHandler`]
//! - **Activity bootstrap**: registers one receiver on create and
//!   unregisters it on destroy through an injected [`EventBus`]
//! - **Media wait**: blocks startup until external storage is mounted
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use mediabridge_core::prelude::*;
//!
//! let handler = MediaCenterHandler::new();
//! let mut activity = ActivityBootstrap::new(
//!     LocalEventBus::new(),
//!     &BridgeConfig::default(),
//!     Arc::new(handler.clone()),
//! );
//! activity.on_create(None).unwrap();
//!
//! let mounted = Intent::new(actions::MEDIA_MOUNTED).with_data("file:///sdcard");
//! assert_eq!(activity.bus().broadcast(&mounted), vec![Dispatch::MediaMounted]);
//! assert!(handler.signal().is_set());
//! ```

pub mod activity;
pub mod bus;
pub mod config;
pub mod error;
pub mod filter;
pub mod handler;
pub mod intent;
pub mod intents;
pub mod media;
pub mod receiver;

pub use activity::{media_filter, ActivityBootstrap};
pub use bus::{EventBus, LocalEventBus, SubscriptionId};
pub use config::BridgeConfig;
pub use error::{BridgeError, Result};
pub use filter::{IntentFilter, MatchRule};
pub use handler::MediaCenterHandler;
pub use intent::{actions, schemes, Intent};
pub use media::{
    wait_for_media, wait_for_media_polling, MediaMountSignal, MediaProbe, StorageState,
};
pub use receiver::{BroadcastReceiver, Dispatch, MediaHandler};

pub mod prelude {
    pub use crate::activity::ActivityBootstrap;
    pub use crate::bus::{EventBus, LocalEventBus};
    pub use crate::config::BridgeConfig;
    pub use crate::handler::MediaCenterHandler;
    pub use crate::intent::{actions, Intent};
    pub use crate::receiver::{BroadcastReceiver, Dispatch, MediaHandler};
}
