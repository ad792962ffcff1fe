//! Native receivers reachable from Java
//!
//! Each Java receiver shim carries a `long` handle. The handle is the FFI
//! form of the [`SubscriptionId`] its Rust receiver is stored under here,
//! so a stale handle from an unregistered shim resolves to nothing.

use std::sync::{Arc, OnceLock, RwLock};

use mediabridge_core::{BroadcastReceiver, SubscriptionId};
use slotmap::{Key, KeyData, SlotMap};

type Receivers = RwLock<SlotMap<SubscriptionId, Arc<BroadcastReceiver>>>;

fn receivers() -> &'static Receivers {
    static RECEIVERS: OnceLock<Receivers> = OnceLock::new();
    RECEIVERS.get_or_init(|| RwLock::new(SlotMap::with_key()))
}

/// Handle passed to the Java shim
pub fn handle_of(id: SubscriptionId) -> i64 {
    id.data().as_ffi() as i64
}

pub fn id_of(handle: i64) -> SubscriptionId {
    SubscriptionId::from(KeyData::from_ffi(handle as u64))
}

pub fn insert(receiver: Arc<BroadcastReceiver>) -> SubscriptionId {
    receivers()
        .write()
        .unwrap_or_else(|e| e.into_inner())
        .insert(receiver)
}

pub fn get(id: SubscriptionId) -> Option<Arc<BroadcastReceiver>> {
    receivers()
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .get(id)
        .cloned()
}

pub fn remove(id: SubscriptionId) -> Option<Arc<BroadcastReceiver>> {
    receivers()
        .write()
        .unwrap_or_else(|e| e.into_inner())
        .remove(id)
}
