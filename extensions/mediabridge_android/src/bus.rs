//! Event bus backed by `Context.registerReceiver`
//!
//! Each registration creates one Java receiver shim carrying the
//! subscription's handle, builds a matching `android.content.IntentFilter`
//! and registers both with the activity. Unregistering reverses all three.

use std::sync::Arc;

use mediabridge_core::{BridgeError, BroadcastReceiver, EventBus, IntentFilter, Result, SubscriptionId};
use slotmap::SecondaryMap;

#[cfg(target_os = "android")]
use jni::objects::{GlobalRef, JObject, JValue};
#[cfg(target_os = "android")]
use jni::JavaVM;

#[cfg(target_os = "android")]
use crate::jni_bridge::{self, host_error};
#[cfg(target_os = "android")]
use crate::registry;
#[cfg(target_os = "android")]
use mediabridge_core::MatchRule;

/// Android host dispatch registry
pub struct AndroidEventBus {
    #[cfg(target_os = "android")]
    vm: JavaVM,
    #[cfg(target_os = "android")]
    activity: GlobalRef,
    #[cfg(target_os = "android")]
    receiver_class: GlobalRef,
    #[cfg(target_os = "android")]
    shims: SecondaryMap<SubscriptionId, GlobalRef>,
    #[cfg(not(target_os = "android"))]
    shims: SecondaryMap<SubscriptionId, ()>,
}

#[cfg(target_os = "android")]
impl AndroidEventBus {
    /// Bind to the activity and load the receiver shim class
    ///
    /// # Safety
    ///
    /// `vm` and `activity` must be the live `JavaVM*` and activity `jobject`
    /// handed to the native activity, e.g. from `AndroidApp::vm_as_ptr` and
    /// `AndroidApp::activity_as_ptr`.
    pub unsafe fn from_raw(
        vm: *mut std::ffi::c_void,
        activity: *mut std::ffi::c_void,
        class_name: &str,
    ) -> Result<Self> {
        let vm = JavaVM::from_raw(vm.cast())
            .map_err(|e| BridgeError::Host(format!("Invalid JavaVM: {}", e)))?;
        let activity = JObject::from_raw(activity.cast());

        let (activity, receiver_class) = {
            let mut env = vm
                .attach_current_thread()
                .map_err(|e| BridgeError::Host(format!("Failed to attach thread: {}", e)))?;

            let class = match jni_bridge::load_class(&mut env, &activity, class_name) {
                Ok(class) => class,
                Err(e) => return Err(host_error(&mut env, "Failed to load receiver class", e)),
            };
            if let Err(e) = jni_bridge::register_natives(&mut env, &class) {
                return Err(host_error(&mut env, "Failed to register natives", e));
            }

            let activity = env
                .new_global_ref(&activity)
                .map_err(|e| host_error(&mut env, "Failed to retain activity", e))?;
            let class = env
                .new_global_ref(&class)
                .map_err(|e| host_error(&mut env, "Failed to retain receiver class", e))?;
            (activity, class)
        };

        tracing::info!(class = class_name, "Android event bus ready");
        Ok(Self {
            vm,
            activity,
            receiver_class,
            shims: SecondaryMap::new(),
        })
    }

    fn register_shim(&self, filter: &IntentFilter, id: SubscriptionId) -> Result<GlobalRef> {
        let mut env = self
            .vm
            .attach_current_thread()
            .map_err(|e| BridgeError::Host(format!("Failed to attach thread: {}", e)))?;

        let result = (|| -> jni::errors::Result<GlobalRef> {
            let java_filter = env.new_object("android/content/IntentFilter", "()V", &[])?;
            for rule in filter.rules() {
                let (method, value) = match rule {
                    MatchRule::DataScheme(scheme) => ("addDataScheme", scheme),
                    MatchRule::Action(action) => ("addAction", action),
                };
                let value = env.new_string(value)?;
                env.call_method(
                    &java_filter,
                    method,
                    "(Ljava/lang/String;)V",
                    &[JValue::Object(&value)],
                )?;
            }

            let class: &jni::objects::JClass = self.receiver_class.as_obj().into();
            let shim = env.new_object(class, "(J)V", &[JValue::Long(registry::handle_of(id))])?;
            env.call_method(
                self.activity.as_obj(),
                "registerReceiver",
                "(Landroid/content/BroadcastReceiver;Landroid/content/IntentFilter;)Landroid/content/Intent;",
                &[JValue::Object(&shim), JValue::Object(&java_filter)],
            )?;
            env.new_global_ref(&shim)
        })();

        result.map_err(|e| host_error(&mut env, "registerReceiver failed", e))
    }

    fn unregister_shim(&self, shim: &GlobalRef) -> Result<()> {
        let mut env = self
            .vm
            .attach_current_thread()
            .map_err(|e| BridgeError::Host(format!("Failed to attach thread: {}", e)))?;
        env.call_method(
            self.activity.as_obj(),
            "unregisterReceiver",
            "(Landroid/content/BroadcastReceiver;)V",
            &[JValue::Object(shim.as_obj())],
        )
        .map(|_| ())
        .map_err(|e| host_error(&mut env, "unregisterReceiver failed", e))
    }
}

#[cfg(target_os = "android")]
impl EventBus for AndroidEventBus {
    fn register(
        &mut self,
        filter: IntentFilter,
        receiver: Arc<BroadcastReceiver>,
    ) -> Result<SubscriptionId> {
        let id = registry::insert(receiver);
        match self.register_shim(&filter, id) {
            Ok(shim) => {
                self.shims.insert(id, shim);
                Ok(id)
            }
            Err(e) => {
                registry::remove(id);
                Err(e)
            }
        }
    }

    fn unregister(&mut self, id: SubscriptionId) -> Result<()> {
        let shim = self.shims.remove(id).ok_or(BridgeError::UnknownSubscription)?;
        let result = self.unregister_shim(&shim);
        registry::remove(id);
        result
    }

    fn subscription_count(&self) -> usize {
        self.shims.len()
    }
}

// Stub implementation for non-Android builds (for cross-compilation checks)
#[cfg(not(target_os = "android"))]
impl AndroidEventBus {
    pub fn new() -> Self {
        Self {
            shims: SecondaryMap::new(),
        }
    }
}

#[cfg(not(target_os = "android"))]
impl Default for AndroidEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_os = "android"))]
impl EventBus for AndroidEventBus {
    fn register(
        &mut self,
        _filter: IntentFilter,
        _receiver: Arc<BroadcastReceiver>,
    ) -> Result<SubscriptionId> {
        Err(BridgeError::Unsupported(
            "Broadcast registration only available on Android".to_string(),
        ))
    }

    fn unregister(&mut self, id: SubscriptionId) -> Result<()> {
        self.shims
            .remove(id)
            .map(|_| ())
            .ok_or(BridgeError::UnknownSubscription)
    }

    fn subscription_count(&self) -> usize {
        self.shims.len()
    }
}
