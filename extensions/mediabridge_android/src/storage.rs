//! External storage probe via `android.os.Environment`

use mediabridge_core::{BridgeError, MediaProbe, Result, StorageState};

#[cfg(target_os = "android")]
use jni::objects::JString;
#[cfg(target_os = "android")]
use jni::JavaVM;

/// Reads `Environment.getExternalStorageState()`
pub struct AndroidStorageProbe {
    #[cfg(target_os = "android")]
    vm: JavaVM,
}

#[cfg(target_os = "android")]
impl AndroidStorageProbe {
    /// # Safety
    ///
    /// `vm` must be the live `JavaVM*` of the running activity.
    pub unsafe fn from_raw(vm: *mut std::ffi::c_void) -> Result<Self> {
        let vm = JavaVM::from_raw(vm.cast())
            .map_err(|e| BridgeError::Host(format!("Invalid JavaVM: {}", e)))?;
        Ok(Self { vm })
    }
}

#[cfg(target_os = "android")]
impl MediaProbe for AndroidStorageProbe {
    fn storage_state(&self) -> Result<StorageState> {
        let mut env = self
            .vm
            .attach_current_thread()
            .map_err(|e| BridgeError::Host(format!("Failed to attach thread: {}", e)))?;

        let state = env
            .call_static_method(
                "android/os/Environment",
                "getExternalStorageState",
                "()Ljava/lang/String;",
                &[],
            )
            .and_then(|value| value.l())
            .and_then(|obj| {
                let state = JString::from(obj);
                let text: String = env.get_string(&state)?.into();
                Ok(text)
            });

        match state {
            Ok(state) => Ok(StorageState::parse(&state)),
            Err(e) => Err(crate::jni_bridge::host_error(
                &mut env,
                "getExternalStorageState failed",
                e,
            )),
        }
    }
}

// Stub implementation for non-Android builds (for cross-compilation checks)
#[cfg(not(target_os = "android"))]
impl AndroidStorageProbe {
    pub fn new() -> Self {
        Self {}
    }
}

#[cfg(not(target_os = "android"))]
impl MediaProbe for AndroidStorageProbe {
    fn storage_state(&self) -> Result<StorageState> {
        Err(BridgeError::Unsupported(
            "Storage state only available on Android".to_string(),
        ))
    }
}
