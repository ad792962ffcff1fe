//! JNI bridge for the Java receiver shim
//!
//! `org.mediabridge.MediaBridgeReceiver` declares one native method,
//! `nativeOnReceive(long, Intent)`. It is bound here at runtime with
//! `RegisterNatives`, since the shim is loaded by the app's class loader
//! rather than found through the library's exported symbols.

use std::ffi::c_void;
use std::panic::{catch_unwind, AssertUnwindSafe};

use jni::objects::{JClass, JObject, JString, JValue};
use jni::sys::jlong;
use jni::{JNIEnv, NativeMethod};

use mediabridge_core::{BridgeError, Intent};

use crate::registry;

const NATIVE_ON_RECEIVE_SIG: &str = "(JLandroid/content/Intent;)V";

/// Map a JNI failure to a bridge error, describing and clearing any pending Java exception
pub fn host_error(env: &mut JNIEnv, context: &str, err: jni::errors::Error) -> BridgeError {
    if env.exception_check().unwrap_or(false) {
        let _ = env.exception_describe();
        let _ = env.exception_clear();
    }
    BridgeError::Host(format!("{}: {}", context, err))
}

/// Call a `String`-returning no-arg method, mapping Java `null` to `None`
fn string_method(
    env: &mut JNIEnv,
    obj: &JObject,
    name: &str,
) -> jni::errors::Result<Option<String>> {
    let value = env.call_method(obj, name, "()Ljava/lang/String;", &[])?.l()?;
    if value.is_null() {
        return Ok(None);
    }
    let value = JString::from(value);
    let text: String = env.get_string(&value)?.into();
    env.delete_local_ref(value)?;
    Ok(Some(text))
}

/// Copy the fields the receiver needs out of an `android.content.Intent`
pub fn intent_from_java(env: &mut JNIEnv, intent: &JObject) -> jni::errors::Result<Intent> {
    Ok(Intent {
        action: string_method(env, intent, "getAction")?,
        data: string_method(env, intent, "getDataString")?,
        ..Intent::default()
    })
}

extern "system" fn native_on_receive<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    handle: jlong,
    intent: JObject<'local>,
) {
    if intent.is_null() {
        return;
    }
    let Some(receiver) = registry::get(registry::id_of(handle)) else {
        tracing::warn!(handle, "Broadcast for unregistered receiver");
        return;
    };

    let intent = match intent_from_java(&mut env, &intent) {
        Ok(intent) => intent,
        Err(e) => {
            let err = host_error(&mut env, "Failed to read intent", e);
            tracing::error!("{}", err);
            return;
        }
    };

    // Unwinding into the JVM is undefined behaviour
    if catch_unwind(AssertUnwindSafe(|| receiver.on_receive(&intent))).is_err() {
        tracing::error!(action = ?intent.action(), "Handler panicked while receiving intent");
    }
}

/// Load the receiver shim through the activity's class loader
pub fn load_class<'local>(
    env: &mut JNIEnv<'local>,
    activity: &JObject,
    class_name: &str,
) -> jni::errors::Result<JClass<'local>> {
    let loader = env
        .call_method(activity, "getClassLoader", "()Ljava/lang/ClassLoader;", &[])?
        .l()?;
    let name = env.new_string(class_name)?;
    let class = env
        .call_method(
            &loader,
            "loadClass",
            "(Ljava/lang/String;)Ljava/lang/Class;",
            &[JValue::Object(&name)],
        )?
        .l()?;
    Ok(JClass::from(class))
}

/// Bind `nativeOnReceive` on the shim class
pub fn register_natives(env: &mut JNIEnv, class: &JClass) -> jni::errors::Result<()> {
    let methods = [NativeMethod {
        name: "nativeOnReceive".into(),
        sig: NATIVE_ON_RECEIVE_SIG.into(),
        fn_ptr: native_on_receive as *mut c_void,
    }];
    env.register_native_methods(class, &methods)
}
