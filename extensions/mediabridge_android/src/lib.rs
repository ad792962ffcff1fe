//! mediabridge Android platform
//!
//! Native activity entry, JNI receiver bridge, and storage probe.
//!
//! The Java side is a single class, `org.mediabridge.MediaBridgeReceiver`
//! (see `java/`), packaged in the APK. Everything else, including filter
//! construction and receiver registration, is driven from Rust.

pub mod activity;
pub mod assets;
pub mod bus;
#[cfg(target_os = "android")]
pub mod jni_bridge;
pub mod registry;
pub mod storage;

pub use assets::config_from_asset;
pub use bus::AndroidEventBus;
pub use storage::AndroidStorageProbe;

#[cfg(target_os = "android")]
pub use assets::load_config;

// Android-specific entry point
#[cfg(target_os = "android")]
pub use activity::android_main;
