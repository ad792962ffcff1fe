//! Native activity entry point
//!
//! `android_main` runs on the native activity's own thread. It loads the
//! bundled configuration, subscribes the media receiver with the activity,
//! waits until external storage is mounted (or the configured timeout
//! passes) while still polling lifecycle events, then services lifecycle
//! events until the activity is destroyed, at which point the receiver is
//! unregistered.

use mediabridge_core::config::LoggingConfig;

/// Max level for the `log` facade
pub fn log_level(config: &LoggingConfig) -> log::LevelFilter {
    config.level.parse().unwrap_or(log::LevelFilter::Debug)
}

/// Max level for `tracing` events
pub fn tracing_level(config: &LoggingConfig) -> tracing_subscriber::filter::LevelFilter {
    config
        .level
        .parse()
        .unwrap_or(tracing_subscriber::filter::LevelFilter::DEBUG)
}

#[cfg(target_os = "android")]
mod native {
    use std::sync::Arc;
    use std::time::Duration;

    use android_activity::{AndroidApp, MainEvent, PollEvent};
    use mediabridge_core::config::LoggingConfig;
    use mediabridge_core::{
        wait_for_media_polling, ActivityBootstrap, BridgeConfig, MediaCenterHandler,
    };

    use super::{log_level, tracing_level};
    use crate::assets;
    use crate::bus::AndroidEventBus;
    use crate::storage::AndroidStorageProbe;

    const MEDIA_WAIT_STEP: Duration = Duration::from_millis(100);

    /// Initialize Android logging
    fn init_logging(config: &LoggingConfig) {
        // Initialize android_logger for log crate
        android_logger::init_once(
            android_logger::Config::default()
                .with_max_level(log_level(config))
                .with_tag(config.tag.clone()),
        );

        // Initialize tracing-android for tracing crate
        use tracing_subscriber::layer::SubscriberExt;
        match tracing_android::layer(&config.tag) {
            Ok(layer) => {
                let subscriber = tracing_subscriber::registry()
                    .with(tracing_level(config))
                    .with(layer);
                let _ = tracing::subscriber::set_global_default(subscriber);
            }
            Err(e) => log::warn!("tracing-android unavailable: {}", e),
        }
    }

    #[no_mangle]
    pub fn android_main(app: AndroidApp) {
        let loaded = assets::load_config(&app);
        let config = match &loaded {
            Ok(config) => config.clone(),
            Err(_) => BridgeConfig::default(),
        };
        init_logging(&config.logging);
        if let Err(e) = loaded {
            tracing::error!("Ignoring bundled configuration: {}", e);
        }
        tracing::info!("android_main starting");

        // SAFETY: pointers come straight from the running native activity
        let bus = match unsafe {
            AndroidEventBus::from_raw(
                app.vm_as_ptr(),
                app.activity_as_ptr(),
                &config.receiver.java_class,
            )
        } {
            Ok(bus) => bus,
            Err(e) => {
                tracing::error!("Cannot bind to activity: {}", e);
                return;
            }
        };

        let handler = MediaCenterHandler::new();
        let mut activity = ActivityBootstrap::new(bus, &config, Arc::new(handler.clone()));
        if let Err(e) = activity.on_create(None) {
            tracing::error!("Receiver registration failed: {}", e);
            return;
        }

        // Lifecycle events keep being serviced while waiting, so host
        // callbacks that wait on this thread are not held up by the timeout
        let mut destroyed = false;
        // SAFETY: as above
        match unsafe { AndroidStorageProbe::from_raw(app.vm_as_ptr()) } {
            Ok(probe) => {
                let waited = wait_for_media_polling(
                    &probe,
                    &handler.signal(),
                    config.media.wait_timeout(),
                    MEDIA_WAIT_STEP,
                    || {
                        destroyed = !poll_lifecycle(&app, Some(Duration::ZERO));
                        !destroyed
                    },
                );
                match waited {
                    Ok(true) => tracing::info!("External media available"),
                    Ok(false) => tracing::warn!("Continuing without external media"),
                    Err(e) => tracing::error!("Storage probe failed: {}", e),
                }
            }
            Err(e) => tracing::error!("Storage probe unavailable: {}", e),
        }

        if !destroyed {
            while poll_lifecycle(&app, None) {}
        }

        if let Err(e) = activity.on_destroy() {
            tracing::warn!("Receiver unregistration failed: {}", e);
        }
        tracing::info!("android_main finished");
    }

    /// Service pending lifecycle events; returns `false` once the activity is destroyed
    fn poll_lifecycle(app: &AndroidApp, timeout: Option<Duration>) -> bool {
        let mut running = true;
        app.poll_events(timeout, |event| {
            if let PollEvent::Main(main_event) = event {
                match main_event {
                    MainEvent::Resume { .. } => tracing::debug!("Activity resumed"),
                    MainEvent::Pause => tracing::debug!("Activity paused"),
                    MainEvent::Destroy => {
                        tracing::info!("Activity destroyed");
                        running = false;
                    }
                    _ => {}
                }
            }
        });
        running
    }
}

#[cfg(target_os = "android")]
pub use native::android_main;
