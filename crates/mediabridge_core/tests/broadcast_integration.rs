//! Integration tests for activity bootstrap + receiver dispatch
//!
//! These tests verify that:
//! - Startup registers exactly one receiver with a two-rule filter
//! - Intents reach exactly one handler method, or none without an action
//! - Teardown releases the registration
//! - A media-mounted broadcast unblocks a startup waiting for media

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use mediabridge_core::prelude::*;
use mediabridge_core::{wait_for_media, MatchRule, MediaProbe, Result, StorageState};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Generic(Intent),
    Mounted(Intent),
}

#[derive(Default)]
struct MockHandler {
    calls: Mutex<Vec<Call>>,
}

impl MockHandler {
    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl MediaHandler for MockHandler {
    fn on_generic_event(&self, intent: &Intent) {
        self.calls.lock().unwrap().push(Call::Generic(intent.clone()));
    }

    fn on_media_mounted(&self, intent: &Intent) {
        self.calls.lock().unwrap().push(Call::Mounted(intent.clone()));
    }
}

fn started() -> (Arc<MockHandler>, ActivityBootstrap<LocalEventBus>) {
    let handler = Arc::new(MockHandler::default());
    let mut activity =
        ActivityBootstrap::new(LocalEventBus::new(), &BridgeConfig::default(), handler.clone());
    activity.on_create(None).unwrap();
    (handler, activity)
}

/// Scenario: startup completes with one subscriber and a two-rule filter
#[test]
fn test_startup_registers_single_receiver() {
    let (_, activity) = started();

    assert_eq!(activity.bus().subscription_count(), 1);
    let id = activity.subscription().unwrap();
    let subscription = activity.bus().subscription(id).unwrap();
    assert_eq!(
        subscription.filter.rules(),
        &[
            MatchRule::DataScheme("file".to_string()),
            MatchRule::Action("android.intent.action.MEDIA_MOUNTED".to_string()),
        ]
    );
}

/// Scenario: an intent without an action reaches no handler
#[test]
fn test_null_action_calls_nothing() {
    let (handler, activity) = started();

    let dispatch = activity.receiver().on_receive(&Intent::without_action());

    assert_eq!(dispatch, Dispatch::Ignored);
    assert!(handler.calls().is_empty());
}

/// Scenario: MEDIA_MOUNTED reaches the mounted handler once
#[test]
fn test_media_mounted_calls_mounted_handler_once() {
    let (handler, activity) = started();
    let intent =
        Intent::new("android.intent.action.MEDIA_MOUNTED").with_data("file:///mnt/sdcard");

    assert_eq!(activity.bus().broadcast(&intent), vec![Dispatch::MediaMounted]);

    assert_eq!(handler.calls(), vec![Call::Mounted(intent)]);
}

/// Scenario: MEDIA_SCANNER_STARTED reaches the generic handler once
#[test]
fn test_other_action_calls_generic_handler_once() {
    let (handler, activity) = started();
    let intent = Intent::new("android.intent.action.MEDIA_SCANNER_STARTED")
        .with_data("file:///mnt/sdcard");

    // Not part of the registered filter, so delivered straight to the receiver
    assert!(activity.bus().broadcast(&intent).is_empty());
    activity.receiver().on_receive(&intent);

    assert_eq!(handler.calls(), vec![Call::Generic(intent)]);
}

#[test]
fn test_destroy_releases_subscription() {
    let (handler, mut activity) = started();

    assert!(activity.on_destroy().unwrap());
    assert_eq!(activity.bus().subscription_count(), 0);

    let intent = Intent::new(actions::MEDIA_MOUNTED).with_data("file:///mnt/sdcard");
    assert!(activity.bus().broadcast(&intent).is_empty());
    assert!(handler.calls().is_empty());

    // The activity can be created again after teardown
    activity.on_create(None).unwrap();
    assert_eq!(activity.bus().subscription_count(), 1);
}

#[test]
fn test_custom_config_drives_filter_and_dispatch() {
    let config = BridgeConfig::from_toml_str(
        r#"
        [receiver]
        mounted_action = "com.example.STORAGE_READY"
        data_scheme = "content"
        "#,
    )
    .unwrap();
    let handler = Arc::new(MockHandler::default());
    let mut activity = ActivityBootstrap::new(LocalEventBus::new(), &config, handler.clone());
    activity.on_create(None).unwrap();

    let ready = Intent::new("com.example.STORAGE_READY").with_data("content://volumes/1");
    assert_eq!(activity.bus().broadcast(&ready), vec![Dispatch::MediaMounted]);
    let legacy = Intent::new(actions::MEDIA_MOUNTED).with_data("file:///mnt/sdcard");
    assert!(activity.bus().broadcast(&legacy).is_empty());

    assert_eq!(handler.calls(), vec![Call::Mounted(ready)]);
}

struct FlagProbe(Arc<AtomicBool>);

impl MediaProbe for FlagProbe {
    fn storage_state(&self) -> Result<StorageState> {
        Ok(if self.0.load(Ordering::SeqCst) {
            StorageState::Mounted
        } else {
            StorageState::Removed
        })
    }
}

/// Startup waiting for media is released by the mounted broadcast
#[test]
fn test_mounted_broadcast_unblocks_media_wait() {
    let handler = MediaCenterHandler::new();
    let signal = handler.signal();
    let mut activity = ActivityBootstrap::new(
        LocalEventBus::new(),
        &BridgeConfig::default(),
        Arc::new(handler.clone()),
    );
    activity.on_create(None).unwrap();

    let mounted = Arc::new(AtomicBool::new(false));
    let probe = FlagProbe(mounted.clone());
    let receiver = Arc::clone(activity.receiver());

    let host = thread::spawn(move || {
        thread::sleep(Duration::from_millis(20));
        mounted.store(true, Ordering::SeqCst);
        receiver.on_receive(&Intent::new(actions::MEDIA_MOUNTED).with_data("file:///sdcard"));
    });

    assert!(wait_for_media(&probe, &signal, Duration::from_secs(10)).unwrap());
    host.join().unwrap();
}
