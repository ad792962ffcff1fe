//! Media center handler
//!
//! Production [`MediaHandler`]: a media-mounted broadcast sets the shared
//! [`MediaMountSignal`] that startup waits on, every other intent is fanned
//! out to the registered [`IntentListeners`].

use std::sync::{Arc, RwLock};

use crate::intent::Intent;
use crate::intents::IntentListeners;
use crate::media::MediaMountSignal;
use crate::receiver::MediaHandler;

#[derive(Clone, Default)]
pub struct MediaCenterHandler {
    signal: Arc<MediaMountSignal>,
    listeners: Arc<RwLock<IntentListeners>>,
}

impl MediaCenterHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount signal shared with whoever waits for media
    pub fn signal(&self) -> Arc<MediaMountSignal> {
        Arc::clone(&self.signal)
    }

    /// Register a listener for a generic intent action
    pub fn on_intent<F>(&self, action: impl Into<String>, listener: F)
    where
        F: Fn(&Intent) + Send + Sync + 'static,
    {
        self.listeners
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .register(action, listener);
    }

    /// Register a listener for all generic intents
    pub fn on_any_intent<F>(&self, listener: F)
    where
        F: Fn(&Intent) + Send + Sync + 'static,
    {
        self.listeners
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .register_any(listener);
    }
}

impl MediaHandler for MediaCenterHandler {
    fn on_generic_event(&self, intent: &Intent) {
        // Listeners run outside the lock so they may register further listeners
        let listeners = self
            .listeners
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .matching(intent);
        for listener in &listeners {
            listener(intent);
        }
        if listeners.is_empty() {
            tracing::debug!(action = ?intent.action(), "No listener for intent");
        }
    }

    fn on_media_mounted(&self, intent: &Intent) {
        tracing::info!(data = ?intent.data(), "Media mounted");
        self.signal.notify();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::actions;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_mounted_sets_signal() {
        let handler = MediaCenterHandler::new();
        assert!(!handler.signal().is_set());
        handler.on_media_mounted(&Intent::new(actions::MEDIA_MOUNTED));
        assert!(handler.signal().is_set());
    }

    #[test]
    fn test_generic_reaches_listener() {
        let handler = MediaCenterHandler::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        handler.on_intent(actions::MEDIA_SCANNER_FINISHED, move |_| {
            h.fetch_add(1, Ordering::SeqCst);
        });

        handler.on_generic_event(&Intent::new(actions::MEDIA_SCANNER_FINISHED));
        handler.on_generic_event(&Intent::new(actions::MEDIA_EJECT));

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(!handler.signal().is_set());
    }

    #[test]
    fn test_listener_can_register_listeners() {
        let handler = MediaCenterHandler::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let inner = handler.clone();
        let h = hits.clone();
        handler.on_intent("a", move |_| {
            let h = h.clone();
            inner.on_intent("b", move |_| {
                h.fetch_add(1, Ordering::SeqCst);
            });
        });

        let worker = {
            let handler = handler.clone();
            std::thread::spawn(move || handler.on_generic_event(&Intent::new("a")))
        };
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        while !worker.is_finished() {
            assert!(
                std::time::Instant::now() < deadline,
                "dispatch did not complete"
            );
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        worker.join().unwrap();

        handler.on_generic_event(&Intent::new("b"));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
