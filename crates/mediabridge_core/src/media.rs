//! External storage availability
//!
//! Startup blocks until external media is usable: the host is probed
//! once, and if storage is not yet mounted the caller waits for the
//! media-mounted broadcast (which sets a [`MediaMountSignal`]) up to a
//! timeout, then probes again.

use std::sync::{Condvar, Mutex};
use std::time::{Duration, Instant};

use crate::error::Result;

/// Host-reported external storage state
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageState {
    Mounted,
    MountedReadOnly,
    Unmounted,
    Checking,
    Removed,
    Shared,
    BadRemoval,
    Unmountable,
    Ejecting,
    Unknown(String),
}

impl StorageState {
    /// Parse the host's storage state string
    pub fn parse(state: &str) -> Self {
        match state {
            "mounted" => Self::Mounted,
            "mounted_ro" => Self::MountedReadOnly,
            "unmounted" => Self::Unmounted,
            "checking" => Self::Checking,
            "removed" => Self::Removed,
            "shared" => Self::Shared,
            "bad_removal" => Self::BadRemoval,
            "unmountable" => Self::Unmountable,
            "ejecting" => Self::Ejecting,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Read-only media counts as mounted
    pub fn is_mounted(&self) -> bool {
        matches!(self, Self::Mounted | Self::MountedReadOnly)
    }
}

/// Queries the host for the current storage state
pub trait MediaProbe {
    fn storage_state(&self) -> Result<StorageState>;

    fn is_media_mounted(&self) -> Result<bool> {
        Ok(self.storage_state()?.is_mounted())
    }
}

/// One-shot event set when a media-mounted broadcast arrives
#[derive(Debug, Default)]
pub struct MediaMountSignal {
    mounted: Mutex<bool>,
    cond: Condvar,
}

impl MediaMountSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark media as mounted and wake all waiters
    pub fn notify(&self) {
        let mut mounted = self.mounted.lock().unwrap_or_else(|e| e.into_inner());
        *mounted = true;
        self.cond.notify_all();
    }

    pub fn is_set(&self) -> bool {
        *self.mounted.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn reset(&self) {
        *self.mounted.lock().unwrap_or_else(|e| e.into_inner()) = false;
    }

    /// Block until notified or `timeout` elapses; returns whether the signal is set
    pub fn wait(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut mounted = self.mounted.lock().unwrap_or_else(|e| e.into_inner());
        while !*mounted {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            let (guard, _) = self
                .cond
                .wait_timeout(mounted, deadline - now)
                .unwrap_or_else(|e| e.into_inner());
            mounted = guard;
        }
        *mounted
    }
}

/// Wait for external media to become available
///
/// Returns `true` when the probe reports storage mounted, either right
/// away or after the signal fires (or the timeout passes).
pub fn wait_for_media(
    probe: &dyn MediaProbe,
    signal: &MediaMountSignal,
    timeout: Duration,
) -> Result<bool> {
    if probe.is_media_mounted()? {
        return Ok(true);
    }
    tracing::info!(?timeout, "Waiting for external media");
    if !signal.wait(timeout) {
        tracing::warn!("No media mounted broadcast before timeout");
    }
    probe.is_media_mounted()
}

/// Like [`wait_for_media`], but waits in slices of `step` and calls `tick`
/// between them so the caller can keep servicing its own event queue
///
/// Waiting stops early when `tick` returns `false`.
pub fn wait_for_media_polling<F>(
    probe: &dyn MediaProbe,
    signal: &MediaMountSignal,
    timeout: Duration,
    step: Duration,
    mut tick: F,
) -> Result<bool>
where
    F: FnMut() -> bool,
{
    if probe.is_media_mounted()? {
        return Ok(true);
    }
    tracing::info!(?timeout, "Waiting for external media");
    let deadline = Instant::now() + timeout;
    loop {
        let now = Instant::now();
        if now >= deadline {
            tracing::warn!("No media mounted broadcast before timeout");
            break;
        }
        if signal.wait(step.min(deadline - now)) {
            break;
        }
        if !tick() {
            tracing::debug!("Media wait cancelled");
            break;
        }
    }
    probe.is_media_mounted()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread;

    struct FlagProbe(Arc<AtomicBool>);

    impl MediaProbe for FlagProbe {
        fn storage_state(&self) -> Result<StorageState> {
            Ok(if self.0.load(Ordering::SeqCst) {
                StorageState::Mounted
            } else {
                StorageState::Unmounted
            })
        }
    }

    #[test]
    fn test_parse_storage_states() {
        assert!(StorageState::parse("mounted").is_mounted());
        assert!(StorageState::parse("mounted_ro").is_mounted());
        assert!(!StorageState::parse("shared").is_mounted());
        assert_eq!(
            StorageState::parse("weird"),
            StorageState::Unknown("weird".to_string())
        );
    }

    #[test]
    fn test_already_mounted_returns_immediately() {
        let probe = FlagProbe(Arc::new(AtomicBool::new(true)));
        let signal = MediaMountSignal::new();
        let start = Instant::now();
        assert!(wait_for_media(&probe, &signal, Duration::from_secs(10)).unwrap());
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_signal_wakes_waiter() {
        let flag = Arc::new(AtomicBool::new(false));
        let probe = FlagProbe(flag.clone());
        let signal = Arc::new(MediaMountSignal::new());

        let notifier = {
            let signal = signal.clone();
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(20));
                flag.store(true, Ordering::SeqCst);
                signal.notify();
            })
        };

        assert!(wait_for_media(&probe, &signal, Duration::from_secs(10)).unwrap());
        notifier.join().unwrap();
        assert!(signal.is_set());
    }

    #[test]
    fn test_timeout_without_media() {
        let probe = FlagProbe(Arc::new(AtomicBool::new(false)));
        let signal = MediaMountSignal::new();
        assert!(!wait_for_media(&probe, &signal, Duration::from_millis(10)).unwrap());
    }

    #[test]
    fn test_reset_clears_signal() {
        let signal = MediaMountSignal::new();
        signal.notify();
        assert!(signal.wait(Duration::ZERO));
        signal.reset();
        assert!(!signal.is_set());
    }

    #[test]
    fn test_polling_wait_ticks_until_signal() {
        let flag = Arc::new(AtomicBool::new(false));
        let probe = FlagProbe(flag.clone());
        let signal = MediaMountSignal::new();
        let mut ticks = 0;

        let mounted = wait_for_media_polling(
            &probe,
            &signal,
            Duration::from_secs(10),
            Duration::from_millis(1),
            || {
                ticks += 1;
                if ticks == 3 {
                    flag.store(true, Ordering::SeqCst);
                    signal.notify();
                }
                true
            },
        )
        .unwrap();

        assert!(mounted);
        assert_eq!(ticks, 3);
    }

    #[test]
    fn test_polling_wait_stops_when_tick_declines() {
        let probe = FlagProbe(Arc::new(AtomicBool::new(false)));
        let signal = MediaMountSignal::new();
        let start = Instant::now();

        let mounted = wait_for_media_polling(
            &probe,
            &signal,
            Duration::from_secs(10),
            Duration::from_millis(1),
            || false,
        )
        .unwrap();

        assert!(!mounted);
        assert!(start.elapsed() < Duration::from_secs(5));
    }
}
