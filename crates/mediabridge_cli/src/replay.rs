//! Replay recorded intents through an in-process bus

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use mediabridge_core::prelude::*;

/// How each replayed intent was handled
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    pub total: usize,
    /// Did not match the registered filter (bus mode only)
    pub filtered: usize,
    pub ignored: usize,
    pub mounted: usize,
    pub generic: usize,
}

impl ReplaySummary {
    fn record(&mut self, dispatch: Dispatch) {
        match dispatch {
            Dispatch::Ignored => self.ignored += 1,
            Dispatch::MediaMounted => self.mounted += 1,
            Dispatch::Generic => self.generic += 1,
        }
    }
}

/// Parse a JSON array of intents
pub fn read_intents(path: &Path) -> Result<Vec<Intent>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Run intents through a bootstrapped activity
///
/// In bus mode intents are broadcast on the local bus, so only those
/// matching the registered filter reach the receiver. In direct mode they
/// are handed to the receiver as-is.
pub fn replay(config: &BridgeConfig, intents: &[Intent], direct: bool) -> Result<ReplaySummary> {
    let handler = MediaCenterHandler::new();
    handler.on_any_intent(|intent| {
        tracing::info!(action = ?intent.action(), data = ?intent.data(), "Generic intent");
    });

    let mut activity =
        ActivityBootstrap::new(LocalEventBus::new(), config, Arc::new(handler.clone()));
    activity.on_create(None)?;

    let mut summary = ReplaySummary::default();
    for intent in intents {
        summary.total += 1;
        let dispatches = if direct {
            vec![activity.receiver().on_receive(intent)]
        } else {
            activity.bus().broadcast(intent)
        };
        if dispatches.is_empty() {
            tracing::debug!(action = ?intent.action(), "Filtered out");
            summary.filtered += 1;
            continue;
        }
        for dispatch in dispatches {
            println!(
                "{:<14} {}",
                format!("{:?}", dispatch),
                intent.action().unwrap_or("<none>")
            );
            summary.record(dispatch);
        }
    }

    activity.on_destroy()?;
    if handler.signal().is_set() {
        tracing::info!("Media mount signal was raised");
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recording() -> Vec<Intent> {
        vec![
            Intent::without_action(),
            Intent::new(actions::MEDIA_MOUNTED).with_data("file:///sdcard"),
            Intent::new(actions::MEDIA_SCANNER_STARTED).with_data("file:///sdcard"),
        ]
    }

    #[test]
    fn test_bus_mode_applies_filter() {
        let summary = replay(&BridgeConfig::default(), &recording(), false).unwrap();
        assert_eq!(
            summary,
            ReplaySummary {
                total: 3,
                filtered: 2,
                ignored: 0,
                mounted: 1,
                generic: 0,
            }
        );
    }

    #[test]
    fn test_direct_mode_dispatches_everything() {
        let summary = replay(&BridgeConfig::default(), &recording(), true).unwrap();
        assert_eq!(summary.filtered, 0);
        assert_eq!(summary.ignored, 1);
        assert_eq!(summary.mounted, 1);
        assert_eq!(summary.generic, 1);
    }
}
