//! Host intents
//!
//! An [`Intent`] is the record the host platform delivers to a receiver:
//! an action tag, an optional data URI and a bag of string extras. This
//! crate never creates intents on behalf of the host; it only inspects and
//! forwards them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Action tags from the host's intent taxonomy
pub mod actions {
    /// External storage has been mounted
    pub const MEDIA_MOUNTED: &str = "android.intent.action.MEDIA_MOUNTED";
    pub const MEDIA_UNMOUNTED: &str = "android.intent.action.MEDIA_UNMOUNTED";
    pub const MEDIA_EJECT: &str = "android.intent.action.MEDIA_EJECT";
    pub const MEDIA_REMOVED: &str = "android.intent.action.MEDIA_REMOVED";
    pub const MEDIA_SCANNER_STARTED: &str = "android.intent.action.MEDIA_SCANNER_STARTED";
    pub const MEDIA_SCANNER_FINISHED: &str = "android.intent.action.MEDIA_SCANNER_FINISHED";
}

/// Data URI schemes
pub mod schemes {
    pub const FILE: &str = "file";
}

/// A host-delivered event
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    /// Action tag; absent for malformed or targeted intents
    #[serde(default)]
    pub action: Option<String>,
    /// Data URI (for media intents, the mount point as `file://...`)
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub extras: BTreeMap<String, String>,
}

impl Intent {
    /// Create an intent with the given action
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: Some(action.into()),
            ..Self::default()
        }
    }

    /// Create an intent without an action tag
    pub fn without_action() -> Self {
        Self::default()
    }

    pub fn with_data(mut self, uri: impl Into<String>) -> Self {
        self.data = Some(uri.into());
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }

    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extras.get(key).map(String::as_str)
    }

    /// Scheme of the data URI, if the data carries one
    ///
    /// A scheme starts with a letter followed by letters, digits, `+`, `-`
    /// or `.`, and ends at the first `:`.
    pub fn scheme(&self) -> Option<&str> {
        let data = self.data.as_deref()?;
        let (scheme, _) = data.split_once(':')?;
        let mut chars = scheme.chars();
        let first = chars.next()?;
        if !first.is_ascii_alphabetic() {
            return None;
        }
        if chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
            Some(scheme)
        } else {
            None
        }
    }
}
