//! Bridge configuration from APK assets
//!
//! `mediabridge.toml` is read from the APK's assets/ folder through the
//! NDK AssetManager. A missing file means defaults.

use mediabridge_core::config::CONFIG_FILE;
use mediabridge_core::{BridgeConfig, Result};

#[cfg(target_os = "android")]
use android_activity::AndroidApp;
#[cfg(target_os = "android")]
use mediabridge_core::BridgeError;

#[cfg(target_os = "android")]
use std::ffi::CString;

/// Parse optional config text, falling back to defaults when absent
pub fn config_from_asset(content: Option<&str>) -> Result<BridgeConfig> {
    match content {
        Some(text) => BridgeConfig::from_toml_str(text),
        None => {
            tracing::debug!("No {} asset, using defaults", CONFIG_FILE);
            Ok(BridgeConfig::default())
        }
    }
}

/// Read an asset as UTF-8 text; `None` when the asset does not exist
#[cfg(target_os = "android")]
pub fn read_asset(app: &AndroidApp, path: &str) -> Result<Option<String>> {
    use std::io::Read;

    let c_path = CString::new(path)
        .map_err(|e| BridgeError::Host(format!("Invalid asset path: {}", e)))?;

    let asset_manager: ndk::asset::AssetManager = app.asset_manager();
    let Some(mut asset) = asset_manager.open(&c_path) else {
        return Ok(None);
    };

    let mut content = String::new();
    asset.read_to_string(&mut content)?;
    Ok(Some(content))
}

/// Load the bridge configuration bundled with the APK
#[cfg(target_os = "android")]
pub fn load_config(app: &AndroidApp) -> Result<BridgeConfig> {
    let content = read_asset(app, CONFIG_FILE)?;
    config_from_asset(content.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_asset_uses_defaults() {
        assert_eq!(config_from_asset(None).unwrap(), BridgeConfig::default());
    }

    #[test]
    fn test_asset_overrides() {
        let config = config_from_asset(Some("[receiver]\njava_class = \"org.xbmc.xbmc.Receiver\"\n"))
            .unwrap();
        assert_eq!(config.receiver.java_class, "org.xbmc.xbmc.Receiver");
        assert_eq!(config.media, Default::default());
    }
}
