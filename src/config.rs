use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Tunables for the terminal stage. Every field may be omitted in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    pub max_windows: usize,
    pub spawn_throttle_ms: u64,
    pub cascade_step_px: i32,
    pub cascade_max_px: i32,
    /// Delay between characters of the typed `system --init`
    pub type_tick_ms: u64,
    /// Multiplier applied to every environment boot step
    pub boot_delay_scale: f64,
    pub boot_grace_ms: u64,
    /// File name of the CV inside the bundled resources
    pub cv_asset: String,
    pub prompt_user: String,
    pub prompt_host: String,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            max_windows: 5,
            spawn_throttle_ms: 250,
            cascade_step_px: 18,
            cascade_max_px: 72,
            type_tick_ms: 75,
            boot_delay_scale: 1.35,
            boot_grace_ms: 350,
            cv_asset: "cv.pdf".to_string(),
            prompt_user: "alexandro".to_string(),
            prompt_host: "localhost".to_string(),
        }
    }
}

impl TerminalConfig {
    /// Load from a JSON file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("[Config] {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&raw)?;
        log::info!("[Config] Loaded {}", path.display());
        Ok(config)
    }

    pub fn spawn_throttle(&self) -> Duration {
        Duration::from_millis(self.spawn_throttle_ms)
    }

    pub fn type_tick(&self) -> Duration {
        Duration::from_millis(self.type_tick_ms)
    }

    pub fn boot_grace(&self) -> Duration {
        Duration::from_millis(self.boot_grace_ms)
    }

    /// Config with every delay zeroed, for driving boots synchronously in tests.
    pub fn instant() -> Self {
        Self {
            spawn_throttle_ms: 0,
            type_tick_ms: 0,
            boot_delay_scale: 0.0,
            boot_grace_ms: 0,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: TerminalConfig = serde_json::from_str(r#"{"max_windows": 3}"#).unwrap();
        assert_eq!(config.max_windows, 3);
        assert_eq!(config.spawn_throttle_ms, 250);
        assert_eq!(config.cv_asset, "cv.pdf");
    }

    #[test]
    fn missing_file_is_default() {
        let path = std::env::temp_dir().join("termfolio-config-that-does-not-exist.json");
        assert_eq!(TerminalConfig::load(&path).unwrap(), TerminalConfig::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("termfolio-bad-{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();
        let result = TerminalConfig::load(&path);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(result, Err(crate::Error::Config(_))));
    }
}
