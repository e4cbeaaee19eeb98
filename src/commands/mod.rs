/// Commands module
/// Tauri IPC handlers (frontend → backend) and the glue that turns session
/// effects and desktop notifications into window events

pub mod assets;
pub mod terminal;
pub mod windows;

use crate::config::TerminalConfig;
use crate::models::{BootLine, Effect};
use crate::services::DesktopEvents;
use tauri::{AppHandle, Emitter, Manager};

const CONFIG_FILE: &str = "termfolio.json";

/// Load `termfolio.json` from the app config dir, defaults on any failure.
pub fn load_config(app: &AppHandle) -> TerminalConfig {
    let Ok(dir) = app.path().app_config_dir() else {
        log::warn!("[Config] No app config dir, using defaults");
        return TerminalConfig::default();
    };
    match TerminalConfig::load(&dir.join(CONFIG_FILE)) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("[Config] {}, using defaults", e);
            TerminalConfig::default()
        }
    }
}

/// Perform the effects a session requested. `Close` is handled by the
/// desktop itself and never reaches here.
pub fn apply_effects(app: &AppHandle, id: u32, effects: &[Effect]) {
    for effect in effects {
        match effect {
            Effect::Download { asset, file_name } => {
                if let Err(e) = assets::save_asset(app, asset, file_name) {
                    log::warn!("[Download] {}", e);
                }
            }
            Effect::Navigate { path } => {
                let _ = app.emit("navigate", path);
            }
            Effect::FocusInput | Effect::FocusTerms => {
                let _ = app.emit(&format!("focus-{}", id), effect);
            }
            Effect::Close => {}
        }
    }
}

/// Forwards desktop notifications as Tauri events.
pub struct TauriEvents {
    app: AppHandle,
}

impl TauriEvents {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl DesktopEvents for TauriEvents {
    fn session_changed(&self, id: u32) {
        let _ = self.app.emit(&format!("terminal-update-{}", id), ());
    }

    fn session_effects(&self, id: u32, effects: &[Effect]) {
        apply_effects(&self.app, id, effects);
    }

    fn windows_changed(&self) {
        let _ = self.app.emit("windows-update", ());
    }

    fn boot_line(&self, line: &BootLine) {
        let _ = self.app.emit("boot-line", line);
    }

    fn boot_done(&self) {
        let _ = self.app.emit("boot-done", ());
    }
}
