/// Termfolio
/// Terminal portfolio: a simulated shell with canned commands, hosted in a
/// Tauri window. The simulation core has no UI dependency; the desktop shell
/// is behind the `desktop` feature.
///
/// Module structure:
/// - services: terminal simulation (catalog, renderer, boot, sessions, windows)
/// - models: shared data types, serializable for IPC
/// - commands: Tauri IPC handlers (frontend → backend), `desktop` only

pub mod config;
pub mod error;
pub mod models;
pub mod services;

#[cfg(feature = "desktop")]
mod commands;

pub use config::TerminalConfig;
pub use error::{Error, Result};

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use services::Desktop;
    use std::sync::Arc;
    use tauri::{Manager, RunEvent};

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }

            let config = commands::load_config(app.handle());
            let events = Arc::new(commands::TauriEvents::new(app.handle().clone()));
            let desktop = Arc::new(Desktop::new(config, events));
            desktop.start();
            app.manage(desktop);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::windows::desktop_state,
            commands::windows::window_spawn,
            commands::windows::window_hotkey,
            commands::windows::window_escape,
            commands::windows::window_modal_ok,
            commands::windows::window_replace_oldest,
            commands::windows::window_tick,
            commands::windows::window_front,
            commands::windows::window_close,
            commands::terminal::terminal_view,
            commands::terminal::terminal_input,
            commands::terminal::terminal_submit,
            commands::terminal::terminal_key,
            commands::terminal::terminal_action,
            commands::terminal::terminal_terms_input,
            commands::terminal::terminal_terms_submit,
            commands::terminal::terminal_maximize,
            commands::terminal::terminal_restore,
            commands::terminal::terminal_close,
            commands::assets::download_cv,
            commands::assets::open_link,
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app_handle, event| {
            if let RunEvent::Exit = event {
                // Cancel pending boot timers before the runtime goes away
                log::info!("App shutting down - cancelling terminal boots");
                if let Some(desktop) = app_handle.try_state::<Arc<Desktop>>() {
                    desktop.shutdown();
                }
            }
        });
}
