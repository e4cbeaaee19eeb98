/// Asset Commands
/// CV download through a save dialog, and opening rendered links

use crate::error::{Error, Result};
use crate::models::Effect;
use crate::services::Desktop;
use std::sync::Arc;
use tauri::path::BaseDirectory;
use tauri::{AppHandle, Manager, State};
use tauri_plugin_dialog::DialogExt;
use tauri_plugin_opener::OpenerExt;

/// Ask where to save a bundled asset, then copy it there.
pub fn save_asset(app: &AppHandle, asset: &str, file_name: &str) -> Result<()> {
    let source = app
        .path()
        .resolve(format!("assets/{}", asset), BaseDirectory::Resource)
        .map_err(|e| Error::Host(format!("Asset {} not found: {}", asset, e)))?;

    log::info!("[Download] Saving {}", source.display());
    app.dialog()
        .file()
        .set_file_name(file_name)
        .save_file(move |picked| {
            let Some(picked) = picked else {
                log::info!("[Download] Cancelled");
                return;
            };
            let target = match picked.into_path() {
                Ok(path) => path,
                Err(e) => {
                    log::warn!("[Download] Invalid target: {}", e);
                    return;
                }
            };
            match std::fs::copy(&source, &target) {
                Ok(_) => log::info!("[Download] Saved to {}", target.display()),
                Err(e) => log::warn!("[Download] Copy failed: {}", e),
            }
        });
    Ok(())
}

/// Landing page "$: Download CV"
#[tauri::command]
pub fn download_cv(app: AppHandle, desktop: State<'_, Arc<Desktop>>) -> Result<()> {
    match desktop.download_cv() {
        Effect::Download { asset, file_name } => save_asset(&app, &asset, &file_name),
        _ => Ok(()),
    }
}

/// Open a link fragment's target. Only web and mail links are allowed.
#[tauri::command]
pub fn open_link(app: AppHandle, href: String) -> Result<()> {
    let allowed = ["https://", "http://", "mailto:"];
    if !allowed.iter().any(|scheme| href.starts_with(scheme)) {
        return Err(Error::Host(format!("Refusing to open {}", href)));
    }
    log::info!("[Link] Opening {}", href);
    app.opener()
        .open_url(href, None::<&str>)
        .map_err(|e| Error::Host(e.to_string()))
}
