/// Window Commands
/// Landing stage operations: spawn, raise, close and the capacity modal

use crate::error::Result;
use crate::models::DesktopSnapshot;
use crate::services::{Desktop, HotkeyOutcome};
use std::sync::Arc;
use std::time::Instant;
use tauri::State;

#[tauri::command]
pub fn desktop_state(desktop: State<'_, Arc<Desktop>>) -> DesktopSnapshot {
    desktop.snapshot()
}

/// "Open terminal" button
#[tauri::command]
pub fn window_spawn(desktop: State<'_, Arc<Desktop>>) -> Option<u32> {
    desktop.spawn_window()
}

/// Ctrl+T
#[tauri::command]
pub fn window_hotkey(desktop: State<'_, Arc<Desktop>>) -> HotkeyOutcome {
    desktop.hotkey(Instant::now())
}

/// Escape
#[tauri::command]
pub fn window_escape(desktop: State<'_, Arc<Desktop>>) {
    desktop.escape()
}

#[tauri::command]
pub fn window_modal_ok(desktop: State<'_, Arc<Desktop>>) {
    desktop.modal_ok()
}

/// Returns the dropped window id; call `window_tick` for the replacement.
#[tauri::command]
pub fn window_replace_oldest(desktop: State<'_, Arc<Desktop>>) -> Option<u32> {
    desktop.replace_oldest()
}

#[tauri::command]
pub fn window_tick(desktop: State<'_, Arc<Desktop>>) -> Option<u32> {
    desktop.tick()
}

/// Pointer-down on a window
#[tauri::command]
pub fn window_front(desktop: State<'_, Arc<Desktop>>, id: u32) -> Result<()> {
    desktop.bring_to_front(id)
}

#[tauri::command]
pub fn window_close(desktop: State<'_, Arc<Desktop>>, id: u32) -> Result<()> {
    desktop.close_window(id)
}
