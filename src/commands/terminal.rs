/// Terminal Commands
/// Per-window session operations. Each returns the fresh view plus the
/// effects that were performed.

use super::apply_effects;
use crate::error::Result;
use crate::models::{Action, Effect, KeyInput, SessionView, TerminalResponse};
use crate::services::{Desktop, Session};
use std::sync::Arc;
use tauri::{AppHandle, State};

fn respond<F>(app: &AppHandle, desktop: &Desktop, id: u32, f: F) -> Result<TerminalResponse>
where
    F: FnOnce(&mut Session) -> Vec<Effect>,
{
    let effects = desktop.with_session(id, f)?;
    apply_effects(app, id, &effects);
    Ok(TerminalResponse {
        // gone after `exit`
        view: desktop.view(id).ok(),
        effects,
    })
}

#[tauri::command]
pub fn terminal_view(desktop: State<'_, Arc<Desktop>>, id: u32) -> Result<SessionView> {
    desktop.view(id)
}

#[tauri::command]
pub fn terminal_input(
    app: AppHandle,
    desktop: State<'_, Arc<Desktop>>,
    id: u32,
    text: String,
) -> Result<TerminalResponse> {
    respond(&app, &desktop, id, |s| {
        s.set_input(&text);
        Vec::new()
    })
}

/// Enter in the main input
#[tauri::command]
pub fn terminal_submit(
    app: AppHandle,
    desktop: State<'_, Arc<Desktop>>,
    id: u32,
) -> Result<TerminalResponse> {
    respond(&app, &desktop, id, Session::submit)
}

#[tauri::command]
pub fn terminal_key(
    app: AppHandle,
    desktop: State<'_, Arc<Desktop>>,
    id: u32,
    key: KeyInput,
) -> Result<TerminalResponse> {
    respond(&app, &desktop, id, |s| s.key(key))
}

/// Click on a trigger embedded in an output line
#[tauri::command]
pub fn terminal_action(
    app: AppHandle,
    desktop: State<'_, Arc<Desktop>>,
    id: u32,
    action: Action,
) -> Result<TerminalResponse> {
    respond(&app, &desktop, id, |s| s.trigger(&action))
}

#[tauri::command]
pub fn terminal_terms_input(
    app: AppHandle,
    desktop: State<'_, Arc<Desktop>>,
    id: u32,
    text: String,
) -> Result<TerminalResponse> {
    respond(&app, &desktop, id, |s| {
        s.set_terms_input(&text);
        Vec::new()
    })
}

#[tauri::command]
pub fn terminal_terms_submit(
    app: AppHandle,
    desktop: State<'_, Arc<Desktop>>,
    id: u32,
) -> Result<TerminalResponse> {
    respond(&app, &desktop, id, Session::submit_terms)
}

#[tauri::command]
pub fn terminal_maximize(
    app: AppHandle,
    desktop: State<'_, Arc<Desktop>>,
    id: u32,
) -> Result<TerminalResponse> {
    respond(&app, &desktop, id, |s| {
        s.maximize();
        Vec::new()
    })
}

#[tauri::command]
pub fn terminal_restore(
    app: AppHandle,
    desktop: State<'_, Arc<Desktop>>,
    id: u32,
) -> Result<TerminalResponse> {
    respond(&app, &desktop, id, |s| {
        s.restore();
        Vec::new()
    })
}

/// Red dot in the window chrome
#[tauri::command]
pub fn terminal_close(
    app: AppHandle,
    desktop: State<'_, Arc<Desktop>>,
    id: u32,
) -> Result<TerminalResponse> {
    respond(&app, &desktop, id, |s| s.close())
}
