/// Window manager
/// Terminal windows on the landing stage: spawn with a cascading offset,
/// raise on pointer-down, close, and the capacity modal behind Ctrl+T.

use crate::config::TerminalConfig;
use crate::models::WindowEntry;
use serde::Serialize;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "id", rename_all = "snake_case")]
pub enum HotkeyOutcome {
    /// Capacity modal already open
    Suppressed,
    /// Pressed again within the throttle interval
    Throttled,
    /// Stage is full; the capacity modal is now open
    CapacityReached,
    Spawned(u32),
}

pub struct WindowManager {
    windows: Vec<WindowEntry>,
    next_id: u32,
    next_z: u32,
    max_windows: usize,
    cascade_step: i32,
    cascade_max: i32,
    throttle: Duration,
    last_spawn_at: Option<Instant>,
    modal_open: bool,
    pending_spawn: bool,
}

impl WindowManager {
    /// Starts with a single window in the centre.
    pub fn new(config: &TerminalConfig) -> Self {
        WindowManager {
            windows: vec![WindowEntry {
                id: 1,
                dx: 0,
                dy: 0,
                z: 1,
            }],
            next_id: 2,
            next_z: 2,
            max_windows: config.max_windows.max(1),
            cascade_step: config.cascade_step_px,
            cascade_max: config.cascade_max_px,
            throttle: config.spawn_throttle(),
            last_spawn_at: None,
            modal_open: false,
            pending_spawn: false,
        }
    }

    pub fn windows(&self) -> &[WindowEntry] {
        &self.windows
    }

    pub fn get(&self, id: u32) -> Option<&WindowEntry> {
        self.windows.iter().find(|w| w.id == id)
    }

    pub fn max_windows(&self) -> usize {
        self.max_windows
    }

    pub fn can_spawn(&self) -> bool {
        self.windows.len() < self.max_windows
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn has_pending_spawn(&self) -> bool {
        self.pending_spawn
    }

    pub fn oldest(&self) -> Option<u32> {
        self.windows.first().map(|w| w.id)
    }

    pub fn highest_z(&self) -> u32 {
        self.windows.iter().map(|w| w.z).max().unwrap_or(0)
    }

    /// Add a window, or `None` when the stage is full.
    pub fn spawn(&mut self) -> Option<u32> {
        if !self.can_spawn() {
            log::info!("[Windows] Refusing spawn, {} windows open", self.windows.len());
            return None;
        }

        let i = self.windows.len() as i32;
        let offset = (i * self.cascade_step).min(self.cascade_max);

        let id = self.next_id;
        self.next_id += 1;
        let z = self.next_z;
        self.next_z += 1;

        self.windows.push(WindowEntry {
            id,
            dx: offset,
            dy: offset,
            z,
        });
        log::info!("[Windows] Spawned window {} at +{}px", id, offset);
        Some(id)
    }

    pub fn bring_to_front(&mut self, id: u32) -> bool {
        let z = self.next_z;
        match self.windows.iter_mut().find(|w| w.id == id) {
            Some(window) => {
                window.z = z;
                self.next_z += 1;
                true
            }
            None => false,
        }
    }

    pub fn close(&mut self, id: u32) -> bool {
        let before = self.windows.len();
        self.windows.retain(|w| w.id != id);
        let closed = self.windows.len() != before;
        if closed {
            log::info!("[Windows] Closed window {}", id);
        }
        closed
    }

    /// Ctrl+T. The press is timestamped before the capacity check so a held
    /// key cannot reopen the modal faster than the throttle allows.
    pub fn hotkey(&mut self, now: Instant) -> HotkeyOutcome {
        if self.modal_open {
            return HotkeyOutcome::Suppressed;
        }
        if let Some(last) = self.last_spawn_at {
            if now.saturating_duration_since(last) < self.throttle {
                return HotkeyOutcome::Throttled;
            }
        }
        self.last_spawn_at = Some(now);

        if !self.can_spawn() {
            self.modal_open = true;
            log::info!("[Windows] Too many terminals, opening modal");
            return HotkeyOutcome::CapacityReached;
        }
        match self.spawn() {
            Some(id) => HotkeyOutcome::Spawned(id),
            None => HotkeyOutcome::CapacityReached,
        }
    }

    pub fn escape(&mut self) {
        self.modal_open = false;
    }

    pub fn modal_ok(&mut self) {
        self.modal_open = false;
    }

    /// Dismiss the modal and drop the oldest window. The replacement is
    /// spawned on the next `tick`. Returns the dropped id, or `None` while
    /// the stage still has room.
    pub fn replace_oldest(&mut self) -> Option<u32> {
        if self.can_spawn() {
            return None;
        }
        self.modal_open = false;
        if self.windows.is_empty() {
            return None;
        }
        let oldest = self.windows.remove(0);
        self.pending_spawn = true;
        log::info!("[Windows] Replacing oldest window {}", oldest.id);
        Some(oldest.id)
    }

    /// Run deferred work: the spawn queued by `replace_oldest`.
    pub fn tick(&mut self) -> Option<u32> {
        if !std::mem::take(&mut self.pending_spawn) {
            return None;
        }
        self.spawn()
    }
}
