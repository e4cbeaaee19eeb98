/// Desktop
/// The landing stage: the window manager plus one session per window, the
/// environment boot animation and the boot threads that type `system --init`
/// into new sessions. Boot threads only hold a `Weak` to the state and look
/// their session up by id, so a closed window is never touched again.

use crate::config::TerminalConfig;
use crate::error::{Error, Result};
use crate::models::{BootLine, DesktopSnapshot, Effect, SessionView};
use crate::services::boot::{self, BootEvent, BootHandle, BootSequencer};
use crate::services::catalog::BOOT_COMMAND;
use crate::services::session::Session;
use crate::services::windows::{HotkeyOutcome, WindowManager};
use chrono::Local;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

/// Notifications for the frontend. Called without the desktop lock held.
pub trait DesktopEvents: Send + Sync + 'static {
    fn session_changed(&self, id: u32);
    fn session_effects(&self, id: u32, effects: &[Effect]);
    fn windows_changed(&self);
    fn boot_line(&self, line: &BootLine);
    fn boot_done(&self);
}

/// Discards every notification.
pub struct NoopEvents;

impl DesktopEvents for NoopEvents {
    fn session_changed(&self, _id: u32) {}
    fn session_effects(&self, _id: u32, _effects: &[Effect]) {}
    fn windows_changed(&self) {}
    fn boot_line(&self, _line: &BootLine) {}
    fn boot_done(&self) {}
}

struct Slot {
    session: Session,
    boot: Option<BootHandle>,
}

struct DesktopInner {
    config: TerminalConfig,
    windows: WindowManager,
    slots: HashMap<u32, Slot>,
    boot_lines: Vec<BootLine>,
    boot_done: bool,
    environment_boot: Option<BootHandle>,
}

impl DesktopInner {
    fn open_slot(&mut self, id: u32) {
        self.slots.insert(
            id,
            Slot {
                session: Session::new(&self.config, Local::now()),
                boot: None,
            },
        );
    }

    fn drop_slot(&mut self, id: u32) {
        // dropping the slot cancels its boot
        if self.slots.remove(&id).is_some() {
            log::debug!("[Desktop] Session {} disposed", id);
        }
    }
}

pub struct Desktop {
    inner: Arc<Mutex<DesktopInner>>,
    events: Arc<dyn DesktopEvents>,
}

impl Desktop {
    pub fn new(config: TerminalConfig, events: Arc<dyn DesktopEvents>) -> Self {
        let windows = WindowManager::new(&config);
        let mut inner = DesktopInner {
            config,
            windows,
            slots: HashMap::new(),
            boot_lines: Vec::new(),
            boot_done: false,
            environment_boot: None,
        };
        let ids: Vec<u32> = inner.windows.windows().iter().map(|w| w.id).collect();
        for id in ids {
            inner.open_slot(id);
        }
        Desktop {
            inner: Arc::new(Mutex::new(inner)),
            events,
        }
    }

    /// Play the environment boot. Sessions start typing once it is done.
    pub fn start(&self) {
        let mut inner = self.inner.lock();
        if inner.environment_boot.is_some() || inner.boot_done {
            return;
        }

        let script = boot::environment_script(inner.config.boot_delay_scale);
        let sequencer = BootSequencer::new(script, inner.config.boot_grace());
        let weak = Arc::downgrade(&self.inner);
        let events = self.events.clone();

        log::info!("[Boot] Environment boot started ({} steps)", sequencer.len());
        inner.environment_boot = Some(boot::spawn(sequencer, move |event| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            match event {
                BootEvent::Line(step) => {
                    let line = BootLine {
                        text: step.text,
                        muted: step.muted,
                    };
                    inner.lock().boot_lines.push(line.clone());
                    events.boot_line(&line);
                }
                BootEvent::Done => {
                    {
                        let mut guard = inner.lock();
                        guard.boot_done = true;
                        let pending: Vec<u32> = guard
                            .slots
                            .iter()
                            .filter(|(_, slot)| slot.boot.is_none())
                            .map(|(id, _)| *id)
                            .collect();
                        for id in pending {
                            start_session_boot(&mut guard, Arc::downgrade(&inner), events.clone(), id);
                        }
                    }
                    log::info!("[Boot] Environment boot done");
                    events.boot_done();
                }
            }
        }));
    }

    pub fn snapshot(&self) -> DesktopSnapshot {
        let inner = self.inner.lock();
        DesktopSnapshot {
            windows: inner.windows.windows().to_vec(),
            max_windows: inner.windows.max_windows(),
            can_spawn: inner.windows.can_spawn(),
            modal_open: inner.windows.is_modal_open(),
            highest_z: inner.windows.highest_z(),
            boot_lines: inner.boot_lines.clone(),
            boot_done: inner.boot_done,
        }
    }

    pub fn spawn_window(&self) -> Option<u32> {
        let id = {
            let mut inner = self.inner.lock();
            let id = inner.windows.spawn()?;
            self.attach_session(&mut inner, id);
            id
        };
        self.events.windows_changed();
        Some(id)
    }

    pub fn hotkey(&self, now: Instant) -> HotkeyOutcome {
        let outcome = {
            let mut inner = self.inner.lock();
            let outcome = inner.windows.hotkey(now);
            if let HotkeyOutcome::Spawned(id) = outcome {
                self.attach_session(&mut inner, id);
            }
            outcome
        };
        if !matches!(outcome, HotkeyOutcome::Throttled | HotkeyOutcome::Suppressed) {
            self.events.windows_changed();
        }
        outcome
    }

    pub fn escape(&self) {
        self.inner.lock().windows.escape();
        self.events.windows_changed();
    }

    pub fn modal_ok(&self) {
        self.inner.lock().windows.modal_ok();
        self.events.windows_changed();
    }

    /// Drop the oldest window; its replacement appears on the next `tick`.
    pub fn replace_oldest(&self) -> Option<u32> {
        let dropped = {
            let mut inner = self.inner.lock();
            let dropped = inner.windows.replace_oldest();
            if let Some(id) = dropped {
                inner.drop_slot(id);
            }
            dropped
        };
        self.events.windows_changed();
        dropped
    }

    pub fn tick(&self) -> Option<u32> {
        let id = {
            let mut inner = self.inner.lock();
            let id = inner.windows.tick()?;
            self.attach_session(&mut inner, id);
            id
        };
        self.events.windows_changed();
        Some(id)
    }

    pub fn close_window(&self, id: u32) -> Result<()> {
        {
            let mut inner = self.inner.lock();
            if !inner.windows.close(id) {
                return Err(Error::WindowNotFound(id));
            }
            inner.drop_slot(id);
        }
        self.events.windows_changed();
        Ok(())
    }

    pub fn bring_to_front(&self, id: u32) -> Result<()> {
        if !self.inner.lock().windows.bring_to_front(id) {
            return Err(Error::WindowNotFound(id));
        }
        self.events.windows_changed();
        Ok(())
    }

    pub fn view(&self, id: u32) -> Result<SessionView> {
        let inner = self.inner.lock();
        inner
            .slots
            .get(&id)
            .map(|slot| slot.session.view())
            .ok_or(Error::WindowNotFound(id))
    }

    /// Run `f` against a session. A `Close` effect closes the window here;
    /// the remaining effects are returned for the host to perform.
    pub fn with_session<F>(&self, id: u32, f: F) -> Result<Vec<Effect>>
    where
        F: FnOnce(&mut Session) -> Vec<Effect>,
    {
        let effects = {
            let mut inner = self.inner.lock();
            let slot = inner.slots.get_mut(&id).ok_or(Error::WindowNotFound(id))?;
            f(&mut slot.session)
        };

        if effects.contains(&Effect::Close) {
            self.close_window(id)?;
            return Ok(effects.into_iter().filter(|e| *e != Effect::Close).collect());
        }
        self.events.session_changed(id);
        Ok(effects)
    }

    /// Landing page "Download CV" action.
    pub fn download_cv(&self) -> Effect {
        Effect::download(&self.inner.lock().config.cv_asset)
    }

    /// Cancel every boot thread and drop all sessions.
    pub fn shutdown(&self) {
        let mut inner = self.inner.lock();
        inner.environment_boot = None;
        inner.slots.clear();
        log::info!("[Desktop] Shut down, all boots cancelled");
    }

    fn attach_session(&self, inner: &mut DesktopInner, id: u32) {
        inner.open_slot(id);
        if inner.boot_done {
            start_session_boot(inner, Arc::downgrade(&self.inner), self.events.clone(), id);
        }
    }
}

impl Drop for Desktop {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn start_session_boot(
    inner: &mut DesktopInner,
    weak: Weak<Mutex<DesktopInner>>,
    events: Arc<dyn DesktopEvents>,
    id: u32,
) {
    let script = boot::typing_script(BOOT_COMMAND, inner.config.type_tick());
    let Some(slot) = inner.slots.get_mut(&id) else {
        return;
    };

    let sequencer = BootSequencer::new(script, Duration::ZERO);
    slot.boot = Some(boot::spawn(sequencer, move |event| {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        let effects = {
            let mut guard = inner.lock();
            let Some(slot) = guard.slots.get_mut(&id) else {
                return;
            };
            match event {
                BootEvent::Line(step) => {
                    slot.session.set_boot_typed(&step.text);
                    Vec::new()
                }
                BootEvent::Done => slot.session.finish_boot(),
            }
        };
        if !effects.is_empty() {
            events.session_effects(id, &effects);
        }
        events.session_changed(id);
    }));
    log::debug!("[Desktop] Session {} booting", id);
}
