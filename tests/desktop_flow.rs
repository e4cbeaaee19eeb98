use parking_lot::Mutex;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use termfolio_lib::models::{BootLine, Effect};
use termfolio_lib::services::{Desktop, DesktopEvents, HotkeyOutcome};
use termfolio_lib::TerminalConfig;

#[derive(Default)]
struct Recorder {
    boot_lines: Mutex<Vec<BootLine>>,
    boot_done: Mutex<usize>,
    effects: Mutex<Vec<(u32, Effect)>>,
}

impl DesktopEvents for Recorder {
    fn session_changed(&self, _id: u32) {}

    fn session_effects(&self, id: u32, effects: &[Effect]) {
        self.effects.lock().extend(effects.iter().cloned().map(|e| (id, e)));
    }

    fn windows_changed(&self) {}

    fn boot_line(&self, line: &BootLine) {
        self.boot_lines.lock().push(line.clone());
    }

    fn boot_done(&self) {
        *self.boot_done.lock() += 1;
    }
}

fn wait_until(mut done: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if done() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    false
}

fn instant_desktop(max_windows: usize) -> (Desktop, Arc<Recorder>) {
    let recorder = Arc::new(Recorder::default());
    let config = TerminalConfig {
        max_windows,
        ..TerminalConfig::instant()
    };
    (Desktop::new(config, recorder.clone()), recorder)
}

#[test]
fn environment_boot_then_sessions_become_ready() {
    let (desktop, recorder) = instant_desktop(5);
    desktop.start();

    assert!(wait_until(|| desktop.snapshot().boot_done));
    assert!(wait_until(|| !desktop.view(1).unwrap().booting));

    let snapshot = desktop.snapshot();
    let lines = recorder.boot_lines.lock().clone();
    assert_eq!(lines, snapshot.boot_lines);
    assert_eq!(lines.last().map(|l| l.text.as_str()), Some("Starting terminal..."));
    assert_eq!(*recorder.boot_done.lock(), 1);

    // the finished boot asks for focus
    assert!(wait_until(|| recorder
        .effects
        .lock()
        .contains(&(1, Effect::FocusInput))));

    // starting twice does not replay
    desktop.start();
    thread::sleep(Duration::from_millis(20));
    assert_eq!(*recorder.boot_done.lock(), 1);

    let view = desktop.view(1).unwrap();
    assert!(view.lines.iter().any(|line| line.plain().ends_with("system --init")));

    // windows spawned after the environment boot type on their own
    let id = desktop.spawn_window().unwrap();
    assert!(wait_until(|| !desktop.view(id).unwrap().booting));
}

#[test]
fn capacity_modal_and_replace_oldest() {
    let (desktop, _) = instant_desktop(2);
    let t0 = Instant::now();
    assert_eq!(desktop.hotkey(t0), HotkeyOutcome::Spawned(2));

    let before: Vec<u32> = desktop.snapshot().windows.iter().map(|w| w.id).collect();
    assert_eq!(desktop.hotkey(t0 + Duration::from_secs(1)), HotkeyOutcome::CapacityReached);
    let snapshot = desktop.snapshot();
    assert!(snapshot.modal_open);
    assert_eq!(snapshot.windows.iter().map(|w| w.id).collect::<Vec<_>>(), before);

    assert_eq!(desktop.replace_oldest(), Some(before[0]));
    let new_id = desktop.tick().unwrap();
    let after: Vec<u32> = desktop.snapshot().windows.iter().map(|w| w.id).collect();
    assert_eq!(after.len(), before.len());
    assert!(!after.contains(&before[0]));
    assert!(after.contains(&new_id));
    assert!(desktop.view(before[0]).is_err());
    assert!(desktop.view(new_id).is_ok());
}

#[test]
fn closing_a_booting_window_stops_its_boot() {
    let recorder = Arc::new(Recorder::default());
    let config = TerminalConfig {
        type_tick_ms: 60_000,
        ..TerminalConfig::instant()
    };
    let desktop = Desktop::new(config, recorder.clone());
    desktop.start();
    assert!(wait_until(|| desktop.snapshot().boot_done));

    desktop.close_window(1).unwrap();
    assert!(desktop.view(1).is_err());
    thread::sleep(Duration::from_millis(30));
    assert!(recorder.effects.lock().is_empty());
}

#[test]
fn exit_command_closes_its_window() {
    let (desktop, _) = instant_desktop(5);
    desktop.start();
    assert!(wait_until(|| desktop
        .view(1)
        .map(|view| !view.booting)
        .unwrap_or(false)));

    let effects = desktop
        .with_session(1, |session| {
            session.set_input("exit");
            session.submit()
        })
        .unwrap();
    assert!(effects.is_empty());
    assert!(desktop.snapshot().windows.is_empty());
}
