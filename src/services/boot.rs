/// Boot sequencer
/// Plays a fixed script of (delay, text) steps one after another and then
/// reports completion exactly once. The state machine is pure; `spawn`
/// drives it on a thread with cancellable waits.

use crate::services::catalog::ENVIRONMENT_BOOT;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootStep {
    pub delay: Duration,
    pub text: String,
    pub muted: bool,
}

/// The docker build/run/deploy animation shown before the landing stage.
pub fn environment_script(scale: f64) -> Vec<BootStep> {
    let scale = if scale.is_finite() && scale > 0.0 { scale } else { 0.0 };
    ENVIRONMENT_BOOT
        .iter()
        .map(|&(ms, text, muted)| BootStep {
            delay: Duration::from_millis((ms as f64 * scale).round() as u64),
            text: text.to_string(),
            muted,
        })
        .collect()
}

/// One step per character; each step's text is the prefix typed so far.
pub fn typing_script(command: &str, tick: Duration) -> Vec<BootStep> {
    command
        .char_indices()
        .map(|(idx, c)| BootStep {
            delay: tick,
            text: command[..idx + c.len_utf8()].to_string(),
            muted: false,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootState {
    NotStarted,
    Running,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootTick {
    /// Wait `delay`, then show `step`
    Step { delay: Duration, step: BootStep },
    /// Wait `grace`, then signal completion
    Finish { grace: Duration },
}

pub struct BootSequencer {
    script: Vec<BootStep>,
    grace: Duration,
    state: BootState,
    cursor: usize,
}

impl BootSequencer {
    pub fn new(script: Vec<BootStep>, grace: Duration) -> Self {
        Self {
            script,
            grace,
            state: BootState::NotStarted,
            cursor: 0,
        }
    }

    pub fn state(&self) -> BootState {
        self.state
    }

    pub fn len(&self) -> usize {
        self.script.len()
    }

    pub fn is_empty(&self) -> bool {
        self.script.is_empty()
    }

    /// Steps already handed out.
    pub fn shown(&self) -> &[BootStep] {
        &self.script[..self.cursor]
    }

    pub fn start(&mut self) {
        if self.state == BootState::NotStarted {
            self.state = BootState::Running;
        }
    }

    /// Next thing to wait for. `Finish` comes exactly once, then `None`.
    pub fn advance(&mut self) -> Option<BootTick> {
        if self.state != BootState::Running {
            return None;
        }
        if let Some(step) = self.script.get(self.cursor) {
            self.cursor += 1;
            return Some(BootTick::Step {
                delay: step.delay,
                step: step.clone(),
            });
        }
        self.state = BootState::Done;
        Some(BootTick::Finish { grace: self.grace })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootEvent {
    Line(BootStep),
    Done,
}

/// Owner side of a running boot. Dropping it cancels the boot.
pub struct BootHandle {
    cancel: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl BootHandle {
    /// Stop delivering events. Does not wait for the thread.
    pub fn cancel(&mut self) {
        if let Some(tx) = self.cancel.take() {
            let _ = tx.send(());
            log::debug!("[Boot] Cancelled");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Block until the boot thread exits. Tests use this to wait for `Done`.
    pub fn join(mut self) {
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for BootHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Run `sequencer` on its own thread, delivering events to `sink`.
/// No event is delivered once cancellation has been observed.
pub fn spawn<F>(mut sequencer: BootSequencer, mut sink: F) -> BootHandle
where
    F: FnMut(BootEvent) + Send + 'static,
{
    let (tx, rx) = mpsc::channel::<()>();

    let thread = thread::spawn(move || {
        // Returns false when cancelled or when the handle is gone.
        let wait = |delay: Duration| matches!(rx.recv_timeout(delay), Err(RecvTimeoutError::Timeout));

        sequencer.start();
        while let Some(tick) = sequencer.advance() {
            match tick {
                BootTick::Step { delay, step } => {
                    if !wait(delay) {
                        return;
                    }
                    sink(BootEvent::Line(step));
                }
                BootTick::Finish { grace } => {
                    if !wait(grace) {
                        return;
                    }
                    sink(BootEvent::Done);
                }
            }
        }
    });

    BootHandle {
        cancel: Some(tx),
        thread: Some(thread),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn step(ms: u64, text: &str) -> BootStep {
        BootStep {
            delay: Duration::from_millis(ms),
            text: text.into(),
            muted: false,
        }
    }

    #[test]
    fn machine_walks_steps_then_finishes_once() {
        let mut seq = BootSequencer::new(vec![step(10, "a"), step(20, "b")], Duration::from_millis(5));
        assert_eq!(seq.advance(), None, "not started yet");
        seq.start();
        assert_eq!(seq.state(), BootState::Running);
        assert!(matches!(seq.advance(), Some(BootTick::Step { step, .. }) if step.text == "a"));
        assert!(matches!(seq.advance(), Some(BootTick::Step { step, .. }) if step.text == "b"));
        assert_eq!(seq.advance(), Some(BootTick::Finish { grace: Duration::from_millis(5) }));
        assert_eq!(seq.state(), BootState::Done);
        assert_eq!(seq.advance(), None);
        seq.start();
        assert_eq!(seq.advance(), None, "restart after done is ignored");
        assert_eq!(seq.shown().len(), 2);
    }

    #[test]
    fn environment_script_scales_delays() {
        let script = environment_script(1.35);
        assert_eq!(script.len(), ENVIRONMENT_BOOT.len());
        assert_eq!(script[0].delay, Duration::from_millis(135));
        assert_eq!(script[3].delay, Duration::from_millis(297));
        assert_eq!(script.last().unwrap().text, "Starting terminal...");
        assert!(environment_script(0.0).iter().all(|s| s.delay.is_zero()));
    }

    #[test]
    fn typing_script_types_prefixes() {
        let script = typing_script("ls -a", Duration::from_millis(75));
        let texts: Vec<_> = script.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["l", "ls", "ls ", "ls -", "ls -a"]);
    }

    #[test]
    fn spawned_boot_delivers_in_order_and_done_once() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let seq = BootSequencer::new(vec![step(0, "one"), step(1, "two"), step(0, "three")], Duration::ZERO);
        spawn(seq, move |event| sink.lock().push(event)).join();

        let events = events.lock();
        assert_eq!(events.len(), 4);
        assert_eq!(events[0], BootEvent::Line(step(0, "one")));
        assert_eq!(events[2], BootEvent::Line(step(0, "three")));
        assert_eq!(events[3], BootEvent::Done);
    }

    #[test]
    fn cancelled_boot_stops_delivering() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let seq = BootSequencer::new(vec![step(0, "first"), step(60_000, "never")], Duration::ZERO);
        let mut handle = spawn(seq, move |event| sink.lock().push(event));

        // wait for the first line, then cancel during the long wait
        for _ in 0..200 {
            if !events.lock().is_empty() {
                break;
            }
            thread::sleep(Duration::from_millis(5));
        }
        handle.cancel();
        handle.join();

        let events = events.lock();
        assert_eq!(events.as_slice(), &[BootEvent::Line(step(0, "first"))]);
    }

    #[test]
    fn dropping_the_handle_cancels() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let seq = BootSequencer::new(vec![step(60_000, "never")], Duration::ZERO);
        drop(spawn(seq, move |event| sink.lock().push(event)));
        thread::sleep(Duration::from_millis(20));
        assert!(events.lock().is_empty());
    }
}
