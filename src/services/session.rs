/// Terminal session
/// Owns one terminal's scrollback, input buffer, history, autocomplete and
/// the `life` consent sub-flow. Every user-facing failure is a text line;
/// nothing here returns an error.

use crate::config::TerminalConfig;
use crate::models::{
    Action, BootPhase, ConsentFlow, Effect, Fragment, KeyInput, LogEntry, SessionView, WindowPhase,
};
use crate::services::catalog::{self, BOOT_COMMAND, LIFE_PROMPT_LINE, NDA_PROJECT_TITLE, TERMS_TEXT};
use crate::services::render;
use chrono::{DateTime, Local};

pub struct Session {
    log: Vec<LogEntry>,
    next_id: u64,
    input: String,
    history: Vec<String>,
    history_cursor: Option<usize>,
    boot: BootPhase,
    boot_typed: String,
    window: WindowPhase,
    consent: ConsentFlow,
    terms_input: String,
    prompt: Vec<Fragment>,
    cv_asset: String,
}

/// `Sat Jan 31 09:41:02`
pub fn format_last_login(at: &DateTime<Local>) -> String {
    at.format("%a %b %d %H:%M:%S").to_string()
}

impl Session {
    pub fn new(config: &TerminalConfig, login_at: DateTime<Local>) -> Self {
        let mut session = Session {
            log: Vec::new(),
            next_id: 1,
            input: String::new(),
            history: Vec::new(),
            history_cursor: None,
            boot: BootPhase::Booting,
            boot_typed: String::new(),
            window: WindowPhase::Normal,
            consent: ConsentFlow::Idle,
            terms_input: String::new(),
            prompt: render::render_prompt(&config.prompt_user, &config.prompt_host),
            cv_asset: config.cv_asset.clone(),
        };
        let last_login = format!("Last login: {} on ttys001", format_last_login(&login_at));
        session.push_output(&[last_login.as_str()], true);
        session.push_output(&[""], false);
        session
    }

    // --- accessors ---

    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn history_cursor(&self) -> Option<usize> {
        self.history_cursor
    }

    pub fn boot_phase(&self) -> BootPhase {
        self.boot
    }

    pub fn boot_typed(&self) -> &str {
        &self.boot_typed
    }

    pub fn window_phase(&self) -> WindowPhase {
        self.window
    }

    pub fn consent(&self) -> ConsentFlow {
        self.consent
    }

    pub fn terms_input(&self) -> &str {
        &self.terms_input
    }

    pub fn is_overlay_open(&self) -> bool {
        self.consent == ConsentFlow::ShowingTerms
    }

    /// Main input accepts keys only once booted and while the terms are closed.
    pub fn is_input_enabled(&self) -> bool {
        self.boot == BootPhase::Ready && !self.is_overlay_open()
    }

    pub fn suggestion(&self) -> Option<&'static str> {
        catalog::complete(&self.input)
    }

    // --- boot ---

    /// Partially typed boot command, shown while booting.
    pub fn set_boot_typed(&mut self, text: &str) {
        if self.boot == BootPhase::Booting {
            self.boot_typed = text.to_string();
        }
    }

    /// Log the boot command and its output, then accept input.
    pub fn finish_boot(&mut self) -> Vec<Effect> {
        if self.boot == BootPhase::Ready {
            return Vec::new();
        }
        let id = self.alloc_id();
        self.log.push(LogEntry::Input {
            id,
            command: BOOT_COMMAND.to_string(),
        });
        if let Some(lines) = catalog::lookup(BOOT_COMMAND) {
            self.push_output(lines, false);
        }
        self.push_output(&[""], false);
        self.history = vec![BOOT_COMMAND.to_string()];
        self.history_cursor = None;
        self.boot_typed.clear();
        self.boot = BootPhase::Ready;
        log::debug!("[Session] Boot finished");
        vec![Effect::FocusInput]
    }

    // --- input ---

    pub fn set_input(&mut self, text: &str) {
        if self.is_input_enabled() {
            self.input = text.to_string();
        }
    }

    /// Enter in the main input.
    pub fn submit(&mut self) -> Vec<Effect> {
        if !self.is_input_enabled() {
            return Vec::new();
        }
        let raw = std::mem::take(&mut self.input);
        self.run_command(&raw)
    }

    /// Interpret one line of input. Ignored while booting or while the terms
    /// overlay is open.
    pub fn run_command(&mut self, raw: &str) -> Vec<Effect> {
        if !self.is_input_enabled() {
            return Vec::new();
        }
        let command = raw.trim();

        if command.is_empty() {
            // Enter on an empty line accepts a pending consent
            if let ConsentFlow::AwaitingConsent { terms_viewed } = self.consent {
                return self.answer_yes(terms_viewed);
            }
            return Vec::new();
        }

        let id = self.alloc_id();
        self.log.push(LogEntry::Input {
            id,
            command: command.to_string(),
        });
        if self.history.last().map(String::as_str) != Some(command) {
            self.history.push(command.to_string());
        }
        self.history_cursor = None;

        if let ConsentFlow::AwaitingConsent { terms_viewed } = self.consent {
            return match command.to_lowercase().as_str() {
                "y" | "yes" => self.answer_yes(terms_viewed),
                "n" | "no" => {
                    self.push_output(&[catalog::CONSENT_ABORTED], true);
                    self.consent = ConsentFlow::Idle;
                    Vec::new()
                }
                _ => {
                    self.push_output(&[catalog::CONSENT_ANSWER_YN], true);
                    Vec::new()
                }
            };
        }

        match command {
            "exit" => vec![Effect::Close],
            "clear" => {
                self.clear_log();
                Vec::new()
            }
            "download" => {
                let effect = Effect::download(&self.cv_asset);
                if let Effect::Download { file_name, .. } = &effect {
                    let line = catalog::download_line(file_name);
                    self.push_output(&[line.as_str()], true);
                }
                log::info!("[Session] Download requested: {}", self.cv_asset);
                vec![effect]
            }
            "life" => {
                self.push_output(&[LIFE_PROMPT_LINE, ""], true);
                self.consent = ConsentFlow::AwaitingConsent { terms_viewed: false };
                Vec::new()
            }
            _ => {
                match catalog::lookup(command) {
                    Some(lines) => self.push_output(lines, false),
                    None => {
                        let not_found = catalog::not_found_line(command);
                        self.push_output(&[not_found.as_str(), catalog::NOT_FOUND_HINT], true);
                    }
                }
                Vec::new()
            }
        }
    }

    fn answer_yes(&mut self, terms_viewed: bool) -> Vec<Effect> {
        if !terms_viewed {
            self.push_output(&[catalog::CONSENT_VIEW_TERMS_FIRST], true);
            return Vec::new();
        }
        self.push_output(&[catalog::OPENING_LIFE], true);
        self.consent = ConsentFlow::Idle;
        log::info!("[Session] Navigating to {}", catalog::LIFE_PATH);
        vec![Effect::Navigate {
            path: catalog::LIFE_PATH.to_string(),
        }]
    }

    pub fn key(&mut self, key: KeyInput) -> Vec<Effect> {
        if !self.is_input_enabled() {
            return Vec::new();
        }
        match key {
            KeyInput::Tab => {
                if let Some(suggestion) = self.suggestion() {
                    self.input = suggestion.to_string();
                }
            }
            KeyInput::ArrowUp => self.history_up(),
            KeyInput::ArrowDown => self.history_down(),
            KeyInput::ClearScreen => {
                self.input.clear();
                // a pending consent keeps its prompt line, same as a typed `clear`
                if matches!(self.consent, ConsentFlow::AwaitingConsent { .. }) {
                    self.push_output(&[catalog::CONSENT_ANSWER_YN], true);
                } else {
                    self.clear_log();
                }
            }
        }
        Vec::new()
    }

    fn history_up(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let next = match self.history_cursor {
            None => self.history.len() - 1,
            Some(cursor) => cursor.saturating_sub(1),
        };
        self.history_cursor = Some(next);
        self.input = self.history[next].clone();
    }

    fn history_down(&mut self) {
        let Some(cursor) = self.history_cursor else {
            return;
        };
        let next = cursor + 1;
        if next >= self.history.len() {
            self.history_cursor = None;
            self.input.clear();
        } else {
            self.history_cursor = Some(next);
            self.input = self.history[next].clone();
        }
    }

    // --- terms overlay ---

    pub fn open_terms(&mut self) -> Vec<Effect> {
        if self.boot != BootPhase::Ready {
            return Vec::new();
        }
        self.consent = ConsentFlow::ShowingTerms;
        self.terms_input.clear();
        log::debug!("[Session] Terms opened");
        vec![Effect::FocusTerms]
    }

    pub fn set_terms_input(&mut self, text: &str) {
        if self.is_overlay_open() {
            self.terms_input = text.to_string();
        }
    }

    /// Enter in the overlay. Only the quit token does anything.
    pub fn submit_terms(&mut self) -> Vec<Effect> {
        if !self.is_overlay_open() || self.terms_input.trim() != catalog::TERMS_QUIT_TOKEN {
            return Vec::new();
        }
        self.terms_input.clear();
        self.consent = ConsentFlow::AwaitingConsent { terms_viewed: true };
        self.push_output(&[catalog::TERMS_CLOSED], true);
        log::debug!("[Session] Terms closed");
        vec![Effect::FocusInput]
    }

    // --- embedded triggers ---

    pub fn trigger(&mut self, action: &Action) -> Vec<Effect> {
        match action {
            Action::ShowTerms => self.open_terms(),
            Action::ShowProject { title } => self.show_project(title),
            Action::ShowNdaDetails => self.show_project(NDA_PROJECT_TITLE),
        }
    }

    pub fn show_project(&mut self, title: &str) -> Vec<Effect> {
        let Some(lines) = catalog::project_description(title) else {
            return Vec::new();
        };
        self.push_output(&[""], false);
        self.push_output(lines, false);
        vec![Effect::FocusInput]
    }

    // --- window chrome ---

    pub fn maximize(&mut self) {
        self.window = WindowPhase::Maximized;
    }

    pub fn restore(&mut self) {
        self.window = WindowPhase::Normal;
    }

    pub fn close(&self) -> Vec<Effect> {
        vec![Effect::Close]
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            lines: render::render_log(&self.log, &self.prompt),
            prompt: self.prompt.clone(),
            input: self.input.clone(),
            suggestion: self.suggestion().map(str::to_string),
            booting: self.boot == BootPhase::Booting,
            boot_typed: self.boot_typed.clone(),
            maximized: self.window == WindowPhase::Maximized,
            consent: self.consent,
            overlay_open: self.is_overlay_open(),
            terms: self
                .is_overlay_open()
                .then(|| TERMS_TEXT.iter().map(|line| line.to_string()).collect()),
            terms_input: self.terms_input.clone(),
            input_enabled: self.is_input_enabled(),
        }
    }

    // --- log ---

    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn push_output(&mut self, lines: &[&str], muted: bool) {
        for text in lines {
            let id = self.alloc_id();
            self.log.push(LogEntry::Output {
                id,
                text: text.to_string(),
                muted,
            });
        }
    }

    fn clear_log(&mut self) {
        self.log.clear();
        self.push_output(&[""], false);
    }
}
