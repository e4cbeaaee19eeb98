/// Models module
/// Shared data types between the simulation core and the frontend
/// Everything that crosses IPC here is serializable

use serde::{Deserialize, Serialize};
use std::path::Path;

/// One line of terminal scrollback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LogEntry {
    Output {
        id: u64,
        text: String,
        #[serde(default)]
        muted: bool,
    },
    Input {
        id: u64,
        command: String,
    },
}

impl LogEntry {
    pub fn id(&self) -> u64 {
        match self {
            LogEntry::Output { id, .. } | LogEntry::Input { id, .. } => *id,
        }
    }

    /// Output text, or `None` for an input echo.
    pub fn output_text(&self) -> Option<&str> {
        match self {
            LogEntry::Output { text, .. } => Some(text),
            LogEntry::Input { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BootPhase {
    Booting,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowPhase {
    Normal,
    Maximized,
}

/// The `life` consent sub-flow. At most one is active per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ConsentFlow {
    Idle,
    AwaitingConsent { terms_viewed: bool },
    ShowingTerms,
}

/// A terminal window on the landing stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowEntry {
    pub id: u32,
    pub dx: i32,
    pub dy: i32,
    pub z: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    SectionHeader,
    Position,
    Period,
    PeriodCurrent,
    StatusLabel,
    StatusValue,
    InstitutionValue,
    DegreePrimary,
    DegreeSecondary,
    DegreeTertiary,
    LinkSymbol,
    PromptUser,
    PromptAt,
    PromptHost,
    PromptColon,
    PromptPath,
    PromptSymbol,
}

/// Clickable triggers embedded in output lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    ShowTerms,
    ShowProject { title: String },
    ShowNdaDetails,
}

/// Display fragment produced by the line renderer.
/// The frontend renders every variant as text nodes, never as markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Fragment {
    Text { text: String },
    Styled { style: Style, text: String },
    Link { href: String, text: String, external: bool },
    Action { action: Action, text: String },
}

impl Fragment {
    pub fn text(text: impl Into<String>) -> Self {
        Fragment::Text { text: text.into() }
    }

    pub fn styled(style: Style, text: impl Into<String>) -> Self {
        Fragment::Styled {
            style,
            text: text.into(),
        }
    }

    pub fn link(href: impl Into<String>, text: impl Into<String>) -> Self {
        let href = href.into();
        let external = !href.starts_with("mailto:");
        Fragment::Link {
            href,
            text: text.into(),
            external,
        }
    }

    pub fn action(action: Action, text: impl Into<String>) -> Self {
        Fragment::Action {
            action,
            text: text.into(),
        }
    }

    /// Visible text of the fragment.
    pub fn as_str(&self) -> &str {
        match self {
            Fragment::Text { text }
            | Fragment::Styled { text, .. }
            | Fragment::Link { text, .. }
            | Fragment::Action { text, .. } => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedLine {
    pub id: u64,
    pub muted: bool,
    pub fragments: Vec<Fragment>,
}

impl RenderedLine {
    /// Concatenated visible text, mostly useful in tests and logs.
    pub fn plain(&self) -> String {
        self.fragments.iter().map(Fragment::as_str).collect()
    }
}

/// Side effects a session asks its host to perform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    Close,
    Navigate { path: String },
    Download { asset: String, file_name: String },
    FocusInput,
    FocusTerms,
}

impl Effect {
    /// Download of a bundled asset, saved under its bare file name.
    pub fn download(asset: &str) -> Self {
        let file_name = Path::new(asset)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(asset)
            .to_string();
        Effect::Download {
            asset: asset.to_string(),
            file_name,
        }
    }
}

/// Keys the session reacts to (Enter goes through submit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyInput {
    Tab,
    ArrowUp,
    ArrowDown,
    /// Ctrl+L
    ClearScreen,
}

/// Snapshot of a session for the frontend.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub lines: Vec<RenderedLine>,
    pub prompt: Vec<Fragment>,
    pub input: String,
    pub suggestion: Option<String>,
    pub booting: bool,
    pub boot_typed: String,
    pub maximized: bool,
    pub consent: ConsentFlow,
    pub overlay_open: bool,
    pub terms: Option<Vec<String>>,
    pub terms_input: String,
    pub input_enabled: bool,
}

/// Result of a terminal operation: the new view (`None` once the window is
/// gone) and the effects the shell performed.
#[derive(Debug, Clone, Serialize)]
pub struct TerminalResponse {
    pub view: Option<SessionView>,
    pub effects: Vec<Effect>,
}

/// One line of the environment boot animation as shown to the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BootLine {
    pub text: String,
    pub muted: bool,
}

/// Landing stage snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct DesktopSnapshot {
    pub windows: Vec<WindowEntry>,
    pub max_windows: usize,
    pub can_spawn: bool,
    pub modal_open: bool,
    pub highest_z: u32,
    pub boot_lines: Vec<BootLine>,
    pub boot_done: bool,
}
