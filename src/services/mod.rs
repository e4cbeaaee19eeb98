/// Services module
/// The terminal simulation: content, rendering, boot animation, sessions
/// and the window stage. Nothing here depends on the UI shell.

pub mod boot;
pub mod catalog;
pub mod desktop;
pub mod render;
pub mod session;
pub mod windows;

pub use desktop::{Desktop, DesktopEvents, NoopEvents};
pub use session::Session;
pub use windows::{HotkeyOutcome, WindowManager};
