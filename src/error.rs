/// Errors that cross the IPC boundary or come from the host environment.
/// Simulation outcomes (unknown command, bad consent answer, full stage)
/// are never errors; they are text lines or outcome enums.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("window {0} not found")]
    WindowNotFound(u32),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("{0}")]
    Host(String),
}

pub type Result<T> = std::result::Result<T, Error>;

// Tauri commands return errors to the frontend as plain strings.
impl serde::Serialize for Error {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_display_string() {
        let value = serde_json::to_value(Error::WindowNotFound(7)).unwrap();
        assert_eq!(value, serde_json::json!("window 7 not found"));
    }
}
