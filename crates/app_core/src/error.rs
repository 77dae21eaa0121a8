//! Application error types
//!
//! The image list itself never fails; these cover settings persistence and
//! the collaborators around it.

use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings parse error: {0}")]
    SettingsParse(#[from] toml::de::Error),

    #[error("Settings encode error: {0}")]
    SettingsEncode(#[from] toml::ser::Error),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("No recent directory at position {0}")]
    UnknownHistoryEntry(usize),

    #[error(transparent)]
    Fs(#[from] app_fs::FsError),
}

impl AppError {
    /// Get a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            AppError::NotADirectory(path) => format!("Cannot open folder: {}", path),
            AppError::UnknownHistoryEntry(n) => format!("Recent folder #{} does not exist", n),
            AppError::SettingsParse(_) => "Settings file is damaged; defaults are in use".to_string(),
            _ => self.to_string(),
        }
    }
}
