//! Persisted viewer settings

use crate::error::AppError;
use directories::ProjectDirs;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

/// Most directories kept in the history
pub const MAX_DIRECTORY_HISTORY: usize = 10;

/// State kept between runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Image list at the last shutdown
    pub recent_files: Vec<String>,
    /// Logical index into `recent_files`
    pub recent_index: usize,
    /// Most recent first, unique by path
    #[serde(deserialize_with = "deserialize_history")]
    pub directory_history: Vec<DirectoryHistoryEntry>,
    pub viewer: ViewerConfig,
}

/// A directory the user opened
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryHistoryEntry {
    pub path: String,
    #[serde(default)]
    pub include_subdirs: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Walk subdirectories when opening a folder
    pub include_subdirs: bool,
    /// Start with shuffle mode on
    pub shuffle_on_start: bool,
}

/// Older settings stored history as bare path strings
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredHistoryEntry {
    Path(String),
    Entry(DirectoryHistoryEntry),
}

fn deserialize_history<'de, D>(deserializer: D) -> Result<Vec<DirectoryHistoryEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let stored = Vec::<StoredHistoryEntry>::deserialize(deserializer)?;
    Ok(stored
        .into_iter()
        .map(|entry| match entry {
            StoredHistoryEntry::Path(path) => DirectoryHistoryEntry {
                path,
                include_subdirs: false,
            },
            StoredHistoryEntry::Entry(entry) => entry,
        })
        .collect())
}

impl Settings {
    /// Load settings from the default location
    pub fn load() -> Self {
        Self::load_from(Self::settings_path())
    }

    /// Load settings from a file
    ///
    /// A missing, unreadable or malformed file yields the defaults.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            tracing::info!("Using default settings");
            return Self::default();
        }

        match Self::read(path) {
            Ok(settings) => {
                tracing::info!("Settings loaded from {:?}", path);
                settings
            }
            Err(e) => {
                tracing::warn!("Ignoring settings file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Save settings to the default location
    pub fn save(&self) -> Result<(), AppError> {
        self.save_to(Self::settings_path())
    }

    /// Save settings to a file
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), AppError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        tracing::info!("Settings saved to {:?}", path);
        Ok(())
    }

    /// Get the settings file path
    pub fn settings_path() -> PathBuf {
        ProjectDirs::from("com", "ImageViewer", "ImageViewer")
            .map(|dirs| dirs.config_dir().join("settings.toml"))
            .unwrap_or_else(|| PathBuf::from("./settings.toml"))
    }

    /// Recent image list as paths
    pub fn recent_paths(&self) -> Vec<PathBuf> {
        self.recent_files.iter().map(PathBuf::from).collect()
    }

    /// Remember the image list and the index shown
    ///
    /// An empty list leaves the previous value in place.
    pub fn set_recent_files<P: AsRef<Path>>(&mut self, files: &[P], logical_index: usize) {
        if files.is_empty() {
            return;
        }

        self.recent_files = files
            .iter()
            .map(|f| {
                let f = f.as_ref();
                f.canonicalize()
                    .unwrap_or_else(|_| f.to_path_buf())
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        self.recent_index = logical_index.min(files.len() - 1);
    }

    /// Put a directory at the front of the history
    pub fn add_directory<S: Into<String>>(&mut self, path: S, include_subdirs: bool) {
        let path = path.into();

        self.directory_history.retain(|entry| entry.path != path);
        self.directory_history.insert(
            0,
            DirectoryHistoryEntry {
                path,
                include_subdirs,
            },
        );
        self.directory_history.truncate(MAX_DIRECTORY_HISTORY);
    }
}
