//! Image Viewer Core Domain Logic
//!
//! This crate contains:
//! - Natural sort keys for file names and paths
//! - The image list with its cursor and shuffle mode
//! - Persisted settings
//! - Viewer commands and the session that runs them
//! - Error types

pub mod command;
pub mod error;
pub mod image_list;
pub mod natural_sort;
pub mod session;
pub mod settings;
pub mod shuffle;

pub use command::{Command, CommandError, HELP};
pub use error::AppError;
pub use image_list::{is_supported_image, ImageListManager, IngestReport, SUPPORTED_EXTENSIONS};
pub use natural_sort::{compare_paths, path_sort_key, sort_key, sort_paths, PathSortKey, SortKey};
pub use session::{CommandOutcome, ViewerSession};
pub use settings::{DirectoryHistoryEntry, Settings, ViewerConfig, MAX_DIRECTORY_HISTORY};
pub use shuffle::{RandomShuffle, SeededShuffle, ShuffleSource};
