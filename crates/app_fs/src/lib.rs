//! File system collaborator for the image viewer
//!
//! Provides:
//! - Directory enumeration (flat or recursive)
//! - Expansion of command-line inputs into candidate files

mod scanner;

pub use scanner::{absolutize, collect_candidates, common_parent, list_directory_files};

use thiserror::Error;

/// File system errors
#[derive(Error, Debug)]
pub enum FsError {
    #[error("Path not found: {0}")]
    NotFound(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

pub type Result<T> = std::result::Result<T, FsError>;
