//! Candidate collection - turns user inputs into raw file paths
//!
//! Nothing here filters by image type; that is the image list's job.

use crate::{FsError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// List regular files in a directory
///
/// With `recursive` the whole tree is walked, otherwise only direct children.
/// Entries that cannot be read are skipped.
pub fn list_directory_files<P: AsRef<Path>>(dir: P, recursive: bool) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();

    if !dir.exists() {
        return Err(FsError::NotFound(dir.display().to_string()));
    }

    if !dir.is_dir() {
        return Err(FsError::InvalidPath(format!("Not a directory: {}", dir.display())));
    }

    let mut walker = WalkDir::new(dir).min_depth(1).follow_links(true);
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::debug!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    tracing::debug!(
        "Listed {} files in {:?} (recursive: {})",
        files.len(),
        dir,
        recursive
    );
    Ok(files)
}

/// Expand command-line style inputs into candidate files
///
/// Files are passed through as absolute paths, directories are enumerated.
/// Inputs that are neither are dropped.
pub fn collect_candidates<P: AsRef<Path>>(inputs: &[P], recursive: bool) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    for input in inputs {
        let path = absolutize(input.as_ref());

        if path.is_file() {
            candidates.push(path);
        } else if path.is_dir() {
            match list_directory_files(&path, recursive) {
                Ok(files) => candidates.extend(files),
                Err(e) => tracing::debug!("Cannot enumerate {:?}: {}", path, e),
            }
        } else {
            tracing::debug!("Ignoring input {:?}: not a file or directory", path);
        }
    }

    candidates
}

/// Parent directory shared by every file, if there is exactly one
pub fn common_parent<P: AsRef<Path>>(files: &[P]) -> Option<PathBuf> {
    let first = files.first()?.as_ref().parent()?;

    if files.iter().all(|f| f.as_ref().parent() == Some(first)) {
        Some(first.to_path_buf())
    } else {
        None
    }
}

/// Resolve a path against the working directory, following symlinks when possible
pub fn absolutize(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }

    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    }
}
