//! Image list, cursor and shuffle state
//!
//! The list is always the filtered, naturally sorted image of the last input.
//! The cursor is a raw position; in shuffle mode the image shown is
//! `files[shuffle_table[cursor]]`.

use crate::natural_sort::sort_paths;
use crate::shuffle::{is_permutation, RandomShuffle, ShuffleSource};
use std::path::{Path, PathBuf};

/// Extensions accepted into the image list (compared case-insensitively)
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif"];

/// Check if a path has a supported image extension
pub fn is_supported_image<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .map_or(false, |ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

/// Outcome of loading paths into the list
///
/// Rejected inputs are not errors; this only reports how many were dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Paths handed in
    pub supplied: usize,
    /// Paths that made it into the list
    pub accepted: usize,
    /// Missing files, non-files and unsupported extensions
    pub rejected: usize,
}

/// Keep existing regular files with a supported extension, in input order
fn filter_images<I, P>(files: I) -> (Vec<PathBuf>, IngestReport)
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    let mut supplied = 0;
    let images: Vec<PathBuf> = files
        .into_iter()
        .map(Into::into)
        .inspect(|_| supplied += 1)
        .filter(|p| p.is_file() && is_supported_image(p))
        .collect();

    let report = IngestReport {
        supplied,
        accepted: images.len(),
        rejected: supplied - images.len(),
    };
    (images, report)
}

/// Ordered image collection with a cursor and a shuffle mode
pub struct ImageListManager {
    files: Vec<PathBuf>,
    cursor: usize,
    shuffle: bool,
    shuffle_table: Vec<usize>,
    source: Box<dyn ShuffleSource>,
}

impl ImageListManager {
    /// Create an empty list backed by the thread-local random generator
    pub fn new() -> Self {
        Self::with_shuffle_source(Box::new(RandomShuffle))
    }

    /// Create an empty list with a custom permutation source
    pub fn with_shuffle_source(source: Box<dyn ShuffleSource>) -> Self {
        Self {
            files: Vec::new(),
            cursor: 0,
            shuffle: false,
            shuffle_table: Vec::new(),
            source,
        }
    }

    /// Replace the list with the images found in `files`
    ///
    /// The cursor is clamped into the new list and a fresh shuffle table is
    /// drawn. The shuffle flag is left as it is.
    pub fn set_image_files<I, P>(&mut self, files: I, initial_cursor: usize) -> IngestReport
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let (mut images, report) = filter_images(files);
        sort_paths(&mut images);

        self.files = images;
        self.cursor = initial_cursor.min(self.files.len().saturating_sub(1));
        self.regenerate_shuffle_table();

        tracing::debug!(
            "Image list replaced: {} accepted, {} rejected, cursor {}",
            report.accepted,
            report.rejected,
            self.cursor
        );
        report
    }

    /// Append paths and rebuild the list from scratch
    ///
    /// Same as `set_image_files(current + files, raw cursor)`; the previous
    /// shuffle order is discarded. The report covers only the new paths.
    ///
    /// The combined list goes through the filter again, so images deleted
    /// since the last load drop out as well.
    pub fn add_files<I, P>(&mut self, files: I) -> IngestReport
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let (added, report) = filter_images(files);
        let combined: Vec<PathBuf> = self.files.drain(..).chain(added).collect();

        self.set_image_files(combined, self.cursor);
        report
    }

    /// All images in sorted order
    pub fn image_files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn image_count(&self) -> usize {
        self.files.len()
    }

    pub fn has_images(&self) -> bool {
        !self.files.is_empty()
    }

    /// Index of the image being shown, resolved through the shuffle table
    pub fn current_index(&self) -> usize {
        if self.shuffle {
            if let Some(&index) = self.shuffle_table.get(self.cursor) {
                return index;
            }
        }
        self.cursor
    }

    /// Cursor position ignoring shuffle mode
    pub fn raw_index(&self) -> usize {
        self.cursor
    }

    /// Move the raw cursor, clamped to the list; no-op on an empty list
    pub fn set_current_index(&mut self, index: usize) {
        if self.has_images() {
            self.cursor = index.min(self.files.len() - 1);
        }
    }

    /// Point the cursor at whatever position shows list index `index`
    ///
    /// In shuffle mode that is the position whose table entry is `index`.
    /// The index is clamped; no-op on an empty list.
    pub fn show_index(&mut self, index: usize) {
        if !self.has_images() {
            return;
        }

        let index = index.min(self.files.len() - 1);
        self.cursor = if self.shuffle {
            self.shuffle_table
                .iter()
                .position(|&i| i == index)
                .unwrap_or(index)
        } else {
            index
        };
    }

    /// The image being shown, or `None` when the list is empty
    pub fn current_image(&self) -> Option<&Path> {
        self.files.get(self.current_index()).map(PathBuf::as_path)
    }

    /// Advance, wrapping from the last position to the first
    pub fn move_to_next(&mut self) {
        if self.has_images() {
            self.cursor = (self.cursor + 1) % self.files.len();
        }
    }

    /// Step back, wrapping from the first position to the last
    pub fn move_to_previous(&mut self) {
        if self.has_images() {
            let len = self.files.len();
            self.cursor = (self.cursor + len - 1) % len;
        }
    }

    pub fn is_shuffle_enabled(&self) -> bool {
        self.shuffle
    }

    /// Turn shuffle mode on or off
    ///
    /// Turning it on only flips the mode, so the image shown changes to
    /// `files[shuffle_table[cursor]]`. Turning it off moves the cursor onto
    /// the image currently shown, so that image stays on screen.
    pub fn set_shuffle(&mut self, enabled: bool) {
        if enabled == self.shuffle {
            return;
        }

        if self.shuffle {
            if let Some(&index) = self.shuffle_table.get(self.cursor) {
                self.cursor = index;
            }
        }

        self.shuffle = enabled;
        tracing::info!("Shuffle {}", if enabled { "enabled" } else { "disabled" });
    }

    pub fn toggle_shuffle(&mut self) {
        self.set_shuffle(!self.shuffle);
    }

    /// Current permutation of raw positions to list indices
    pub fn shuffle_table(&self) -> &[usize] {
        &self.shuffle_table
    }

    fn regenerate_shuffle_table(&mut self) {
        let len = self.files.len();
        let table = self.source.permutation(len);

        self.shuffle_table = if is_permutation(&table, len) {
            table
        } else {
            tracing::warn!(
                "Shuffle source returned an invalid permutation of {} items; using identity",
                len
            );
            (0..len).collect()
        };
    }
}

impl Default for ImageListManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ImageListManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageListManager")
            .field("files", &self.files.len())
            .field("cursor", &self.cursor)
            .field("shuffle", &self.shuffle)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Reverses the list so shuffled lookups are predictable
    pub(crate) struct ReverseShuffle;

    impl ShuffleSource for ReverseShuffle {
        fn permutation(&mut self, len: usize) -> Vec<usize> {
            (0..len).rev().collect()
        }
    }

    /// Returns garbage to exercise the identity fallback
    struct BrokenShuffle;

    impl ShuffleSource for BrokenShuffle {
        fn permutation(&mut self, len: usize) -> Vec<usize> {
            vec![0; len]
        }
    }

    pub(crate) fn touch(dir: &TempDir, names: &[&str]) -> Vec<PathBuf> {
        names
            .iter()
            .map(|name| {
                let path = dir.path().join(name);
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent).unwrap();
                }
                fs::write(&path, b"x").unwrap();
                path
            })
            .collect()
    }

    fn names(list: &ImageListManager) -> Vec<String> {
        list.image_files()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    fn three_images() -> (TempDir, ImageListManager) {
        let dir = TempDir::new().unwrap();
        let files = touch(&dir, &["a.jpg", "b.jpg", "c.jpg"]);
        let mut list = ImageListManager::with_shuffle_source(Box::new(ReverseShuffle));
        list.set_image_files(files, 0);
        (dir, list)
    }

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported_image("a.jpg"));
        assert!(is_supported_image("IMG.JPG"));
        assert!(is_supported_image("x.Jpeg"));
        assert!(is_supported_image("x.gif"));
        assert!(!is_supported_image("x.webp"));
        assert!(!is_supported_image("x.txt"));
        assert!(!is_supported_image("jpg"));
    }

    #[test]
    fn test_filtering_drops_missing_and_unsupported() {
        let dir = TempDir::new().unwrap();
        let mut inputs = touch(&dir, &["a.jpg", "a.txt"]);
        inputs.push(dir.path().join("missing.png"));

        let mut list = ImageListManager::new();
        let report = list.set_image_files(inputs, 0);

        assert_eq!(names(&list), vec!["a.jpg"]);
        assert_eq!(
            report,
            IngestReport {
                supplied: 3,
                accepted: 1,
                rejected: 2
            }
        );
    }

    #[test]
    fn test_directories_are_not_images() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("folder.png")).unwrap();

        let mut list = ImageListManager::new();
        list.set_image_files(vec![dir.path().join("folder.png")], 0);
        assert!(!list.has_images());
    }

    #[test]
    fn test_uppercase_extension_accepted() {
        let dir = TempDir::new().unwrap();
        let files = touch(&dir, &["IMG.JPG"]);

        let mut list = ImageListManager::new();
        list.set_image_files(files, 0);
        assert_eq!(list.image_count(), 1);
    }

    #[test]
    fn test_natural_order() {
        let dir = TempDir::new().unwrap();
        let files = touch(&dir, &["file10b.png", "file10.png", "file2.png"]);

        let mut list = ImageListManager::new();
        list.set_image_files(files, 0);
        assert_eq!(names(&list), vec!["file2.png", "file10.png", "file10b.png"]);
    }

    #[test]
    fn test_nested_directories_sort_by_component() {
        let dir = TempDir::new().unwrap();
        let files = touch(&dir, &["d10/a.png", "d2/z.png", "d2/b.png"]);

        let mut list = ImageListManager::new();
        list.set_image_files(files, 0);

        let rel: Vec<_> = list
            .image_files()
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            rel,
            vec![
                PathBuf::from("d2/b.png"),
                PathBuf::from("d2/z.png"),
                PathBuf::from("d10/a.png"),
            ]
        );
    }

    #[test]
    fn test_initial_cursor_is_clamped() {
        let dir = TempDir::new().unwrap();
        let files = touch(&dir, &["a.png", "b.png"]);

        let mut list = ImageListManager::new();
        list.set_image_files(files.clone(), 99);
        assert_eq!(list.raw_index(), 1);

        list.set_image_files(files, 1);
        assert_eq!(list.raw_index(), 1);
    }

    #[test]
    fn test_wraparound() {
        let (_dir, mut list) = three_images();

        list.set_current_index(2);
        list.move_to_next();
        assert_eq!(list.raw_index(), 0);

        list.move_to_previous();
        assert_eq!(list.raw_index(), 2);
    }

    #[test]
    fn test_set_current_index_clamps() {
        let (_dir, mut list) = three_images();
        list.set_current_index(10);
        assert_eq!(list.raw_index(), 2);
    }

    #[test]
    fn test_shuffle_lookup_goes_through_table() {
        let (_dir, mut list) = three_images();
        assert_eq!(list.shuffle_table(), &[2, 1, 0]);

        list.set_shuffle(true);
        assert_eq!(list.current_index(), 2);
        assert!(list.current_image().unwrap().ends_with("c.jpg"));

        list.move_to_next();
        assert_eq!(list.raw_index(), 1);
        assert!(list.current_image().unwrap().ends_with("b.jpg"));
    }

    #[test]
    fn test_shuffle_off_keeps_logical_image() {
        let (_dir, mut list) = three_images();
        list.set_shuffle(true);

        let shown = list.current_image().unwrap().to_path_buf();
        list.set_shuffle(false);

        assert_eq!(list.current_image().unwrap(), shown.as_path());
        assert_eq!(list.raw_index(), 2);
    }

    #[test]
    fn test_shuffle_off_keeps_shown_image_for_any_cursor() {
        let dir = TempDir::new().unwrap();
        let files = touch(&dir, &["1.png", "2.png", "3.png", "4.png", "5.png"]);

        let mut list = ImageListManager::new();
        list.set_image_files(files, 0);

        for cursor in 0..5 {
            list.set_current_index(cursor);
            list.set_shuffle(true);
            let shown = list.current_image().unwrap().to_path_buf();

            list.set_shuffle(false);
            assert_eq!(list.current_image().unwrap(), shown.as_path());
            assert_eq!(list.raw_index(), list.shuffle_table()[cursor]);

            // Already off, nothing moves
            list.set_shuffle(false);
            assert_eq!(list.current_image().unwrap(), shown.as_path());
        }
    }

    #[test]
    fn test_shuffle_on_is_a_plain_flip() {
        let (_dir, mut list) = three_images();
        list.set_current_index(0);
        assert!(list.current_image().unwrap().ends_with("a.jpg"));

        list.set_shuffle(true);
        assert_eq!(list.raw_index(), 0);
        assert!(list.current_image().unwrap().ends_with("c.jpg"));
    }

    #[test]
    fn test_show_index_resolves_through_table() {
        let (_dir, mut list) = three_images();

        list.show_index(0);
        assert_eq!(list.raw_index(), 0);

        list.set_shuffle(true);
        list.show_index(0);
        assert_eq!(list.raw_index(), 2);
        assert!(list.current_image().unwrap().ends_with("a.jpg"));

        list.show_index(99);
        assert_eq!(list.current_index(), 2);
    }

    #[test]
    fn test_show_index_on_empty_list() {
        let mut list = ImageListManager::new();
        list.set_shuffle(true);
        list.show_index(4);
        assert_eq!(list.raw_index(), 0);
        assert!(list.current_image().is_none());
    }

    #[test]
    fn test_set_shuffle_same_value_is_noop() {
        let (_dir, mut list) = three_images();
        list.set_current_index(0);

        list.set_shuffle(false);
        assert_eq!(list.raw_index(), 0);

        list.set_shuffle(true);
        list.set_shuffle(true);
        assert!(list.is_shuffle_enabled());
        assert_eq!(list.raw_index(), 0);
    }

    #[test]
    fn test_toggle_shuffle() {
        let (_dir, mut list) = three_images();
        list.toggle_shuffle();
        assert!(list.is_shuffle_enabled());
        list.toggle_shuffle();
        assert!(!list.is_shuffle_enabled());
        assert_eq!(list.raw_index(), 2);
    }

    #[test]
    fn test_add_files_resorts_and_keeps_cursor() {
        let (dir, mut list) = three_images();
        list.set_current_index(1);

        let extra = touch(&dir, &["0.jpg", "skip.txt"]);
        let report = list.add_files(extra);

        assert_eq!(names(&list), vec!["0.jpg", "a.jpg", "b.jpg", "c.jpg"]);
        assert_eq!(list.raw_index(), 1);
        assert_eq!(list.shuffle_table(), &[3, 2, 1, 0]);
        assert_eq!(
            report,
            IngestReport {
                supplied: 2,
                accepted: 1,
                rejected: 1
            }
        );
    }

    #[test]
    fn test_add_nothing_keeps_content() {
        let dir = TempDir::new().unwrap();
        let files = touch(&dir, &["a.png", "b.png", "c.png", "d.png"]);

        let mut list = ImageListManager::new();
        list.set_image_files(files, 2);
        let before = list.image_files().to_vec();

        let report = list.add_files(Vec::<PathBuf>::new());

        assert_eq!(list.image_files(), before.as_slice());
        assert_eq!(list.raw_index(), 2);
        assert!(is_permutation(list.shuffle_table(), 4));
        assert_eq!(report, IngestReport::default());
    }

    #[test]
    fn test_add_files_drops_deleted_images() {
        let (dir, mut list) = three_images();
        fs::remove_file(dir.path().join("b.jpg")).unwrap();

        let report = list.add_files(touch(&dir, &["d.jpg"]));

        assert_eq!(names(&list), vec!["a.jpg", "c.jpg", "d.jpg"]);
        assert_eq!(
            report,
            IngestReport {
                supplied: 1,
                accepted: 1,
                rejected: 0
            }
        );
    }

    #[test]
    fn test_add_files_keeps_shuffle_flag() {
        let (dir, mut list) = three_images();
        list.set_shuffle(true);

        list.add_files(touch(&dir, &["d.jpg"]));
        assert!(list.is_shuffle_enabled());
        assert_eq!(list.current_index(), 3);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let dir = TempDir::new().unwrap();
        let files = touch(&dir, &["a.png"]);

        let mut list = ImageListManager::new();
        list.set_image_files(vec![files[0].clone(), files[0].clone()], 0);
        assert_eq!(list.image_count(), 2);

        list.add_files(files);
        assert_eq!(list.image_count(), 3);
    }

    #[test]
    fn test_empty_list_is_safe() {
        let mut list = ImageListManager::new();
        let report = list.set_image_files(Vec::<PathBuf>::new(), 5);

        assert_eq!(report, IngestReport::default());
        assert!(list.current_image().is_none());
        assert_eq!(list.raw_index(), 0);
        assert!(list.shuffle_table().is_empty());

        list.move_to_next();
        list.move_to_previous();
        list.toggle_shuffle();
        assert!(list.current_image().is_none());
        list.toggle_shuffle();
        list.set_current_index(3);
        assert_eq!(list.raw_index(), 0);
        assert!(list.current_image().is_none());
    }

    #[test]
    fn test_invalid_permutation_falls_back_to_identity() {
        let dir = TempDir::new().unwrap();
        let files = touch(&dir, &["a.png", "b.png", "c.png"]);

        let mut list = ImageListManager::with_shuffle_source(Box::new(BrokenShuffle));
        list.set_image_files(files, 0);
        assert_eq!(list.shuffle_table(), &[0, 1, 2]);
    }

    #[test]
    fn test_replacing_list_clamps_cursor_under_shuffle() {
        let (dir, mut list) = three_images();
        list.set_shuffle(true);
        list.set_current_index(2);

        let files = touch(&dir, &["only.gif"]);
        list.set_image_files(files, list.raw_index());

        assert_eq!(list.raw_index(), 0);
        assert!(list.current_image().unwrap().ends_with("only.gif"));
    }
}
