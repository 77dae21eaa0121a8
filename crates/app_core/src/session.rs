//! Viewer session - ties the image list to settings and the file system

use crate::command::Command;
use crate::error::AppError;
use crate::image_list::{ImageListManager, IngestReport};
use crate::settings::Settings;
use crate::shuffle::ShuffleSource;
use std::path::{Path, PathBuf};

/// Result of running a [`Command`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The image shown after the command
    Image(Option<PathBuf>),
    /// A new list was loaded
    Loaded(IngestReport),
    /// Shuffle mode after the command
    Shuffle(bool),
    List,
    History,
    Help,
    Quit,
}

/// The state the viewer window would own
#[derive(Debug)]
pub struct ViewerSession {
    images: ImageListManager,
    settings: Settings,
}

impl ViewerSession {
    pub fn new(settings: Settings) -> Self {
        Self::with_images(settings, ImageListManager::new())
    }

    pub fn with_shuffle_source(settings: Settings, source: Box<dyn ShuffleSource>) -> Self {
        Self::with_images(settings, ImageListManager::with_shuffle_source(source))
    }

    fn with_images(settings: Settings, mut images: ImageListManager) -> Self {
        if settings.viewer.shuffle_on_start {
            images.set_shuffle(true);
        }
        Self { images, settings }
    }

    pub fn images(&self) -> &ImageListManager {
        &self.images
    }

    pub fn images_mut(&mut self) -> &mut ImageListManager {
        &mut self.images
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Window title for the image shown
    pub fn title(&self) -> String {
        match self.images.current_image().and_then(Path::file_name) {
            Some(name) => format!("Image Viewer - {}", name.to_string_lossy()),
            None => "Image Viewer - No Image".to_string(),
        }
    }

    /// "position/count" of the image shown, 1-based
    pub fn position(&self) -> Option<(usize, usize)> {
        self.images
            .has_images()
            .then(|| (self.images.current_index() + 1, self.images.image_count()))
    }

    /// Turn shuffle mode on without changing the image shown
    pub fn start_shuffled(&mut self) {
        let shown = self.images.current_index();
        self.images.set_shuffle(true);
        self.images.show_index(shown);
    }

    /// Load files and directories given on the command line
    ///
    /// When every input file lives in one directory, that directory is
    /// recorded in the history.
    pub fn open_inputs<P: AsRef<Path>>(&mut self, inputs: &[P], recursive: bool) -> IngestReport {
        let candidates = app_fs::collect_candidates(inputs, recursive);
        let report = self.images.set_image_files(candidates.iter().cloned(), 0);

        if self.images.has_images() {
            if let Some(dir) = app_fs::common_parent(&candidates) {
                self.settings
                    .add_directory(dir.to_string_lossy().into_owned(), recursive);
            }
        }

        tracing::info!(
            "Opened {} inputs: {} images",
            inputs.len(),
            self.images.image_count()
        );
        report
    }

    /// Reload the list saved at the last shutdown
    ///
    /// The saved index is the image that was shown, so in shuffle mode the
    /// cursor goes to the position that shows it.
    pub fn restore_recent(&mut self) -> IngestReport {
        let files = self.settings.recent_paths();
        let index = self.settings.recent_index;
        let report = self.images.set_image_files(files, 0);
        self.images.show_index(index);

        tracing::info!(
            "Restored {} of {} recent images",
            report.accepted,
            report.supplied
        );
        report
    }

    /// Replace the list with the given files, directories are expanded
    pub fn open_files<P: AsRef<Path>>(&mut self, paths: &[P]) -> IngestReport {
        let candidates = app_fs::collect_candidates(paths, self.settings.viewer.include_subdirs);
        self.images.set_image_files(candidates, 0)
    }

    /// Add files to the current list
    pub fn add_files<P: AsRef<Path>>(&mut self, paths: &[P]) -> IngestReport {
        let candidates = app_fs::collect_candidates(paths, self.settings.viewer.include_subdirs);
        self.images.add_files(candidates)
    }

    /// Open every image in a directory
    ///
    /// The directory goes into the history only when it held images.
    pub fn open_directory<P: AsRef<Path>>(
        &mut self,
        dir: P,
        include_subdirs: bool,
    ) -> Result<IngestReport, AppError> {
        let dir = app_fs::absolutize(dir.as_ref());
        if !dir.is_dir() {
            return Err(AppError::NotADirectory(dir.display().to_string()));
        }

        let files = app_fs::list_directory_files(&dir, include_subdirs)?;
        let report = self.images.set_image_files(files, 0);

        if self.images.has_images() {
            self.settings
                .add_directory(dir.to_string_lossy().into_owned(), include_subdirs);
        }

        tracing::info!("Opened {:?}: {} images", dir, report.accepted);
        Ok(report)
    }

    /// Reopen the n-th history entry (1-based, most recent first)
    pub fn open_recent_directory(&mut self, n: usize) -> Result<IngestReport, AppError> {
        let entry = n
            .checked_sub(1)
            .and_then(|i| self.settings.directory_history.get(i))
            .cloned()
            .ok_or(AppError::UnknownHistoryEntry(n))?;

        self.open_directory(&entry.path, entry.include_subdirs)
    }

    /// Copy the list and the index shown into the settings
    pub fn persist(&mut self) {
        if self.images.has_images() {
            self.settings
                .set_recent_files(self.images.image_files(), self.images.current_index());
        }
    }

    /// Consume the session, returning settings ready to be saved
    pub fn into_settings(mut self) -> Settings {
        self.persist();
        self.settings
    }

    pub fn execute(&mut self, command: Command) -> Result<CommandOutcome, AppError> {
        let outcome = match command {
            Command::Next => {
                self.images.move_to_next();
                self.current()
            }
            Command::Previous => {
                self.images.move_to_previous();
                self.current()
            }
            Command::First => {
                self.images.set_current_index(0);
                self.current()
            }
            Command::Last => {
                self.images.set_current_index(usize::MAX);
                self.current()
            }
            Command::ToggleShuffle => {
                self.images.toggle_shuffle();
                CommandOutcome::Shuffle(self.images.is_shuffle_enabled())
            }
            Command::Shuffle(enabled) => {
                self.images.set_shuffle(enabled);
                CommandOutcome::Shuffle(enabled)
            }
            Command::Current => self.current(),
            Command::List => CommandOutcome::List,
            Command::History => CommandOutcome::History,
            Command::Open(paths) => CommandOutcome::Loaded(self.open_files(&paths)),
            Command::Add(paths) => CommandOutcome::Loaded(self.add_files(&paths)),
            Command::OpenDirectory {
                path,
                include_subdirs,
            } => CommandOutcome::Loaded(self.open_directory(path, include_subdirs)?),
            Command::OpenRecent(n) => CommandOutcome::Loaded(self.open_recent_directory(n)?),
            Command::Help => CommandOutcome::Help,
            Command::Quit => CommandOutcome::Quit,
        };

        Ok(outcome)
    }

    fn current(&self) -> CommandOutcome {
        CommandOutcome::Image(self.images.current_image().map(Path::to_path_buf))
    }
}
