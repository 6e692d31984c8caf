use std::{collections::HashSet, path::PathBuf};

use image::{ImageFormat, RgbaImage};

use super::{DatasetLayout, ReviewError, storage};

/// Result of asking the session to flag the current sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    /// A log line was appended and the sample joined the flagged set.
    Recorded,
    /// The sample was flagged earlier; nothing was written.
    AlreadyFlagged,
    /// The reviewer declined the confirmation; nothing was written.
    Cancelled,
}

/// In-memory review state for one run over a dataset.
///
/// The cursor always indexes into the identifier list, which is non-empty and
/// fixed for the lifetime of the session.
#[derive(Debug)]
pub struct Session {
    layout: DatasetLayout,
    identifiers: Vec<String>,
    cursor: usize,
    flagged: HashSet<String>,
}

impl Session {
    /// Start a session over `identifiers`, creating the state folders if needed.
    pub fn new(layout: DatasetLayout, identifiers: Vec<String>) -> Result<Self, ReviewError> {
        if identifiers.is_empty() {
            return Err(ReviewError::NoSamples {
                path: layout.folder(super::PanelRole::Pre),
            });
        }
        layout.ensure_state_dirs()?;
        Ok(Self {
            layout,
            identifiers,
            cursor: 0,
            flagged: HashSet::new(),
        })
    }

    /// List the reference folder and start a session over it.
    pub fn open(layout: DatasetLayout) -> Result<Self, ReviewError> {
        let identifiers = layout.list_identifiers()?;
        Self::new(layout, identifiers)
    }

    pub fn layout(&self) -> &DatasetLayout {
        &self.layout
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    /// Always false; sessions are never built over an empty list.
    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    /// Identifier under the cursor.
    pub fn current_identifier(&self) -> &str {
        &self.identifiers[self.cursor]
    }

    /// One-based position text, e.g. `3/120`.
    pub fn progress_label(&self) -> String {
        format!("{}/{}", self.cursor + 1, self.identifiers.len())
    }

    /// Advance one sample; stays on the last sample instead of wrapping.
    pub fn next(&mut self) -> &str {
        if self.cursor + 1 < self.identifiers.len() {
            self.cursor += 1;
        }
        self.current_identifier()
    }

    /// Step back one sample; stays on the first sample.
    pub fn prev(&mut self) -> &str {
        self.cursor = self.cursor.saturating_sub(1);
        self.current_identifier()
    }

    /// Load the persisted cursor, returning the position now in effect.
    ///
    /// Missing or corrupt progress resets to the first sample. A value past the
    /// end of the list, e.g. after files were removed, lands on the last sample.
    pub fn restore_progress(&mut self) -> usize {
        let last = self.identifiers.len() - 1;
        self.cursor = match storage::read_progress(&self.layout.progress_path()) {
            Some(index) if index > last => {
                tracing::warn!("Restored position {index} exceeds {last}; clamping");
                last
            }
            Some(index) => index,
            None => 0,
        };
        self.cursor
    }

    /// Write the cursor to the progress file, replacing the previous value.
    pub fn persist_progress(&self) -> Result<(), ReviewError> {
        storage::write_progress(&self.layout.progress_path(), self.cursor)
    }

    pub fn is_flagged(&self, identifier: &str) -> bool {
        self.flagged.contains(identifier)
    }

    pub fn is_current_flagged(&self) -> bool {
        self.is_flagged(self.current_identifier())
    }

    pub fn flagged_count(&self) -> usize {
        self.flagged.len()
    }

    /// Flag the current sample as erroneous.
    ///
    /// Membership is checked before `confirm`, so a repeated flag reports
    /// [`FlagOutcome::AlreadyFlagged`] whatever the reviewer answered. The
    /// flagged set only changes once the log line is on disk.
    pub fn flag_current_as_error(&mut self, confirm: bool) -> Result<FlagOutcome, ReviewError> {
        if self.is_current_flagged() {
            return Ok(FlagOutcome::AlreadyFlagged);
        }
        if !confirm {
            return Ok(FlagOutcome::Cancelled);
        }
        let identifier = self.current_identifier().to_string();
        storage::append_error_entry(
            &self.layout.error_log_path(),
            &identifier,
            storage::now_local_or_utc(),
        )?;
        tracing::info!("Flagged {identifier}");
        self.flagged.insert(identifier);
        Ok(FlagOutcome::Recorded)
    }

    /// Text to place on the clipboard for the current sample.
    pub fn copy_current_identifier(&self) -> String {
        self.current_identifier().to_string()
    }

    /// Save a rendered view of the current sample under the screenshot folder.
    ///
    /// The file is named after the identifier and always PNG encoded.
    pub fn capture_display_artifact(&self, rendered: &RgbaImage) -> Result<PathBuf, ReviewError> {
        let dir = self.layout.screenshot_dir();
        std::fs::create_dir_all(&dir).map_err(|source| ReviewError::storage(&dir, source))?;
        let path = dir.join(self.current_identifier());
        rendered
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|source| ReviewError::Encode {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }

    /// Rebuild the flagged set from earlier runs' error log.
    ///
    /// Only identifiers belonging to this session are kept. Returns how many
    /// samples are flagged afterwards.
    pub fn replay_error_log(&mut self) -> Result<usize, ReviewError> {
        let logged = storage::read_flagged(&self.layout.error_log_path())?;
        let known: HashSet<&str> = self.identifiers.iter().map(String::as_str).collect();
        self.flagged
            .extend(logged.into_iter().filter(|id| known.contains(id.as_str())));
        Ok(self.flagged.len())
    }
}
