use std::path::{Path, PathBuf};

use super::ReviewError;

/// Folder holding the progress file and error log.
pub const CHECK_DIR_NAME: &str = "check";
/// Folder receiving captured display snapshots.
pub const SCREENSHOT_DIR_NAME: &str = "screenshot";
/// Persisted cursor filename inside [`CHECK_DIR_NAME`].
pub const PROGRESS_FILE_NAME: &str = "progress.txt";
/// Append-only flag log filename inside [`CHECK_DIR_NAME`].
pub const ERROR_LOG_FILE_NAME: &str = "error_log.txt";

/// One of the image panels shown for every sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PanelRole {
    /// Pre-change image.
    Pre,
    /// Post-change image.
    Post,
    /// Ground-truth change label.
    Label,
    /// Model inference result; only some datasets carry it.
    Inference,
}

impl PanelRole {
    /// Every role in display order.
    pub const ALL: [PanelRole; 4] = [
        PanelRole::Pre,
        PanelRole::Post,
        PanelRole::Label,
        PanelRole::Inference,
    ];

    /// Folder name under the dataset base path.
    pub fn folder_name(self) -> &'static str {
        match self {
            PanelRole::Pre => "A",
            PanelRole::Post => "B",
            PanelRole::Label => "Label",
            PanelRole::Inference => "Infer",
        }
    }

    /// Short caption drawn above the panel.
    pub fn title(self) -> &'static str {
        match self {
            PanelRole::Pre => "Before (A)",
            PanelRole::Post => "After (B)",
            PanelRole::Label => "Label",
            PanelRole::Inference => "Inference",
        }
    }

    /// Whether a dataset must provide this folder.
    pub fn is_required(self) -> bool {
        !matches!(self, PanelRole::Inference)
    }
}

/// Resolves the on-disk conventions of a change-detection dataset rooted at a base path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatasetLayout {
    base: PathBuf,
}

impl DatasetLayout {
    /// Validate that `base` exists and carries the reference folder.
    pub fn open(base: impl Into<PathBuf>) -> Result<Self, ReviewError> {
        let base = base.into();
        if !base.exists() {
            return Err(ReviewError::MissingBasePath { path: base });
        }
        let layout = Self { base };
        let reference = layout.folder(PanelRole::Pre);
        if !reference.is_dir() {
            return Err(ReviewError::MissingFolder { path: reference });
        }
        Ok(layout)
    }

    /// Dataset root.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Folder holding every artifact of `role`.
    pub fn folder(&self, role: PanelRole) -> PathBuf {
        self.base.join(role.folder_name())
    }

    /// Location of the `role` artifact for one identifier.
    pub fn artifact_path(&self, role: PanelRole, identifier: &str) -> PathBuf {
        self.folder(role).join(identifier)
    }

    /// True when the optional inference folder is present.
    pub fn has_inference(&self) -> bool {
        self.folder(PanelRole::Inference).is_dir()
    }

    /// Durable-state folder.
    pub fn check_dir(&self) -> PathBuf {
        self.base.join(CHECK_DIR_NAME)
    }

    /// Screenshot output folder.
    pub fn screenshot_dir(&self) -> PathBuf {
        self.base.join(SCREENSHOT_DIR_NAME)
    }

    pub fn progress_path(&self) -> PathBuf {
        self.check_dir().join(PROGRESS_FILE_NAME)
    }

    pub fn error_log_path(&self) -> PathBuf {
        self.check_dir().join(ERROR_LOG_FILE_NAME)
    }

    /// Create the check and screenshot folders; existing folders are fine.
    pub fn ensure_state_dirs(&self) -> Result<(), ReviewError> {
        for dir in [self.check_dir(), self.screenshot_dir()] {
            std::fs::create_dir_all(&dir).map_err(|source| ReviewError::storage(&dir, source))?;
        }
        Ok(())
    }

    /// List identifiers from the reference folder, sorted by name.
    ///
    /// Only regular files count; hidden dot-files and names that are not valid
    /// UTF-8 are skipped.
    pub fn list_identifiers(&self) -> Result<Vec<String>, ReviewError> {
        let reference = self.folder(PanelRole::Pre);
        let entries =
            std::fs::read_dir(&reference).map_err(|source| ReviewError::storage(&reference, source))?;
        let mut identifiers = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ReviewError::storage(&reference, source))?;
            if !entry.file_type().map(|ft| ft.is_file()).unwrap_or(false) {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                tracing::warn!(
                    "Skipping non UTF-8 file name in {}: {:?}",
                    reference.display(),
                    entry.file_name()
                );
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            identifiers.push(name);
        }
        identifiers.sort();
        Ok(identifiers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn open_rejects_missing_base_path() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = DatasetLayout::open(&missing).unwrap_err();
        assert!(matches!(err, ReviewError::MissingBasePath { path } if path == missing));
    }

    #[test]
    fn open_requires_reference_folder() {
        let dir = tempdir().unwrap();
        let err = DatasetLayout::open(dir.path()).unwrap_err();
        assert!(matches!(err, ReviewError::MissingFolder { .. }));
    }

    #[test]
    fn listing_is_sorted_and_skips_dirs_and_hidden_files() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("A");
        std::fs::create_dir_all(a.join("nested")).unwrap();
        for name in ["c.png", "a.png", ".DS_Store", "b.png"] {
            std::fs::write(a.join(name), b"x").unwrap();
        }
        let layout = DatasetLayout::open(dir.path()).unwrap();
        assert_eq!(
            layout.list_identifiers().unwrap(),
            vec!["a.png", "b.png", "c.png"]
        );
    }

    #[test]
    fn artifact_paths_follow_role_folders() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("A")).unwrap();
        let layout = DatasetLayout::open(dir.path()).unwrap();
        assert_eq!(
            layout.artifact_path(PanelRole::Label, "x.png"),
            dir.path().join("Label").join("x.png")
        );
        assert_eq!(
            layout.progress_path(),
            dir.path().join("check").join("progress.txt")
        );
        assert!(!layout.has_inference());
        std::fs::create_dir_all(dir.path().join("Infer")).unwrap();
        assert!(layout.has_inference());
    }

    #[test]
    fn ensure_state_dirs_is_idempotent() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("A")).unwrap();
        let layout = DatasetLayout::open(dir.path()).unwrap();
        layout.ensure_state_dirs().unwrap();
        layout.ensure_state_dirs().unwrap();
        assert!(layout.check_dir().is_dir());
        assert!(layout.screenshot_dir().is_dir());
    }
}
