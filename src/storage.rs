use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{MonthlineError, Result};
use crate::models::Project;

/// File-based storage for the project list.
///
/// Saves are fire-and-forget from the engine's point of view: the TUI
/// host calls `save` after a gesture commit and reports failures
/// through its own status line.
pub struct Storage {
    data_dir: PathBuf,
    projects_file: PathBuf,
}

impl Storage {
    pub fn new(data_dir: &Path) -> Result<Self> {
        if data_dir.exists() && !data_dir.is_dir() {
            return Err(MonthlineError::InvalidDirectory(
                data_dir.to_string_lossy().to_string(),
            ));
        }
        if !data_dir.exists() {
            fs::create_dir_all(data_dir)?;
        }

        Ok(Self {
            data_dir: data_dir.to_path_buf(),
            projects_file: data_dir.join("projects.json"),
        })
    }

    /// Load all projects. A missing file is an empty list, not an error.
    pub fn load(&self) -> Result<Vec<Project>> {
        if !self.projects_file.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.projects_file)?;
        let projects: Vec<Project> = serde_json::from_str(&content)?;
        Ok(projects)
    }

    /// Persist the full project list. Writes to a temp file first so a
    /// failed write never truncates the existing data.
    pub fn save(&self, projects: &[Project]) -> Result<()> {
        let data = serde_json::to_string_pretty(projects)?;
        let temp_file = self.data_dir.join(".projects.json.tmp");
        fs::write(&temp_file, data)?;
        fs::rename(&temp_file, &self.projects_file)?;
        Ok(())
    }
}
