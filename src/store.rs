//! JSON file store for [`AllocationState`].
//!
//! Saves are atomic: the document is written to `<path>.tmp` and renamed
//! over the target, so readers see either the old or the new state and
//! never a partial file. Access to one file must be serialized by the
//! caller; the store does no locking.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::StateError;
use crate::state::AllocationState;

/// Reads and writes the state document at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonStateStore {
    path: PathBuf,
}

impl JsonStateStore {
    /// Creates a store for `path`. Nothing is touched until load/save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the state document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Loads the state, or an empty state if the file does not exist yet.
    pub fn load(&self) -> Result<AllocationState, StateError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no state file, starting empty");
                return Ok(AllocationState::default());
            }
            Err(e) => return Err(e.into()),
        };
        let state: AllocationState = serde_json::from_str(&data)?;
        debug!(
            path = %self.path.display(),
            resources = state.resources.len(),
            work_items = state.work_items.len(),
            "state loaded"
        );
        Ok(state)
    }

    /// Writes the state atomically, creating parent directories as needed.
    pub fn save(&self, state: &AllocationState) -> Result<(), StateError> {
        let json = serde_json::to_string_pretty(state)?;
        let temp = self.temp_path();

        let result = self.write_and_rename(&temp, &json);
        if result.is_err() {
            let _ = fs::remove_file(&temp);
        }
        result?;

        debug!(path = %self.path.display(), bytes = json.len(), "state saved");
        Ok(())
    }

    fn write_and_rename(&self, temp: &Path, json: &str) -> Result<(), StateError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        fs::write(temp, json)?;
        fs::rename(temp, &self.path)?;
        Ok(())
    }
}
