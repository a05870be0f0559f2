//! Filesystem capability trait.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde_json::Value;

use crate::Result;

/// Path and JSON file operations used by the client and the sync run.
///
/// Passed into constructors explicitly so tests can swap in a fixed clock or
/// a scratch directory.
pub trait FileIo: Send + Sync {
    /// Check that `path` points at something on disk.
    fn validate_path(&self, path: &Path) -> Result<()>;

    /// Read and decode a JSON file.
    fn read_json_file(&self, path: &Path) -> Result<Value>;

    /// Read and decode `directory/file_name`.
    fn read_json_in(&self, directory: &Path, file_name: &str) -> Result<Value> {
        self.read_json_file(&directory.join(file_name))
    }

    /// Write `value` as JSON to `directory/file_name`, creating the directory
    /// if needed. Returns the path written.
    fn write_json_file(&self, directory: &Path, file_name: &str, value: &Value)
    -> Result<PathBuf>;

    /// The current local time.
    fn current_time(&self) -> DateTime<Local>;
}
