//! Path, JSON file and timestamp helpers.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde_json::Value;
use tracing::{debug, instrument};

use nozbe_core::Result;
use nozbe_core::error::FileError;
use nozbe_core::traits::FileIo;

fn map_io(path: &Path, err: std::io::Error) -> FileError {
    if err.kind() == std::io::ErrorKind::NotFound {
        FileError::NotFound {
            path: path.to_path_buf(),
        }
    } else {
        FileError::Io {
            path: path.to_path_buf(),
            source: err,
        }
    }
}

/// Filesystem-backed [`FileIo`] implementation.
///
/// Writes go straight to the target file; a crash mid-write can leave it
/// truncated.
#[derive(Debug, Clone, Default)]
pub struct FileHelper {
    fixed_time: Option<DateTime<Local>>,
}

impl FileHelper {
    /// Create a helper that reads the system clock.
    pub fn new() -> Self {
        debug!("Created file helper");
        Self { fixed_time: None }
    }

    /// Create a helper whose [`FileIo::current_time`] always returns `time`.
    pub fn with_fixed_time(time: DateTime<Local>) -> Self {
        Self {
            fixed_time: Some(time),
        }
    }

    /// Join path elements left to right.
    ///
    /// The result is not checked for existence. An absolute element replaces
    /// everything before it, as with [`Path::join`].
    pub fn construct_path<I, P>(elements: I) -> PathBuf
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        elements
            .into_iter()
            .fold(PathBuf::new(), |acc, element| acc.join(element))
    }

    /// Modification time of an existing file, in local time.
    #[instrument(skip(self))]
    pub fn file_modification_time(&self, path: &Path) -> Result<DateTime<Local>> {
        self.validate_path(path)?;

        let modified = fs::metadata(path)
            .and_then(|meta| meta.modified())
            .map_err(|e| map_io(path, e))?;

        Ok(DateTime::<Local>::from(modified))
    }
}

impl FileIo for FileHelper {
    fn validate_path(&self, path: &Path) -> Result<()> {
        if path.exists() {
            Ok(())
        } else {
            Err(FileError::NotFound {
                path: std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf()),
            }
            .into())
        }
    }

    #[instrument(skip(self))]
    fn read_json_file(&self, path: &Path) -> Result<Value> {
        self.validate_path(path)?;

        let content = fs::read_to_string(path).map_err(|e| map_io(path, e))?;
        let value = serde_json::from_str(&content).map_err(|e| FileError::Json {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        debug!(path = %path.display(), "Read JSON file");
        Ok(value)
    }

    #[instrument(skip(self, value))]
    fn write_json_file(
        &self,
        directory: &Path,
        file_name: &str,
        value: &Value,
    ) -> Result<PathBuf> {
        fs::create_dir_all(directory).map_err(|e| map_io(directory, e))?;

        let path = directory.join(file_name);
        let content = serde_json::to_string_pretty(value).map_err(|e| FileError::Json {
            path: path.clone(),
            message: e.to_string(),
        })?;
        fs::write(&path, content).map_err(|e| map_io(&path, e))?;

        debug!(path = %path.display(), "Wrote JSON file");
        Ok(path)
    }

    fn current_time(&self) -> DateTime<Local> {
        self.fixed_time.unwrap_or_else(Local::now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use nozbe_core::Error;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn construct_path_joins_in_order() {
        let path = FileHelper::construct_path(["base", "secrets", "credentials.json"]);
        assert_eq!(path, PathBuf::from("base/secrets/credentials.json"));
    }

    #[test]
    fn construct_path_of_nothing_is_empty() {
        let path = FileHelper::construct_path(Vec::<&str>::new());
        assert_eq!(path, PathBuf::new());
    }

    #[test]
    fn validate_missing_path() {
        let dir = TempDir::new().unwrap();
        let helper = FileHelper::new();

        assert!(helper.validate_path(dir.path()).is_ok());

        let err = helper
            .validate_path(&dir.path().join("missing"))
            .unwrap_err();
        assert!(matches!(err, Error::File(FileError::NotFound { .. })));
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn write_then_read_json() {
        let dir = TempDir::new().unwrap();
        let helper = FileHelper::new();
        let data_dir = dir.path().join("data").join("nested");

        let written = helper
            .write_json_file(&data_dir, "task.json", &json!([{"id": 1}]))
            .unwrap();
        assert_eq!(written, data_dir.join("task.json"));

        let value = helper.read_json_in(&data_dir, "task.json").unwrap();
        assert_eq!(value, json!([{"id": 1}]));
    }

    #[test]
    fn read_malformed_json_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(&path, "{not json").unwrap();

        let err = FileHelper::new().read_json_file(&path).unwrap_err();
        match err {
            Error::File(FileError::Json { path: p, .. }) => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn read_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = FileHelper::new()
            .read_json_in(dir.path(), "absent.json")
            .unwrap_err();
        assert!(matches!(err, Error::File(FileError::NotFound { .. })));
    }

    #[test]
    fn modification_time_of_fresh_file_is_recent() {
        let dir = TempDir::new().unwrap();
        let helper = FileHelper::new();
        let before = Local::now() - chrono::Duration::seconds(5);

        let path = helper
            .write_json_file(dir.path(), "x.json", &json!({}))
            .unwrap();
        let modified = helper.file_modification_time(&path).unwrap();

        assert!(modified >= before);
        assert!(
            helper
                .file_modification_time(&dir.path().join("nope.json"))
                .is_err()
        );
    }

    #[test]
    fn fixed_time_is_returned() {
        let time = Local.with_ymd_and_hms(2021, 3, 14, 15, 9, 26).unwrap();
        let helper = FileHelper::with_fixed_time(time);
        assert_eq!(helper.current_time(), time);
    }
}
