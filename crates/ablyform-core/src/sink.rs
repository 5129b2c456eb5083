// ── Output sink ──
//
// The only place the export pipeline touches the filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::CoreError;

/// Destination for generated files.
pub trait OutputSink {
    /// Persist `content` under `file_name`, returning where it landed.
    fn write(&self, file_name: &str, content: &str) -> Result<PathBuf, CoreError>;
}

/// Writes files into one directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct DirectoryWriter {
    dir: PathBuf,
}

impl DirectoryWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl OutputSink for DirectoryWriter {
    fn write(&self, file_name: &str, content: &str) -> Result<PathBuf, CoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| CoreError::Write {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.dir.join(file_name);
        fs::write(&path, content).map_err(|source| CoreError::Write {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), bytes = content.len(), "wrote file");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_missing_directory() {
        let tmp = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
        let writer = DirectoryWriter::new(tmp.path().join("nested").join("out"));

        let path = writer
            .write("my_app.tf", "resource {}\n")
            .unwrap_or_else(|e| panic!("{e}"));

        assert_eq!(path, tmp.path().join("nested/out/my_app.tf"));
        let written = fs::read_to_string(&path).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(written, "resource {}\n");
    }

    #[test]
    fn overwrites_existing_file() {
        let tmp = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
        let writer = DirectoryWriter::new(tmp.path());
        writer.write("a.tf", "old").unwrap_or_else(|e| panic!("{e}"));
        let path = writer.write("a.tf", "new").unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(fs::read_to_string(path).unwrap_or_else(|e| panic!("{e}")), "new");
    }

    #[test]
    fn reports_unwritable_target() {
        let tmp = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
        let blocker = tmp.path().join("file");
        fs::write(&blocker, "x").unwrap_or_else(|e| panic!("{e}"));

        let writer = DirectoryWriter::new(blocker.join("sub"));
        let err = writer.write("a.tf", "x").map(|_| ()).unwrap_err();
        assert!(matches!(err, CoreError::Write { .. }));
    }
}
