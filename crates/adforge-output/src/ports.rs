//! Host ports injected into the export pipeline.
//!
//! The pipeline never prompts, writes or prints by itself; it goes through
//! these three narrow traits so any host (terminal, GUI, tests) can drive it.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{ExportError, Result};

/// Ask the user to acknowledge an action.
pub trait ConfirmPort {
    fn confirm(&self, message: &str) -> bool;
}

/// Hand one finished file to the host.
pub trait SavePort {
    fn save(&mut self, bytes: &[u8], filename: &str) -> io::Result<()>;
}

/// Tell the user what happened.
pub trait NotifyPort {
    fn notify(&self, message: &str);

    /// Called after each combination is processed.
    fn progress(&self, _done: u64, _total: u64) {}
}

/// The three ports, borrowed for the duration of one export.
pub struct ExportPorts<'a> {
    pub confirm: &'a dyn ConfirmPort,
    pub save: &'a mut dyn SavePort,
    pub notify: &'a dyn NotifyPort,
}

/// Notifier that only logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl NotifyPort for LogNotifier {
    fn notify(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn progress(&self, done: u64, total: u64) {
        tracing::trace!(done, total, "Export progress");
    }
}

/// Saves every file into one directory.
///
/// Each file is written to a temp file first and renamed into place, so a
/// crash never leaves a half-written export behind.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    /// Create the sink, creating `dir` if needed.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| ExportError::OutputDir {
            path: dir.clone(),
            source,
        })?;
        Ok(Self {
            dir,
            written: Vec::new(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far, in save order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl SavePort for DirectorySink {
    fn save(&mut self, bytes: &[u8], filename: &str) -> io::Result<()> {
        let path = self.dir.join(filename);
        let temp_path = self.dir.join(format!(".{filename}.tmp"));

        let mut file = File::create(&temp_path)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved {}", path.display());
        self.written.push(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn directory_sink_writes_files() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("nested").join("out");
        let mut sink = DirectorySink::create(&target).unwrap();

        sink.save(b"Hello", "001_hello.txt").unwrap();

        let path = target.join("001_hello.txt");
        assert_eq!(fs::read_to_string(&path).unwrap(), "Hello");
        assert_eq!(sink.written(), [path]);
        assert!(!target.join(".001_hello.txt.tmp").exists());
    }
}
