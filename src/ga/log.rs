//! Generation text log.
//!
//! The runner writes a configuration summary on every reset and a
//! population dump after every generation. Sinks are write-only; a sink
//! error is reported through `tracing` and the run continues.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Destination for generation log entries.
pub trait LogSink: Send {
    /// Appends one entry.
    fn write_entry(&mut self, entry: &str) -> io::Result<()>;
}

/// Appends entries to a text file, one write per entry.
#[derive(Debug, Clone)]
pub struct FileLog {
    path: PathBuf,
}

impl FileLog {
    /// Creates (or truncates) the file at `path`, creating parent
    /// directories as needed.
    pub fn create(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::File::create(&path)?;
        Ok(Self { path })
    }

    /// Creates `<dir>/logs/algorithm_<task>_log.txt`.
    pub fn for_task(dir: impl AsRef<Path>, task: &str) -> io::Result<Self> {
        Self::create(
            dir.as_ref()
                .join("logs")
                .join(format!("algorithm_{task}_log.txt")),
        )
    }

    /// Location of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSink for FileLog {
    fn write_entry(&mut self, entry: &str) -> io::Result<()> {
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        writeln!(file, "{entry}")
    }
}

/// Keeps entries in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every entry written so far.
    pub fn entries(&self) -> Vec<String> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl LogSink for MemoryLog {
    fn write_entry(&mut self, entry: &str) -> io::Result<()> {
        self.entries
            .lock()
            .map_err(|_| io::Error::other("memory log lock poisoned"))?
            .push(entry.to_string());
        Ok(())
    }
}
