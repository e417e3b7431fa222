use super::domain::AssessmentRecord;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Append-only store of completed assessments.
pub trait HistoryStore: Send + Sync {
    fn append(&self, record: AssessmentRecord) -> Result<(), HistoryError>;
    /// Entries in insertion order.
    fn entries(&self) -> Result<Vec<AssessmentRecord>, HistoryError>;

    fn entries_newest_first(&self) -> Result<Vec<AssessmentRecord>, HistoryError> {
        let mut entries = self.entries()?;
        entries.reverse();
        Ok(entries)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("history file {path} could not be read: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("history file {path} could not be written: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("history could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("history store unavailable: {0}")]
    Unavailable(String),
}

/// History kept as one pretty-printed JSON array on disk. A missing or malformed
/// file reads as empty and the next append replaces it. Appends refuse to run over
/// a file that exists but cannot be read, and every rewrite goes through a sibling
/// temp file that is renamed into place.
#[derive(Debug)]
pub struct JsonFileHistory {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<AssessmentRecord>, HistoryError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(HistoryError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "history malformed, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn store(&self, entries: &[AssessmentRecord]) -> Result<(), HistoryError> {
        let body = serde_json::to_string_pretty(entries)?;
        let write_error = |source| HistoryError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        let temp = self.temp_path();
        fs::write(&temp, body).map_err(write_error)?;
        fs::rename(&temp, &self.path).map_err(write_error)
    }
}

impl HistoryStore for JsonFileHistory {
    fn append(&self, record: AssessmentRecord) -> Result<(), HistoryError> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| HistoryError::Unavailable("history lock poisoned".to_string()))?;
        let mut entries = self.load()?;
        entries.push(record);
        self.store(&entries)
    }

    fn entries(&self) -> Result<Vec<AssessmentRecord>, HistoryError> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| HistoryError::Unavailable("history lock poisoned".to_string()))?;
        Ok(self.load().unwrap_or_else(|err| {
            warn!(error = %err, "history unreadable, listing as empty");
            Vec::new()
        }))
    }
}

#[derive(Debug, Default)]
pub struct InMemoryHistory {
    entries: Mutex<Vec<AssessmentRecord>>,
}

impl HistoryStore for InMemoryHistory {
    fn append(&self, record: AssessmentRecord) -> Result<(), HistoryError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| HistoryError::Unavailable("history lock poisoned".to_string()))?;
        entries.push(record);
        Ok(())
    }

    fn entries(&self) -> Result<Vec<AssessmentRecord>, HistoryError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| HistoryError::Unavailable("history lock poisoned".to_string()))?;
        Ok(entries.clone())
    }
}
