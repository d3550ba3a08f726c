//! Incident recorders.
//!
//! `JsonlIncidentRecorder` appends one JSON object per line under an
//! exclusive file lock so concurrent processes never interleave records.
//! `MemoryIncidentRecorder` keeps incidents in process.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use fs2::FileExt;
use tokio::sync::Mutex;
use tracing::debug;

use super::{IncidentRecorder, RecorderError};
use crate::domain::CrisisIncident;

/// Append-only JSONL incident log
#[derive(Debug, Clone)]
pub struct JsonlIncidentRecorder {
    path: PathBuf,
}

impl JsonlIncidentRecorder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Recorder at the configured incident log path
    pub fn from_config() -> anyhow::Result<Self> {
        Ok(Self::new(crate::config::incident_log_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append_blocking(path: &Path, incident: &CrisisIncident) -> Result<(), RecorderError> {
        let io_err = |source| RecorderError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(io_err)?;

        file.lock_exclusive().map_err(|source| RecorderError::Lock {
            path: path.to_path_buf(),
            source,
        })?;

        let json = serde_json::to_string(incident)?;
        writeln!(file, "{}", json).map_err(io_err)?;
        file.flush().map_err(io_err)?;

        // Lock is released when file is dropped
        Ok(())
    }

    fn replay_blocking(path: &Path) -> Result<Vec<CrisisIncident>, RecorderError> {
        if !path.exists() {
            return Ok(Vec::new());
        }

        let io_err = |source| RecorderError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(io_err)?;
        file.lock_shared().map_err(|source| RecorderError::Lock {
            path: path.to_path_buf(),
            source,
        })?;

        let mut incidents = Vec::new();
        for (idx, line) in BufReader::new(&file).lines().enumerate() {
            let line = line.map_err(io_err)?;
            if line.trim().is_empty() {
                continue;
            }
            let incident: CrisisIncident =
                serde_json::from_str(&line).map_err(|source| RecorderError::Corrupt {
                    line: idx + 1,
                    source,
                })?;
            incidents.push(incident);
        }

        Ok(incidents)
    }

    /// All incidents in append order
    pub async fn replay(&self) -> Result<Vec<CrisisIncident>, RecorderError> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || Self::replay_blocking(&path))
            .await
            .map_err(|e| RecorderError::Task(e.to_string()))?
    }
}

#[async_trait]
impl IncidentRecorder for JsonlIncidentRecorder {
    async fn record(&self, incident: &CrisisIncident) -> Result<(), RecorderError> {
        let path = self.path.clone();
        let incident = incident.clone();
        tokio::task::spawn_blocking(move || Self::append_blocking(&path, &incident))
            .await
            .map_err(|e| RecorderError::Task(e.to_string()))??;

        debug!(path = %self.path.display(), "Incident appended");
        Ok(())
    }

    async fn recent(&self, limit: Option<usize>) -> Result<Vec<CrisisIncident>, RecorderError> {
        let incidents = self.replay().await?;
        Ok(newest_first(incidents, limit))
    }
}

/// In-process recorder
#[derive(Debug, Default)]
pub struct MemoryIncidentRecorder {
    incidents: Mutex<Vec<CrisisIncident>>,
}

impl MemoryIncidentRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot in append order
    pub async fn incidents(&self) -> Vec<CrisisIncident> {
        self.incidents.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.incidents.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.incidents.lock().await.is_empty()
    }
}

#[async_trait]
impl IncidentRecorder for MemoryIncidentRecorder {
    async fn record(&self, incident: &CrisisIncident) -> Result<(), RecorderError> {
        self.incidents.lock().await.push(incident.clone());
        Ok(())
    }

    async fn recent(&self, limit: Option<usize>) -> Result<Vec<CrisisIncident>, RecorderError> {
        Ok(newest_first(self.incidents().await, limit))
    }
}

fn newest_first(mut incidents: Vec<CrisisIncident>, limit: Option<usize>) -> Vec<CrisisIncident> {
    incidents.reverse();
    if let Some(limit) = limit {
        incidents.truncate(limit);
    }
    incidents
}
