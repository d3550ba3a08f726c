//! Adapter interfaces for external collaborators.
//!
//! Adapters connect the assessor to systems it does not own: an optional
//! sentiment signal consulted during assessment, and the recorder that
//! persists crisis incidents.

pub mod incident_log;
pub mod sentiment;

use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{CrisisIncident, RiskLevel};

// Re-export the built-in implementations
pub use incident_log::{JsonlIncidentRecorder, MemoryIncidentRecorder};
pub use sentiment::KeywordSentimentSignal;

/// Output from a sentiment signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalReading {
    /// Risk estimate in [0, 1]
    pub risk_score: f64,

    /// The signal's own classification of the text
    pub risk_level: RiskLevel,

    /// Free-form labels the signal matched
    #[serde(default)]
    pub indicators: Vec<String>,
}

/// Trait for sentiment analysers consulted alongside keyword detection
#[async_trait]
pub trait SentimentSignal: Send + Sync {
    /// Human-readable signal name
    fn name(&self) -> &str;

    /// Analyse normalised text; `None` means the signal has no opinion
    async fn analyse(&self, text: &str) -> Result<Option<SignalReading>>;
}

/// Failures while persisting or replaying incidents
#[derive(Debug, Error)]
pub enum RecorderError {
    #[error("Incident log I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to lock incident log {path}: {source}")]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize incident: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Corrupt incident record on line {line}: {source}")]
    Corrupt {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Recorder task failed: {0}")]
    Task(String),
}

/// Trait for incident persistence
#[async_trait]
pub trait IncidentRecorder: Send + Sync {
    /// Persist one incident
    async fn record(&self, incident: &CrisisIncident) -> Result<(), RecorderError>;

    /// Most recent incidents first, at most `limit` when given
    async fn recent(&self, limit: Option<usize>) -> Result<Vec<CrisisIncident>, RecorderError>;
}
