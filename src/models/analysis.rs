use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Attentiveness state of the subject in one frame.
///
/// Serialized in SCREAMING_CASE because the classifier prompt instructs the
/// model to answer with these exact labels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FocusStatus {
    Idle,
    Focused,
    Distracted,
    Absent,
    Error,
}

impl Default for FocusStatus {
    fn default() -> Self {
        FocusStatus::Idle
    }
}

/// Outcome of analyzing a single frame.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub status: FocusStatus,
    pub message: String,
    pub confidence: f64,
}

impl AnalysisResult {
    /// Pre-analysis placeholder shown before the first frame lands.
    pub fn idle() -> Self {
        Self {
            status: FocusStatus::Idle,
            message: String::new(),
            confidence: 0.0,
        }
    }

    /// Degraded result for a failed analysis round-trip. The loop keeps
    /// running; the message is what the UI displays.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: FocusStatus::Error,
            message: message.into(),
            confidence: 0.0,
        }
    }
}

/// One line of the session activity feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub status: FocusStatus,
    pub message: String,
}

impl LogEntry {
    pub fn new(status: FocusStatus, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            status,
            message: message.into(),
        }
    }
}
