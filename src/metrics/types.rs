use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::FocusStatus;

/// Timing and outcome of one analysis round-trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisMetrics {
    pub timestamp: DateTime<Utc>,
    pub analyze_ms: u64,
    pub status: FocusStatus,
    pub confidence: f64,
    pub error: Option<String>,
    pub cpu_percent: f32,
    pub memory_mb: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemMetrics {
    pub cpu_percent: f32,
    pub memory_mb: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub system: SystemMetrics,
    pub recent_analyses: Vec<AnalysisMetrics>,
    pub analysis_count: u64,
    pub error_count: u64,
}

impl Default for MetricsSnapshot {
    fn default() -> Self {
        Self {
            system: SystemMetrics {
                cpu_percent: 0.0,
                memory_mb: 0.0,
            },
            recent_analyses: Vec::new(),
            analysis_count: 0,
            error_count: 0,
        }
    }
}
