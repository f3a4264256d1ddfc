mod types;

pub use types::{AnalysisMetrics, MetricsSnapshot, SystemMetrics};

use std::sync::Arc;
use sysinfo::{Pid, ProcessesToUpdate, System};
use tokio::sync::Mutex;

const MAX_RECENT_ANALYSES: usize = 20;

/// In-process tallies of analysis round-trips plus our own CPU/RSS usage.
/// Cheap to clone; all clones share the same state.
pub struct MetricsCollector {
    inner: Arc<Mutex<MetricsState>>,
}

struct MetricsState {
    recent_analyses: Vec<AnalysisMetrics>,
    analysis_count: u64,
    error_count: u64,
    system: System,
    pid: Pid,
}

impl MetricsCollector {
    pub fn new() -> Self {
        let mut system = System::new();
        let pid = Pid::from_u32(std::process::id());

        // Initial refresh to establish baseline for CPU calculation
        system.refresh_processes(ProcessesToUpdate::Some(&[pid]));

        Self {
            inner: Arc::new(Mutex::new(MetricsState {
                recent_analyses: Vec::with_capacity(MAX_RECENT_ANALYSES),
                analysis_count: 0,
                error_count: 0,
                system,
                pid,
            })),
        }
    }

    /// Sample current CPU and memory usage of this process. CPU usage needs
    /// repeated refreshes over time to compute a delta.
    pub async fn sample_system(&self) -> (f32, f64) {
        let mut state = self.inner.lock().await;
        let pid = state.pid;
        state.system.refresh_processes(ProcessesToUpdate::Some(&[pid]));

        if let Some(process) = state.system.process(pid) {
            (
                process.cpu_usage(),
                process.memory() as f64 / 1024.0 / 1024.0,
            )
        } else {
            (0.0, 0.0)
        }
    }

    pub async fn record_analysis(&self, metrics: AnalysisMetrics) {
        let mut state = self.inner.lock().await;

        state.analysis_count += 1;
        if metrics.error.is_some() {
            state.error_count += 1;
        }

        state.recent_analyses.push(metrics);

        if state.recent_analyses.len() > MAX_RECENT_ANALYSES {
            state.recent_analyses.remove(0);
        }
    }

    pub async fn get_snapshot(&self) -> MetricsSnapshot {
        let mut state = self.inner.lock().await;
        let pid = state.pid;

        state.system.refresh_processes(ProcessesToUpdate::Some(&[pid]));

        let system = if let Some(process) = state.system.process(pid) {
            SystemMetrics {
                cpu_percent: process.cpu_usage(),
                memory_mb: process.memory() as f64 / 1024.0 / 1024.0,
            }
        } else {
            SystemMetrics {
                cpu_percent: 0.0,
                memory_mb: 0.0,
            }
        };

        MetricsSnapshot {
            system,
            recent_analyses: state.recent_analyses.clone(),
            analysis_count: state.analysis_count,
            error_count: state.error_count,
        }
    }

    pub async fn reset(&self) {
        let mut state = self.inner.lock().await;
        let pid = state.pid;
        state.recent_analyses.clear();
        state.analysis_count = 0;
        state.error_count = 0;
        // Re-establish baseline for CPU after reset
        state.system.refresh_processes(ProcessesToUpdate::Some(&[pid]));
    }
}

impl Clone for MetricsCollector {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FocusStatus;
    use chrono::Utc;

    fn sample(status: FocusStatus, error: Option<&str>) -> AnalysisMetrics {
        AnalysisMetrics {
            timestamp: Utc::now(),
            analyze_ms: 420,
            status,
            confidence: 0.9,
            error: error.map(str::to_string),
            cpu_percent: 0.0,
            memory_mb: 0.0,
        }
    }

    #[tokio::test]
    async fn counts_analyses_and_errors() {
        let collector = MetricsCollector::new();
        collector.record_analysis(sample(FocusStatus::Focused, None)).await;
        collector
            .record_analysis(sample(FocusStatus::Error, Some("连接错误")))
            .await;

        let snapshot = collector.get_snapshot().await;
        assert_eq!(snapshot.analysis_count, 2);
        assert_eq!(snapshot.error_count, 1);
        assert_eq!(snapshot.recent_analyses.len(), 2);
    }

    #[tokio::test]
    async fn recent_ring_is_bounded() {
        let collector = MetricsCollector::new();
        for _ in 0..(MAX_RECENT_ANALYSES + 5) {
            collector.record_analysis(sample(FocusStatus::Focused, None)).await;
        }

        let snapshot = collector.get_snapshot().await;
        assert_eq!(snapshot.recent_analyses.len(), MAX_RECENT_ANALYSES);
        assert_eq!(snapshot.analysis_count, (MAX_RECENT_ANALYSES + 5) as u64);
    }

    #[tokio::test]
    async fn reset_clears_counters() {
        let collector = MetricsCollector::new();
        collector.record_analysis(sample(FocusStatus::Focused, None)).await;
        collector.reset().await;

        let snapshot = collector.get_snapshot().await;
        assert_eq!(snapshot.analysis_count, 0);
        assert!(snapshot.recent_analyses.is_empty());
    }
}
