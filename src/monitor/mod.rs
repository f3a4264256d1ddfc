mod loop_worker;

use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use log::info;
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::analyzer::{FrameAnalyzer, VisionBackend};
use crate::metrics::MetricsCollector;
use crate::models::{AnalysisResult, LogEntry, UsageStats};

use loop_worker::monitor_loop;

/// Camera seam: produces one freshly captured frame as a base64 data URI.
/// Capture itself lives outside this crate.
#[async_trait]
pub trait FrameSource: Send + Sync + 'static {
    async fn capture(&self) -> Result<String>;
}

/// Everything the UI layer needs to render one tick of the session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorSnapshot {
    pub stats: UsageStats,
    pub latest: AnalysisResult,
    pub score: u32,
    pub recent_log: Vec<LogEntry>,
    /// Set when the loop stopped on a hard analyzer error (bad frame
    /// source or missing credential). Degraded `Error` results never
    /// set this.
    pub fatal: Option<String>,
}

impl Default for MonitorSnapshot {
    fn default() -> Self {
        Self {
            stats: UsageStats::default(),
            latest: AnalysisResult::idle(),
            score: 0,
            recent_log: Vec::new(),
            fatal: None,
        }
    }
}

pub struct MonitorController {
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
    snapshot_tx: watch::Sender<MonitorSnapshot>,
    snapshot_rx: watch::Receiver<MonitorSnapshot>,
    metrics: MetricsCollector,
}

impl MonitorController {
    pub fn new() -> Self {
        let (snapshot_tx, snapshot_rx) = watch::channel(MonitorSnapshot::default());
        Self {
            handle: None,
            cancel_token: None,
            snapshot_tx,
            snapshot_rx,
            metrics: MetricsCollector::new(),
        }
    }

    /// Subscribe to per-tick snapshots. The receiver always holds the most
    /// recent one.
    pub fn snapshots(&self) -> watch::Receiver<MonitorSnapshot> {
        self.snapshot_rx.clone()
    }

    pub fn metrics(&self) -> MetricsCollector {
        self.metrics.clone()
    }

    pub fn start<S, B>(
        &mut self,
        source: S,
        analyzer: FrameAnalyzer<B>,
        interval: Duration,
    ) -> Result<()>
    where
        S: FrameSource,
        B: VisionBackend + 'static,
    {
        if self.handle.is_some() {
            bail!("monitoring already active");
        }

        info!("Starting monitor loop, interval {:?}", interval);

        let cancel_token = CancellationToken::new();
        let token_clone = cancel_token.clone();

        let handle = tokio::spawn(monitor_loop(
            source,
            analyzer,
            interval,
            self.metrics.clone(),
            self.snapshot_tx.clone(),
            token_clone,
        ));

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        Ok(())
    }

    /// Cancel the loop and wait for it to wind down, so a stopped session
    /// can't write stale results into UI state.
    pub async fn stop(&mut self) -> Result<()> {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        if let Some(handle) = self.handle.take() {
            handle
                .await
                .context("monitor loop task failed to join")
                .map(|_| ())
        } else {
            Ok(())
        }
    }
}

impl Default for MonitorController {
    fn default() -> Self {
        Self::new()
    }
}
