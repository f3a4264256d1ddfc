use chrono::Utc;
use tokio::sync::watch;
use tokio::time::{Duration, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::analyzer::{AnalyzeError, FrameAnalyzer, VisionBackend};
use crate::gamification::{daily_score, unlocked_badge_ids};
use crate::metrics::{AnalysisMetrics, MetricsCollector};
use crate::models::{AnalysisResult, FocusStatus, LogEntry, UsageStats};

use super::{FrameSource, MonitorSnapshot};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

// Import the logging macros (exported at the crate root)
use crate::{log_error, log_info, log_warn};

const TICK_TIMEOUT_SECS: u64 = 30;
const MAX_LOG_ENTRIES: usize = 50;

pub async fn monitor_loop<S: FrameSource, B: VisionBackend>(
    source: S,
    analyzer: FrameAnalyzer<B>,
    interval: Duration,
    metrics: MetricsCollector,
    snapshot_tx: watch::Sender<MonitorSnapshot>,
    cancel_token: CancellationToken,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut stats = UsageStats::default();
    let mut latest = AnalysisResult::idle();
    let mut recent_log: Vec<LogEntry> = Vec::new();
    let mut last_tick = Instant::now();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let now = Instant::now();
                // Credit only real elapsed wall time; the interval's first
                // tick completes immediately and counts for zero.
                let elapsed_seconds = now.duration_since(last_tick).as_secs();
                last_tick = now;

                let fut = perform_tick(
                    &source,
                    &analyzer,
                    elapsed_seconds,
                    &metrics,
                    &mut stats,
                    &mut recent_log,
                );

                match tokio::time::timeout(Duration::from_secs(TICK_TIMEOUT_SECS), fut).await {
                    Ok(Ok(Some(result))) => {
                        latest = result;
                        publish(&snapshot_tx, &stats, &latest, &recent_log, None);
                    }
                    Ok(Ok(None)) => {}
                    Ok(Err(err)) => {
                        log_error!("monitor tick hit a hard analyzer error: {err}");
                        publish(&snapshot_tx, &stats, &latest, &recent_log, Some(err.to_string()));
                        break;
                    }
                    Err(_) => log_warn!("monitor tick timeout (> {}s)", TICK_TIMEOUT_SECS),
                }
            }
            _ = cancel_token.cancelled() => {
                log_info!("monitor loop shutting down");
                break;
            }
        }
    }
}

/// Run one capture + classify tick. `Ok(None)` means the capture failed
/// and the tick was skipped; `Err` is a hard analyzer error that must stop
/// the loop.
async fn perform_tick<S: FrameSource, B: VisionBackend>(
    source: &S,
    analyzer: &FrameAnalyzer<B>,
    elapsed_seconds: u64,
    metrics: &MetricsCollector,
    stats: &mut UsageStats,
    recent_log: &mut Vec<LogEntry>,
) -> Result<Option<AnalysisResult>, AnalyzeError> {
    let frame = match source.capture().await {
        Ok(frame) => frame,
        Err(err) => {
            log_warn!("frame capture failed, skipping tick: {err:?}");
            return Ok(None);
        }
    };

    let analyze_start = Instant::now();
    let result = analyzer.analyze(&frame).await?;
    let analyze_ms = analyze_start.elapsed().as_millis() as u64;

    let (cpu_percent, memory_mb) = metrics.sample_system().await;
    metrics
        .record_analysis(AnalysisMetrics {
            timestamp: Utc::now(),
            analyze_ms,
            status: result.status,
            confidence: result.confidence,
            error: (result.status == FocusStatus::Error).then(|| result.message.clone()),
            cpu_percent,
            memory_mb,
        })
        .await;

    stats.apply(result.status, elapsed_seconds);

    // Badges stay unlocked for the rest of the session even if the live
    // condition stops holding, so merge rather than replace.
    let held = unlocked_badge_ids(stats);
    stats.unlocked_badge_ids.extend(held);

    recent_log.push(LogEntry::new(result.status, result.message.clone()));
    if recent_log.len() > MAX_LOG_ENTRIES {
        recent_log.remove(0);
    }

    log_info!(
        "tick completed in {}ms: status={:?}, confidence={:.2}",
        analyze_ms,
        result.status,
        result.confidence
    );

    Ok(Some(result))
}

fn publish(
    snapshot_tx: &watch::Sender<MonitorSnapshot>,
    stats: &UsageStats,
    latest: &AnalysisResult,
    recent_log: &[LogEntry],
    fatal: Option<String>,
) {
    let snapshot = MonitorSnapshot {
        stats: stats.clone(),
        latest: latest.clone(),
        score: daily_score(stats),
        recent_log: recent_log.to_vec(),
        fatal,
    };

    let _ = snapshot_tx.send(snapshot);
}
