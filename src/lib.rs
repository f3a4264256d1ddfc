pub mod analyzer;
pub mod gamification;
pub mod metrics;
pub mod models;
pub mod monitor;
pub mod settings;
mod utils;

pub use analyzer::{AnalyzeError, ClassifyError, FrameAnalyzer, QwenVlClient, VisionBackend};
pub use gamification::{daily_score, leaderboard, unlocked_badges, Badge, LeaderboardEntry, BADGES};
pub use metrics::{AnalysisMetrics, MetricsCollector, MetricsSnapshot};
pub use models::{AnalysisResult, FocusStatus, LogEntry, UsageStats};
pub use monitor::{FrameSource, MonitorController, MonitorSnapshot};
pub use settings::{ClassifierConfig, MonitorSettings, SettingsStore};

/// Initialize logging (reads RUST_LOG env var).
pub fn init_logging() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
}
