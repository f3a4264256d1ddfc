pub mod analysis;
pub mod stats;

pub use analysis::{AnalysisResult, FocusStatus, LogEntry};
pub use stats::UsageStats;
