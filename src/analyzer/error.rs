use thiserror::Error;

/// Hard failures the caller must stop and surface. Nothing was sent over
/// the network when one of these is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalyzeError {
    /// Empty or obviously truncated capture.
    #[error("invalid frame captured (empty data)")]
    InvalidFrame,
    /// No API key in settings or environment.
    #[error("API key is missing, please check settings")]
    MissingApiKey,
}

/// Failures of the remote classify round-trip. These are never surfaced as
/// `Err` by the analyzer: each one is folded into an `AnalysisResult` with
/// `Error` status so the polling loop keeps running. The display strings
/// are what the UI shows the user.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("API Key 无效或过期")]
    InvalidApiKey,
    #[error("请求太频繁，请稍后再试")]
    RateLimited,
    #[error("请求失败: {0}")]
    RequestFailed(u16),
    #[error("连接错误: {0}")]
    Network(#[from] reqwest::Error),
    #[error("AI 返回内容为空")]
    EmptyResponse,
    #[error("解析 AI 返回结果失败")]
    MalformedResponse,
}
