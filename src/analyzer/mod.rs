mod client;
mod error;
mod parse;

pub use client::{QwenVlClient, VisionBackend};
pub use error::{AnalyzeError, ClassifyError};
pub use parse::{parse_analysis, strip_code_fences};

use crate::models::AnalysisResult;
use crate::settings::ClassifierConfig;

/// Minimum plausible length of an encoded frame. A cheap guard against
/// obviously-empty captures, not a guarantee of valid image data.
const MIN_FRAME_LEN: usize = 100;

/// What an empty canvas serializes to.
const EMPTY_CANVAS_DATA_URI: &str = "data:,";

pub struct FrameAnalyzer<B: VisionBackend> {
    config: ClassifierConfig,
    backend: B,
}

impl FrameAnalyzer<QwenVlClient> {
    /// Analyzer wired to the real DashScope endpoint.
    pub fn with_default_backend(config: ClassifierConfig) -> Self {
        let backend = QwenVlClient::new(&config);
        Self { config, backend }
    }
}

impl<B: VisionBackend> FrameAnalyzer<B> {
    pub fn new(config: ClassifierConfig, backend: B) -> Self {
        Self { config, backend }
    }

    /// Classify one captured frame.
    ///
    /// Only an invalid frame or a missing credential come back as `Err`;
    /// both are caught before any network I/O. Every remote failure
    /// (transport, non-2xx, empty or unparseable answer) degrades into an
    /// `Ok` result with `Error` status so the caller's loop keeps running.
    pub async fn analyze(&self, frame: &str) -> Result<AnalysisResult, AnalyzeError> {
        if frame.is_empty() || frame == EMPTY_CANVAS_DATA_URI || frame.len() < MIN_FRAME_LEN {
            return Err(AnalyzeError::InvalidFrame);
        }

        let api_key = match self.config.api_key.as_deref() {
            Some(key) if !key.is_empty() => key,
            _ => return Err(AnalyzeError::MissingApiKey),
        };

        let raw_text = match self.backend.classify(api_key, frame).await {
            Ok(text) => text,
            Err(err) => {
                log::error!("frame analysis failed: {err}");
                return Ok(AnalysisResult::failure(err.to_string()));
            }
        };

        match parse::parse_analysis(&raw_text) {
            Ok(result) => Ok(result),
            Err(err) => Ok(AnalysisResult::failure(err.to_string())),
        }
    }
}
