use serde::Deserialize;

use super::error::ClassifyError;
use crate::models::{AnalysisResult, FocusStatus};

/// Shape the model is instructed to answer with.
#[derive(Debug, Deserialize)]
struct RawAnalysis {
    status: String,
    message: String,
    confidence: f64,
}

/// Strip the markdown code fences Qwen sometimes wraps around its JSON.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse the model's raw answer into an [`AnalysisResult`].
///
/// An unrecognized status label (model hallucination) is coerced to
/// `Distracted`: a spurious "stay on task" nudge costs less than trusting
/// an unknown state.
pub fn parse_analysis(raw_text: &str) -> Result<AnalysisResult, ClassifyError> {
    let cleaned = strip_code_fences(raw_text);

    let raw: RawAnalysis = serde_json::from_str(&cleaned).map_err(|err| {
        log::error!("classifier answer is not valid JSON ({err}), raw content: {cleaned}");
        ClassifyError::MalformedResponse
    })?;

    let status = match raw.status.as_str() {
        "FOCUSED" => FocusStatus::Focused,
        "DISTRACTED" => FocusStatus::Distracted,
        "ABSENT" => FocusStatus::Absent,
        _ => FocusStatus::Distracted,
    };

    Ok(AnalysisResult {
        status,
        message: raw.message,
        confidence: raw.confidence,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_json_fence() {
        let fenced = "```json\n{\"a\":1}\n```";
        assert_eq!(strip_code_fences(fenced), "{\"a\":1}");
    }

    #[test]
    fn strips_bare_fence() {
        let fenced = "```\n{\"a\":1}\n```";
        assert_eq!(strip_code_fences(fenced), "{\"a\":1}");
    }

    #[test]
    fn unfenced_text_passes_through() {
        assert_eq!(strip_code_fences("  {\"a\":1} "), "{\"a\":1}");
    }

    #[test]
    fn valid_answer_parses_unmodified() {
        let raw = r#"{"status":"FOCUSED","message":"坐姿很端正","confidence":0.9}"#;
        let result = parse_analysis(raw).unwrap();
        assert_eq!(result.status, FocusStatus::Focused);
        assert_eq!(result.message, "坐姿很端正");
        assert_eq!(result.confidence, 0.9);
    }

    #[test]
    fn fenced_answer_parses() {
        let raw = "```json\n{\"status\":\"ABSENT\",\"message\":\"人去哪里了呀\",\"confidence\":0.8}\n```";
        let result = parse_analysis(raw).unwrap();
        assert_eq!(result.status, FocusStatus::Absent);
    }

    #[test]
    fn hallucinated_label_coerces_to_distracted() {
        let raw = r#"{"status":"SLEEPING","message":"趴着睡觉","confidence":0.7}"#;
        let result = parse_analysis(raw).unwrap();
        assert_eq!(result.status, FocusStatus::Distracted);
        assert_eq!(result.message, "趴着睡觉");
        assert_eq!(result.confidence, 0.7);
    }

    #[test]
    fn non_json_answer_is_malformed() {
        let err = parse_analysis("我无法判断这张图片").unwrap_err();
        assert!(matches!(err, ClassifyError::MalformedResponse));
    }
}
