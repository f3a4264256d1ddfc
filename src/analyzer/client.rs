use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use super::error::ClassifyError;
use crate::settings::ClassifierConfig;

/// Instruction sent with every frame. Tells the model to answer with a bare
/// three-field JSON object and which labels are allowed.
const CLASSIFY_PROMPT: &str = r#"你是一个严格但友善的作业监督助手。请分析这张图片中的学生状态。

请严格按照以下 JSON 格式返回（不要包含 Markdown 代码块或其他文字）：
{
  "status": "FOCUSED" | "DISTRACTED" | "ABSENT",
  "message": "一段简短的中文语音提示文本(10字以内)",
  "confidence": 0.95
}

判断规则：
- FOCUSED (专注): 眼睛看书/本子，正在写字，阅读。
- DISTRACTED (分心): 东张西望，玩玩具，趴着睡觉，看手机，发呆。
- ABSENT (离开): 椅子上没人。

message 规则：
- 专注时: 给予鼓励 (如"坐姿很端正，继续加油")
- 分心时: 温柔提醒 (如"快快回神，专心写作业")
- 离开时: 询问去向 (如"人去哪里了呀")
"#;

/// Low temperature biases the model toward stable classifications.
const SAMPLING_TEMPERATURE: f64 = 0.1;
const MAX_COMPLETION_TOKENS: u32 = 200;
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Narrow seam over the remote vision model: hand it a frame, get back the
/// model's raw text. Tests substitute a deterministic fake.
#[async_trait]
pub trait VisionBackend: Send + Sync {
    async fn classify(&self, api_key: &str, frame: &str) -> Result<String, ClassifyError>;
}

/// DashScope (OpenAI-compatible) chat-completions client for Qwen-VL.
pub struct QwenVlClient {
    api_url: String,
    model: String,
}

impl QwenVlClient {
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            api_url: config.api_url.clone(),
            model: config.model.clone(),
        }
    }
}

#[async_trait]
impl VisionBackend for QwenVlClient {
    async fn classify(&self, api_key: &str, frame: &str) -> Result<String, ClassifyError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        let body = json!({
            "model": self.model,
            "messages": [{
                "role": "user",
                "content": [
                    { "type": "text", "text": CLASSIFY_PROMPT },
                    // DashScope accepts the base64 data URI directly.
                    { "type": "image_url", "image_url": { "url": frame } },
                ],
            }],
            "temperature": SAMPLING_TEMPERATURE,
            "max_tokens": MAX_COMPLETION_TOKENS,
        });

        let response = client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let err_text = response.text().await.unwrap_or_default();
            log::error!("classifier API error ({status}): {err_text}");
            return Err(map_http_status(status.as_u16()));
        }

        let envelope: ChatCompletionResponse = response.json().await?;

        envelope
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or(ClassifyError::EmptyResponse)
    }
}

pub(crate) fn map_http_status(code: u16) -> ClassifyError {
    match code {
        401 | 403 => ClassifyError::InvalidApiKey,
        429 => ClassifyError::RateLimited,
        other => ClassifyError::RequestFailed(other),
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}
