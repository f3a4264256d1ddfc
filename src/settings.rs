use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

/// OpenAI-compatible chat-completions endpoint of Aliyun DashScope.
pub const DEFAULT_API_URL: &str =
    "https://dashscope.aliyuncs.com/compatible-mode/v1/chat/completions";

/// qwen-vl-max gives the most reliable classifications of the Qwen-VL family.
pub const DEFAULT_MODEL: &str = "qwen-vl-max";

const DEFAULT_CAPTURE_INTERVAL_SECS: u64 = 15;
const API_KEY_ENV: &str = "DASHSCOPE_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorSettings {
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub capture_interval_secs: u64,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.into(),
            model: DEFAULT_MODEL.into(),
            capture_interval_secs: DEFAULT_CAPTURE_INTERVAL_SECS,
        }
    }
}

impl MonitorSettings {
    /// Resolve the classifier parameters for the analyzer. The credential
    /// comes from the settings value, falling back to `DASHSCOPE_API_KEY`.
    pub fn classifier_config(&self) -> ClassifierConfig {
        let api_key = self
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok().filter(|key| !key.is_empty()));

        ClassifierConfig {
            api_url: self.api_url.clone(),
            model: self.model.clone(),
            api_key,
        }
    }
}

/// Endpoint parameters the frame analyzer needs, credential already resolved.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub api_url: String,
    pub model: String,
    pub api_key: Option<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            model: DEFAULT_MODEL.into(),
            api_key: None,
        }
    }
}

impl ClassifierConfig {
    /// Default endpoint with the key taken from the environment.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var(API_KEY_ENV).ok().filter(|key| !key.is_empty()),
            ..Self::default()
        }
    }
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<MonitorSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            MonitorSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn monitor(&self) -> MonitorSettings {
        self.data.read().unwrap().clone()
    }

    pub fn update(&self, settings: MonitorSettings) -> Result<()> {
        {
            let mut guard = self.data.write().unwrap();
            *guard = settings;
            self.persist(&guard)?;
        }
        Ok(())
    }

    fn persist(&self, data: &MonitorSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }

    pub fn reload(&self) -> Result<()> {
        let contents = fs::read_to_string(&self.path)?;
        let data: MonitorSettings = serde_json::from_str(&contents)?;
        let mut guard = self.data.write().unwrap();
        *guard = data;
        Ok(())
    }
}
