//! Configuration schema for karen.toml.

use crate::types::Profile;
use serde::{Deserialize, Serialize};

/// Public demo account used when no caption credentials are configured.
pub const IMGFLIP_DEMO_ACCOUNT: &str = "imgflip_hubot";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KarenConfig {
    /// Tool catalog exposed by the server.
    pub profile: Profile,

    /// OpenAI API key. Empty means canned responses only.
    pub openai_api_key: String,

    /// Chat model used for persona responses.
    pub openai_model: String,

    /// OpenAI-compatible API base URL.
    pub openai_api_url: String,

    /// Hard timeout for one completion call.
    pub openai_timeout_secs: u64,

    /// Completion length cap.
    pub max_tokens: u32,

    /// Sampling temperature for persona prose.
    pub temperature: f64,

    /// Imgflip username. Empty falls back to the public demo account.
    pub imgflip_username: String,

    /// Imgflip password. Empty falls back to the public demo account.
    pub imgflip_password: String,

    /// Imgflip API base URL.
    pub imgflip_api_url: String,

    /// Hard timeout for one caption call.
    pub imgflip_timeout_secs: u64,

    /// Log level (debug, info, warn, error).
    pub log_level: String,
}

impl Default for KarenConfig {
    fn default() -> Self {
        Self {
            profile: Profile::default(),
            openai_api_key: String::new(),
            openai_model: "gpt-3.5-turbo".into(),
            openai_api_url: "https://api.openai.com".into(),
            openai_timeout_secs: 30,
            max_tokens: 300,
            temperature: 0.8,
            imgflip_username: String::new(),
            imgflip_password: String::new(),
            imgflip_api_url: "https://api.imgflip.com".into(),
            imgflip_timeout_secs: 15,
            log_level: "info".into(),
        }
    }
}

impl KarenConfig {
    /// Overlay environment variables read through `lookup`. Empty values are ignored.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(profile) = get("KAREN_PROFILE") {
            self.profile = profile.parse()?;
        }
        if let Some(key) = get("OPENAI_API_KEY") {
            self.openai_api_key = key;
        }
        if let Some(model) = get("OPENAI_MODEL") {
            self.openai_model = model;
        }
        if let Some(url) = get("OPENAI_API_URL") {
            self.openai_api_url = url;
        }
        if let Some(user) = get("IMGFLIP_USERNAME") {
            self.imgflip_username = user;
        }
        if let Some(pass) = get("IMGFLIP_PASSWORD") {
            self.imgflip_password = pass;
        }
        if let Some(url) = get("IMGFLIP_API_URL") {
            self.imgflip_api_url = url;
        }
        Ok(())
    }

    /// Whether persona responses can come from the completion API.
    pub fn ai_enabled(&self) -> bool {
        !self.openai_api_key.trim().is_empty()
    }
}
