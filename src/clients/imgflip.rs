//! Meme captioning via the Imgflip `caption_image` API.

use super::error::ClientError;
use super::traits::MemeCaptioner;
use crate::catalog::MemeConfig;
use crate::config::{KarenConfig, IMGFLIP_DEMO_ACCOUNT};
use crate::types::{CaptionResult, MemeImage};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, warn};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Imgflip client. Falls back to the shared demo account without credentials.
#[derive(Debug, Clone)]
pub struct ImgflipClient {
    base_url: String,
    username: String,
    password: String,
    timeout: Duration,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct CaptionResponse {
    success: bool,
    data: Option<CaptionData>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CaptionData {
    url: String,
    page_url: String,
}

impl ImgflipClient {
    pub fn new(base_url: &str, username: &str, password: &str) -> Self {
        let or_demo = |v: &str| {
            if v.trim().is_empty() {
                IMGFLIP_DEMO_ACCOUNT.to_string()
            } else {
                v.to_string()
            }
        };
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            username: or_demo(username),
            password: or_demo(password),
            timeout: DEFAULT_TIMEOUT,
            http: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &KarenConfig) -> Self {
        Self::new(
            &config.imgflip_api_url,
            &config.imgflip_username,
            &config.imgflip_password,
        )
        .with_timeout(Duration::from_secs(config.imgflip_timeout_secs))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether requests go out under the shared demo account.
    pub fn uses_demo_account(&self) -> bool {
        self.username == IMGFLIP_DEMO_ACCOUNT
    }

    /// Form fields for one caption request. Only the config's own boxes are sent.
    fn form_fields(&self, meme: &MemeConfig) -> Vec<(String, String)> {
        let mut fields = vec![
            ("template_id".to_string(), meme.template_id.to_string()),
            ("username".to_string(), self.username.clone()),
            ("password".to_string(), self.password.clone()),
        ];
        for (i, text) in meme.captions.iter().take(3).enumerate() {
            fields.push((format!("boxes[{}][text]", i), text.to_string()));
        }
        fields
    }

    /// Caption a template, returning the hosted image on success.
    pub async fn caption_image(&self, meme: &MemeConfig) -> Result<MemeImage, ClientError> {
        let url = format!("{}/caption_image", self.base_url);
        debug!("Captioning template {} ({})", meme.template_id, meme.keyword);

        let resp = self
            .http
            .post(&url)
            .timeout(self.timeout)
            .form(&self.form_fields(meme))
            .send()
            .await
            .map_err(|e| ClientError::from_reqwest(e, self.timeout))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| ClientError::from_reqwest(e, self.timeout))?;
        let body: CaptionResponse =
            serde_json::from_slice(&bytes).map_err(|e| ClientError::Malformed(e.to_string()))?;

        if !body.success {
            return Err(ClientError::Rejected(
                body.error_message.unwrap_or_else(|| "Unknown error".into()),
            ));
        }

        body.data
            .map(|d| MemeImage {
                url: d.url,
                page_url: d.page_url,
            })
            .ok_or_else(|| ClientError::Malformed("success without data".into()))
    }
}

#[async_trait]
impl MemeCaptioner for ImgflipClient {
    async fn caption(&self, meme: &MemeConfig) -> CaptionResult {
        match self.caption_image(meme).await {
            Ok(image) => CaptionResult::Image(image),
            Err(ClientError::Rejected(msg)) => {
                warn!("Imgflip API returned error: {}", msg);
                CaptionResult::Unavailable
            }
            Err(e) => {
                error!("Meme generation error: {}", e);
                CaptionResult::Unavailable
            }
        }
    }
}
