//! Shared types used across the karen-mcp server.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Catalog profiles
// ---------------------------------------------------------------------------

/// Which tool catalog the server exposes. Chosen once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Profile {
    /// Product-manager Karen tools.
    Pm,
    /// Product-manager tools plus the meme generator.
    #[serde(alias = "pm_meme")]
    PmMeme,
    /// Angry-customer Karen tools.
    Customer,
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pm => write!(f, "pm"),
            Self::PmMeme => write!(f, "pm-meme"),
            Self::Customer => write!(f, "customer"),
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::PmMeme
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pm" => Ok(Self::Pm),
            "pm-meme" | "pm_meme" => Ok(Self::PmMeme),
            "customer" => Ok(Self::Customer),
            other => Err(format!(
                "unknown profile '{}' (expected pm, pm-meme or customer)",
                other
            )),
        }
    }
}

impl Profile {
    pub const ALL: [Profile; 3] = [Profile::Pm, Profile::PmMeme, Profile::Customer];
}

// ---------------------------------------------------------------------------
// Generation results
// ---------------------------------------------------------------------------

/// Outcome of one text-generation call.
///
/// `Unavailable` covers both "no credential" and "call failed"; callers never
/// need to tell them apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationResult {
    /// Non-empty, trimmed completion text.
    Text(String),
    Unavailable,
}

impl GenerationResult {
    /// Build a result from raw completion text, trimming it.
    pub fn from_completion(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Self::Unavailable
        } else {
            Self::Text(trimmed.to_string())
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Text(t) => Some(t),
            Self::Unavailable => None,
        }
    }
}

/// A captioned meme hosted by the caption service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemeImage {
    pub url: String,
    pub page_url: String,
}

/// Outcome of one caption call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptionResult {
    Image(MemeImage),
    Unavailable,
}

impl CaptionResult {
    pub fn into_image(self) -> Option<MemeImage> {
        match self {
            Self::Image(img) => Some(img),
            Self::Unavailable => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Inference types
// ---------------------------------------------------------------------------

/// A chat message sent to the completion endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
}

impl ChatMessage {
    pub fn system(content: &str) -> Self {
        Self {
            role: ChatRole::System,
            content: content.to_string(),
        }
    }

    pub fn user(content: &str) -> Self {
        Self {
            role: ChatRole::User,
            content: content.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_parses_and_displays() {
        for profile in Profile::ALL {
            assert_eq!(profile.to_string().parse::<Profile>(), Ok(profile));
        }
        assert_eq!("PM_MEME".parse::<Profile>(), Ok(Profile::PmMeme));
        assert!("hr".parse::<Profile>().is_err());
    }

    #[test]
    fn completion_is_trimmed() {
        assert_eq!(
            GenerationResult::from_completion("  Just ADD A BUTTON!\n"),
            GenerationResult::Text("Just ADD A BUTTON!".into())
        );
    }

    #[test]
    fn blank_completion_is_unavailable() {
        assert_eq!(GenerationResult::from_completion(" \n\t"), GenerationResult::Unavailable);
        assert_eq!(GenerationResult::from_completion(""), GenerationResult::Unavailable);
    }

    #[test]
    fn chat_role_serializes_lowercase() {
        let json = serde_json::to_value(ChatMessage::system("persona")).unwrap();
        assert_eq!(json["role"], "system");
        assert_eq!(json["content"], "persona");
    }
}
