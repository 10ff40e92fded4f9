//! Protocol parameters threaded through validation and signing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::schema::MetaVocabulary;

/// Unix time before which no stone may have been created.
pub const DEFAULT_START_TIME: i64 = 1_453_975_575;

/// How a block signature is written into the `signatures` envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureStyle {
    /// Lowercase hex of an RSA-SHA256 signature over the block's canonical bytes.
    #[default]
    Detached,
    /// Compact signed token whose payload carries the block content itself.
    Token,
}

/// Protocol configuration.
///
/// Every field has a default, so a config document only needs to name
/// the values it overrides:
///
/// ```rust
/// use stone::config::ProtocolConfig;
///
/// let config = ProtocolConfig::from_json_str(r#"{ "vocabulary": "stone" }"#).unwrap();
/// assert_eq!(config.start_time, stone::config::DEFAULT_START_TIME);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    /// Earliest acceptable `meta.created_at`, inclusive.
    pub start_time: i64,
    /// Field names used by the `meta` block.
    pub vocabulary: MetaVocabulary,
    pub signature_style: SignatureStyle,
    /// Frozen "now" in unix seconds. `None` reads the system clock.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub now: Option<i64>,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            start_time: DEFAULT_START_TIME,
            vocabulary: MetaVocabulary::default(),
            signature_style: SignatureStyle::default(),
            now: None,
        }
    }
}

impl ProtocolConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON config document.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(Error::Config)
    }

    pub fn with_start_time(mut self, start_time: i64) -> Self {
        self.start_time = start_time;
        self
    }

    pub fn with_vocabulary(mut self, vocabulary: MetaVocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    pub fn with_signature_style(mut self, style: SignatureStyle) -> Self {
        self.signature_style = style;
        self
    }

    pub fn with_fixed_clock(mut self, now: i64) -> Self {
        self.now = Some(now);
        self
    }

    /// Current unix time as seen by validation.
    pub fn now(&self) -> i64 {
        self.now.unwrap_or_else(|| Utc::now().timestamp())
    }

    /// The start time rendered as RFC 3339, for error messages.
    pub fn start_time_display(&self) -> String {
        DateTime::<Utc>::from_timestamp(self.start_time, 0)
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| self.start_time.to_string())
    }
}
