//! The closed set of signable blocks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::blocks;
use crate::config::ProtocolConfig;
use crate::error::Error;

/// A content block that can carry its own signature in the `signatures` envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Block {
    Meta,
    Ownership,
    Attributes,
    Embeds,
}

impl Block {
    /// All blocks in envelope order.
    pub const ALL: [Block; 4] = [
        Block::Meta,
        Block::Ownership,
        Block::Attributes,
        Block::Embeds,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Block::Meta => "meta",
            Block::Ownership => "ownership",
            Block::Attributes => "attributes",
            Block::Embeds => "embeds",
        }
    }

    /// Run this block's schema validator against `value`.
    pub fn validate(&self, value: &Value, config: &ProtocolConfig) -> Result<(), Error> {
        match self {
            Block::Meta => blocks::validate_meta_block(value, config),
            Block::Ownership => blocks::validate_ownership_block(value),
            Block::Attributes => blocks::validate_attributes_block(value),
            Block::Embeds => crate::validate::validate_embeds_block(value, config),
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Block {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Block::ALL
            .into_iter()
            .find(|b| b.name() == s)
            .ok_or_else(|| Error::UnknownBlock(s.to_string()))
    }
}
