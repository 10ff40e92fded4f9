use serde::{Deserialize, Serialize};

/// Kind of ownership declared by an `ownership` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnershipType {
    /// A single owner, identified by `sole.address_id`.
    Sole,
}

impl OwnershipType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sole" => Some(OwnershipType::Sole),
            _ => None,
        }
    }

    /// Name of the sub-object this type requires.
    pub fn detail_field(&self) -> &'static str {
        match self {
            OwnershipType::Sole => "sole",
        }
    }
}

/// Optional ownership status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnershipStatus {
    Transferred,
}

impl OwnershipStatus {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "transferred" => Some(OwnershipStatus::Transferred),
            _ => None,
        }
    }
}
