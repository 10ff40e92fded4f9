//! Field sets of each block and the shared checks that walk them.
//!
//! Every check here visits fields in the declared order, which is what makes
//! the first reported violation deterministic.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Expected};

pub const META_ID_LENGTH: usize = 40;
pub const CREATED_AT: &str = "created_at";

pub const REF_ID: &str = "ref_id";
pub const DATA: &str = "data";

pub const OWNERSHIP_FIELDS: &[&str] = &["ref_id", "type", "sole", "status"];
pub const OWNERSHIP_REQUIRED: &[&str] = &["ref_id", "type"];
pub const SOLE_FIELDS: &[&str] = &["address_id"];

pub const ATTRIBUTES_FIELDS: &[&str] = &["ref_id", "data"];
pub const EMBEDS_FIELDS: &[&str] = &["ref_id", "data"];

pub const SIGNATURES_FIELDS: &[&str] = &["meta", "ownership", "attributes", "embeds"];

/// Names used for the identifying fields of the `meta` block.
///
/// Two protocol revisions exist: the first `id`/`type` pair and the later
/// `stone_id`/`stone_type` pair. `created_at` is shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetaVocabulary {
    #[default]
    Legacy,
    Stone,
}

impl MetaVocabulary {
    pub fn id_field(&self) -> &'static str {
        match self {
            MetaVocabulary::Legacy => "id",
            MetaVocabulary::Stone => "stone_id",
        }
    }

    pub fn type_field(&self) -> &'static str {
        match self {
            MetaVocabulary::Legacy => "type",
            MetaVocabulary::Stone => "stone_type",
        }
    }

    /// Closed field set of `meta`, in check order.
    pub fn meta_fields(&self) -> [&'static str; 3] {
        [self.id_field(), self.type_field(), CREATED_AT]
    }
}

/// True if `value` is an array whose elements are all objects. An empty array qualifies.
pub fn is_array_of_objects(value: &Value) -> bool {
    match value {
        Value::Array(items) => items.iter().all(Value::is_object),
        _ => false,
    }
}

/// Absent and `null` fields are both missing.
pub(crate) fn is_missing(map: &Map<String, Value>, key: &str) -> bool {
    matches!(map.get(key), None | Some(Value::Null))
}

/// Empty objects, empty arrays and `null` carry no content.
pub(crate) fn is_empty_content(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

pub(crate) fn block_object<'a>(
    value: &'a Value,
    block: &'static str,
) -> Result<&'a Map<String, Value>, Error> {
    value.as_object().ok_or(Error::WrongBlockType {
        block,
        expected: Expected::Object,
    })
}

/// Report the first key, in the map's own order, outside `allowed`.
pub(crate) fn reject_unexpected(
    map: &Map<String, Value>,
    allowed: &[&str],
    block: &str,
) -> Result<(), Error> {
    match map.keys().find(|k| !allowed.contains(&k.as_str())) {
        Some(key) => Err(Error::UnexpectedProperty {
            block: block.to_string(),
            property: key.clone(),
        }),
        None => Ok(()),
    }
}

/// Report the first missing field, in the order of `required`.
pub(crate) fn require_fields(
    map: &Map<String, Value>,
    required: &[&str],
    block: &str,
) -> Result<(), Error> {
    match required.iter().find(|f| is_missing(map, f)) {
        Some(field) => Err(Error::MissingProperty {
            block: block.to_string(),
            property: field.to_string(),
        }),
        None => Ok(()),
    }
}

pub(crate) fn expect_str<'a>(
    map: &'a Map<String, Value>,
    key: &str,
    block: &str,
) -> Result<&'a str, Error> {
    map.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| Error::WrongType {
            path: format!("{}.{}", block, key),
            expected: Expected::String,
        })
}
