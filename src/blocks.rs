//! Schema validators for the `meta`, `ownership`, `attributes` and `signatures` blocks.
//!
//! Each validator runs its checks in a fixed order: value type, unknown
//! properties, required properties, then per-field type and value checks.
//! The first violation is returned.

use serde_json::{Map, Value};

use crate::block::Block;
use crate::config::ProtocolConfig;
use crate::error::{Error, Expected};
use crate::schema::{
    block_object, expect_str, is_missing, reject_unexpected, require_fields, ATTRIBUTES_FIELDS,
    CREATED_AT, DATA, META_ID_LENGTH, OWNERSHIP_FIELDS, OWNERSHIP_REQUIRED, REF_ID,
    SIGNATURES_FIELDS, SOLE_FIELDS,
};
use crate::types::ownership::{OwnershipStatus, OwnershipType};

/// Validate a `meta` block.
///
/// `created_at` must be an integer within `[config.start_time, config.now()]`.
pub fn validate_meta_block(meta: &Value, config: &ProtocolConfig) -> Result<(), Error> {
    let map = block_object(meta, "meta")?;
    let vocabulary = config.vocabulary;
    let fields = vocabulary.meta_fields();

    reject_unexpected(map, &fields, "meta")?;
    require_fields(map, &fields, "meta")?;

    let id = expect_str(map, vocabulary.id_field(), "meta")?;
    if id.chars().count() != META_ID_LENGTH {
        return Err(Error::InvalidLength {
            path: format!("meta.{}", vocabulary.id_field()),
            expected: META_ID_LENGTH,
        });
    }

    expect_str(map, vocabulary.type_field(), "meta")?;

    let path = format!("meta.{}", CREATED_AT);
    let created_at = match map.get(CREATED_AT) {
        Some(Value::Number(n)) if n.is_i64() => n.as_i64().unwrap_or_default(),
        // beyond i64 can only be in the future
        Some(Value::Number(n)) if n.is_u64() => return Err(Error::InFuture { path }),
        _ => {
            return Err(Error::WrongType {
                path,
                expected: Expected::Integer,
            })
        }
    };
    if created_at < config.start_time {
        return Err(Error::TooFarInPast {
            path,
            start: config.start_time_display(),
        });
    }
    if created_at > config.now() {
        return Err(Error::InFuture { path });
    }

    Ok(())
}

/// Validate an `ownership` block.
pub fn validate_ownership_block(ownership: &Value) -> Result<(), Error> {
    let map = block_object(ownership, "ownership")?;

    reject_unexpected(map, OWNERSHIP_FIELDS, "ownership")?;
    require_fields(map, OWNERSHIP_REQUIRED, "ownership")?;

    expect_str(map, REF_ID, "ownership")?;
    let type_name = expect_str(map, "type", "ownership")?;
    let ownership_type =
        OwnershipType::from_name(type_name).ok_or_else(|| Error::InvalidEnumValue {
            path: "ownership.type".to_string(),
        })?;

    let detail_field = ownership_type.detail_field();
    require_fields(map, &[detail_field], "ownership")?;
    let detail_path = format!("ownership.{}", detail_field);
    match ownership_type {
        OwnershipType::Sole => validate_sole(&map[detail_field], &detail_path)?,
    }

    if !is_missing(map, "status") {
        let status = expect_str(map, "status", "ownership")?;
        if OwnershipStatus::from_name(status).is_none() {
            return Err(Error::InvalidEnumValue {
                path: "ownership.status".to_string(),
            });
        }
    }

    Ok(())
}

fn validate_sole(sole: &Value, path: &str) -> Result<(), Error> {
    let map = sole.as_object().ok_or_else(|| Error::WrongType {
        path: path.to_string(),
        expected: Expected::Object,
    })?;
    reject_unexpected(map, SOLE_FIELDS, path)?;
    if let Some(field) = SOLE_FIELDS.iter().find(|f| is_missing(map, f)) {
        return Err(Error::MissingDetail {
            path: path.to_string(),
            property: field.to_string(),
        });
    }
    expect_str(map, "address_id", path)?;
    Ok(())
}

/// Validate an `attributes` block.
///
/// The opaque `data` payload may hold any JSON except floating-point numbers,
/// which would not survive canonical re-encoding exactly.
pub fn validate_attributes_block(attributes: &Value) -> Result<(), Error> {
    let map = block_object(attributes, "attributes")?;

    reject_unexpected(map, ATTRIBUTES_FIELDS, "attributes")?;
    require_fields(map, ATTRIBUTES_FIELDS, "attributes")?;

    expect_str(map, REF_ID, "attributes")?;
    if let Some(path) = find_float(&map[DATA], "attributes.data") {
        return Err(Error::ForbiddenValue { path });
    }

    Ok(())
}

/// Path of the first floating-point number inside `value`, depth first.
fn find_float(value: &Value, path: &str) -> Option<String> {
    match value {
        Value::Number(n) if n.is_f64() => Some(path.to_string()),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .find_map(|(i, item)| find_float(item, &format!("{}[{}]", path, i))),
        Value::Object(map) => map
            .iter()
            .find_map(|(k, v)| find_float(v, &format!("{}.{}", path, k))),
        _ => None,
    }
}

/// Validate the `signatures` envelope.
///
/// Only block names may appear as keys, `meta` is mandatory, and every
/// value present must be a string.
pub fn validate_signatures_block(signatures: &Value) -> Result<(), Error> {
    let map = block_object(signatures, "signatures")?;
    check_signatures(map)
}

pub(crate) fn check_signatures(map: &Map<String, Value>) -> Result<(), Error> {
    reject_unexpected(map, SIGNATURES_FIELDS, "signatures")?;
    if is_missing(map, "meta") {
        return Err(Error::MissingSignature(Block::Meta));
    }
    for field in SIGNATURES_FIELDS {
        if !is_missing(map, field) {
            expect_str(map, field, "signatures")?;
        }
    }
    require_signature(map, Block::Meta)
}

/// A signature entry counts only when it is a non-empty string.
pub(crate) fn require_signature(map: &Map<String, Value>, block: Block) -> Result<(), Error> {
    match map.get(block.name()).and_then(Value::as_str) {
        Some(s) if !s.is_empty() => Ok(()),
        _ => Err(Error::MissingSignature(block)),
    }
}
