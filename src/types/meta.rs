use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Expected};
use crate::schema::{MetaVocabulary, CREATED_AT};

/// Typed view of a `meta` block, independent of the field vocabulary it was read with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaInfo {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub created_at: i64,
}

impl MetaInfo {
    /// Read the identifying fields out of a `meta` block.
    ///
    /// Only presence and types are checked here; run the block validator for
    /// length and timestamp rules.
    pub fn from_block(meta: &Map<String, Value>, vocabulary: MetaVocabulary) -> Result<Self, Error> {
        let field = |name: &str, expected: Expected| Error::WrongType {
            path: format!("meta.{}", name),
            expected,
        };

        let id = meta
            .get(vocabulary.id_field())
            .and_then(Value::as_str)
            .ok_or_else(|| field(vocabulary.id_field(), Expected::String))?;
        let kind = meta
            .get(vocabulary.type_field())
            .and_then(Value::as_str)
            .ok_or_else(|| field(vocabulary.type_field(), Expected::String))?;
        let created_at = meta
            .get(CREATED_AT)
            .and_then(Value::as_i64)
            .ok_or_else(|| field(CREATED_AT, Expected::Integer))?;

        Ok(Self {
            id: id.to_string(),
            kind: kind.to_string(),
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_read_both_vocabularies() {
        let legacy = json!({ "id": "a", "type": "t", "created_at": 5 });
        let stone = json!({ "stone_id": "a", "stone_type": "t", "created_at": 5 });
        let a = MetaInfo::from_block(legacy.as_object().unwrap(), MetaVocabulary::Legacy).unwrap();
        let b = MetaInfo::from_block(stone.as_object().unwrap(), MetaVocabulary::Stone).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_wrong_vocabulary() {
        let legacy = json!({ "id": "a", "type": "t", "created_at": 5 });
        let err = MetaInfo::from_block(legacy.as_object().unwrap(), MetaVocabulary::Stone).unwrap_err();
        assert_eq!(
            err.to_string(),
            "`meta.stone_id` value type is invalid. Expects string value"
        );
    }
}
