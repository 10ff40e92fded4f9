//! Whole-document validation.
//!
//! A document is checked block by block: `meta`, then the `signatures`
//! envelope, then each of `ownership`, `attributes` and `embeds` that carries
//! content. A populated block must have a matching signature entry before its
//! own schema is checked.
//!
//! Embedded documents are validated one level deep. Each embed is checked
//! through a [`DocumentView`] that leaves out its own `embeds` field, so
//! anything nested below the first level is never inspected.

use serde_json::{Map, Value};

use crate::block::Block;
use crate::blocks::{
    check_signatures, require_signature, validate_attributes_block, validate_meta_block,
    validate_ownership_block,
};
use crate::config::ProtocolConfig;
use crate::error::{Error, Expected};
use crate::schema::{
    expect_str, is_array_of_objects, is_empty_content, reject_unexpected, require_fields, DATA,
    EMBEDS_FIELDS, REF_ID,
};

/// Borrowed view over the top-level blocks of a document value.
///
/// `null` blocks are treated as absent.
#[derive(Debug, Clone, Copy)]
pub struct DocumentView<'a> {
    pub meta: Option<&'a Value>,
    pub signatures: Option<&'a Value>,
    pub ownership: Option<&'a Value>,
    pub attributes: Option<&'a Value>,
    pub embeds: Option<&'a Value>,
}

impl<'a> DocumentView<'a> {
    pub fn from_value(document: &'a Value) -> Result<Self, Error> {
        let map = document.as_object().ok_or(Error::NotAnObject)?;
        Ok(Self::from_map(map))
    }

    pub fn from_map(map: &'a Map<String, Value>) -> Self {
        let get = |key: &str| map.get(key).filter(|v| !v.is_null());
        Self {
            meta: get("meta"),
            signatures: get("signatures"),
            ownership: get("ownership"),
            attributes: get("attributes"),
            embeds: get("embeds"),
        }
    }

    /// The same document with its `embeds` field hidden.
    pub fn without_embeds(self) -> Self {
        Self {
            embeds: None,
            ..self
        }
    }

    fn block(&self, block: Block) -> Option<&'a Value> {
        match block {
            Block::Meta => self.meta,
            Block::Ownership => self.ownership,
            Block::Attributes => self.attributes,
            Block::Embeds => self.embeds,
        }
    }
}

/// Validate a full document value.
pub fn validate(document: &Value, config: &ProtocolConfig) -> Result<(), Error> {
    validate_view(&DocumentView::from_value(document)?, config)
}

/// Validate a document through a view.
pub fn validate_view(view: &DocumentView<'_>, config: &ProtocolConfig) -> Result<(), Error> {
    let meta = view.meta.ok_or(Error::MissingBlock("meta"))?;
    validate_meta_block(meta, config)?;

    let signatures = view.signatures.ok_or(Error::MissingBlock("signatures"))?;
    let signatures = signatures.as_object().ok_or(Error::WrongBlockType {
        block: "signatures",
        expected: Expected::Object,
    })?;
    check_signatures(signatures)?;

    for block in [Block::Ownership, Block::Attributes, Block::Embeds] {
        let Some(value) = view.block(block) else {
            continue;
        };
        check_block_shape(block, value)?;
        if is_empty_content(value) {
            continue;
        }
        require_signature(signatures, block)?;
        match block {
            Block::Ownership => validate_ownership_block(value)?,
            Block::Attributes => validate_attributes_block(value)?,
            Block::Embeds => validate_embeds_block(value, config)?,
            Block::Meta => {}
        }
    }

    Ok(())
}

/// Type check done before the emptiness test, so `"ownership": "x"` is a
/// type error rather than silently skipped.
fn check_block_shape(block: Block, value: &Value) -> Result<(), Error> {
    let ok = match block {
        Block::Embeds => value.is_object() || is_array_of_objects(value),
        _ => value.is_object(),
    };
    if ok {
        return Ok(());
    }
    let expected = match block {
        Block::Embeds => Expected::EmbedsList,
        _ => Expected::Object,
    };
    Err(Error::WrongBlockType {
        block: block.name(),
        expected,
    })
}

/// Validate an `embeds` block in either of its shapes: a list of documents,
/// or `{ "ref_id": ..., "data": [documents] }`.
pub fn validate_embeds_block(embeds: &Value, config: &ProtocolConfig) -> Result<(), Error> {
    match embeds {
        Value::Array(items) => {
            if !is_array_of_objects(embeds) {
                return Err(Error::WrongBlockType {
                    block: "embeds",
                    expected: Expected::EmbedsList,
                });
            }
            validate_embedded_documents(items, config)
        }
        Value::Object(map) => {
            reject_unexpected(map, EMBEDS_FIELDS, "embeds")?;
            require_fields(map, EMBEDS_FIELDS, "embeds")?;
            expect_str(map, REF_ID, "embeds")?;
            match map.get(DATA) {
                Some(data @ Value::Array(items)) if is_array_of_objects(data) => {
                    validate_embedded_documents(items, config)
                }
                _ => Err(Error::WrongType {
                    path: format!("embeds.{}", DATA),
                    expected: Expected::ArrayOfObjects,
                }),
            }
        }
        _ => Err(Error::WrongBlockType {
            block: "embeds",
            expected: Expected::EmbedsList,
        }),
    }
}

fn validate_embedded_documents(items: &[Value], config: &ProtocolConfig) -> Result<(), Error> {
    for (index, item) in items.iter().enumerate() {
        DocumentView::from_value(item)
            .and_then(|view| validate_view(&view.without_embeds(), config))
            .map_err(|e| Error::InvalidEmbed {
                index,
                source: Box::new(e),
            })?;
    }
    Ok(())
}
