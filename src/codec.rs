//! Transport encoding of stones.
//!
//! Two wire formats exist, each marked by an explicit tag so a decoder never
//! has to guess which one it holds:
//!
//! - `stone1.` + base64url of the full document JSON
//! - `stone1e.` + base64url of `{"signatures": {...}}`, where every signature
//!   is a self-describing token carrying its block's content
//!
//! Untagged base64 (standard or URL-safe alphabet, padded or not) of a full
//! document JSON is also accepted on decode.

use base64::{
    alphabet,
    engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, URL_SAFE_NO_PAD},
    engine::DecodePaddingMode,
    Engine as _,
};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::block::Block;
use crate::config::ProtocolConfig;
use crate::error::{Error, Expected};
use crate::schema::reject_unexpected;
use crate::stone::Stone;
use crate::token;

pub const DOCUMENT_TAG: &str = "stone1.";
pub const ENVELOPE_TAG: &str = "stone1e.";

const PADDING_OPTIONAL: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, PADDING_OPTIONAL);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, PADDING_OPTIONAL);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WireFormat {
    /// The whole document.
    #[default]
    Document,
    /// Only the signature envelope; block content is carried by the tokens.
    Envelope,
}

impl WireFormat {
    pub fn tag(&self) -> &'static str {
        match self {
            WireFormat::Document => DOCUMENT_TAG,
            WireFormat::Envelope => ENVELOPE_TAG,
        }
    }

    /// The format named by a tagged text, if any.
    pub fn detect(text: &str) -> Option<Self> {
        if text.starts_with(ENVELOPE_TAG) {
            Some(WireFormat::Envelope)
        } else if text.starts_with(DOCUMENT_TAG) {
            Some(WireFormat::Document)
        } else {
            None
        }
    }
}

/// Encode `stone` in the given wire format.
pub fn encode(stone: &Stone, format: WireFormat) -> Result<String, Error> {
    let body = match format {
        WireFormat::Document => serde_json::to_vec(&stone.to_json())?,
        WireFormat::Envelope => serde_json::to_vec(&envelope(stone)?)?,
    };
    debug!(format = ?format, bytes = body.len(), "encoded stone");
    Ok(format!("{}{}", format.tag(), URL_SAFE_NO_PAD.encode(body)))
}

fn envelope(stone: &Stone) -> Result<Value, Error> {
    let mut signatures = Map::new();
    for block in Block::ALL {
        let Some(signature) = stone.signature(block) else {
            continue;
        };
        if !token::is_token(signature) {
            return Err(Error::Encoding(format!(
                "signature of `{}` block is not a self-describing token",
                block
            )));
        }
        signatures.insert(block.name().to_string(), Value::from(signature));
    }
    if signatures.is_empty() {
        return Err(Error::Unsigned(Block::Meta));
    }
    let mut map = Map::new();
    map.insert("signatures".to_string(), Value::Object(signatures));
    Ok(Value::Object(map))
}

/// Decode a tagged or untagged encoding into a validated stone.
pub fn decode(text: &str, config: &ProtocolConfig) -> Result<Stone, Error> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::EmptyInput);
    }
    match WireFormat::detect(text) {
        Some(WireFormat::Envelope) => decode_envelope(&text[ENVELOPE_TAG.len()..], config),
        Some(WireFormat::Document) => decode_document(&text[DOCUMENT_TAG.len()..], config),
        None => decode_document(text, config),
    }
}

/// Either alphabet, padded or not.
fn decode_base64(text: &str) -> Result<Vec<u8>, Error> {
    STANDARD_LENIENT
        .decode(text)
        .or_else(|_| URL_SAFE_LENIENT.decode(text))
        .map_err(Error::MalformedBase64)
}

fn decode_document(body: &str, config: &ProtocolConfig) -> Result<Stone, Error> {
    let bytes = decode_base64(body)?;
    let value: Value = serde_json::from_slice(&bytes).map_err(Error::MalformedJson)?;
    Stone::from_json_value(&value, config)
}

/// Rebuild a stone from its signature envelope alone.
///
/// Either every token decodes and the resulting stone validates, or nothing
/// is returned; the error names the block whose token failed.
fn decode_envelope(body: &str, config: &ProtocolConfig) -> Result<Stone, Error> {
    let bytes = decode_base64(body)?;
    let value: Value = serde_json::from_slice(&bytes).map_err(Error::MalformedJson)?;
    let outer = value.as_object().ok_or(Error::UnsupportedInput)?;
    reject_unexpected(outer, &["signatures"], "envelope")?;
    let signatures = outer
        .get("signatures")
        .ok_or(Error::MissingBlock("signatures"))?
        .as_object()
        .ok_or(Error::WrongBlockType {
            block: "signatures",
            expected: Expected::Object,
        })?;

    let mut stone = Stone::new();
    for (name, signature) in signatures {
        let block: Block = name.parse()?;
        if signature.is_null() {
            continue;
        }
        let wrap = |source: Error| Error::EnvelopeBlock {
            block,
            source: Box::new(source),
        };
        let signature = signature.as_str().ok_or_else(|| {
            wrap(Error::WrongType {
                path: format!("signatures.{}", block),
                expected: Expected::String,
            })
        })?;
        let decoded = token::decode(signature).map_err(|e| {
            warn!(block = block.name(), error = %e, "envelope token rejected");
            wrap(e)
        })?;
        stone.set_block(block, decoded.payload).map_err(wrap)?;
        stone.set_signature(block, signature.to_string());
    }

    stone.validate(config)?;
    debug!(blocks = signatures.len(), "decoded stone envelope");
    Ok(stone)
}
