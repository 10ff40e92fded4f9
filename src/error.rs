use std::fmt;

use thiserror::Error;

use crate::block::Block;

/// Every failure surfaced by validation, signing, verification and transport.
///
/// Messages are stable and are part of the observable behaviour: validation
/// always reports the first violation in a fixed check order, so the text of
/// the returned error is deterministic for a given input.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Expects a json object as parameter")]
    NotAnObject,

    #[error("missing `{0}` block")]
    MissingBlock(&'static str),

    #[error("`{block}` block value type is invalid. Expects {expected}")]
    WrongBlockType {
        block: &'static str,
        expected: Expected,
    },

    #[error("`{path}` value type is invalid. Expects {expected}")]
    WrongType { path: String, expected: Expected },

    #[error("`{property}` property is unexpected in `{block}` block")]
    UnexpectedProperty { block: String, property: String },

    #[error("`{block}` block is missing `{property}` property")]
    MissingProperty { block: String, property: String },

    #[error("`{path}` property is missing `{property}` property")]
    MissingDetail { path: String, property: String },

    #[error("`{path}` property has unexpected value")]
    InvalidEnumValue { path: String },

    #[error("`{path}` must have {expected} characters. Preferrable a UUIDv4 SHA1 hashed string")]
    InvalidLength { path: String, expected: usize },

    #[error("`{path}` value is too far in the past. Expects unix time on or after {start}")]
    TooFarInPast { path: String, start: String },

    #[error("`{path}` value cannot be a unix time in the future")]
    InFuture { path: String },

    #[error("`{path}` must not contain floating-point values")]
    ForbiddenValue { path: String },

    #[error("missing `{0}` property in `signatures` block")]
    MissingSignature(Block),

    #[error("block `{0}` has no signature")]
    Unsigned(Block),

    #[error("block unknown: `{0}`")]
    UnknownBlock(String),

    #[error("block `{0}` is empty and will not be signed")]
    EmptyBlock(Block),

    #[error("unable to validate embed at index {index}. Reason: {source}")]
    InvalidEmbed {
        index: usize,
        #[source]
        source: Box<Error>,
    },

    #[error("{0}")]
    InvalidKey(KeyProblem),

    #[error("signature verification failed for `{0}` block")]
    VerificationFailed(Block),

    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("cannot load empty string")]
    EmptyInput,

    #[error("unsupported parameter type")]
    UnsupportedInput,

    #[error("failed to load. JSON string is malformed")]
    MalformedJson(#[source] serde_json::Error),

    #[error("failed to load. JSON string is malformed")]
    MalformedBase64(#[source] base64::DecodeError),

    #[error("malformed signature token: {0}")]
    MalformedToken(String),

    #[error("unable to decode `{block}` signature token. Reason: {source}")]
    EnvelopeBlock {
        block: Block,
        #[source]
        source: Box<Error>,
    },

    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("invalid protocol config: {0}")]
    Config(#[source] serde_json::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of an [`Error`], stable across message wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingBlock,
    WrongType,
    UnexpectedProperty,
    MissingProperty,
    InvalidEnumValue,
    OutOfRange,
    MissingSignature,
    UnknownBlock,
    InvalidKey,
    SignatureVerificationFailed,
    MalformedInput,
    ForbiddenValue,
    EmptyBlock,
    InvalidEmbed,
    Encoding,
    EmptyInput,
    UnsupportedInput,
    Crypto,
    Io,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotAnObject | Error::WrongBlockType { .. } | Error::WrongType { .. } => {
                ErrorKind::WrongType
            }
            Error::MissingBlock(_) => ErrorKind::MissingBlock,
            Error::UnexpectedProperty { .. } => ErrorKind::UnexpectedProperty,
            Error::MissingProperty { .. } | Error::MissingDetail { .. } => {
                ErrorKind::MissingProperty
            }
            Error::InvalidEnumValue { .. } => ErrorKind::InvalidEnumValue,
            Error::InvalidLength { .. } | Error::TooFarInPast { .. } | Error::InFuture { .. } => {
                ErrorKind::OutOfRange
            }
            Error::ForbiddenValue { .. } => ErrorKind::ForbiddenValue,
            Error::MissingSignature(_) | Error::Unsigned(_) => ErrorKind::MissingSignature,
            Error::UnknownBlock(_) => ErrorKind::UnknownBlock,
            Error::EmptyBlock(_) => ErrorKind::EmptyBlock,
            Error::InvalidEmbed { .. } => ErrorKind::InvalidEmbed,
            Error::InvalidKey(_) => ErrorKind::InvalidKey,
            Error::VerificationFailed(_) => ErrorKind::SignatureVerificationFailed,
            Error::Crypto(_) => ErrorKind::Crypto,
            Error::EmptyInput => ErrorKind::EmptyInput,
            Error::UnsupportedInput => ErrorKind::UnsupportedInput,
            Error::MalformedJson(_)
            | Error::MalformedBase64(_)
            | Error::MalformedToken(_)
            | Error::EnvelopeBlock { .. }
            | Error::Config(_)
            | Error::Json(_) => ErrorKind::MalformedInput,
            Error::Encoding(_) => ErrorKind::Encoding,
            Error::Io(_) => ErrorKind::Io,
        }
    }
}

/// The shape a value was expected to have, as worded in type errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Object,
    String,
    Integer,
    ArrayOfObjects,
    /// The list form of the `embeds` block.
    EmbedsList,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Expected::Object => "a JSON object",
            Expected::String => "string value",
            Expected::Integer => "an integer",
            Expected::ArrayOfObjects => "an array of JSON objects",
            Expected::EmbedsList => "an array of only JSON objects",
        };
        f.write_str(s)
    }
}

/// Why key material was rejected before any cryptography ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyProblem {
    PrivateKeyRequired,
    PrivateKeyInvalid,
    PublicKeyRequired,
    PublicKeyInvalid,
}

impl fmt::Display for KeyProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            KeyProblem::PrivateKeyRequired => "private key is required for signing",
            KeyProblem::PrivateKeyInvalid => "private key is invalid",
            KeyProblem::PublicKeyRequired => "public key is required for verification",
            KeyProblem::PublicKeyInvalid => "public key is invalid",
        };
        f.write_str(s)
    }
}
