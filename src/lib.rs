//! # Stone - Rust Implementation
//!
//! Block-structured signed documents with per-block verification.
//!
//! A stone is a JSON document split into independently signed blocks: `meta`
//! (identity), `ownership`, `attributes` and `embeds` (other stones). The
//! issuer signs each block separately over a canonical encoding of its
//! content, so a holder can disclose and verify any subset of the blocks.
//!
//! ## Features
//!
//! - **Schema Validation**: Strict, ordered checks with stable error messages
//! - **Canonical Encoding**: Key-order independent byte form of each block
//! - **RSA Signatures**: RSASSA-PKCS1-v1_5 with SHA-256, as hex or as compact tokens
//! - **Embedded Stones**: Validated one level deep
//! - **Transport Encoding**: Tagged base64url forms for full documents and signature envelopes
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use stone::crypto::generate_key_pair;
//! use stone::stone::generate_stone_id;
//! use stone::{Block, ProtocolConfig, Stone};
//!
//! let keys = generate_key_pair(1024).unwrap();
//! let config = ProtocolConfig::default();
//!
//! let meta = json!({
//!     "id": generate_stone_id(),
//!     "type": "coupon",
//!     "created_at": config.now(),
//! });
//! let mut stone = Stone::create(meta, &keys.private_key_pem, &config).unwrap();
//! stone
//!     .add_attributes(
//!         json!({ "ref_id": "batch-7", "data": { "amount": 1500 } }),
//!         &keys.private_key_pem,
//!         &config,
//!     )
//!     .unwrap();
//!
//! let wire = stone.encode().unwrap();
//! let loaded = Stone::load(&wire, &config).unwrap();
//! assert!(loaded.verify(Block::Attributes, &keys.public_key_pem).unwrap());
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns `Result<T, Error>`. [`Error::kind`] gives a
//! coarse [`ErrorKind`] for matching without depending on message text.

pub mod block;
pub mod blocks;
pub mod canonicalize;
pub mod codec;
pub mod config;
pub mod crypto;
pub mod error;
pub mod schema;
pub mod stone;
pub mod token;
pub mod types;
pub mod validate;

#[cfg(test)]
mod fixtures;

pub use block::Block;
pub use codec::WireFormat;
pub use config::{ProtocolConfig, SignatureStyle};
pub use error::{Error, ErrorKind};
pub use schema::MetaVocabulary;
pub use stone::Stone;
