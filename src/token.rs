//! Compact signed-payload tokens.
//!
//! A token is `base64url(header) "." base64url(payload) "." base64url(signature)`
//! with an RS256 header, the block's JSON as payload, and an RSASSA-PKCS1-v1_5
//! SHA-256 signature over the first two segments. Because the payload travels
//! inside the token, a `signatures` envelope made of tokens is enough to
//! rebuild every signed block.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rsa::{RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::canonicalize::canonicalize;
use crate::crypto;
use crate::error::Error;

pub const ALGORITHM: &str = "RS256";

/// Token header. Fields other than `alg` are ignored on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHeader {
    pub alg: String,
}

impl Default for TokenHeader {
    fn default() -> Self {
        Self {
            alg: ALGORITHM.to_string(),
        }
    }
}

/// A parsed, not yet verified, token.
#[derive(Debug, Clone)]
pub struct SignedToken {
    pub header: TokenHeader,
    pub payload: Value,
    signing_input: String,
    signature: Vec<u8>,
}

/// True if `s` has the three-segment shape of a token. Hex signatures never do.
pub fn is_token(s: &str) -> bool {
    s.split('.').count() == 3
}

/// Sign `payload` into a token.
pub fn issue(payload: &Value, private_key: &RsaPrivateKey) -> Result<String, Error> {
    let header = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&TokenHeader::default())?);
    let body = URL_SAFE_NO_PAD.encode(serde_json::to_vec(payload)?);
    let signing_input = format!("{}.{}", header, body);
    let signature = crypto::sign_bytes(private_key, signing_input.as_bytes())?;
    Ok(format!(
        "{}.{}",
        signing_input,
        URL_SAFE_NO_PAD.encode(signature)
    ))
}

/// Split and decode a token without checking its signature.
pub fn decode(token: &str) -> Result<SignedToken, Error> {
    let mut parts = token.split('.');
    let (Some(header_b64), Some(payload_b64), Some(signature_b64), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(Error::MalformedToken(
            "expected three dot-separated segments".to_string(),
        ));
    };

    let segment = |name: &str, s: &str| {
        URL_SAFE_NO_PAD
            .decode(s)
            .map_err(|e| Error::MalformedToken(format!("{} segment: {}", name, e)))
    };

    let header: TokenHeader = serde_json::from_slice(&segment("header", header_b64)?)
        .map_err(|e| Error::MalformedToken(format!("header: {}", e)))?;
    if header.alg != ALGORITHM {
        return Err(Error::MalformedToken(format!(
            "unsupported algorithm `{}`",
            header.alg
        )));
    }
    let payload: Value = serde_json::from_slice(&segment("payload", payload_b64)?)
        .map_err(|e| Error::MalformedToken(format!("payload: {}", e)))?;
    let signature = segment("signature", signature_b64)?;

    Ok(SignedToken {
        header,
        payload,
        signing_input: format!("{}.{}", header_b64, payload_b64),
        signature,
    })
}

impl SignedToken {
    /// Check the token signature.
    pub fn verify(&self, public_key: &RsaPublicKey) -> bool {
        crypto::verify_bytes(public_key, self.signing_input.as_bytes(), &self.signature)
    }

    /// Check the token signature and that its payload is canonically equal to `content`.
    pub fn verify_content(&self, public_key: &RsaPublicKey, content: &Value) -> Result<bool, Error> {
        if !self.verify(public_key) {
            return Ok(false);
        }
        Ok(canonicalize(&self.payload)? == canonicalize(content)?)
    }
}
