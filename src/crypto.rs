//! RSA key handling and RSASSA-PKCS1-v1_5 / SHA-256 signatures.
//!
//! Keys cross the API boundary as PEM text. Private keys are accepted in
//! PKCS#1 (`BEGIN RSA PRIVATE KEY`) or PKCS#8 (`BEGIN PRIVATE KEY`) form,
//! public keys in SPKI (`BEGIN PUBLIC KEY`) or PKCS#1 (`BEGIN RSA PUBLIC KEY`).

use rand::rngs::OsRng;
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;

use crate::error::{Error, KeyProblem};

/// Key pair containing private and public keys in PEM format
#[derive(Debug, Clone)]
pub struct KeyPair {
    pub private_key_pem: String,
    pub public_key_pem: String,
}

/// Generate a new RSA key pair of `bits` modulus size.
///
/// The private key is exported as PKCS#8 and the public key as SPKI.
pub fn generate_key_pair(bits: usize) -> Result<KeyPair, Error> {
    let mut rng = OsRng;
    let private_key = RsaPrivateKey::new(&mut rng, bits).map_err(|e| Error::Crypto(e.to_string()))?;
    let public_key = RsaPublicKey::from(&private_key);

    let private_key_pem = private_key
        .to_pkcs8_pem(LineEnding::LF)
        .map_err(|e| Error::Crypto(e.to_string()))?
        .to_string();
    let public_key_pem = public_key
        .to_public_key_pem(LineEnding::LF)
        .map_err(|e| Error::Crypto(e.to_string()))?;

    Ok(KeyPair {
        private_key_pem,
        public_key_pem,
    })
}

/// Parse a PEM private key.
///
/// # Errors
///
/// `PrivateKeyRequired` for empty or blank input, `PrivateKeyInvalid` when the
/// text is not a parseable RSA private key.
pub fn load_private_key(pem: &str) -> Result<RsaPrivateKey, Error> {
    let pem = pem.trim();
    if pem.is_empty() {
        return Err(Error::InvalidKey(KeyProblem::PrivateKeyRequired));
    }
    RsaPrivateKey::from_pkcs1_pem(pem)
        .or_else(|_| RsaPrivateKey::from_pkcs8_pem(pem))
        .map_err(|_| Error::InvalidKey(KeyProblem::PrivateKeyInvalid))
}

/// Parse a PEM public key.
pub fn load_public_key(pem: &str) -> Result<RsaPublicKey, Error> {
    let pem = pem.trim();
    if pem.is_empty() {
        return Err(Error::InvalidKey(KeyProblem::PublicKeyRequired));
    }
    RsaPublicKey::from_public_key_pem(pem)
        .or_else(|_| RsaPublicKey::from_pkcs1_pem(pem))
        .map_err(|_| Error::InvalidKey(KeyProblem::PublicKeyInvalid))
}

pub fn is_valid_private_key(pem: &str) -> bool {
    load_private_key(pem).is_ok()
}

pub fn is_valid_public_key(pem: &str) -> bool {
    load_public_key(pem).is_ok()
}

/// Sign `data` with SHA-256 digest and PKCS#1 v1.5 padding, returning raw signature bytes.
pub fn sign_bytes(private_key: &RsaPrivateKey, data: &[u8]) -> Result<Vec<u8>, Error> {
    let signing_key = SigningKey::<Sha256>::new(private_key.clone());
    let signature = signing_key
        .try_sign(data)
        .map_err(|e| Error::Crypto(e.to_string()))?;
    Ok(signature.to_vec())
}

/// Check raw signature bytes over `data`. Malformed signatures verify as `false`.
pub fn verify_bytes(public_key: &RsaPublicKey, data: &[u8], signature: &[u8]) -> bool {
    let verifying_key = VerifyingKey::<Sha256>::new(public_key.clone());
    match Signature::try_from(signature) {
        Ok(sig) => verifying_key.verify(data, &sig).is_ok(),
        Err(_) => false,
    }
}

/// Sign `data` and return the lowercase hex of the signature.
pub fn sign_hex(private_key: &RsaPrivateKey, data: &[u8]) -> Result<String, Error> {
    Ok(hex::encode(sign_bytes(private_key, data)?))
}

/// Check a hex-encoded signature over `data`.
///
/// A signature that is not hex, has the wrong length, or does not match
/// yields `false`.
pub fn verify_hex(public_key: &RsaPublicKey, data: &[u8], signature_hex: &str) -> bool {
    match hex::decode(signature_hex) {
        Ok(bytes) => verify_bytes(public_key, data, &bytes),
        Err(_) => false,
    }
}
