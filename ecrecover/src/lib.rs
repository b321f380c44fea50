//! secp256k1 signing primitives as used by Ethereum-style systems.
//!
//! This crate provides:
//!
//! - key generation by rejection sampling from an injectable CSPRNG,
//!   plus private key validation and public key derivation
//! - deterministic ([RFC6979]) recoverable ECDSA signing over 32-byte
//!   digests, always producing low-S signatures
//! - strict ASN.1 DER signature encoding and decoding
//! - public key recovery ("ecrecover") from a signature and digest
//! - conversions between big integers and their string/byte encodings
//!
//! Curve arithmetic is provided by the [`k256`] crate.
//!
//! ## Wire format
//!
//! Recoverable signatures travel as `[recovery_id + 27] || DER(r, s)`, at
//! most 73 bytes. Plain signatures are bare `DER(r, s)`, at most 72 bytes.
//!
//! ## Usage
//!
//! ```
//! # fn main() -> ecrecover::Result<()> {
//! let keypair = ecrecover::keypair_from_private_key(&[0x01; 32])?;
//! let digest = [0x42; 32];
//!
//! let wire = ecrecover::sign(&keypair.private_key().to_bytes(), &digest)?;
//! let recovered = ecrecover::recover(&wire, &digest)?;
//! assert_eq!(recovered, keypair.public_key().to_compressed());
//! # Ok(())
//! # }
//! ```
//!
//! [RFC6979]: https://datatracker.ietf.org/doc/html/rfc6979

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod bigint;
pub mod curve;
pub mod der;
pub mod fixed_signature;
pub mod hazmat;
pub mod recoverable_signature;

mod error;
mod keypair;
mod recovery;
mod signing;
mod verifying;

pub use crate::{
    bigint::{bigint_to_bytes, bigint_to_hex, hex_to_bytes, BigInteger},
    curve::{curve_order, curve_order_hex},
    error::{Error, Result},
    fixed_signature::Signature,
    keypair::Keypair,
    recoverable_signature::RecoverableSignature,
    recovery::RecoveryId,
    signing::PrivateKey,
    verifying::PublicKey,
};
pub use k256;
pub use rand_core;
pub use signature;

use crate::curve::{COMPRESSED_POINT_SIZE, UNCOMPRESSED_POINT_SIZE};
use alloc::{string::String, vec::Vec};
use rand_core::CryptoRngCore;

/// Generate a keypair using the operating system's random number generator.
#[cfg(feature = "getrandom")]
pub fn generate_keypair() -> Result<Keypair> {
    Keypair::generate(&mut rand_core::OsRng)
}

/// Generate a keypair using the provided random number generator.
pub fn generate_keypair_with_rng(rng: &mut impl CryptoRngCore) -> Result<Keypair> {
    Keypair::generate(rng)
}

/// Derive the keypair for a 32-byte big endian private key.
pub fn keypair_from_private_key(private_key: &[u8]) -> Result<Keypair> {
    Keypair::from_secret_bytes(private_key)
}

/// Is `bytes` a valid private key? Never fails.
pub fn is_valid_private_key(bytes: &[u8]) -> bool {
    PrivateKey::is_valid(bytes)
}

/// Sign a 32-byte digest, producing a recoverable signature in wire form:
/// `[recovery_id + 27] || DER(r, s)`.
pub fn sign(private_key: &[u8], digest: &[u8]) -> Result<Vec<u8>> {
    PrivateKey::from_bytes(private_key)?.sign_wire(digest)
}

/// Sign a 32-byte digest, producing a plain `DER(r, s)` signature.
pub fn sign_der(private_key: &[u8], digest: &[u8]) -> Result<Vec<u8>> {
    Ok(PrivateKey::from_bytes(private_key)?.sign_der(digest)?.to_vec())
}

/// Recover the compressed public key of the signer of `digest` from a
/// wire-form signature.
pub fn recover(wire_signature: &[u8], digest: &[u8]) -> Result<[u8; COMPRESSED_POINT_SIZE]> {
    let result = RecoverableSignature::from_wire(wire_signature)
        .and_then(|sig| sig.recover_public_key(digest))
        .map(|public_key| public_key.to_compressed());

    #[cfg(feature = "tracing")]
    if let Err(err) = &result {
        tracing::debug!(%err, len = wire_signature.len(), "public key recovery rejected");
    }

    result
}

/// Re-encode a 65-byte uncompressed SEC1 public key as compressed hex.
pub fn format_public_key_compressed(public_key: &[u8]) -> Result<String> {
    if public_key.len() != UNCOMPRESSED_POINT_SIZE || public_key[0] != 0x04 {
        return Err(Error::InvalidPublicKey);
    }

    Ok(PublicKey::from_sec1_bytes(public_key)?.to_compressed_hex())
}
