//! ECDSA verification and SEC1 public key encodings.

use crate::{
    curve::{COMPRESSED_POINT_SIZE, FIELD_SIZE, UNCOMPRESSED_POINT_SIZE},
    hazmat, Error, PrivateKey, RecoverableSignature, Result, Signature,
};
use alloc::{string::String, vec::Vec};
use k256::{elliptic_curve::sec1::ToEncodedPoint, AffinePoint, FieldBytes};
use signature::hazmat::PrehashVerifier;

/// secp256k1 public key: a non-identity point on the curve.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PublicKey {
    inner: k256::PublicKey,
}

impl PublicKey {
    /// Compute `d×𝑮` for the given private key.
    pub fn from_private_key(private_key: &PrivateKey) -> Self {
        Self {
            inner: k256::PublicKey::from_secret_scalar(private_key.as_nonzero_scalar()),
        }
    }

    /// Parse a SEC1 encoded public key, either compressed (33 bytes, prefix
    /// `0x02`/`0x03`) or uncompressed (65 bytes, prefix `0x04`).
    ///
    /// The point at infinity is rejected.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self> {
        // Only the tags matching each length; no compact or hybrid encodings
        match (bytes.len(), bytes.first().copied()) {
            (COMPRESSED_POINT_SIZE, Some(0x02 | 0x03)) | (UNCOMPRESSED_POINT_SIZE, Some(0x04)) => {
                k256::PublicKey::from_sec1_bytes(bytes)
                    .map(|inner| Self { inner })
                    .map_err(|_| Error::InvalidPublicKey)
            }
            _ => Err(Error::InvalidPublicKey),
        }
    }

    /// Initialize from an affine point, rejecting the identity.
    pub fn from_affine(point: AffinePoint) -> Result<Self> {
        k256::PublicKey::from_affine(point)
            .map(|inner| Self { inner })
            .map_err(|_| Error::InvalidPublicKey)
    }

    /// Borrow the inner [`AffinePoint`].
    pub fn as_affine(&self) -> &AffinePoint {
        self.inner.as_affine()
    }

    /// Serialize as SEC1, compressed or uncompressed per `compress`.
    pub fn to_encoded(&self, compress: bool) -> Vec<u8> {
        self.inner.to_encoded_point(compress).as_bytes().to_vec()
    }

    /// Serialize as a 33-byte SEC1 compressed point.
    pub fn to_compressed(&self) -> [u8; COMPRESSED_POINT_SIZE] {
        let mut bytes = [0u8; COMPRESSED_POINT_SIZE];
        bytes.copy_from_slice(self.inner.to_encoded_point(true).as_bytes());
        bytes
    }

    /// Serialize as a 65-byte SEC1 uncompressed point.
    pub fn to_uncompressed(&self) -> [u8; UNCOMPRESSED_POINT_SIZE] {
        let mut bytes = [0u8; UNCOMPRESSED_POINT_SIZE];
        bytes.copy_from_slice(self.inner.to_encoded_point(false).as_bytes());
        bytes
    }

    /// Compressed SEC1 encoding as a lowercase hex string.
    pub fn to_compressed_hex(&self) -> String {
        hex::encode(self.to_compressed())
    }

    /// Verify a signature over a 32-byte digest. High-S signatures verify.
    pub fn verify_digest(&self, digest: &[u8], signature: &Signature) -> Result<()> {
        Error::check_len(FIELD_SIZE, digest)?;
        hazmat::verify_prehashed(self.as_affine(), FieldBytes::from_slice(digest), signature)
    }
}

impl From<k256::PublicKey> for PublicKey {
    fn from(inner: k256::PublicKey) -> PublicKey {
        PublicKey { inner }
    }
}

impl From<PublicKey> for k256::PublicKey {
    fn from(public_key: PublicKey) -> k256::PublicKey {
        public_key.inner
    }
}

impl From<&PrivateKey> for PublicKey {
    fn from(private_key: &PrivateKey) -> PublicKey {
        PublicKey::from_private_key(private_key)
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_sec1_bytes(bytes)
    }
}

//
// `PrehashVerifier` trait impls
//

impl PrehashVerifier<Signature> for PublicKey {
    fn verify_prehash(&self, prehash: &[u8], signature: &Signature) -> signature::Result<()> {
        Ok(self.verify_digest(prehash, signature)?)
    }
}

impl PrehashVerifier<RecoverableSignature> for PublicKey {
    fn verify_prehash(
        &self,
        prehash: &[u8],
        signature: &RecoverableSignature,
    ) -> signature::Result<()> {
        Ok(self.verify_digest(prehash, signature.signature())?)
    }
}
