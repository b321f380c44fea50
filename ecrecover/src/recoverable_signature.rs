//! Recoverable signatures, which allow the signer's [`PublicKey`] to be
//! computed from the signature and the signed digest.

use crate::{
    curve::FIELD_SIZE, der, fixed_signature, hazmat, Error, PublicKey, RecoveryId, Result,
    Signature,
};
use alloc::vec::Vec;
use core::fmt::{self, Debug};
use k256::FieldBytes;

/// Size of a recoverable signature in `r || s || v` form: 65 bytes.
pub const SIZE: usize = fixed_signature::SIZE + 1;

/// Maximum size of a recoverable signature in wire form: 73 bytes.
pub const MAX_WIRE_SIZE: usize = der::MAX_SIZE + 1;

/// ECDSA signature paired with the [`RecoveryId`] selecting the signer's key.
///
/// Two encodings are supported:
///
/// - wire form: `[recovery_id + 27] || DER(r, s)`
/// - `r || s || v`: fixed 65 bytes, `v` being the bare recovery ID
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct RecoverableSignature {
    signature: Signature,
    recovery_id: RecoveryId,
}

impl RecoverableSignature {
    /// Pair a signature with its recovery ID.
    pub fn new(signature: Signature, recovery_id: RecoveryId) -> Self {
        Self {
            signature,
            recovery_id,
        }
    }

    /// Borrow the `(r, s)` signature.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Get the [`RecoveryId`].
    pub fn recovery_id(&self) -> RecoveryId {
        self.recovery_id
    }

    /// Parse the wire form `[recovery byte] || DER(r, s)`.
    ///
    /// Checks are applied in order, each failing with a distinct error:
    /// the recovery byte must be in `0x1B..=0x1E`
    /// ([`Error::InvalidRecoveryByte`]), the remainder must be strict DER
    /// spanning exactly the rest of the input ([`Error::MalformedSignature`]),
    /// and `r` and `s` must be in `[1, n-1]` ([`Error::InvalidSignature`]).
    pub fn from_wire(bytes: &[u8]) -> Result<Self> {
        let (&recovery_byte, der_bytes) = bytes.split_first().ok_or(Error::MalformedSignature)?;
        let recovery_id = RecoveryId::from_wire_byte(recovery_byte)?;
        let signature: Signature = der::Signature::from_bytes(der_bytes)?.try_into()?;
        Ok(Self::new(signature, recovery_id))
    }

    /// Serialize in wire form `[recovery_id + 27] || DER(r, s)`.
    pub fn to_wire(&self) -> Result<Vec<u8>> {
        let der = self.signature.to_der()?;
        let mut bytes = Vec::with_capacity(1 + der.len());
        bytes.push(self.recovery_id.to_wire_byte());
        bytes.extend_from_slice(der.as_bytes());
        Ok(bytes)
    }

    /// Parse a 65-byte `r || s || v` signature, where `v` is in `0..=3`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Error::check_len(SIZE, bytes)?;
        let (rs, v) = bytes.split_at(fixed_signature::SIZE);
        let recovery_id = RecoveryId::try_from(v[0])?;
        Ok(Self::new(Signature::from_bytes(rs)?, recovery_id))
    }

    /// Serialize as 65 bytes `r || s || v`.
    pub fn to_bytes(&self) -> [u8; SIZE] {
        let mut bytes = [0u8; SIZE];
        bytes[..fixed_signature::SIZE].copy_from_slice(&self.signature.to_bytes());
        bytes[fixed_signature::SIZE] = self.recovery_id.to_byte();
        bytes
    }

    /// Recover the public key which produced this signature over a 32-byte
    /// digest.
    pub fn recover_public_key(&self, digest: &[u8]) -> Result<PublicKey> {
        Error::check_len(FIELD_SIZE, digest)?;
        hazmat::recover_prehashed(
            FieldBytes::from_slice(digest),
            &self.signature,
            self.recovery_id,
        )
        .map(PublicKey::from)
    }
}

impl Debug for RecoverableSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecoverableSignature")
            .field("signature", &self.signature)
            .field("recovery_id", &self.recovery_id)
            .finish()
    }
}

impl From<RecoverableSignature> for Signature {
    fn from(sig: RecoverableSignature) -> Signature {
        sig.signature
    }
}

impl From<RecoverableSignature> for [u8; SIZE] {
    fn from(sig: RecoverableSignature) -> [u8; SIZE] {
        sig.to_bytes()
    }
}

impl TryFrom<&[u8]> for RecoverableSignature {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}
