//! ECDSA signing: key generation and producing recoverable signatures using
//! a [`PrivateKey`].

use crate::{
    curve::FIELD_SIZE, der, hazmat, Error, PublicKey, RecoverableSignature, Result, Signature,
};
use core::fmt::{self, Debug};
use k256::{elliptic_curve::PrimeField, FieldBytes, NonZeroScalar};
use rand_core::CryptoRngCore;
use signature::hazmat::PrehashSigner;
use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// secp256k1 private key: a scalar `d` in the range `[1, n-1]`.
#[derive(Clone)]
pub struct PrivateKey {
    /// Private keys are non-zero elements of the scalar field.
    secret_scalar: NonZeroScalar,
}

impl PrivateKey {
    /// Maximum number of 32-byte samples drawn by [`PrivateKey::random`]
    /// before the random source is considered broken.
    ///
    /// A uniformly random sample is out of range with probability < 2⁻¹²⁷.
    pub const MAX_GENERATION_ATTEMPTS: usize = 64;

    /// Generate a private key by rejection sampling 32-byte values from
    /// `rng` until one is in `[1, n-1]`.
    ///
    /// Fails with [`Error::RandomSourceUnavailable`] if `rng` reports an
    /// error or fails to produce a usable sample within
    /// [`PrivateKey::MAX_GENERATION_ATTEMPTS`] draws.
    pub fn random(rng: &mut impl CryptoRngCore) -> Result<Self> {
        let mut bytes = Zeroizing::new([0u8; FIELD_SIZE]);

        for _attempt in 1..=Self::MAX_GENERATION_ATTEMPTS {
            rng.try_fill_bytes(bytes.as_mut())
                .map_err(|_| Error::RandomSourceUnavailable)?;

            if let Some(secret_scalar) =
                Option::<NonZeroScalar>::from(NonZeroScalar::from_repr((*bytes).into()))
            {
                return Ok(Self { secret_scalar });
            }

            #[cfg(feature = "tracing")]
            tracing::debug!(attempt = _attempt, "rejected out-of-range private key sample");
        }

        Err(Error::RandomSourceUnavailable)
    }

    /// Initialize a private key from a 32-byte big endian scalar.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Error::check_len(FIELD_SIZE, bytes)?;

        Option::<NonZeroScalar>::from(NonZeroScalar::from_repr(*FieldBytes::from_slice(bytes)))
            .map(|secret_scalar| Self { secret_scalar })
            .ok_or(Error::InvalidPrivateKey)
    }

    /// Is `bytes` a valid private key, i.e. exactly 32 bytes encoding a
    /// big endian integer in `[1, n-1]`?
    ///
    /// Never fails: malformed input of any length is simply not valid.
    pub fn is_valid(bytes: &[u8]) -> bool {
        bytes.len() == FIELD_SIZE
            && NonZeroScalar::from_repr(*FieldBytes::from_slice(bytes))
                .is_some()
                .into()
    }

    /// Serialize this private key as 32 big endian bytes.
    ///
    /// # ⚠️ Warning
    ///
    /// This value is key material.
    ///
    /// Please treat it with the care it deserves!
    pub fn to_bytes(&self) -> FieldBytes {
        self.secret_scalar.to_repr()
    }

    /// Borrow the secret [`NonZeroScalar`] value for this key.
    ///
    /// # ⚠️ Warning
    ///
    /// This value is key material.
    ///
    /// Please treat it with the care it deserves!
    pub fn as_nonzero_scalar(&self) -> &NonZeroScalar {
        &self.secret_scalar
    }

    /// Get the [`PublicKey`] which corresponds to this private key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_private_key(self)
    }

    /// Sign a 32-byte message digest, producing a low-S signature along with
    /// its recovery ID.
    ///
    /// The ephemeral scalar is derived from the key and digest per RFC6979,
    /// so signing the same digest twice yields the same signature.
    pub fn sign_prehash_recoverable(&self, digest: &[u8]) -> Result<RecoverableSignature> {
        Error::check_len(FIELD_SIZE, digest)?;
        let (signature, recovery_id) =
            hazmat::sign_prehashed_rfc6979(&self.secret_scalar, FieldBytes::from_slice(digest), &[])?;
        Ok(RecoverableSignature::new(signature, recovery_id))
    }

    /// Sign a 32-byte message digest, producing a recoverable signature in
    /// wire form: `[recovery_id + 27] || DER(r, s)`.
    pub fn sign_wire(&self, digest: &[u8]) -> Result<alloc::vec::Vec<u8>> {
        self.sign_prehash_recoverable(digest)?.to_wire()
    }

    /// Sign a 32-byte message digest, producing an ASN.1 DER signature with
    /// no recovery information.
    pub fn sign_der(&self, digest: &[u8]) -> Result<der::Signature> {
        self.sign_prehash_recoverable(digest)?.signature().to_der()
    }
}

impl ConstantTimeEq for PrivateKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.to_bytes().as_slice().ct_eq(other.to_bytes().as_slice())
    }
}

impl Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey").finish_non_exhaustive()
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.secret_scalar.zeroize();
    }
}

impl Eq for PrivateKey {}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &PrivateKey) -> bool {
        self.ct_eq(other).into()
    }
}

impl ZeroizeOnDrop for PrivateKey {}

impl TryFrom<&[u8]> for PrivateKey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

//
// `PrehashSigner` trait impls
//

impl PrehashSigner<RecoverableSignature> for PrivateKey {
    fn sign_prehash(&self, prehash: &[u8]) -> signature::Result<RecoverableSignature> {
        Ok(self.sign_prehash_recoverable(prehash)?)
    }
}

impl PrehashSigner<Signature> for PrivateKey {
    fn sign_prehash(&self, prehash: &[u8]) -> signature::Result<Signature> {
        Ok(*self.sign_prehash_recoverable(prehash)?.signature())
    }
}

impl PrehashSigner<der::Signature> for PrivateKey {
    fn sign_prehash(&self, prehash: &[u8]) -> signature::Result<der::Signature> {
        Ok(self.sign_der(prehash)?)
    }
}
