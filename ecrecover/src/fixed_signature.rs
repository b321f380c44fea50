//! Fixed-size (a.k.a. "compact") secp256k1 ECDSA signatures.

use crate::{curve::FIELD_SIZE, der, Error, Result};
use core::fmt::{self, Debug};
use k256::{
    elliptic_curve::{scalar::IsHigh, PrimeField},
    FieldBytes, Scalar,
};

/// Size of a fixed-size signature in bytes.
pub const SIZE: usize = 2 * FIELD_SIZE;

/// ECDSA signature as a pair of non-zero scalars `(r, s)`.
///
/// Serialized as `r || s`, each a 32-byte big endian integer.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct Signature {
    r: Scalar,
    s: Scalar,
}

impl Signature {
    /// Create a signature from its scalar components.
    ///
    /// Returns [`Error::InvalidSignature`] if either is zero.
    pub fn from_scalars(r: Scalar, s: Scalar) -> Result<Self> {
        if r == Scalar::ZERO || s == Scalar::ZERO {
            return Err(Error::InvalidSignature);
        }

        Ok(Self { r, s })
    }

    /// Create a signature from big endian `r` and `s`, each of which must be
    /// in the range `[1, n-1]`.
    pub fn from_field_bytes(r: &FieldBytes, s: &FieldBytes) -> Result<Self> {
        let r = Option::<Scalar>::from(Scalar::from_repr(*r)).ok_or(Error::InvalidSignature)?;
        let s = Option::<Scalar>::from(Scalar::from_repr(*s)).ok_or(Error::InvalidSignature)?;
        Self::from_scalars(r, s)
    }

    /// Parse a 64-byte `r || s` signature.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Error::check_len(SIZE, bytes)?;
        let (r, s) = bytes.split_at(FIELD_SIZE);
        Self::from_field_bytes(FieldBytes::from_slice(r), FieldBytes::from_slice(s))
    }

    /// Parse an ASN.1 DER encoded signature.
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        der::Signature::from_bytes(bytes)?.try_into()
    }

    /// Serialize as `r || s`.
    pub fn to_bytes(&self) -> [u8; SIZE] {
        let mut bytes = [0u8; SIZE];
        bytes[..FIELD_SIZE].copy_from_slice(&self.r.to_repr());
        bytes[FIELD_SIZE..].copy_from_slice(&self.s.to_repr());
        bytes
    }

    /// Serialize this signature as ASN.1 DER.
    pub fn to_der(&self) -> Result<der::Signature> {
        let (r, s) = self.split_bytes();
        der::Signature::from_components(&r, &s)
    }

    /// Get the `r` component.
    pub fn r(&self) -> Scalar {
        self.r
    }

    /// Get the `s` component.
    pub fn s(&self) -> Scalar {
        self.s
    }

    /// Split into big endian `r` and `s`.
    pub fn split_bytes(&self) -> (FieldBytes, FieldBytes) {
        (self.r.to_repr(), self.s.to_repr())
    }

    /// Normalize signature into "low S" form as described in
    /// [BIP 0062: Dealing with Malleability][1].
    ///
    /// Returns `None` if `s` is already in the lower half of the modulus.
    ///
    /// [1]: https://github.com/bitcoin/bips/blob/master/bip-0062.mediawiki
    pub fn normalize_s(&self) -> Option<Self> {
        if self.s.is_high().into() {
            Some(Self {
                r: self.r,
                s: -self.s,
            })
        } else {
            None
        }
    }
}

impl Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ecrecover::Signature(")?;

        for byte in self.to_bytes() {
            write!(f, "{byte:02X}")?;
        }

        write!(f, ")")
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

impl TryFrom<der::Signature> for Signature {
    type Error = Error;

    fn try_from(sig: der::Signature) -> Result<Self> {
        let (r, s) = sig.split_field_bytes();
        Self::from_field_bytes(&r, &s)
    }
}

impl From<Signature> for [u8; SIZE] {
    fn from(sig: Signature) -> [u8; SIZE] {
        sig.to_bytes()
    }
}
