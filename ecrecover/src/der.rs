//! Support for ASN.1 DER-encoded ECDSA signatures as specified in
//! [RFC5912 Section 6].
//!
//! [RFC5912 Section 6]: https://www.rfc-editor.org/rfc/rfc5912#section-6

use crate::{curve::FIELD_SIZE, Error, Result};
use alloc::vec::Vec;
use core::{
    fmt::{self, Debug},
    ops::Range,
};
use der::{
    asn1::UintRef, Decode, DecodeValue, Encode, EncodeValue, Header, Length, Reader, Sequence,
    Writer,
};
use k256::FieldBytes;

/// Maximum overhead of an ASN.1 DER-encoded secp256k1 ECDSA signature:
/// 8 bytes.
///
/// Includes a 2-byte ASN.1 DER header:
///
/// - 1-byte: ASN.1 `SEQUENCE` tag (0x30)
/// - 1-byte: length (contents never exceed 127 bytes)
///
/// ...followed by two ASN.1 `INTEGER` values, which each have a header whose
/// maximum length is the following:
///
/// - 1-byte: ASN.1 `INTEGER` tag (0x02)
/// - 1-byte: length
/// - 1-byte: zero to indicate value is positive (`INTEGER` is signed)
pub const MAX_OVERHEAD: usize = 8;

/// Maximum size of an ASN.1 DER encoded secp256k1 signature: 72 bytes.
pub const MAX_SIZE: usize = 2 * FIELD_SIZE + MAX_OVERHEAD;

/// ASN.1 DER-encoded signature as specified in [RFC5912 Section 6]:
///
/// ```text
/// ECDSA-Sig-Value ::= SEQUENCE {
///   r  INTEGER,
///   s  INTEGER
/// }
/// ```
///
/// Parsing is strict: lengths must be minimal and match the input exactly,
/// `INTEGER`s must be minimally encoded and non-negative, and neither may
/// have more than 32 significant bytes.
///
/// [RFC5912 Section 6]: https://www.rfc-editor.org/rfc/rfc5912#section-6
#[derive(Clone, Eq, PartialEq)]
pub struct Signature {
    /// ASN.1 DER-encoded signature data
    bytes: [u8; MAX_SIZE],

    /// Range of the `r` value within the signature
    r_range: Range<usize>,

    /// Range of the `s` value within the signature
    s_range: Range<usize>,
}

#[allow(clippy::len_without_is_empty)]
impl Signature {
    /// Parse signature from DER-encoded bytes.
    pub fn from_bytes(input: &[u8]) -> Result<Self> {
        let SignatureRef { r, s } = SignatureRef::from_der(input)?;

        if r.as_bytes().len() > FIELD_SIZE || s.as_bytes().len() > FIELD_SIZE {
            return Err(Error::MalformedSignature);
        }

        let r_range = find_scalar_range(input, r.as_bytes())?;
        let s_range = find_scalar_range(input, s.as_bytes())?;

        if s_range.end != input.len() {
            return Err(Error::MalformedSignature);
        }

        let mut bytes = [0u8; MAX_SIZE];
        bytes[..s_range.end].copy_from_slice(input);

        Ok(Signature {
            bytes,
            r_range,
            s_range,
        })
    }

    /// Create an ASN.1 DER encoded signature from big endian `r` and `s`
    /// components. Leading zeroes are stripped.
    pub fn from_components(r: &[u8], s: &[u8]) -> Result<Self> {
        let sig = SignatureRef {
            r: UintRef::new(r)?,
            s: UintRef::new(s)?,
        };

        if sig.r.as_bytes().len() > FIELD_SIZE || sig.s.as_bytes().len() > FIELD_SIZE {
            return Err(Error::MalformedSignature);
        }

        let mut buf = [0u8; MAX_SIZE];
        Self::from_bytes(sig.encode_to_slice(&mut buf)?)
    }

    /// Borrow this signature as a byte slice
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len()]
    }

    /// Serialize this signature as a byte vector
    pub fn to_vec(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }

    /// Get the length of the signature in bytes
    pub fn len(&self) -> usize {
        self.s_range.end
    }

    /// Get the `r` component of the signature (leading zeros removed)
    pub fn r(&self) -> &[u8] {
        &self.bytes[self.r_range.clone()]
    }

    /// Get the `s` component of the signature (leading zeros removed)
    pub fn s(&self) -> &[u8] {
        &self.bytes[self.s_range.clone()]
    }

    /// Get `r` and `s` left-padded to 32 bytes each.
    pub fn split_field_bytes(&self) -> (FieldBytes, FieldBytes) {
        (pad_field_bytes(self.r()), pad_field_bytes(self.s()))
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "der::Signature(")?;

        for &byte in self.as_ref() {
            write!(f, "{byte:02X}")?;
        }

        write!(f, ")")
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = Error;

    fn try_from(input: &[u8]) -> Result<Self> {
        Self::from_bytes(input)
    }
}

impl From<Signature> for Vec<u8> {
    fn from(signature: Signature) -> Vec<u8> {
        signature.to_vec()
    }
}

struct SignatureRef<'a> {
    r: UintRef<'a>,
    s: UintRef<'a>,
}

impl EncodeValue for SignatureRef<'_> {
    fn value_len(&self) -> der::Result<Length> {
        self.r.encoded_len()? + self.s.encoded_len()?
    }

    fn encode_value(&self, encoder: &mut impl Writer) -> der::Result<()> {
        self.r.encode(encoder)?;
        self.s.encode(encoder)?;
        Ok(())
    }
}

impl<'a> DecodeValue<'a> for SignatureRef<'a> {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        // The declared `SEQUENCE` length must cover exactly both `INTEGER`s.
        reader.read_nested(header.length, |reader| {
            Ok(Self {
                r: UintRef::decode(reader)?,
                s: UintRef::decode(reader)?,
            })
        })
    }
}

impl<'a> Sequence<'a> for SignatureRef<'a> {}

/// Locate the range within a slice at which a particular subslice is located
fn find_scalar_range(outer: &[u8], inner: &[u8]) -> Result<Range<usize>> {
    let outer_start = outer.as_ptr() as usize;
    let inner_start = inner.as_ptr() as usize;
    let start = inner_start
        .checked_sub(outer_start)
        .ok_or(Error::MalformedSignature)?;
    let end = start
        .checked_add(inner.len())
        .ok_or(Error::MalformedSignature)?;
    Ok(Range { start, end })
}

/// Left-pad a big endian integer of at most 32 bytes.
fn pad_field_bytes(bytes: &[u8]) -> FieldBytes {
    let mut field_bytes = FieldBytes::default();
    let start = FIELD_SIZE.saturating_sub(bytes.len());
    field_bytes[start..].copy_from_slice(&bytes[bytes.len().saturating_sub(FIELD_SIZE)..]);
    field_bytes
}
