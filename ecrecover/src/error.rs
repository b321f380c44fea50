//! Error types.

/// Errors returned by this crate.
///
/// Input validation failures (lengths, encodings, ranges) are distinguished
/// from failures which indicate a cryptographic impossibility, i.e.
/// [`Error::RecoveryFailed`] and [`Error::SigningFailed`], which should never
/// be observed with well-formed input.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// A byte buffer had the wrong length.
    #[error("invalid input length: expected {expected} bytes, got {got}")]
    InvalidInputLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length in bytes.
        got: usize,
    },

    /// Private key scalar is zero or not less than the curve order.
    #[error("invalid private key: scalar out of range [1, n-1]")]
    InvalidPrivateKey,

    /// Public key is not a valid SEC1-encoded point on secp256k1.
    #[error("invalid public key")]
    InvalidPublicKey,

    /// ASN.1 DER structure of a signature is malformed.
    #[error("malformed DER signature")]
    MalformedSignature,

    /// Signature is well-formed but `r` or `s` is zero or not less than the
    /// curve order, or the signature does not verify.
    #[error("invalid signature")]
    InvalidSignature,

    /// Leading recovery byte is outside of `0x1B..=0x1E`.
    #[error("invalid recovery byte: 0x{0:02x}")]
    InvalidRecoveryByte(u8),

    /// No valid public key can be recovered from a well-formed signature.
    #[error("public key recovery failed")]
    RecoveryFailed,

    /// Signing produced a degenerate nonce or signature.
    #[error("signing failed")]
    SigningFailed,

    /// The random number generator failed or kept producing unusable output.
    #[error("random source unavailable")]
    RandomSourceUnavailable,

    /// A numeric string could not be parsed in the given radix.
    #[error("malformed base-{radix} integer string")]
    Parse {
        /// Radix the string was parsed in (10 or 16).
        radix: u32,
    },
}

/// Result type with the `ecrecover` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Is this error caused by bad input, as opposed to a cryptographic
    /// impossibility or an unavailable random source?
    pub fn is_input_error(&self) -> bool {
        !matches!(
            self,
            Error::RecoveryFailed | Error::SigningFailed | Error::RandomSourceUnavailable
        )
    }

    pub(crate) fn check_len(expected: usize, bytes: &[u8]) -> Result<()> {
        if bytes.len() == expected {
            Ok(())
        } else {
            Err(Error::InvalidInputLength {
                expected,
                got: bytes.len(),
            })
        }
    }
}

impl From<der::Error> for Error {
    fn from(_: der::Error) -> Error {
        Error::MalformedSignature
    }
}

impl From<Error> for signature::Error {
    #[cfg(feature = "std")]
    fn from(err: Error) -> signature::Error {
        signature::Error::from_source(err)
    }

    #[cfg(not(feature = "std"))]
    fn from(_: Error) -> signature::Error {
        signature::Error::new()
    }
}
