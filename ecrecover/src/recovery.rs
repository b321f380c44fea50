//! Public key recovery support.

use crate::{Error, Result};

/// Recovery IDs, a.k.a. "recid".
///
/// This is an integer value `0`, `1`, `2`, or `3` included along with a
/// signature which is used during the recovery process to select the correct
/// public key from the signature.
///
/// It consists of two bits of information:
///
/// - low bit (0/1): was the y-coordinate of the affine point resulting from
///   the fixed-base multiplication 𝑘×𝑮 odd? This part of the algorithm
///   functions similar to point decompression.
/// - hi bit (2/3): did the affine x-coordinate of 𝑘×𝑮 overflow the order of
///   the scalar field, requiring a reduction when computing `r`?
///
/// On the wire the recovery ID is carried as a single byte offset by
/// [`RecoveryId::WIRE_OFFSET`] (Bitcoin/Ethereum `v = 27 + recid`).
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct RecoveryId(u8);

impl RecoveryId {
    /// Maximum supported value for the recovery ID (inclusive).
    pub const MAX: u8 = 3;

    /// Offset added to the recovery ID when serialized as a recovery byte.
    pub const WIRE_OFFSET: u8 = 27;

    /// Create a new [`RecoveryId`] from the following 1-bit arguments:
    ///
    /// - `is_y_odd`: is the affine y-coordinate of 𝑘×𝑮 odd?
    /// - `is_x_reduced`: did the affine x-coordinate of 𝑘×𝑮 overflow the curve order?
    pub const fn new(is_y_odd: bool, is_x_reduced: bool) -> Self {
        Self(((is_x_reduced as u8) << 1) | (is_y_odd as u8))
    }

    /// Did the affine x-coordinate of 𝑘×𝑮 overflow the curve order?
    pub const fn is_x_reduced(self) -> bool {
        (self.0 & 0b10) != 0
    }

    /// Is the affine y-coordinate of 𝑘×𝑮 odd?
    pub const fn is_y_odd(self) -> bool {
        (self.0 & 1) != 0
    }

    /// Recovery ID for the same `R` with the opposite y-coordinate parity,
    /// i.e. the one matching a signature whose `s` has been negated.
    pub const fn flip_y(self) -> Self {
        Self(self.0 ^ 1)
    }

    /// Convert a `u8` into a [`RecoveryId`].
    pub const fn from_byte(byte: u8) -> Option<Self> {
        if byte <= Self::MAX {
            Some(Self(byte))
        } else {
            None
        }
    }

    /// Convert this [`RecoveryId`] into a `u8`.
    pub const fn to_byte(self) -> u8 {
        self.0
    }

    /// Parse a recovery byte in the range `0x1B..=0x1E`.
    pub fn from_wire_byte(byte: u8) -> Result<Self> {
        byte.checked_sub(Self::WIRE_OFFSET)
            .and_then(Self::from_byte)
            .ok_or(Error::InvalidRecoveryByte(byte))
    }

    /// Serialize as a recovery byte in the range `0x1B..=0x1E`.
    pub const fn to_wire_byte(self) -> u8 {
        self.0 + Self::WIRE_OFFSET
    }
}

impl TryFrom<u8> for RecoveryId {
    type Error = Error;

    fn try_from(byte: u8) -> Result<Self> {
        Self::from_byte(byte).ok_or(Error::InvalidRecoveryByte(byte))
    }
}

impl From<RecoveryId> for u8 {
    fn from(id: RecoveryId) -> u8 {
        id.0
    }
}
