//! secp256k1 domain constants.
//!
//! The secp256k1 elliptic curve: y² = x³ + 7 over a ~256-bit prime field,
//! specified in SEC 2: Recommended Elliptic Curve Domain Parameters:
//!
//! <http://www.secg.org/sec2-v2.pdf>

use alloc::string::String;
use k256::{
    elliptic_curve::bigint::{ArrayEncoding, U256},
    FieldBytes,
};

/// Order of the secp256k1 scalar field (`n`).
pub const ORDER: U256 =
    U256::from_be_hex("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141");

/// Size of a serialized scalar or field element in bytes.
pub const FIELD_SIZE: usize = 32;

/// Size of a SEC1 compressed point in bytes.
pub const COMPRESSED_POINT_SIZE: usize = 33;

/// Size of a SEC1 uncompressed point in bytes.
pub const UNCOMPRESSED_POINT_SIZE: usize = 65;

/// Curve order serialized as 32 big endian bytes.
pub fn curve_order() -> FieldBytes {
    ORDER.to_be_byte_array()
}

/// Curve order as a lowercase hex string.
pub fn curve_order_hex() -> String {
    hex::encode(curve_order())
}
