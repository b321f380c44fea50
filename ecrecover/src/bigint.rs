//! Conversions between arbitrary-size non-negative integers and their
//! decimal, hexadecimal, and raw big endian byte representations.

use crate::{Error, Result};
use alloc::{string::String, vec::Vec};
use core::{fmt, str::FromStr};
use num_bigint::BigUint;

/// Arbitrary-size non-negative integer.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct BigInteger(BigUint);

impl BigInteger {
    /// Parse a base-10 string.
    pub fn from_dec_str(s: &str) -> Result<Self> {
        parse_radix(s, 10).map(Self)
    }

    /// Parse a base-16 string, with or without a `0x` prefix.
    ///
    /// Odd-length strings are accepted, i.e. `"abc"` is `0x0abc`.
    pub fn from_hex_str(s: &str) -> Result<Self> {
        parse_radix(strip_hex_prefix(s), 16).map(Self)
    }

    /// Parse a base-16 string which must describe whole bytes, i.e. have an
    /// even number of digits after the optional `0x` prefix.
    pub fn from_hex_exact(s: &str) -> Result<Self> {
        let digits = strip_hex_prefix(s);

        if digits.len() % 2 != 0 {
            return Err(Error::Parse { radix: 16 });
        }

        parse_radix(digits, 16).map(Self)
    }

    /// Decode an unsigned big endian integer. Leading zeroes are permitted.
    pub fn from_be_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(Error::InvalidInputLength {
                expected: 1,
                got: 0,
            });
        }

        Ok(Self(BigUint::from_bytes_be(bytes)))
    }

    /// Minimal big endian byte representation, without a sign byte.
    ///
    /// Zero is encoded as a single `0x00` byte, never as an empty buffer.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.to_bytes_be()
    }

    /// Lowercase hexadecimal representation, zero-padded to an even number
    /// of digits so it describes whole bytes.
    pub fn to_hex(&self) -> String {
        let mut hex = self.0.to_str_radix(16);

        if hex.len() % 2 != 0 {
            hex.insert(0, '0');
        }

        hex
    }

    /// Number of significant bits.
    pub fn bits(&self) -> u64 {
        self.0.bits()
    }
}

/// Parses a decimal string, or a hexadecimal one when prefixed with `0x`.
impl FromStr for BigInteger {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if has_hex_prefix(s) {
            Self::from_hex_str(s)
        } else {
            Self::from_dec_str(s)
        }
    }
}

impl fmt::Display for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::LowerHex for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<BigUint> for BigInteger {
    fn from(n: BigUint) -> BigInteger {
        BigInteger(n)
    }
}

impl From<BigInteger> for BigUint {
    fn from(n: BigInteger) -> BigUint {
        n.0
    }
}

/// Convert a decimal (or `0x`-prefixed hexadecimal) integer string into its
/// minimal big endian byte representation.
pub fn bigint_to_bytes(s: &str) -> Result<Vec<u8>> {
    s.parse::<BigInteger>().map(|n| n.to_bytes())
}

/// Convert a hexadecimal integer string into its minimal big endian byte
/// representation.
pub fn hex_to_bytes(s: &str) -> Result<Vec<u8>> {
    BigInteger::from_hex_str(s).map(|n| n.to_bytes())
}

/// Convert a decimal integer string into an even-length lowercase hex string.
pub fn bigint_to_hex(s: &str) -> Result<String> {
    BigInteger::from_dec_str(s).map(|n| n.to_hex())
}

fn has_hex_prefix(s: &str) -> bool {
    s.starts_with("0x") || s.starts_with("0X")
}

fn strip_hex_prefix(s: &str) -> &str {
    if has_hex_prefix(s) {
        &s[2..]
    } else {
        s
    }
}

/// `BigUint::parse_bytes` tolerates `_` separators and a leading `+`, so the
/// digits are checked up front.
fn parse_radix(digits: &str, radix: u32) -> Result<BigUint> {
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(Error::Parse { radix });
    }

    BigUint::parse_bytes(digits.as_bytes(), radix).ok_or(Error::Parse { radix })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use hex_literal::hex;

    #[test]
    fn decimal_to_bytes() {
        assert_eq!(bigint_to_bytes("255").unwrap(), vec![0xff]);
        assert_eq!(bigint_to_bytes("256").unwrap(), vec![0x01, 0x00]);
        assert_eq!(bigint_to_bytes("0").unwrap(), vec![0x00]);
        assert_eq!(
            bigint_to_bytes(
                "115792089237316195423570985008687907852837564279074904382605163141518161494337"
            )
            .unwrap(),
            hex!("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141")
        );
    }

    #[test]
    fn zero_is_one_byte() {
        assert_eq!(BigInteger::default().to_bytes(), vec![0x00]);
        assert_eq!(BigInteger::from_be_bytes(&[0, 0]).unwrap().to_bytes(), vec![0x00]);
        assert_eq!(hex_to_bytes("0x0").unwrap(), vec![0x00]);
        assert_eq!(BigInteger::default().to_hex(), "00");
    }

    #[test]
    fn prefixed_hex_to_bytes() {
        assert_eq!(bigint_to_bytes("0x0100").unwrap(), vec![0x01, 0x00]);
        assert_eq!(hex_to_bytes("000000ff").unwrap(), vec![0xff]);
        assert_eq!(hex_to_bytes("abc").unwrap(), vec![0x0a, 0xbc]);
    }

    #[test]
    fn decimal_to_hex_is_even_length() {
        assert_eq!(bigint_to_hex("15").unwrap(), "0f");
        assert_eq!(bigint_to_hex("16").unwrap(), "10");
        assert_eq!(bigint_to_hex("4096").unwrap(), "1000");
        assert_eq!(bigint_to_hex("0").unwrap(), "00");
    }

    #[test]
    fn rejects_malformed_strings() {
        assert_eq!(bigint_to_bytes(""), Err(Error::Parse { radix: 10 }));
        assert_eq!(bigint_to_bytes("12a"), Err(Error::Parse { radix: 10 }));
        assert_eq!(bigint_to_bytes("-1"), Err(Error::Parse { radix: 10 }));
        assert_eq!(bigint_to_bytes("+1"), Err(Error::Parse { radix: 10 }));
        assert_eq!(bigint_to_bytes("1_000"), Err(Error::Parse { radix: 10 }));
        assert_eq!(bigint_to_bytes("0x"), Err(Error::Parse { radix: 16 }));
        assert_eq!(hex_to_bytes("zz"), Err(Error::Parse { radix: 16 }));
        assert_eq!(bigint_to_hex("0x10"), Err(Error::Parse { radix: 10 }));
    }

    #[test]
    fn exact_hex_requires_whole_bytes() {
        assert_eq!(
            BigInteger::from_hex_exact("0abc").unwrap().to_bytes(),
            vec![0x0a, 0xbc]
        );
        assert_eq!(
            BigInteger::from_hex_exact("abc"),
            Err(Error::Parse { radix: 16 })
        );
    }

    #[test]
    fn byte_roundtrip_strips_leading_zeroes() {
        let n = BigInteger::from_be_bytes(&[0, 0, 1, 2]).unwrap();
        assert_eq!(n.to_bytes(), vec![1, 2]);
        assert_eq!(n.to_hex(), "0102");
        assert_eq!(n.bits(), 9);
        assert!(BigInteger::from_be_bytes(&[]).is_err());
    }

    #[test]
    fn formatting() {
        let n: BigInteger = "0x1ff".parse().unwrap();
        assert_eq!(alloc::format!("{n}"), "511");
        assert_eq!(alloc::format!("{n:x}"), "01ff");
    }
}
