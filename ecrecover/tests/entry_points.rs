//! Boundary behavior of the top-level signing and recovery functions.

use ecrecover::{Error, Keypair};
use hex_literal::hex;
use rand_core::{CryptoRng, RngCore};

const ONE: [u8; 32] = hex!("0000000000000000000000000000000000000000000000000000000000000001");
const ORDER: [u8; 32] = hex!("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141");
const ORDER_MINUS_ONE: [u8; 32] =
    hex!("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364140");
const DIGEST: [u8; 32] = hex!("AF2BDBE1AA9B6EC1E2ADE1D694F41FC71A831D0268E9891562113D8A62ADD1BF");

const G_COMPRESSED: [u8; 33] =
    hex!("0279BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798");
const G_UNCOMPRESSED: [u8; 65] = hex!(
    "0479BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798"
    "483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8"
);

/// Deterministic xorshift generator standing in for the OS RNG.
struct SeededRng(u64);

impl RngCore for SeededRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let word = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&word[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for SeededRng {}

/// Random source which is permanently unavailable.
struct FailingRng;

impl RngCore for FailingRng {
    fn next_u32(&mut self) -> u32 {
        unimplemented!()
    }

    fn next_u64(&mut self) -> u64 {
        unimplemented!()
    }

    fn fill_bytes(&mut self, _: &mut [u8]) {
        unimplemented!()
    }

    fn try_fill_bytes(&mut self, _: &mut [u8]) -> Result<(), rand_core::Error> {
        Err(rand_core::Error::from(
            core::num::NonZeroU32::new(rand_core::Error::CUSTOM_START).unwrap(),
        ))
    }
}

impl CryptoRng for FailingRng {}

#[test]
fn private_key_validity() {
    assert!(!ecrecover::is_valid_private_key(&[0u8; 32]));
    assert!(!ecrecover::is_valid_private_key(&ORDER));
    assert!(!ecrecover::is_valid_private_key(&[0xff; 32]));
    assert!(ecrecover::is_valid_private_key(&ONE));
    assert!(ecrecover::is_valid_private_key(&ORDER_MINUS_ONE));

    for len in [0, 1, 31, 33, 64] {
        assert!(!ecrecover::is_valid_private_key(&vec![1u8; len]));
    }
}

#[test]
fn generator_scenario() {
    let keypair = ecrecover::keypair_from_private_key(&ONE).unwrap();
    assert_eq!(keypair.public_key().to_compressed(), G_COMPRESSED);
    assert_eq!(keypair.public_key().to_uncompressed(), G_UNCOMPRESSED);

    let digest = [0u8; 32];
    let wire = ecrecover::sign(&ONE, &digest).unwrap();
    assert_eq!(ecrecover::recover(&wire, &digest).unwrap(), G_COMPRESSED);
}

#[test]
fn seeded_generation_is_reproducible() {
    let first = ecrecover::generate_keypair_with_rng(&mut SeededRng(0x5eed)).unwrap();
    let second = ecrecover::generate_keypair_with_rng(&mut SeededRng(0x5eed)).unwrap();
    assert_eq!(first, second);

    let other = ecrecover::generate_keypair_with_rng(&mut SeededRng(0x5eee)).unwrap();
    assert_ne!(first, other);
}

#[test]
fn failing_random_source() {
    assert_eq!(
        ecrecover::generate_keypair_with_rng(&mut FailingRng),
        Err(Error::RandomSourceUnavailable)
    );
}

#[cfg(feature = "getrandom")]
#[test]
fn os_generation() {
    let keypair = ecrecover::generate_keypair().unwrap();
    let wire = ecrecover::sign(&keypair.private_key().to_bytes(), &DIGEST).unwrap();
    assert_eq!(
        ecrecover::recover(&wire, &DIGEST).unwrap(),
        keypair.public_key().to_compressed()
    );
}

#[test]
fn sign_input_validation() {
    assert_eq!(
        ecrecover::sign(&ONE[..31], &DIGEST),
        Err(Error::InvalidInputLength {
            expected: 32,
            got: 31
        })
    );
    assert_eq!(
        ecrecover::sign(&ONE, &DIGEST[..31]),
        Err(Error::InvalidInputLength {
            expected: 32,
            got: 31
        })
    );
    assert_eq!(ecrecover::sign(&[0u8; 32], &DIGEST), Err(Error::InvalidPrivateKey));
    assert_eq!(ecrecover::sign(&ORDER, &DIGEST), Err(Error::InvalidPrivateKey));
    assert_eq!(ecrecover::sign_der(&ORDER, &DIGEST), Err(Error::InvalidPrivateKey));
}

#[test]
fn wire_and_der_forms_agree() {
    let wire = ecrecover::sign(&ORDER_MINUS_ONE, &DIGEST).unwrap();
    let der = ecrecover::sign_der(&ORDER_MINUS_ONE, &DIGEST).unwrap();

    assert!((0x1b..=0x1e).contains(&wire[0]));
    assert_eq!(&wire[1..], der.as_slice());
    assert!(der.len() <= 72);
}

#[test]
fn recovery_byte_boundaries() {
    let keypair = Keypair::from_secret_bytes(&ORDER_MINUS_ONE).unwrap();
    let mut wire = ecrecover::sign(&ORDER_MINUS_ONE, &DIGEST).unwrap();
    let expected = keypair.public_key().to_compressed();

    for byte in [0x00, 0x1a, 0x1f, 0x20, 0xff] {
        wire[0] = byte;
        assert_eq!(
            ecrecover::recover(&wire, &DIGEST),
            Err(Error::InvalidRecoveryByte(byte))
        );
    }

    // Every valid byte parses; exactly one names the signer
    let mut matches = 0;
    for byte in 0x1b..=0x1e {
        wire[0] = byte;
        match ecrecover::recover(&wire, &DIGEST) {
            Ok(key) if key == expected => matches += 1,
            Ok(_) => {}
            Err(err) => assert_eq!(err, Error::RecoveryFailed),
        }
    }
    assert_eq!(matches, 1);
}

#[test]
fn malformed_der_rejected() {
    let wire = ecrecover::sign(&ONE, &DIGEST).unwrap();

    // Truncated
    assert_eq!(
        ecrecover::recover(&wire[..wire.len() - 1], &DIGEST),
        Err(Error::MalformedSignature)
    );

    // Declared SEQUENCE length off by one
    let mut bad = wire.clone();
    bad[2] += 1;
    assert_eq!(ecrecover::recover(&bad, &DIGEST), Err(Error::MalformedSignature));

    // Trailing byte
    let mut bad = wire.clone();
    bad.push(0);
    assert_eq!(ecrecover::recover(&bad, &DIGEST), Err(Error::MalformedSignature));

    // SET instead of SEQUENCE
    let mut bad = wire.clone();
    bad[1] = 0x31;
    assert_eq!(ecrecover::recover(&bad, &DIGEST), Err(Error::MalformedSignature));

    // INTEGER with 33 significant bytes
    let mut bad = hex!("1b 30 26 02 21").to_vec();
    bad.extend_from_slice(&[0x01; 33]);
    bad.extend_from_slice(&hex!("020101"));
    assert_eq!(ecrecover::recover(&bad, &DIGEST), Err(Error::MalformedSignature));

    // Recovery byte only
    assert_eq!(ecrecover::recover(&[0x1b], &DIGEST), Err(Error::MalformedSignature));
    assert_eq!(ecrecover::recover(&[], &DIGEST), Err(Error::MalformedSignature));
}

#[test]
fn out_of_range_components_rejected() {
    // r = n
    let mut bad = hex!("1b 30 26 02 21 00").to_vec();
    bad.extend_from_slice(&ORDER);
    bad.extend_from_slice(&hex!("020101"));
    assert_eq!(ecrecover::recover(&bad, &DIGEST), Err(Error::InvalidSignature));
}

#[test]
fn recover_digest_length() {
    let wire = ecrecover::sign(&ONE, &DIGEST).unwrap();
    assert_eq!(
        ecrecover::recover(&wire, &DIGEST[..31]),
        Err(Error::InvalidInputLength {
            expected: 32,
            got: 31
        })
    );
}

#[test]
fn compressed_formatting() {
    assert_eq!(
        ecrecover::format_public_key_compressed(&G_UNCOMPRESSED).unwrap(),
        "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
    );

    assert_eq!(
        ecrecover::format_public_key_compressed(&G_COMPRESSED),
        Err(Error::InvalidPublicKey)
    );

    let mut bad = G_UNCOMPRESSED;
    bad[64] ^= 1;
    assert_eq!(
        ecrecover::format_public_key_compressed(&bad),
        Err(Error::InvalidPublicKey)
    );
}

#[test]
fn curve_order_and_bigints() {
    assert_eq!(ecrecover::curve_order().as_slice(), &ORDER);
    assert_eq!(
        ecrecover::curve_order_hex(),
        "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141"
    );

    assert_eq!(ecrecover::bigint_to_bytes("65535").unwrap(), vec![0xff, 0xff]);
    assert_eq!(ecrecover::bigint_to_bytes("0x0100").unwrap(), vec![0x01, 0x00]);
    assert_eq!(ecrecover::bigint_to_hex("4095").unwrap(), "0fff");
    assert_eq!(ecrecover::hex_to_bytes("abc").unwrap(), vec![0x0a, 0xbc]);

    assert_eq!(ecrecover::bigint_to_bytes("12a"), Err(Error::Parse { radix: 10 }));
    assert_eq!(ecrecover::bigint_to_hex(""), Err(Error::Parse { radix: 10 }));
    assert_eq!(ecrecover::hex_to_bytes("xyz"), Err(Error::Parse { radix: 16 }));
}
