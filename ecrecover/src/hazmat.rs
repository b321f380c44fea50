//! Low-level ECDSA primitives.
//!
//! # ⚠️ Warning: Hazmat!
//!
//! YOU PROBABLY DON'T WANT TO USE THESE!
//!
//! These primitives are easy-to-misuse low-level interfaces.
//!
//! If you are an end user / non-expert in cryptography, do not use these!
//! Failure to use them correctly can lead to catastrophic failures including
//! FULL PRIVATE KEY RECOVERY!

use crate::{curve::ORDER, Error, RecoveryId, Result, Signature};
use k256::{
    elliptic_curve::{
        bigint::{ArrayEncoding, Limb, U256},
        ops::Reduce,
        point::{AffineCoordinates, DecompressPoint},
        subtle::Choice,
        PrimeField,
    },
    AffinePoint, FieldBytes, NonZeroScalar, ProjectivePoint, PublicKey, Scalar,
};
use sha2::Sha256;

/// Sign a prehashed message with the given ephemeral scalar `k`.
///
/// Accepts the following arguments:
///
/// - `d`: secret scalar.
/// - `k`: ephemeral scalar value. MUST BE UNIFORMLY RANDOM OR DERIVED PER RFC6979!!!
/// - `z`: message digest to be signed. MUST BE OUTPUT OF A CRYPTOGRAPHICALLY
///   SECURE DIGEST ALGORITHM!!!
///
/// The returned signature is always normalized to low-S form, with the
/// [`RecoveryId`] adjusted to match.
#[allow(non_snake_case)]
pub fn sign_prehashed(
    d: &Scalar,
    k: &Scalar,
    z: &FieldBytes,
) -> Result<(Signature, RecoveryId)> {
    let z = <Scalar as Reduce<U256>>::reduce_bytes(z);

    // Compute scalar inversion of 𝑘
    let k_inv = Option::<Scalar>::from(k.invert()).ok_or(Error::SigningFailed)?;

    // Compute 𝑹 = 𝑘×𝑮
    let R = (ProjectivePoint::GENERATOR * k).to_affine();

    // Lift x-coordinate of 𝑹 (element of base field) into a serialized big
    // integer, then reduce it into an element of the scalar field
    let x = R.x();
    let r = <Scalar as Reduce<U256>>::reduce_bytes(&x);
    let x_is_reduced = r.to_repr() != x;

    // Compute 𝒔 as a signature over 𝒓 and 𝒛.
    let s = k_inv * (z + (r * d));

    let signature = Signature::from_scalars(r, s).map_err(|_| Error::SigningFailed)?;
    let recovery_id = RecoveryId::new(R.y_is_odd().into(), x_is_reduced);

    Ok(match signature.normalize_s() {
        Some(normalized) => (normalized, recovery_id.flip_y()),
        None => (signature, recovery_id),
    })
}

/// Sign a prehashed message deterministically using the method described in
/// [RFC6979] for computing the ephemeral scalar `k`, with HMAC-SHA-256.
///
/// Accepts the following parameters:
/// - `d`: secret scalar.
/// - `z`: message digest to be signed.
/// - `ad`: optional additional data, e.g. added entropy from an RNG
///
/// [RFC6979]: https://datatracker.ietf.org/doc/html/rfc6979
pub fn sign_prehashed_rfc6979(
    d: &NonZeroScalar,
    z: &FieldBytes,
    ad: &[u8],
) -> Result<(Signature, RecoveryId)> {
    // RFC6979 § 3.2 step b: `h1` is `bits2octets(H(m))`, i.e. reduced mod n
    let z2 = <Scalar as Reduce<U256>>::reduce_bytes(z);
    let k = rfc6979::generate_k::<Sha256, _>(
        &d.to_repr(),
        &ORDER.to_be_byte_array(),
        &z2.to_repr(),
        ad,
    );
    let k = Option::<NonZeroScalar>::from(NonZeroScalar::from_repr(k))
        .ok_or(Error::SigningFailed)?;

    sign_prehashed(d, &k, z)
}

/// Verify a prehashed message against the provided signature.
///
/// High-S signatures are accepted.
pub fn verify_prehashed(q: &AffinePoint, z: &FieldBytes, sig: &Signature) -> Result<()> {
    let z = <Scalar as Reduce<U256>>::reduce_bytes(z);
    let (r, s) = (sig.r(), sig.s());
    let s_inv = Option::<Scalar>::from(s.invert()).ok_or(Error::InvalidSignature)?;
    let u1 = z * s_inv;
    let u2 = r * s_inv;
    let x = ((ProjectivePoint::GENERATOR * u1) + (ProjectivePoint::from(*q) * u2))
        .to_affine()
        .x();

    if <Scalar as Reduce<U256>>::reduce_bytes(&x) == r {
        Ok(())
    } else {
        Err(Error::InvalidSignature)
    }
}

/// Recover the public key which produced `sig` over the prehashed message
/// `z`, selecting the candidate point `𝑹` identified by `recovery_id`.
///
/// The recovered key is checked to verify the signature before it is
/// returned.
#[allow(non_snake_case)]
pub fn recover_prehashed(
    z: &FieldBytes,
    sig: &Signature,
    recovery_id: RecoveryId,
) -> Result<PublicKey> {
    let (r, s) = (sig.r(), sig.s());

    // x-coordinate of 𝑹 is either 𝒓, or 𝒓 + 𝒏 when it overflowed the order
    let x = if recovery_id.is_x_reduced() {
        let (x, carry) = U256::from_be_byte_array(r.to_repr()).adc(&ORDER, Limb::ZERO);

        if carry.0 != 0 {
            return Err(Error::RecoveryFailed);
        }

        x.to_be_byte_array()
    } else {
        r.to_repr()
    };

    // Fails when 𝒙 is not below the field modulus or not on the curve
    let R = Option::<AffinePoint>::from(AffinePoint::decompress(
        &x,
        Choice::from(u8::from(recovery_id.is_y_odd())),
    ))
    .ok_or(Error::RecoveryFailed)?;

    // 𝑸 = 𝒓⁻¹(𝒔𝑹 − 𝒛𝑮)
    let z_scalar = <Scalar as Reduce<U256>>::reduce_bytes(z);
    let r_inv = Option::<Scalar>::from(r.invert()).ok_or(Error::RecoveryFailed)?;
    let u1 = -(r_inv * z_scalar);
    let u2 = r_inv * s;
    let Q = (ProjectivePoint::GENERATOR * u1) + (ProjectivePoint::from(R) * u2);

    // Rejects the identity
    let public_key = PublicKey::from_affine(Q.to_affine()).map_err(|_| Error::RecoveryFailed)?;

    verify_prehashed(public_key.as_affine(), z, sig).map_err(|_| Error::RecoveryFailed)?;

    Ok(public_key)
}
