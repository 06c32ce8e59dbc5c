//! Knowledge-of-exponent proofs binding a contribution to its secret.
//!
//! A contributor proves knowledge of the scalar `x` they multiplied into the
//! SRS without revealing it: they publish `s` (a fresh G1 point), `s·x`, and
//! `r·x`, where the challenge point `r ∈ G2` is derived by hashing the
//! previous transcript hash, a domain byte and the `(s, s·x)` pair. The
//! proof holds iff `e(s, x·r) = e(s·x, r)`, and because `r` depends on the
//! predecessor's hash the proof cannot be replayed into another chain.

use std::fmt;

use ark_ec::pairing::Pairing;
use ark_ec::{AffineRepr, CurveGroup, PrimeGroup};
use ark_ff::{PrimeField, Zero};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::UniformRand;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rand_core::RngCore;
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::errors::Error;
use crate::ratio::same_ratio;

/// Domain byte separating the τ proof inside one transcript step.
pub(crate) const TAU_DOMAIN: u8 = 1;
/// Domain byte for the α proof.
pub(crate) const ALPHA_DOMAIN: u8 = 2;
/// Domain byte for the β proof.
pub(crate) const BETA_DOMAIN: u8 = 3;
/// Domain byte for the Phase-2 δ proof.
pub(crate) const DELTA_DOMAIN: u8 = 1;

pub(crate) const HASH_WRITE_EXPECT: &str = "writing into a hasher cannot fail";

/// Non-interactive proof of knowledge of one contributed scalar.
pub struct PublicKey<E: Pairing> {
    /// Freshly sampled G1 base point.
    pub s: E::G1Affine,
    /// `s` multiplied by the secret.
    pub s_x: E::G1Affine,
    /// The derived G2 challenge multiplied by the secret.
    pub x_r: E::G2Affine,
}

impl<E: Pairing> Clone for PublicKey<E> {
    fn clone(&self) -> Self {
        Self {
            s: self.s,
            s_x: self.s_x,
            x_r: self.x_r,
        }
    }
}

impl<E: Pairing> fmt::Debug for PublicKey<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicKey")
            .field("s", &self.s)
            .field("s_x", &self.s_x)
            .field("x_r", &self.x_r)
            .finish()
    }
}

impl<E: Pairing> PartialEq for PublicKey<E> {
    fn eq(&self, other: &Self) -> bool {
        self.s == other.s && self.s_x == other.s_x && self.x_r == other.x_r
    }
}

impl<E: Pairing> PublicKey<E> {
    /// Proves knowledge of `x` against the predecessor's transcript hash.
    ///
    /// `prev_hash` is empty for a root contribution.
    pub(crate) fn generate<R: RngCore + ?Sized>(
        x: &E::ScalarField,
        prev_hash: &[u8],
        domain: u8,
        rng: &mut R,
    ) -> Self {
        let mut base = sample_nonzero::<E::ScalarField, _>(rng);
        let s = E::G1::generator().mul_bigint(base.into_bigint()).into_affine();
        base.zeroize();

        let s_x = s.mul_bigint(x.into_bigint()).into_affine();
        let r = challenge::<E>(prev_hash, domain, &s, &s_x);
        let x_r = r.mul_bigint(x.into_bigint()).into_affine();
        Self { s, s_x, x_r }
    }

    /// Re-derives the challenge and checks the pairing relation.
    pub(crate) fn verify(&self, prev_hash: &[u8], domain: u8, secret: &'static str) -> Result<(), Error> {
        // An identity base would satisfy the relation for any exponent.
        if self.s.is_zero() || self.s_x.is_zero() {
            return Err(Error::InvalidKeyProof { secret });
        }
        let r = self.challenge_point(prev_hash, domain);
        if !same_ratio::<E>(
            (self.s.into_group(), self.s_x.into_group()),
            (r, self.x_r.into_group()),
        ) {
            return Err(Error::InvalidKeyProof { secret });
        }
        Ok(())
    }

    /// The G2 challenge this proof answers under the given transcript.
    pub(crate) fn challenge_point(&self, prev_hash: &[u8], domain: u8) -> E::G2 {
        challenge::<E>(prev_hash, domain, &self.s, &self.s_x)
    }

    /// Feeds the proof into a transcript hasher in canonical order.
    pub(crate) fn absorb(&self, hasher: &mut Sha256) {
        self.s
            .serialize_compressed(&mut *hasher)
            .expect(HASH_WRITE_EXPECT);
        self.s_x
            .serialize_compressed(&mut *hasher)
            .expect(HASH_WRITE_EXPECT);
        self.x_r
            .serialize_compressed(&mut *hasher)
            .expect(HASH_WRITE_EXPECT);
    }

    pub(crate) fn write_to<W: std::io::Write>(&self, writer: &mut W) -> Result<(), Error> {
        self.s.serialize_compressed(&mut *writer)?;
        self.s_x.serialize_compressed(&mut *writer)?;
        self.x_r.serialize_compressed(&mut *writer)?;
        Ok(())
    }

    pub(crate) fn read_from<R: std::io::Read>(reader: &mut R) -> Result<Self, Error> {
        let s = E::G1Affine::deserialize_compressed(&mut *reader)?;
        let s_x = E::G1Affine::deserialize_compressed(&mut *reader)?;
        let x_r = E::G2Affine::deserialize_compressed(&mut *reader)?;
        Ok(Self { s, s_x, x_r })
    }
}

/// Challenge derivation: `r = hash_to_g2(SHA-256(prev ‖ domain ‖ s ‖ s·x))`.
fn challenge<E: Pairing>(
    prev_hash: &[u8],
    domain: u8,
    s: &E::G1Affine,
    s_x: &E::G1Affine,
) -> E::G2 {
    let mut hasher = Sha256::new();
    hasher.update(prev_hash);
    hasher.update([domain]);
    s.serialize_compressed(&mut hasher).expect(HASH_WRITE_EXPECT);
    s_x.serialize_compressed(&mut hasher).expect(HASH_WRITE_EXPECT);
    hash_to_g2::<E>(hasher.finalize().into())
}

/// Maps a digest onto G2 by sampling a uniform scalar from a digest-seeded
/// ChaCha20 stream and multiplying the generator. Every resulting point is
/// in the prime-order subgroup by construction.
pub(crate) fn hash_to_g2<E: Pairing>(digest: [u8; 32]) -> E::G2 {
    let mut rng = ChaCha20Rng::from_seed(digest);
    let mut scalar = sample_nonzero::<E::ScalarField, _>(&mut rng);
    let point = E::G2::generator().mul_bigint(scalar.into_bigint());
    scalar.zeroize();
    point
}

/// Uniform sample from Fr*.
pub(crate) fn sample_nonzero<F: PrimeField, R: RngCore + ?Sized>(rng: &mut R) -> F {
    loop {
        let scalar = F::rand(rng);
        if !scalar.is_zero() {
            return scalar;
        }
    }
}

#[cfg(test)]
#[cfg(feature = "bn254")]
mod tests {
    use ark_bn254::{Bn254, Fr};
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn proof_roundtrip() {
        let mut rng = StdRng::seed_from_u64(11);
        let x = Fr::rand(&mut rng);
        let prev_hash = [3u8; 32];

        let key = PublicKey::<Bn254>::generate(&x, &prev_hash, TAU_DOMAIN, &mut rng);
        key.verify(&prev_hash, TAU_DOMAIN, "tau").expect("valid proof");
    }

    #[test]
    fn proof_is_bound_to_transcript_and_domain() {
        let mut rng = StdRng::seed_from_u64(12);
        let x = Fr::rand(&mut rng);
        let prev_hash = [5u8; 32];

        let key = PublicKey::<Bn254>::generate(&x, &prev_hash, ALPHA_DOMAIN, &mut rng);
        assert!(matches!(
            key.verify(&prev_hash, BETA_DOMAIN, "beta"),
            Err(Error::InvalidKeyProof { secret: "beta" })
        ));
        assert!(matches!(
            key.verify(&[6u8; 32], ALPHA_DOMAIN, "alpha"),
            Err(Error::InvalidKeyProof { .. })
        ));
    }

    #[test]
    fn tampered_response_fails() {
        let mut rng = StdRng::seed_from_u64(13);
        let x = Fr::rand(&mut rng);

        let mut key = PublicKey::<Bn254>::generate(&x, &[], DELTA_DOMAIN, &mut rng);
        key.x_r = key.x_r.mul_bigint(Fr::from(2u64).into_bigint()).into_affine();
        assert!(key.verify(&[], DELTA_DOMAIN, "delta").is_err());
    }

    #[test]
    fn serialization_roundtrip() {
        let mut rng = StdRng::seed_from_u64(14);
        let x = Fr::rand(&mut rng);
        let key = PublicKey::<Bn254>::generate(&x, &[], TAU_DOMAIN, &mut rng);

        let mut buf = Vec::new();
        key.write_to(&mut buf).expect("write");
        let restored = PublicKey::<Bn254>::read_from(&mut buf.as_slice()).expect("read");
        assert_eq!(key, restored);
    }

    #[test]
    fn hash_to_g2_is_deterministic() {
        let a = hash_to_g2::<Bn254>([9u8; 32]);
        let b = hash_to_g2::<Bn254>([9u8; 32]);
        let c = hash_to_g2::<Bn254>([10u8; 32]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
