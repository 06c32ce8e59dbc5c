//! Phase 1: the circuit-independent powers-of-tau accumulator.
//!
//! The accumulator holds powers of a secret τ in both groups together with
//! the blindings α and β:
//!
//! * `[τ⁰, …, τ^{2n−2}]₁`, `[τ⁰, …, τ^{n−1}]₂`
//! * `[ατ⁰, …, ατ^{n−1}]₁`, `[βτ⁰, …, βτ^{n−1}]₁`, `[β]₂`
//!
//! Participants take turns folding fresh secrets into the accumulator.
//! Each contribution carries knowledge-of-exponent proofs for its three
//! secrets and a SHA-256 transcript hash chaining it to its predecessor;
//! verification checks the proofs, that every vector is still a consistent
//! power sequence, and that the claimed secrets are the ones that were
//! actually applied.

use std::fmt;

use ark_ec::pairing::Pairing;
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{One, PrimeField};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use rand_core::RngCore;
use sha2::{Digest, Sha256};
use tracing::instrument;
use zeroize::Zeroize;

use crate::config::MAX_POWER;
use crate::errors::{ConsistencyCheck, Error};
use crate::key::{
    ALPHA_DOMAIN, BETA_DOMAIN, HASH_WRITE_EXPECT, PublicKey, TAU_DOMAIN, sample_nonzero,
};
use crate::ratio::{batch_scale, merge_pairs_mixed, power_pairs, same_ratio};

/// The accumulated SRS of one Phase-1 step.
pub struct SrsParameters<E: Pairing> {
    /// `[τⁱ]₁` for `i < 2n−1`.
    pub tau_g1: Vec<E::G1Affine>,
    /// `[τⁱ]₂` for `i < n`.
    pub tau_g2: Vec<E::G2Affine>,
    /// `[ατⁱ]₁` for `i < n`.
    pub alpha_tau_g1: Vec<E::G1Affine>,
    /// `[βτⁱ]₁` for `i < n`.
    pub beta_tau_g1: Vec<E::G1Affine>,
    /// `[β]₂`.
    pub beta_g2: E::G2Affine,
}

impl<E: Pairing> Clone for SrsParameters<E> {
    fn clone(&self) -> Self {
        Self {
            tau_g1: self.tau_g1.clone(),
            tau_g2: self.tau_g2.clone(),
            alpha_tau_g1: self.alpha_tau_g1.clone(),
            beta_tau_g1: self.beta_tau_g1.clone(),
            beta_g2: self.beta_g2,
        }
    }
}

impl<E: Pairing> PartialEq for SrsParameters<E> {
    fn eq(&self, other: &Self) -> bool {
        self.tau_g1 == other.tau_g1
            && self.tau_g2 == other.tau_g2
            && self.alpha_tau_g1 == other.alpha_tau_g1
            && self.beta_tau_g1 == other.beta_tau_g1
            && self.beta_g2 == other.beta_g2
    }
}

impl<E: Pairing> fmt::Debug for SrsParameters<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SrsParameters")
            .field("size", &self.size())
            .field("tau_g1", &self.tau_g1)
            .field("tau_g2", &self.tau_g2)
            .field("alpha_tau_g1", &self.alpha_tau_g1)
            .field("beta_tau_g1", &self.beta_tau_g1)
            .field("beta_g2", &self.beta_g2)
            .finish()
    }
}

impl<E: Pairing> SrsParameters<E> {
    /// Domain size `n`: the SRS supports circuits of up to `n` constraints.
    pub fn size(&self) -> usize {
        self.alpha_tau_g1.len()
    }

    /// `log₂` of the domain size.
    pub fn power(&self) -> u32 {
        self.size().trailing_zeros()
    }

    fn absorb(&self, hasher: &mut Sha256) {
        for point in &self.tau_g1 {
            point.serialize_compressed(&mut *hasher).expect(HASH_WRITE_EXPECT);
        }
        for point in &self.tau_g2 {
            point.serialize_compressed(&mut *hasher).expect(HASH_WRITE_EXPECT);
        }
        for point in &self.alpha_tau_g1 {
            point.serialize_compressed(&mut *hasher).expect(HASH_WRITE_EXPECT);
        }
        for point in &self.beta_tau_g1 {
            point.serialize_compressed(&mut *hasher).expect(HASH_WRITE_EXPECT);
        }
        self.beta_g2
            .serialize_compressed(&mut *hasher)
            .expect(HASH_WRITE_EXPECT);
    }

    fn matches_shape_of(&self, other: &Self) -> bool {
        self.tau_g1.len() == other.tau_g1.len()
            && self.tau_g2.len() == other.tau_g2.len()
            && self.alpha_tau_g1.len() == other.alpha_tau_g1.len()
            && self.beta_tau_g1.len() == other.beta_tau_g1.len()
    }

    pub(crate) fn has_consistent_shape(&self) -> bool {
        let n = self.size();
        n >= 2
            && n.is_power_of_two()
            && self.tau_g1.len() == 2 * n - 1
            && self.tau_g2.len() == n
            && self.beta_tau_g1.len() == n
    }
}

/// One participant's sealed Phase-1 contribution.
pub struct Contribution<E: Pairing> {
    /// The accumulated SRS after this participant.
    pub parameters: SrsParameters<E>,
    /// Knowledge proof for τ.
    pub tau_key: PublicKey<E>,
    /// Knowledge proof for α.
    pub alpha_key: PublicKey<E>,
    /// Knowledge proof for β.
    pub beta_key: PublicKey<E>,
    /// SHA-256 transcript hash sealing this contribution.
    pub hash: [u8; 32],
}

impl<E: Pairing> Clone for Contribution<E> {
    fn clone(&self) -> Self {
        Self {
            parameters: self.parameters.clone(),
            tau_key: self.tau_key.clone(),
            alpha_key: self.alpha_key.clone(),
            beta_key: self.beta_key.clone(),
            hash: self.hash,
        }
    }
}

impl<E: Pairing> PartialEq for Contribution<E> {
    fn eq(&self, other: &Self) -> bool {
        self.parameters == other.parameters
            && self.tau_key == other.tau_key
            && self.alpha_key == other.alpha_key
            && self.beta_key == other.beta_key
            && self.hash == other.hash
    }
}

impl<E: Pairing> fmt::Debug for Contribution<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Contribution")
            .field("parameters", &self.parameters)
            .field("tau_key", &self.tau_key)
            .field("alpha_key", &self.alpha_key)
            .field("beta_key", &self.beta_key)
            .field("hash", &self.hash)
            .finish()
    }
}

impl<E: Pairing> Contribution<E> {
    /// Creates the root contribution: every SRS entry is its group's
    /// generator (all secrets equal one) and the three proofs attest the
    /// scalar one against an empty transcript.
    #[instrument(level = "info", skip_all, fields(power))]
    pub fn initialize<R: RngCore + ?Sized>(power: usize, rng: &mut R) -> Result<Self, Error> {
        if power == 0 || power > MAX_POWER {
            return Err(Error::InvalidConfig(format!(
                "ceremony power must be in 1..={MAX_POWER}, got {power}"
            )));
        }
        let n = 1usize << power;
        let g1 = E::G1Affine::generator();
        let g2 = E::G2Affine::generator();

        let parameters = SrsParameters {
            tau_g1: vec![g1; 2 * n - 1],
            tau_g2: vec![g2; n],
            alpha_tau_g1: vec![g1; n],
            beta_tau_g1: vec![g1; n],
            beta_g2: g2,
        };

        let one = E::ScalarField::one();
        let mut contribution = Self {
            parameters,
            tau_key: PublicKey::generate(&one, &[], TAU_DOMAIN, rng),
            alpha_key: PublicKey::generate(&one, &[], ALPHA_DOMAIN, rng),
            beta_key: PublicKey::generate(&one, &[], BETA_DOMAIN, rng),
            hash: [0u8; 32],
        };
        contribution.hash = contribution.contribution_hash();
        Ok(contribution)
    }

    /// Folds fresh secrets τ, α, β into the predecessor's accumulator and
    /// seals the result. The secrets are wiped before returning.
    #[instrument(level = "info", skip_all, fields(size = prev.parameters.size()))]
    pub fn contribute<R: RngCore + ?Sized>(prev: &Self, rng: &mut R) -> Self {
        let mut tau = sample_nonzero::<E::ScalarField, _>(rng);
        let mut alpha = sample_nonzero::<E::ScalarField, _>(rng);
        let mut beta = sample_nonzero::<E::ScalarField, _>(rng);

        let tau_key = PublicKey::generate(&tau, &prev.hash, TAU_DOMAIN, rng);
        let alpha_key = PublicKey::generate(&alpha, &prev.hash, ALPHA_DOMAIN, rng);
        let beta_key = PublicKey::generate(&beta, &prev.hash, BETA_DOMAIN, rng);

        let n = prev.parameters.size();
        let mut tau_powers = Vec::with_capacity(prev.parameters.tau_g1.len());
        let mut acc = E::ScalarField::one();
        for _ in 0..prev.parameters.tau_g1.len() {
            tau_powers.push(acc);
            acc *= tau;
        }
        acc.zeroize();
        let mut alpha_powers: Vec<E::ScalarField> =
            tau_powers[..n].iter().map(|power| alpha * power).collect();
        let mut beta_powers: Vec<E::ScalarField> =
            tau_powers[..n].iter().map(|power| beta * power).collect();

        let parameters = SrsParameters {
            tau_g1: batch_scale::<E::G1>(&prev.parameters.tau_g1, &tau_powers),
            tau_g2: batch_scale::<E::G2>(&prev.parameters.tau_g2, &tau_powers[..n]),
            alpha_tau_g1: batch_scale::<E::G1>(&prev.parameters.alpha_tau_g1, &alpha_powers),
            beta_tau_g1: batch_scale::<E::G1>(&prev.parameters.beta_tau_g1, &beta_powers),
            beta_g2: prev
                .parameters
                .beta_g2
                .mul_bigint(beta.into_bigint())
                .into_affine(),
        };

        tau.zeroize();
        alpha.zeroize();
        beta.zeroize();
        tau_powers.zeroize();
        alpha_powers.zeroize();
        beta_powers.zeroize();

        let mut contribution = Self {
            parameters,
            tau_key,
            alpha_key,
            beta_key,
            hash: [0u8; 32],
        };
        contribution.hash = contribution.contribution_hash();
        contribution
    }

    /// Verifies this contribution against its predecessor.
    ///
    /// Checks, in order: structural shape, the sealed transcript hash, the
    /// three knowledge proofs, the ratio checks binding each proven secret
    /// to the accumulator update, and the batched power-sequence and
    /// cross-group consistency of every SRS vector.
    #[instrument(level = "info", skip_all, fields(size = self.parameters.size()))]
    pub fn verify(&self, prev: &Self) -> Result<(), Error> {
        let params = &self.parameters;
        if !params.has_consistent_shape() || !params.matches_shape_of(&prev.parameters) {
            return Err(Error::MalformedContribution(
                "parameter vector lengths do not match the predecessor".into(),
            ));
        }
        if self.hash != self.contribution_hash() {
            return Err(Error::MalformedContribution(
                "sealed hash does not match the transcript".into(),
            ));
        }

        let g1 = E::G1Affine::generator();
        let g2 = E::G2Affine::generator();
        // τ⁰ = 1 in both groups, for any chain of secrets.
        if params.tau_g1[0] != g1 || params.tau_g2[0] != g2 {
            return Err(Error::MalformedContribution(
                "first power of tau is not the generator".into(),
            ));
        }

        self.tau_key.verify(&prev.hash, TAU_DOMAIN, "tau")?;
        self.alpha_key.verify(&prev.hash, ALPHA_DOMAIN, "alpha")?;
        self.beta_key.verify(&prev.hash, BETA_DOMAIN, "beta")?;

        let n = params.size();
        let r_tau = self.tau_key.challenge_point(&prev.hash, TAU_DOMAIN);
        let r_alpha = self.alpha_key.challenge_point(&prev.hash, ALPHA_DOMAIN);
        let r_beta = self.beta_key.challenge_point(&prev.hash, BETA_DOMAIN);

        // The proven secrets are the ones that were applied.
        if !same_ratio::<E>(
            (
                prev.parameters.tau_g1[1].into_group(),
                params.tau_g1[1].into_group(),
            ),
            (r_tau, self.tau_key.x_r.into_group()),
        ) {
            return Err(Error::check(ConsistencyCheck::TauRatio));
        }
        if !same_ratio::<E>(
            (
                prev.parameters.alpha_tau_g1[0].into_group(),
                params.alpha_tau_g1[0].into_group(),
            ),
            (r_alpha, self.alpha_key.x_r.into_group()),
        ) {
            return Err(Error::check(ConsistencyCheck::AlphaRatio));
        }
        if !same_ratio::<E>(
            (
                prev.parameters.beta_tau_g1[0].into_group(),
                params.beta_tau_g1[0].into_group(),
            ),
            (r_beta, self.beta_key.x_r.into_group()),
        ) {
            return Err(Error::check(ConsistencyCheck::BetaRatio));
        }

        // Every consecutive pair of G1 powers advances by the same τ.
        let folded = power_pairs(&params.tau_g1);
        if !same_ratio::<E>(folded, (g2.into_group(), params.tau_g2[1].into_group())) {
            return Err(Error::check(ConsistencyCheck::TauProgression));
        }

        // The G2 powers mirror the G1 powers.
        let (tau_fold_g1, tau_fold_g2) = merge_pairs_mixed::<E>(&params.tau_g1[..n], &params.tau_g2);
        if !same_ratio::<E>((tau_fold_g1, g1.into_group()), (tau_fold_g2, g2.into_group())) {
            return Err(Error::check(ConsistencyCheck::TauConsistency));
        }

        // Every ατⁱ entry carries the same α.
        let (alpha_fold, tau_fold) = merge_pairs_mixed::<E>(&params.alpha_tau_g1, &params.tau_g2);
        if !same_ratio::<E>(
            (alpha_fold, params.alpha_tau_g1[0].into_group()),
            (tau_fold, g2.into_group()),
        ) {
            return Err(Error::check(ConsistencyCheck::AlphaConsistency));
        }

        // Every βτⁱ entry carries the same β, and β matches its G2 mirror.
        let (beta_fold, tau_fold) = merge_pairs_mixed::<E>(&params.beta_tau_g1, &params.tau_g2);
        if !same_ratio::<E>(
            (beta_fold, params.beta_tau_g1[0].into_group()),
            (tau_fold, g2.into_group()),
        ) {
            return Err(Error::check(ConsistencyCheck::BetaConsistency));
        }
        if !same_ratio::<E>(
            (params.beta_tau_g1[0].into_group(), g1.into_group()),
            (params.beta_g2.into_group(), g2.into_group()),
        ) {
            return Err(Error::check(ConsistencyCheck::BetaConsistency));
        }

        Ok(())
    }

    /// Verifies a root contribution by value: every SRS entry must equal
    /// its group's generator and every proof must attest the scalar one.
    pub fn verify_initial(&self) -> Result<(), Error> {
        let params = &self.parameters;
        if !params.has_consistent_shape() {
            return Err(Error::MalformedContribution(
                "inconsistent parameter vector lengths".into(),
            ));
        }
        if self.hash != self.contribution_hash() {
            return Err(Error::MalformedContribution(
                "sealed hash does not match the transcript".into(),
            ));
        }

        let g1 = E::G1Affine::generator();
        let g2 = E::G2Affine::generator();
        let all_generator = params.tau_g1.iter().all(|p| *p == g1)
            && params.tau_g2.iter().all(|p| *p == g2)
            && params.alpha_tau_g1.iter().all(|p| *p == g1)
            && params.beta_tau_g1.iter().all(|p| *p == g1)
            && params.beta_g2 == g2;
        if !all_generator {
            return Err(Error::MalformedContribution(
                "root parameters are not all generators".into(),
            ));
        }

        for (key, domain, secret) in [
            (&self.tau_key, TAU_DOMAIN, "tau"),
            (&self.alpha_key, ALPHA_DOMAIN, "alpha"),
            (&self.beta_key, BETA_DOMAIN, "beta"),
        ] {
            key.verify(&[], domain, secret)?;
            // The root secret is fixed to one: s·x = s and x·r = r.
            if key.s_x != key.s
                || key.x_r.into_group() != key.challenge_point(&[], domain)
            {
                return Err(Error::InvalidKeyProof { secret });
            }
        }
        Ok(())
    }

    /// Canonical SHA-256 transcript hash over the SRS and the three proofs.
    pub fn contribution_hash(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        self.parameters.absorb(&mut hasher);
        self.tau_key.absorb(&mut hasher);
        self.alpha_key.absorb(&mut hasher);
        self.beta_key.absorb(&mut hasher);
        hasher.finalize().into()
    }

    /// Writes the contribution in its canonical byte layout.
    pub fn write_to<W: std::io::Write>(&self, writer: &mut W) -> Result<(), Error> {
        writer.write_u32::<LittleEndian>(self.parameters.power())?;
        for point in &self.parameters.tau_g1 {
            point.serialize_compressed(&mut *writer)?;
        }
        for point in &self.parameters.tau_g2 {
            point.serialize_compressed(&mut *writer)?;
        }
        for point in &self.parameters.alpha_tau_g1 {
            point.serialize_compressed(&mut *writer)?;
        }
        for point in &self.parameters.beta_tau_g1 {
            point.serialize_compressed(&mut *writer)?;
        }
        self.parameters.beta_g2.serialize_compressed(&mut *writer)?;
        self.tau_key.write_to(writer)?;
        self.alpha_key.write_to(writer)?;
        self.beta_key.write_to(writer)?;
        writer.write_all(&self.hash)?;
        Ok(())
    }

    /// Reads a contribution, validating curve and subgroup membership of
    /// every point.
    pub fn read_from<R: std::io::Read>(reader: &mut R) -> Result<Self, Error> {
        let power = reader.read_u32::<LittleEndian>()? as usize;
        if power == 0 || power > MAX_POWER {
            return Err(Error::MalformedContribution(format!(
                "unsupported ceremony power {power}"
            )));
        }
        let n = 1usize << power;

        let read_g1 = |reader: &mut R, count: usize| -> Result<Vec<E::G1Affine>, Error> {
            (0..count)
                .map(|_| E::G1Affine::deserialize_compressed(&mut *reader).map_err(Error::from))
                .collect()
        };
        let read_g2 = |reader: &mut R, count: usize| -> Result<Vec<E::G2Affine>, Error> {
            (0..count)
                .map(|_| E::G2Affine::deserialize_compressed(&mut *reader).map_err(Error::from))
                .collect()
        };

        let tau_g1 = read_g1(reader, 2 * n - 1)?;
        let tau_g2 = read_g2(reader, n)?;
        let alpha_tau_g1 = read_g1(reader, n)?;
        let beta_tau_g1 = read_g1(reader, n)?;
        let beta_g2 = E::G2Affine::deserialize_compressed(&mut *reader)?;
        let tau_key = PublicKey::read_from(reader)?;
        let alpha_key = PublicKey::read_from(reader)?;
        let beta_key = PublicKey::read_from(reader)?;
        let mut hash = [0u8; 32];
        reader.read_exact(&mut hash)?;

        Ok(Self {
            parameters: SrsParameters {
                tau_g1,
                tau_g2,
                alpha_tau_g1,
                beta_tau_g1,
                beta_g2,
            },
            tau_key,
            alpha_key,
            beta_key,
            hash,
        })
    }
}

#[cfg(test)]
#[cfg(feature = "bn254")]
mod tests {
    use ark_bn254::{Bn254, Fr};
    use ark_ff::PrimeField;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn chain(power: usize, len: usize, rng: &mut StdRng) -> Vec<Contribution<Bn254>> {
        let mut contributions = vec![Contribution::initialize(power, rng).expect("initialize")];
        for _ in 1..len {
            let next = Contribution::contribute(contributions.last().expect("root"), rng);
            contributions.push(next);
        }
        contributions
    }

    #[test]
    fn ten_contribution_chain_verifies() {
        let mut rng = StdRng::seed_from_u64(41);
        let contributions = chain(8, 10, &mut rng);
        contributions[0].verify_initial().expect("valid root");
        for window in contributions.windows(2) {
            window[1].verify(&window[0]).expect("valid contribution");
        }
    }

    #[test]
    fn root_is_all_generators() {
        let mut rng = StdRng::seed_from_u64(42);
        let root = Contribution::<Bn254>::initialize(8, &mut rng).expect("initialize");
        let g1 = ark_bn254::G1Affine::generator();
        let g2 = ark_bn254::G2Affine::generator();

        assert_eq!(root.parameters.tau_g1.len(), 511);
        assert_eq!(root.parameters.tau_g2.len(), 256);
        assert!(root.parameters.tau_g1.iter().all(|p| *p == g1));
        assert!(root.parameters.tau_g2.iter().all(|p| *p == g2));
        assert_eq!(root.parameters.beta_g2, g2);
        root.verify_initial().expect("valid root");

        // The seal is a pure function of the contribution.
        assert_eq!(root.hash, root.contribution_hash());
    }

    #[test]
    fn rejects_power_out_of_range() {
        let mut rng = StdRng::seed_from_u64(43);
        assert!(matches!(
            Contribution::<Bn254>::initialize(0, &mut rng),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            Contribution::<Bn254>::initialize(MAX_POWER + 1, &mut rng),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn doubled_srs_entry_is_rejected() {
        let mut rng = StdRng::seed_from_u64(44);
        let contributions = chain(4, 6, &mut rng);

        let mut tampered = contributions[5].clone();
        tampered.parameters.tau_g1[3] = tampered.parameters.tau_g1[3]
            .mul_bigint(Fr::from(2u64).into_bigint())
            .into_affine();

        // Without resealing, the transcript hash gives it away.
        assert!(matches!(
            tampered.verify(&contributions[4]),
            Err(Error::MalformedContribution(_))
        ));

        // Resealed, the pairing checks on the tau powers must catch it.
        tampered.hash = tampered.contribution_hash();
        assert!(matches!(
            tampered.verify(&contributions[4]),
            Err(Error::InvalidContribution {
                check: ConsistencyCheck::TauProgression | ConsistencyCheck::TauConsistency
            })
        ));
    }

    #[test]
    fn tampered_alpha_vector_is_rejected() {
        let mut rng = StdRng::seed_from_u64(45);
        let contributions = chain(4, 2, &mut rng);

        let mut tampered = contributions[1].clone();
        tampered.parameters.alpha_tau_g1[2] = tampered.parameters.alpha_tau_g1[2]
            .mul_bigint(Fr::from(3u64).into_bigint())
            .into_affine();
        tampered.hash = tampered.contribution_hash();
        assert!(matches!(
            tampered.verify(&contributions[0]),
            Err(Error::InvalidContribution {
                check: ConsistencyCheck::AlphaConsistency
            })
        ));
    }

    #[test]
    fn foreign_key_proof_is_rejected() {
        let mut rng = StdRng::seed_from_u64(46);
        let contributions = chain(4, 3, &mut rng);

        // Graft c2's tau proof onto c1: it proves a different secret.
        let mut tampered = contributions[1].clone();
        tampered.tau_key = contributions[2].tau_key.clone();
        tampered.hash = tampered.contribution_hash();
        assert!(matches!(
            tampered.verify(&contributions[0]),
            Err(Error::InvalidKeyProof { secret: "tau" })
        ));
    }

    #[test]
    fn marshal_roundtrip_preserves_hash() {
        let mut rng = StdRng::seed_from_u64(47);
        let contributions = chain(4, 2, &mut rng);

        for contribution in &contributions {
            let mut buf = Vec::new();
            contribution.write_to(&mut buf).expect("write");
            let restored = Contribution::<Bn254>::read_from(&mut buf.as_slice()).expect("read");
            assert_eq!(contribution, &restored);
            assert_eq!(
                contribution.contribution_hash(),
                restored.contribution_hash()
            );
        }
    }

    #[test]
    fn hash_binds_every_parameter() {
        let mut rng = StdRng::seed_from_u64(48);
        let contributions = chain(4, 2, &mut rng);
        let sealed = &contributions[1];

        let mut tampered = sealed.clone();
        tampered.parameters.beta_g2 = tampered
            .parameters
            .beta_g2
            .mul_bigint(Fr::from(2u64).into_bigint())
            .into_affine();
        assert_ne!(sealed.contribution_hash(), tampered.contribution_hash());
    }
}
