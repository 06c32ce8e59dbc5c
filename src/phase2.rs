//! Phase 2: specializing a Phase-1 SRS to one circuit.
//!
//! [`Contribution::prepare`] evaluates the circuit's QAP polynomials at the
//! hidden τ by switching the Phase-1 vectors into the Lagrange basis, and
//! seeds a second contribution chain that mixes a circuit-specific δ into
//! the proving key: Δ accumulates the δ's, while the L and Z vectors are
//! scaled by their inverses. The [`Evaluations`] produced alongside are
//! δ-independent and shared by every verifier of the chain.

use std::fmt;

use ark_ec::pairing::Pairing;
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{Field, One, PrimeField, Zero};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use rand_core::RngCore;
use rayon::prelude::*;
use sha2::{Digest, Sha256};
use tracing::instrument;
use zeroize::Zeroize;

use crate::errors::{ConsistencyCheck, Error};
use crate::key::{DELTA_DOMAIN, HASH_WRITE_EXPECT, PublicKey, sample_nonzero};
use crate::lagrange::lagrange_coeffs;
use crate::phase1;
use crate::qap::Qap;
use crate::ratio::{merge_pairs, same_ratio, scale_all};

/// Circuit-specific, δ-independent QAP evaluations at τ.
///
/// These feed the proving key's A/B queries and the verifying key's input
/// commitments; they are computed once by [`Contribution::prepare`] and
/// never change along the Phase-2 chain.
pub struct Evaluations<E: Pairing> {
    /// `[A_i(τ)]₁` per wire.
    pub a_g1: Vec<E::G1Affine>,
    /// `[B_i(τ)]₁` per wire.
    pub b_g1: Vec<E::G1Affine>,
    /// `[B_i(τ)]₂` per wire.
    pub b_g2: Vec<E::G2Affine>,
    /// `[β·A_i(τ) + α·B_i(τ) + C_i(τ)]₁` for the public wires.
    pub ic_g1: Vec<E::G1Affine>,
}

impl<E: Pairing> Clone for Evaluations<E> {
    fn clone(&self) -> Self {
        Self {
            a_g1: self.a_g1.clone(),
            b_g1: self.b_g1.clone(),
            b_g2: self.b_g2.clone(),
            ic_g1: self.ic_g1.clone(),
        }
    }
}

impl<E: Pairing> PartialEq for Evaluations<E> {
    fn eq(&self, other: &Self) -> bool {
        self.a_g1 == other.a_g1
            && self.b_g1 == other.b_g1
            && self.b_g2 == other.b_g2
            && self.ic_g1 == other.ic_g1
    }
}

impl<E: Pairing> fmt::Debug for Evaluations<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Evaluations")
            .field("a_g1", &self.a_g1)
            .field("b_g1", &self.b_g1)
            .field("b_g2", &self.b_g2)
            .field("ic_g1", &self.ic_g1)
            .finish()
    }
}

impl<E: Pairing> Evaluations<E> {
    /// Writes the evaluations in their canonical byte layout.
    pub fn write_to<W: std::io::Write>(&self, writer: &mut W) -> Result<(), Error> {
        writer.write_u32::<LittleEndian>(self.a_g1.len() as u32)?;
        writer.write_u32::<LittleEndian>(self.ic_g1.len() as u32)?;
        for point in &self.a_g1 {
            point.serialize_compressed(&mut *writer)?;
        }
        for point in &self.b_g1 {
            point.serialize_compressed(&mut *writer)?;
        }
        for point in &self.b_g2 {
            point.serialize_compressed(&mut *writer)?;
        }
        for point in &self.ic_g1 {
            point.serialize_compressed(&mut *writer)?;
        }
        Ok(())
    }

    /// Reads evaluations, validating every point.
    pub fn read_from<R: std::io::Read>(reader: &mut R) -> Result<Self, Error> {
        let num_wires = reader.read_u32::<LittleEndian>()? as usize;
        let num_public = reader.read_u32::<LittleEndian>()? as usize;
        if num_public > num_wires {
            return Err(Error::MalformedContribution(format!(
                "{num_public} public wires declared but only {num_wires} wires"
            )));
        }

        let read_g1 = |reader: &mut R, count: usize| -> Result<Vec<E::G1Affine>, Error> {
            (0..count)
                .map(|_| E::G1Affine::deserialize_compressed(&mut *reader).map_err(Error::from))
                .collect()
        };
        let a_g1 = read_g1(reader, num_wires)?;
        let b_g1 = read_g1(reader, num_wires)?;
        let b_g2 = (0..num_wires)
            .map(|_| E::G2Affine::deserialize_compressed(&mut *reader).map_err(Error::from))
            .collect::<Result<Vec<_>, _>>()?;
        let ic_g1 = read_g1(reader, num_public)?;

        Ok(Self {
            a_g1,
            b_g1,
            b_g2,
            ic_g1,
        })
    }
}

/// One participant's sealed Phase-2 contribution.
pub struct Contribution<E: Pairing> {
    /// `[δ]₁` for the accumulated δ.
    pub delta_g1: E::G1Affine,
    /// `[δ]₂` for the accumulated δ.
    pub delta_g2: E::G2Affine,
    /// `δ⁻¹·[β·A_i(τ) + α·B_i(τ) + C_i(τ)]₁` for the private wires.
    pub l_g1: Vec<E::G1Affine>,
    /// `δ⁻¹·[τⁱ·(τⁿ − 1)]₁`, padded to length `n`.
    pub z_g1: Vec<E::G1Affine>,
    /// Knowledge proof for δ.
    pub key: PublicKey<E>,
    /// SHA-256 transcript hash sealing this contribution.
    pub hash: [u8; 32],
}

impl<E: Pairing> Clone for Contribution<E> {
    fn clone(&self) -> Self {
        Self {
            delta_g1: self.delta_g1,
            delta_g2: self.delta_g2,
            l_g1: self.l_g1.clone(),
            z_g1: self.z_g1.clone(),
            key: self.key.clone(),
            hash: self.hash,
        }
    }
}

impl<E: Pairing> PartialEq for Contribution<E> {
    fn eq(&self, other: &Self) -> bool {
        self.delta_g1 == other.delta_g1
            && self.delta_g2 == other.delta_g2
            && self.l_g1 == other.l_g1
            && self.z_g1 == other.z_g1
            && self.key == other.key
            && self.hash == other.hash
    }
}

impl<E: Pairing> fmt::Debug for Contribution<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Contribution")
            .field("delta_g1", &self.delta_g1)
            .field("delta_g2", &self.delta_g2)
            .field("l_g1", &self.l_g1)
            .field("z_g1", &self.z_g1)
            .field("key", &self.key)
            .field("hash", &self.hash)
            .finish()
    }
}

impl<E: Pairing> Contribution<E> {
    /// Lifts a Phase-1 accumulator through a QAP, producing the Phase-2
    /// root contribution (Δ = generators) and the shared [`Evaluations`].
    #[instrument(level = "info", skip_all, fields(size = c1.parameters.size(), wires = qap.num_wires))]
    pub fn prepare<R: RngCore + ?Sized>(
        c1: &phase1::Contribution<E>,
        qap: &Qap<E::ScalarField>,
        rng: &mut R,
    ) -> Result<(Self, Evaluations<E>), Error> {
        let srs = &c1.parameters;
        let n = srs.size();
        if !srs.has_consistent_shape() {
            return Err(Error::MalformedContribution(
                "inconsistent parameter vector lengths".into(),
            ));
        }
        validate_qap(qap)?;
        if qap.num_constraints > n {
            return Err(Error::InvalidConfig(format!(
                "QAP has {} constraints but the ceremony supports only {n}",
                qap.num_constraints
            )));
        }

        // Lagrange coefficients of [τ…]₁, [τ…]₂, [ατ…]₁, [βτ…]₁.
        let coeff_tau_g1 = lagrange_coeffs::<E::G1>(&srs.tau_g1, n);
        let coeff_tau_g2 = lagrange_coeffs::<E::G2>(&srs.tau_g2, n);
        let coeff_alpha_tau_g1 = lagrange_coeffs::<E::G1>(&srs.alpha_tau_g1, n);
        let coeff_beta_tau_g1 = lagrange_coeffs::<E::G1>(&srs.beta_tau_g1, n);

        let nc = qap.num_constraints;
        let per_wire: Vec<(E::G1, E::G1, E::G2, E::G1)> = (0..qap.num_wires)
            .into_par_iter()
            .map(|wire| {
                let a_row = &qap.a[wire];
                let b_row = &qap.b[wire];
                let c_row = &qap.c[wire];
                let a_g1 = dot::<E::G1>(a_row, &coeff_tau_g1[..nc]);
                let b_g1 = dot::<E::G1>(b_row, &coeff_tau_g1[..nc]);
                let b_g2 = dot::<E::G2>(b_row, &coeff_tau_g2[..nc]);
                let combined = dot::<E::G1>(a_row, &coeff_beta_tau_g1[..nc])
                    + dot::<E::G1>(b_row, &coeff_alpha_tau_g1[..nc])
                    + dot::<E::G1>(c_row, &coeff_tau_g1[..nc]);
                (a_g1, b_g1, b_g2, combined)
            })
            .collect();

        let a_g1 = E::G1::normalize_batch(&per_wire.iter().map(|w| w.0).collect::<Vec<_>>());
        let b_g1 = E::G1::normalize_batch(&per_wire.iter().map(|w| w.1).collect::<Vec<_>>());
        let b_g2 = E::G2::normalize_batch(&per_wire.iter().map(|w| w.2).collect::<Vec<_>>());
        let combined = E::G1::normalize_batch(&per_wire.iter().map(|w| w.3).collect::<Vec<_>>());

        let ic_g1 = combined[..qap.num_public].to_vec();
        let l_g1 = combined[qap.num_public..].to_vec();

        // Z entries are τⁱ·(τⁿ − 1) = τ^{i+n} − τⁱ for i ∈ [0, n−1). The
        // final entry is a padding point downstream provers expect; it is
        // always multiplied by zero and carries no ceremony meaning.
        let z_proj: Vec<E::G1> = (0..n - 1)
            .into_par_iter()
            .map(|i| srs.tau_g1[i + n].into_group() - srs.tau_g1[i].into_group())
            .collect();
        let mut z_g1 = E::G1::normalize_batch(&z_proj);
        z_g1.push(E::G1Affine::generator());

        let evaluations = Evaluations {
            a_g1,
            b_g1,
            b_g2,
            ic_g1,
        };

        let one = E::ScalarField::one();
        let mut contribution = Self {
            delta_g1: E::G1Affine::generator(),
            delta_g2: E::G2Affine::generator(),
            l_g1,
            z_g1,
            key: PublicKey::generate(&one, &[], DELTA_DOMAIN, rng),
            hash: [0u8; 32],
        };
        contribution.hash = contribution.contribution_hash();
        Ok((contribution, evaluations))
    }

    /// Folds a fresh δ into the predecessor: Δ picks up δ, L and Z pick up
    /// δ⁻¹. The secret is wiped before returning.
    #[instrument(level = "info", skip_all, fields(domain = prev.z_g1.len()))]
    pub fn contribute<R: RngCore + ?Sized>(prev: &Self, rng: &mut R) -> Self {
        let mut delta = sample_nonzero::<E::ScalarField, _>(rng);
        let mut delta_inv = delta.inverse().expect("nonzero scalar has an inverse");

        let key = PublicKey::generate(&delta, &prev.hash, DELTA_DOMAIN, rng);
        let delta_g1 = prev.delta_g1.mul_bigint(delta.into_bigint()).into_affine();
        let delta_g2 = prev.delta_g2.mul_bigint(delta.into_bigint()).into_affine();
        let z_g1 = scale_all::<E::G1>(&prev.z_g1, &delta_inv);
        let l_g1 = scale_all::<E::G1>(&prev.l_g1, &delta_inv);

        delta.zeroize();
        delta_inv.zeroize();

        let mut contribution = Self {
            delta_g1,
            delta_g2,
            l_g1,
            z_g1,
            key,
            hash: [0u8; 32],
        };
        contribution.hash = contribution.contribution_hash();
        contribution
    }

    /// Verifies this contribution against its predecessor: the sealed
    /// hash, the δ knowledge proof, Δ consistency across both groups, the
    /// ratio binding the proven δ to the Δ update, and the batched δ⁻¹
    /// scaling of the Z and L vectors.
    #[instrument(level = "info", skip_all, fields(domain = self.z_g1.len()))]
    pub fn verify(&self, prev: &Self) -> Result<(), Error> {
        if self.z_g1.len() != prev.z_g1.len()
            || self.l_g1.len() != prev.l_g1.len()
            || self.z_g1.is_empty()
        {
            return Err(Error::MalformedContribution(
                "parameter vector lengths do not match the predecessor".into(),
            ));
        }
        if self.hash != self.contribution_hash() {
            return Err(Error::MalformedContribution(
                "sealed hash does not match the transcript".into(),
            ));
        }

        self.key.verify(&prev.hash, DELTA_DOMAIN, "delta")?;

        if self.delta_g1.is_zero() || self.delta_g2.is_zero() {
            return Err(Error::check(ConsistencyCheck::DeltaConsistency));
        }
        let g1 = E::G1Affine::generator();
        let g2 = E::G2Affine::generator();
        if !same_ratio::<E>(
            (g1.into_group(), self.delta_g1.into_group()),
            (g2.into_group(), self.delta_g2.into_group()),
        ) {
            return Err(Error::check(ConsistencyCheck::DeltaConsistency));
        }

        let r = self.key.challenge_point(&prev.hash, DELTA_DOMAIN);
        if !same_ratio::<E>(
            (prev.delta_g1.into_group(), self.delta_g1.into_group()),
            (r, self.key.x_r.into_group()),
        ) {
            return Err(Error::check(ConsistencyCheck::DeltaRatio));
        }

        // δ⁻¹·δ = 1 preserves the pairing with Δ across the step.
        let (z_prev, z_next) = merge_pairs(&prev.z_g1, &self.z_g1);
        if !same_ratio::<E>(
            (z_prev, z_next),
            (self.delta_g2.into_group(), prev.delta_g2.into_group()),
        ) {
            return Err(Error::check(ConsistencyCheck::ZInverse));
        }
        if !self.l_g1.is_empty() {
            let (l_prev, l_next) = merge_pairs(&prev.l_g1, &self.l_g1);
            if !same_ratio::<E>(
                (l_prev, l_next),
                (self.delta_g2.into_group(), prev.delta_g2.into_group()),
            ) {
                return Err(Error::check(ConsistencyCheck::LInverse));
            }
        }

        Ok(())
    }

    /// Canonical SHA-256 transcript hash over the proof and parameters.
    pub fn contribution_hash(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        self.key.absorb(&mut hasher);
        self.delta_g1
            .serialize_compressed(&mut hasher)
            .expect(HASH_WRITE_EXPECT);
        for point in &self.l_g1 {
            point.serialize_compressed(&mut hasher).expect(HASH_WRITE_EXPECT);
        }
        for point in &self.z_g1 {
            point.serialize_compressed(&mut hasher).expect(HASH_WRITE_EXPECT);
        }
        self.delta_g2
            .serialize_compressed(&mut hasher)
            .expect(HASH_WRITE_EXPECT);
        hasher.finalize().into()
    }

    /// Writes the contribution in its canonical byte layout.
    pub fn write_to<W: std::io::Write>(&self, writer: &mut W) -> Result<(), Error> {
        writer.write_u32::<LittleEndian>(self.l_g1.len() as u32)?;
        writer.write_u32::<LittleEndian>(self.z_g1.len() as u32)?;
        self.delta_g1.serialize_compressed(&mut *writer)?;
        self.delta_g2.serialize_compressed(&mut *writer)?;
        for point in &self.l_g1 {
            point.serialize_compressed(&mut *writer)?;
        }
        for point in &self.z_g1 {
            point.serialize_compressed(&mut *writer)?;
        }
        self.key.write_to(writer)?;
        writer.write_all(&self.hash)?;
        Ok(())
    }

    /// Reads a contribution, validating every point.
    pub fn read_from<R: std::io::Read>(reader: &mut R) -> Result<Self, Error> {
        let l_len = reader.read_u32::<LittleEndian>()? as usize;
        let z_len = reader.read_u32::<LittleEndian>()? as usize;
        let delta_g1 = E::G1Affine::deserialize_compressed(&mut *reader)?;
        let delta_g2 = E::G2Affine::deserialize_compressed(&mut *reader)?;
        let mut read_g1 = |count: usize| -> Result<Vec<E::G1Affine>, Error> {
            (0..count)
                .map(|_| E::G1Affine::deserialize_compressed(&mut *reader).map_err(Error::from))
                .collect()
        };
        let l_g1 = read_g1(l_len)?;
        let z_g1 = read_g1(z_len)?;
        let key = PublicKey::read_from(reader)?;
        let mut hash = [0u8; 32];
        reader.read_exact(&mut hash)?;

        Ok(Self {
            delta_g1,
            delta_g2,
            l_g1,
            z_g1,
            key,
            hash,
        })
    }
}

/// Dot product of a coefficient row against precomputed Lagrange bases.
fn dot<G: CurveGroup>(coeffs: &[G::ScalarField], bases: &[G::Affine]) -> G {
    coeffs
        .iter()
        .zip(bases)
        .fold(G::zero(), |acc, (coeff, base)| {
            acc + base.mul_bigint(coeff.into_bigint())
        })
}

fn validate_qap<F: PrimeField>(qap: &Qap<F>) -> Result<(), Error> {
    if qap.num_public > qap.num_wires {
        return Err(Error::MalformedQap(format!(
            "{} public wires declared but only {} wires",
            qap.num_public, qap.num_wires
        )));
    }
    for matrix in [&qap.a, &qap.b, &qap.c] {
        if matrix.len() != qap.num_wires
            || matrix.iter().any(|row| row.len() != qap.num_constraints)
        {
            return Err(Error::MalformedQap(
                "matrix dimensions do not match the header".into(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
#[cfg(feature = "bn254")]
mod tests {
    use ark_bn254::{Bn254, Fr};
    use ark_std::UniformRand;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn phase1_chain(power: usize, len: usize, rng: &mut StdRng) -> phase1::Contribution<Bn254> {
        let mut tip = phase1::Contribution::initialize(power, rng).expect("initialize");
        for _ in 1..len {
            tip = phase1::Contribution::contribute(&tip, rng);
        }
        tip
    }

    fn random_qap(
        rng: &mut StdRng,
        num_constraints: usize,
        num_wires: usize,
        num_public: usize,
    ) -> Qap<Fr> {
        let matrix = |rng: &mut StdRng| -> Vec<Vec<Fr>> {
            (0..num_wires)
                .map(|_| (0..num_constraints).map(|_| Fr::rand(rng)).collect())
                .collect()
        };
        Qap {
            num_constraints,
            num_wires,
            num_public,
            a: matrix(rng),
            b: matrix(rng),
            c: matrix(rng),
        }
    }

    #[test]
    fn lift_and_ten_contribution_chain() {
        let mut rng = StdRng::seed_from_u64(51);
        let tip = phase1_chain(8, 10, &mut rng);
        let qap = random_qap(&mut rng, 16, 20, 3);

        let (root, evaluations) =
            Contribution::prepare(&tip, &qap, &mut rng).expect("prepare");
        assert_eq!(evaluations.a_g1.len(), 20);
        assert_eq!(evaluations.b_g1.len(), 20);
        assert_eq!(evaluations.b_g2.len(), 20);
        assert_eq!(evaluations.ic_g1.len(), 3);
        assert_eq!(root.l_g1.len(), 17);
        assert_eq!(root.z_g1.len(), 256);

        let mut contributions = vec![root];
        for _ in 1..10 {
            let next = Contribution::contribute(contributions.last().expect("root"), &mut rng);
            contributions.push(next);
        }
        for window in contributions.windows(2) {
            window[1].verify(&window[0]).expect("valid contribution");
        }

        // Z soundness: δ⁻¹ scaling cancels against Δ at any chain depth.
        let n = 256;
        let tail = contributions.last().expect("tail");
        for i in [0usize, 1, n - 2] {
            let unscaled =
                tip.parameters.tau_g1[i + n].into_group() - tip.parameters.tau_g1[i].into_group();
            assert_eq!(
                Bn254::pairing(tail.z_g1[i], tail.delta_g2),
                Bn254::pairing(unscaled, ark_bn254::G2Affine::generator()),
            );
        }
    }

    #[test]
    fn evaluations_are_delta_independent() {
        let mut rng = StdRng::seed_from_u64(52);
        let tip = phase1_chain(4, 3, &mut rng);
        let qap = random_qap(&mut rng, 8, 6, 2);

        let (root, first) = Contribution::prepare(&tip, &qap, &mut rng).expect("prepare");
        let (_, second) = Contribution::prepare(&tip, &qap, &mut rng).expect("prepare");
        assert_eq!(first, second);

        let _ = Contribution::contribute(&root, &mut rng);
        let (_, third) = Contribution::prepare(&tip, &qap, &mut rng).expect("prepare");
        assert_eq!(first, third);
    }

    #[test]
    fn rejects_oversized_qap() {
        let mut rng = StdRng::seed_from_u64(53);
        let tip = phase1_chain(3, 2, &mut rng);
        let qap = random_qap(&mut rng, 9, 6, 2);
        assert!(matches!(
            Contribution::prepare(&tip, &qap, &mut rng),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn tampered_delta_is_rejected() {
        let mut rng = StdRng::seed_from_u64(54);
        let tip = phase1_chain(4, 2, &mut rng);
        let qap = random_qap(&mut rng, 8, 6, 2);
        let (root, _) = Contribution::prepare(&tip, &qap, &mut rng).expect("prepare");
        let second = Contribution::contribute(&root, &mut rng);

        let mut tampered = second.clone();
        tampered.delta_g2 = tampered
            .delta_g2
            .mul_bigint(Fr::from(2u64).into_bigint())
            .into_affine();
        tampered.hash = tampered.contribution_hash();
        assert!(matches!(
            tampered.verify(&root),
            Err(Error::InvalidContribution {
                check: ConsistencyCheck::DeltaConsistency
            })
        ));
    }

    #[test]
    fn unscaled_z_entry_is_rejected() {
        let mut rng = StdRng::seed_from_u64(55);
        let tip = phase1_chain(4, 2, &mut rng);
        let qap = random_qap(&mut rng, 8, 6, 2);
        let (root, _) = Contribution::prepare(&tip, &qap, &mut rng).expect("prepare");
        let second = Contribution::contribute(&root, &mut rng);

        let mut tampered = second.clone();
        tampered.z_g1[5] = root.z_g1[5];
        tampered.hash = tampered.contribution_hash();
        assert!(matches!(
            tampered.verify(&root),
            Err(Error::InvalidContribution {
                check: ConsistencyCheck::ZInverse
            })
        ));
    }

    #[test]
    fn contribution_marshal_roundtrip() {
        let mut rng = StdRng::seed_from_u64(56);
        let tip = phase1_chain(4, 2, &mut rng);
        let qap = random_qap(&mut rng, 8, 6, 2);
        let (root, _) = Contribution::prepare(&tip, &qap, &mut rng).expect("prepare");
        let second = Contribution::contribute(&root, &mut rng);

        let mut buf = Vec::new();
        second.write_to(&mut buf).expect("write");
        let restored = Contribution::<Bn254>::read_from(&mut buf.as_slice()).expect("read");
        assert_eq!(second, restored);
        assert_eq!(second.contribution_hash(), restored.contribution_hash());
    }

    #[test]
    fn evaluations_marshal_roundtrip() {
        let mut rng = StdRng::seed_from_u64(57);
        let tip = phase1_chain(4, 2, &mut rng);
        let qap = random_qap(&mut rng, 8, 6, 2);
        let (_, evaluations) = Contribution::prepare(&tip, &qap, &mut rng).expect("prepare");

        let mut buf = Vec::new();
        evaluations.write_to(&mut buf).expect("write");
        let restored = Evaluations::<Bn254>::read_from(&mut buf.as_slice()).expect("read");
        assert_eq!(evaluations, restored);
    }
}
