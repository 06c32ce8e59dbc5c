//! Pairing ratio predicates and batched linear combinations.
//!
//! Every verification step in the ceremony reduces to the question "do two
//! pairs of group elements hide the same exponent ratio?". For vectors, the
//! per-index pairing equations are collapsed into a single [`same_ratio`]
//! call by folding both sides with one shared set of random coefficients:
//! a contribution that breaks any index passes the folded check with
//! probability at most `1/|Fr|`.

use ark_ec::pairing::Pairing;
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{PrimeField, Zero};
use ark_std::UniformRand;
use rayon::prelude::*;

/// Checks `e(a₀, b₁) = e(a₁, b₀)`, i.e. that `a₀ → a₁` and `b₀ → b₁` are
/// scalings by the same exponent.
pub(crate) fn same_ratio<E: Pairing>(g1: (E::G1, E::G1), g2: (E::G2, E::G2)) -> bool {
    E::pairing(g1.0, g2.1) == E::pairing(g1.1, g2.0)
}

/// Folds two equal-length slices with one shared random coefficient per
/// index, producing a pair suitable for a single [`same_ratio`] check.
pub(crate) fn merge_pairs<G: AffineRepr>(lhs: &[G], rhs: &[G]) -> (G::Group, G::Group) {
    debug_assert_eq!(lhs.len(), rhs.len());
    lhs.par_iter()
        .zip(rhs.par_iter())
        .map_init(rand::thread_rng, |rng, (l, r)| {
            let rho = G::ScalarField::rand(rng).into_bigint();
            (l.mul_bigint(rho), r.mul_bigint(rho))
        })
        .reduce(
            || (G::Group::zero(), G::Group::zero()),
            |acc, term| (acc.0 + term.0, acc.1 + term.1),
        )
}

/// [`merge_pairs`] across groups: folds a G1 slice and a G2 slice with the
/// same coefficients, for cross-group consistency checks.
pub(crate) fn merge_pairs_mixed<E: Pairing>(
    lhs: &[E::G1Affine],
    rhs: &[E::G2Affine],
) -> (E::G1, E::G2) {
    debug_assert_eq!(lhs.len(), rhs.len());
    lhs.par_iter()
        .zip(rhs.par_iter())
        .map_init(rand::thread_rng, |rng, (l, r)| {
            let rho = E::ScalarField::rand(rng).into_bigint();
            (l.mul_bigint(rho), r.mul_bigint(rho))
        })
        .reduce(
            || (E::G1::zero(), E::G2::zero()),
            |acc, term| (acc.0 + term.0, acc.1 + term.1),
        )
}

/// Folds consecutive elements of a power sequence: the result hides the
/// common step factor of `points[i] → points[i+1]` for every `i` at once.
pub(crate) fn power_pairs<G: AffineRepr>(points: &[G]) -> (G::Group, G::Group) {
    merge_pairs(&points[..points.len() - 1], &points[1..])
}

/// Scales every point of a slice by the matching scalar and normalizes the
/// result back to affine form.
pub(crate) fn batch_scale<G: CurveGroup>(
    points: &[G::Affine],
    scalars: &[G::ScalarField],
) -> Vec<G::Affine> {
    let scaled: Vec<G> = points
        .par_iter()
        .zip(scalars.par_iter())
        .map(|(point, scalar)| point.mul_bigint(scalar.into_bigint()))
        .collect();
    G::normalize_batch(&scaled)
}

/// Scales every point of a slice by one scalar and normalizes the result.
pub(crate) fn scale_all<G: CurveGroup>(
    points: &[G::Affine],
    scalar: &G::ScalarField,
) -> Vec<G::Affine> {
    let repr = scalar.into_bigint();
    let scaled: Vec<G> = points.par_iter().map(|point| point.mul_bigint(repr)).collect();
    G::normalize_batch(&scaled)
}

#[cfg(test)]
#[cfg(feature = "bn254")]
mod tests {
    use ark_bn254::{Bn254, Fr, G1Affine, G1Projective, G2Affine};
    use ark_ec::CurveGroup;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn tau_powers(tau: Fr, len: usize) -> Vec<G1Affine> {
        let mut acc = Fr::from(1u64);
        let powers: Vec<G1Projective> = (0..len)
            .map(|_| {
                let point = G1Affine::generator().mul_bigint(acc.into_bigint());
                acc *= tau;
                point
            })
            .collect();
        G1Projective::normalize_batch(&powers)
    }

    #[test]
    fn same_ratio_detects_mismatch() {
        let mut rng = StdRng::seed_from_u64(7);
        let x = Fr::rand(&mut rng);
        let g1 = G1Affine::generator();
        let g2 = G2Affine::generator();
        let xg1 = (g1.mul_bigint(x.into_bigint())).into_affine();
        let xg2 = (g2.mul_bigint(x.into_bigint())).into_affine();

        assert!(same_ratio::<Bn254>(
            (g1.into_group(), xg1.into_group()),
            (g2.into_group(), xg2.into_group())
        ));
        let y = Fr::rand(&mut rng);
        let yg2 = g2.mul_bigint(y.into_bigint());
        assert!(!same_ratio::<Bn254>(
            (g1.into_group(), xg1.into_group()),
            (g2.into_group(), yg2)
        ));
    }

    #[test]
    fn power_pairs_accepts_geometric_sequences_only() {
        let mut rng = StdRng::seed_from_u64(8);
        let tau = Fr::rand(&mut rng);
        let mut powers = tau_powers(tau, 16);

        let g2 = G2Affine::generator();
        let tau_g2 = g2.mul_bigint(tau.into_bigint());
        let folded = power_pairs(&powers);
        assert!(same_ratio::<Bn254>(folded, (g2.into_group(), tau_g2)));

        powers[9] = (powers[9].mul_bigint(Fr::from(2u64).into_bigint())).into_affine();
        let folded = power_pairs(&powers);
        assert!(!same_ratio::<Bn254>(folded, (g2.into_group(), tau_g2)));
    }
}
