//! Lagrange-basis change for SRS vectors.
//!
//! Phase 2 needs the SRS in the Lagrange basis of the radix-2 evaluation
//! domain: `[Lⱼ(τ)]` instead of `[τʲ]`. Since the domain points are the
//! `n`-th roots of unity, the basis change is exactly an inverse FFT, run
//! directly over group elements (scalar multiplications replace field
//! multiplications in the butterflies).

use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{Field, PrimeField};
use ark_poly::{EvaluationDomain, Radix2EvaluationDomain};
use rayon::prelude::*;

/// Computes `[L₀(τ), …, L_{n−1}(τ)]` from the first `size` powers
/// `[τ⁰, …, τ^{size−1}]` of an SRS vector.
///
/// `size` must be a power of two not exceeding the two-adicity of the
/// scalar field; both hold for every ceremony configuration, so violations
/// are defects.
pub(crate) fn lagrange_coeffs<G: CurveGroup>(powers: &[G::Affine], size: usize) -> Vec<G::Affine> {
    let domain = Radix2EvaluationDomain::<G::ScalarField>::new(size)
        .expect("radix-2 domain exists for every ceremony size");
    let mut values: Vec<G> = powers[..size].iter().map(|p| p.into_group()).collect();
    ifft_in_place(&mut values, &domain);
    G::normalize_batch(&values)
}

/// In-place radix-2 inverse FFT over group elements.
fn ifft_in_place<G: CurveGroup>(values: &mut [G], domain: &Radix2EvaluationDomain<G::ScalarField>) {
    let n = values.len();
    let log_n = domain.log_size_of_group;
    debug_assert_eq!(n, 1 << log_n);

    for k in 0..n {
        let rk = bitreverse(k, log_n);
        if k < rk {
            values.swap(k, rk);
        }
    }

    let omega_inv = domain.group_gen_inv;
    let mut m = 1;
    for _ in 0..log_n {
        let step = omega_inv.pow([(n / (2 * m)) as u64]);
        for start in (0..n).step_by(2 * m) {
            let mut twiddle = G::ScalarField::ONE;
            for j in start..start + m {
                let t = values[j + m].mul_bigint(twiddle.into_bigint());
                values[j + m] = values[j] - t;
                values[j] += t;
                twiddle *= step;
            }
        }
        m *= 2;
    }

    let size_inv = domain.size_inv.into_bigint();
    values
        .par_iter_mut()
        .for_each(|value| *value = value.mul_bigint(size_inv));
}

fn bitreverse(mut index: usize, bits: u32) -> usize {
    let mut reversed = 0;
    for _ in 0..bits {
        reversed = (reversed << 1) | (index & 1);
        index >>= 1;
    }
    reversed
}
