//! # Groth16 Ceremony: Multi-Party Trusted Setup
//!
//! This crate implements the two-phase multi-party computation that produces
//! the Structured Reference String (SRS) for the Groth16 proving system.
//! Soundness of the resulting parameters holds as long as at least one
//! participant contributes honest randomness and destroys it afterwards.
//!
//! ## Overview
//!
//! A ceremony runs in two phases:
//!
//! 1. **Phase 1 ("powers of tau")** is circuit-independent. Participants
//!    take turns folding fresh secrets τ, α, β into an accumulator of group
//!    elements `[τⁱ]₁`, `[τⁱ]₂`, `[ατⁱ]₁`, `[βτⁱ]₁`, `[β]₂`.
//! 2. **Phase 2** specializes the Phase-1 output to one circuit, encoded as
//!    a Quadratic Arithmetic Program (QAP), and runs a second contribution
//!    chain for a circuit-specific secret δ.
//!
//! Every contribution carries knowledge-of-exponent proofs for its secrets
//! and a SHA-256 transcript hash chaining it to its predecessor, so anyone
//! can verify after the fact that each step applied exactly one well-formed
//! secret on top of the previous parameters.
//!
//! ## Architecture
//!
//! - **[`phase1`]**: the powers-of-tau accumulator — initialization,
//!   contribution, verification and serialization.
//! - **[`phase2`]**: lifting a Phase-1 tip through a QAP (Lagrange-basis
//!   evaluation at the hidden τ) and the δ contribution chain, along with
//!   the δ-independent circuit [`Evaluations`](phase2::Evaluations).
//! - **[`qap`]**: the read-only QAP container and its binary codec.
//! - **[`ceremony`]**: a tagged front door dispatching the generic types
//!   over the compiled-in curves at runtime.
//! - **[`config`]**: curve identifiers and ceremony parameters.
//! - **[`errors`]**: the error taxonomy, including per-check rejection tags.
//!
//! ## Quick Example
//!
//! ```rust,no_run
//! use groth16_ceremony::phase1::Contribution;
//! use ark_bn254::Bn254;
//! use rand::rngs::OsRng;
//!
//! # fn main() -> Result<(), groth16_ceremony::Error> {
//! // Coordinator creates the root accumulator for 2^8 constraints.
//! let root = Contribution::<Bn254>::initialize(8, &mut OsRng)?;
//!
//! // Each participant in turn folds in fresh secrets...
//! let first = Contribution::contribute(&root, &mut OsRng);
//! let second = Contribution::contribute(&first, &mut OsRng);
//!
//! // ...and anyone can audit the chain afterwards.
//! root.verify_initial()?;
//! first.verify(&root)?;
//! second.verify(&first)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! One cargo feature per supported curve:
//!
//! - **`bn254`** (default)
//! - **`bls12_377`**
//! - **`bls12_381`**
//! - **`bw6_761`**
//!
//! ## Security Considerations
//!
//! - **Toxic waste**: the secrets τ, α, β, δ are sampled inside the
//!   contribution functions, never returned, and zeroized before the
//!   functions exit. Participants must additionally run on trustworthy
//!   hardware and discard RNG state.
//! - **Transcript canonicality**: the chain hash is SHA-256 over the
//!   compressed canonical point encodings in a fixed order. Any deviation
//!   in encoding or ordering breaks chain continuity by design.
//! - **Deserialization**: every point read from a byte stream is validated
//!   for curve and prime-subgroup membership before use.

#[cfg(not(any(
    feature = "bn254",
    feature = "bls12_377",
    feature = "bls12_381",
    feature = "bw6_761"
)))]
compile_error!("at least one curve feature must be enabled");

pub mod ceremony;
pub mod config;
pub mod errors;
mod key;
mod lagrange;
pub mod phase1;
pub mod phase2;
pub mod qap;
mod ratio;

pub use ceremony::{CircuitEvaluations, Phase1Ceremony, Phase2Ceremony};
pub use config::{CeremonyConfig, CurveId, MAX_POWER};
pub use errors::{ConsistencyCheck, Error};
pub use key::PublicKey;
pub use qap::Qap;
