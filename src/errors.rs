//! Error types for the crate.
//!
//! Deserialization and verification surface typed errors; construction
//! primitives (`initialize`, `contribute`, `prepare`) assume structurally
//! valid inputs and treat internal contradictions as defects.
//!
//! Verification failures carry a [`ConsistencyCheck`] tag naming the exact
//! pairing check that rejected the contribution, so a coordinator can report
//! which contribution index broke the chain and why.

use std::fmt;

use thiserror::Error;

/// The pairing sub-check that rejected a contribution.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConsistencyCheck {
    /// The τ update is not the scalar proven in the τ knowledge proof.
    TauRatio,
    /// Consecutive powers of τ in G1 do not advance by the same factor.
    TauProgression,
    /// The τ powers in G1 and G2 disagree.
    TauConsistency,
    /// The α update is not the scalar proven in the α knowledge proof.
    AlphaRatio,
    /// The ατ powers are not a consistent α-multiple of the τ powers.
    AlphaConsistency,
    /// The β update is not the scalar proven in the β knowledge proof.
    BetaRatio,
    /// The βτ powers (or β in G2) are not a consistent β-multiple.
    BetaConsistency,
    /// The Δ update is not the scalar proven in the δ knowledge proof.
    DeltaRatio,
    /// Δ in G1 and G2 disagree, or Δ is the identity.
    DeltaConsistency,
    /// The Z vector was not scaled by δ⁻¹.
    ZInverse,
    /// The L vector was not scaled by δ⁻¹.
    LInverse,
}

impl ConsistencyCheck {
    fn as_str(self) -> &'static str {
        match self {
            ConsistencyCheck::TauRatio => "tau-ratio",
            ConsistencyCheck::TauProgression => "tau-progression",
            ConsistencyCheck::TauConsistency => "tau-consistency",
            ConsistencyCheck::AlphaRatio => "alpha-ratio",
            ConsistencyCheck::AlphaConsistency => "alpha-consistency",
            ConsistencyCheck::BetaRatio => "beta-ratio",
            ConsistencyCheck::BetaConsistency => "beta-consistency",
            ConsistencyCheck::DeltaRatio => "delta-ratio",
            ConsistencyCheck::DeltaConsistency => "delta-consistency",
            ConsistencyCheck::ZInverse => "z-inverse",
            ConsistencyCheck::LInverse => "l-inverse",
        }
    }
}

impl fmt::Display for ConsistencyCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by the ceremony API.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid ceremony configuration: {0}")]
    InvalidConfig(String),
    #[error("malformed contribution: {0}")]
    MalformedContribution(String),
    #[error("malformed QAP: {0}")]
    MalformedQap(String),
    #[error("knowledge-of-exponent proof rejected for {secret}")]
    InvalidKeyProof { secret: &'static str },
    #[error("contribution rejected: {check} check failed")]
    InvalidContribution { check: ConsistencyCheck },
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ark_serialize::SerializationError> for Error {
    fn from(err: ark_serialize::SerializationError) -> Self {
        match err {
            ark_serialize::SerializationError::IoError(io) => Error::Io(io),
            other => Error::MalformedContribution(other.to_string()),
        }
    }
}

impl Error {
    /// Shorthand for a failed pairing check.
    pub(crate) fn check(check: ConsistencyCheck) -> Self {
        Error::InvalidContribution { check }
    }
}
