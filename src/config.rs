//! Ceremony configuration types.
//!
//! A ceremony is fixed by a pairing curve and a power: the Phase-1 SRS for
//! power `p` supports circuits with up to `2^p` constraints. The curve
//! identifier selects one of the compiled-in pairing backends; the
//! corresponding cargo feature must be enabled for the front door in
//! [`crate::ceremony`] to dispatch to it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// Largest supported ceremony power.
///
/// `2^28` constraints is the ceiling the τ-power tables stay practical at,
/// and every supported scalar field has a radix-2 subgroup of that order.
pub const MAX_POWER: usize = 28;

/// Supported pairing-friendly elliptic curves.
///
/// The ceremony protocol is identical on every curve; the identifier only
/// selects the concrete arithmetic and the canonical point encoding the
/// transcript hashes are computed over.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum CurveId {
    /// BN254 (~100-bit security), the curve Ethereum precompiles support.
    Bn254,
    /// BLS12-377, the inner curve of the BW6-761 one-layer composition.
    Bls12_377,
    /// BLS12-381 (~128-bit security).
    Bls12_381,
    /// BW6-761, for proofs about BLS12-377 statements.
    Bw6_761,
}

impl fmt::Display for CurveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CurveId::Bn254 => "bn254",
            CurveId::Bls12_377 => "bls12-377",
            CurveId::Bls12_381 => "bls12-381",
            CurveId::Bw6_761 => "bw6-761",
        };
        f.write_str(name)
    }
}

/// Curve and size of a ceremony.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CeremonyConfig {
    /// The pairing curve the SRS lives on.
    pub curve: CurveId,
    /// The SRS supports `2^power` constraints.
    pub power: usize,
}

impl CeremonyConfig {
    /// Creates a validated configuration.
    pub fn new(curve: CurveId, power: usize) -> Result<Self, Error> {
        let config = Self { curve, power };
        config.validate()?;
        Ok(config)
    }

    /// Checks that the power is representable.
    pub fn validate(&self) -> Result<(), Error> {
        if self.power == 0 {
            return Err(Error::InvalidConfig(
                "ceremony power must be at least 1".into(),
            ));
        }
        if self.power > MAX_POWER {
            return Err(Error::InvalidConfig(format!(
                "ceremony power {} exceeds the maximum of {MAX_POWER}",
                self.power
            )));
        }
        Ok(())
    }

    /// Domain size `n = 2^power`.
    pub fn domain_size(&self) -> usize {
        1 << self.power
    }
}
