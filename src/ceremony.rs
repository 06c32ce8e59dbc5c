//! Curve-dispatch front door.
//!
//! The ceremony types are generic over the pairing curve; coordinators that
//! pick the curve at runtime (from a config file or a transcript header) go
//! through the tagged wrappers here instead. Each wrapper holds the generic
//! type instantiated for one of the compiled-in curves and dispatches on a
//! [`CurveId`]. Curves whose cargo feature is disabled are rejected with a
//! configuration error.

use rand_core::RngCore;

#[cfg(feature = "bls12_377")]
use ark_bls12_377::Bls12_377;
#[cfg(feature = "bls12_381")]
use ark_bls12_381::Bls12_381;
#[cfg(feature = "bn254")]
use ark_bn254::Bn254;
#[cfg(feature = "bw6_761")]
use ark_bw6_761::BW6_761;

use crate::config::CurveId;
use crate::errors::Error;
use crate::qap::Qap;
use crate::{phase1, phase2};

fn disabled(curve: CurveId) -> Error {
    Error::InvalidConfig(format!(
        "curve {curve} is not compiled in; enable the matching cargo feature"
    ))
}

fn mismatch() -> Error {
    Error::InvalidConfig("contributions belong to different curves".into())
}

/// Dispatches a `&self` method to whichever curve variant is live.
macro_rules! dispatch {
    ($value:expr, |$inner:ident| $body:expr) => {
        match $value {
            #[cfg(feature = "bn254")]
            Self::Bn254($inner) => $body,
            #[cfg(feature = "bls12_377")]
            Self::Bls12_377($inner) => $body,
            #[cfg(feature = "bls12_381")]
            Self::Bls12_381($inner) => $body,
            #[cfg(feature = "bw6_761")]
            Self::Bw6_761($inner) => $body,
        }
    };
}

/// A Phase-1 contribution on a runtime-selected curve.
pub enum Phase1Ceremony {
    /// BN254 contribution.
    #[cfg(feature = "bn254")]
    Bn254(phase1::Contribution<Bn254>),
    /// BLS12-377 contribution.
    #[cfg(feature = "bls12_377")]
    Bls12_377(phase1::Contribution<Bls12_377>),
    /// BLS12-381 contribution.
    #[cfg(feature = "bls12_381")]
    Bls12_381(phase1::Contribution<Bls12_381>),
    /// BW6-761 contribution.
    #[cfg(feature = "bw6_761")]
    Bw6_761(phase1::Contribution<BW6_761>),
}

impl Phase1Ceremony {
    /// Creates the root contribution on the requested curve.
    pub fn initialize<R: RngCore + ?Sized>(
        curve: CurveId,
        power: usize,
        rng: &mut R,
    ) -> Result<Self, Error> {
        match curve {
            #[cfg(feature = "bn254")]
            CurveId::Bn254 => Ok(Self::Bn254(phase1::Contribution::initialize(power, rng)?)),
            #[cfg(feature = "bls12_377")]
            CurveId::Bls12_377 => Ok(Self::Bls12_377(phase1::Contribution::initialize(
                power, rng,
            )?)),
            #[cfg(feature = "bls12_381")]
            CurveId::Bls12_381 => Ok(Self::Bls12_381(phase1::Contribution::initialize(
                power, rng,
            )?)),
            #[cfg(feature = "bw6_761")]
            CurveId::Bw6_761 => Ok(Self::Bw6_761(phase1::Contribution::initialize(power, rng)?)),
            #[allow(unreachable_patterns)]
            other => Err(disabled(other)),
        }
    }

    /// The curve this contribution lives on.
    pub fn curve(&self) -> CurveId {
        match self {
            #[cfg(feature = "bn254")]
            Self::Bn254(_) => CurveId::Bn254,
            #[cfg(feature = "bls12_377")]
            Self::Bls12_377(_) => CurveId::Bls12_377,
            #[cfg(feature = "bls12_381")]
            Self::Bls12_381(_) => CurveId::Bls12_381,
            #[cfg(feature = "bw6_761")]
            Self::Bw6_761(_) => CurveId::Bw6_761,
        }
    }

    /// Folds fresh secrets into this contribution.
    pub fn contribute<R: RngCore + ?Sized>(&self, rng: &mut R) -> Self {
        match self {
            #[cfg(feature = "bn254")]
            Self::Bn254(c) => Self::Bn254(phase1::Contribution::contribute(c, rng)),
            #[cfg(feature = "bls12_377")]
            Self::Bls12_377(c) => Self::Bls12_377(phase1::Contribution::contribute(c, rng)),
            #[cfg(feature = "bls12_381")]
            Self::Bls12_381(c) => Self::Bls12_381(phase1::Contribution::contribute(c, rng)),
            #[cfg(feature = "bw6_761")]
            Self::Bw6_761(c) => Self::Bw6_761(phase1::Contribution::contribute(c, rng)),
        }
    }

    /// Verifies this contribution against its predecessor.
    pub fn verify(&self, prev: &Self) -> Result<(), Error> {
        match (self, prev) {
            #[cfg(feature = "bn254")]
            (Self::Bn254(c), Self::Bn254(p)) => c.verify(p),
            #[cfg(feature = "bls12_377")]
            (Self::Bls12_377(c), Self::Bls12_377(p)) => c.verify(p),
            #[cfg(feature = "bls12_381")]
            (Self::Bls12_381(c), Self::Bls12_381(p)) => c.verify(p),
            #[cfg(feature = "bw6_761")]
            (Self::Bw6_761(c), Self::Bw6_761(p)) => c.verify(p),
            #[allow(unreachable_patterns)]
            _ => Err(mismatch()),
        }
    }

    /// Verifies a root contribution by value.
    pub fn verify_initial(&self) -> Result<(), Error> {
        dispatch!(self, |c| c.verify_initial())
    }

    /// The sealed transcript hash.
    pub fn hash(&self) -> [u8; 32] {
        dispatch!(self, |c| c.hash)
    }

    /// Writes the contribution in its canonical byte layout.
    pub fn write_to<W: std::io::Write>(&self, writer: &mut W) -> Result<(), Error> {
        dispatch!(self, |c| c.write_to(writer))
    }

    /// Reads a contribution for the given curve.
    pub fn read_from<R: std::io::Read>(curve: CurveId, reader: &mut R) -> Result<Self, Error> {
        match curve {
            #[cfg(feature = "bn254")]
            CurveId::Bn254 => Ok(Self::Bn254(phase1::Contribution::read_from(reader)?)),
            #[cfg(feature = "bls12_377")]
            CurveId::Bls12_377 => Ok(Self::Bls12_377(phase1::Contribution::read_from(reader)?)),
            #[cfg(feature = "bls12_381")]
            CurveId::Bls12_381 => Ok(Self::Bls12_381(phase1::Contribution::read_from(reader)?)),
            #[cfg(feature = "bw6_761")]
            CurveId::Bw6_761 => Ok(Self::Bw6_761(phase1::Contribution::read_from(reader)?)),
            #[allow(unreachable_patterns)]
            other => Err(disabled(other)),
        }
    }
}

/// A Phase-2 contribution on a runtime-selected curve.
pub enum Phase2Ceremony {
    /// BN254 contribution.
    #[cfg(feature = "bn254")]
    Bn254(phase2::Contribution<Bn254>),
    /// BLS12-377 contribution.
    #[cfg(feature = "bls12_377")]
    Bls12_377(phase2::Contribution<Bls12_377>),
    /// BLS12-381 contribution.
    #[cfg(feature = "bls12_381")]
    Bls12_381(phase2::Contribution<Bls12_381>),
    /// BW6-761 contribution.
    #[cfg(feature = "bw6_761")]
    Bw6_761(phase2::Contribution<BW6_761>),
}

/// Circuit evaluations on a runtime-selected curve.
pub enum CircuitEvaluations {
    /// BN254 evaluations.
    #[cfg(feature = "bn254")]
    Bn254(phase2::Evaluations<Bn254>),
    /// BLS12-377 evaluations.
    #[cfg(feature = "bls12_377")]
    Bls12_377(phase2::Evaluations<Bls12_377>),
    /// BLS12-381 evaluations.
    #[cfg(feature = "bls12_381")]
    Bls12_381(phase2::Evaluations<Bls12_381>),
    /// BW6-761 evaluations.
    #[cfg(feature = "bw6_761")]
    Bw6_761(phase2::Evaluations<BW6_761>),
}

impl Phase2Ceremony {
    /// Lifts a Phase-1 tip through a QAP read from `qap_reader` (in the
    /// [`Qap`] binary layout for the tip's scalar field).
    pub fn prepare<R: RngCore + ?Sized, Rd: std::io::Read>(
        tip: &Phase1Ceremony,
        qap_reader: &mut Rd,
        rng: &mut R,
    ) -> Result<(Self, CircuitEvaluations), Error> {
        match tip {
            #[cfg(feature = "bn254")]
            Phase1Ceremony::Bn254(c1) => {
                let qap = Qap::read_from(qap_reader)?;
                let (c2, evals) = phase2::Contribution::prepare(c1, &qap, rng)?;
                Ok((Self::Bn254(c2), CircuitEvaluations::Bn254(evals)))
            }
            #[cfg(feature = "bls12_377")]
            Phase1Ceremony::Bls12_377(c1) => {
                let qap = Qap::read_from(qap_reader)?;
                let (c2, evals) = phase2::Contribution::prepare(c1, &qap, rng)?;
                Ok((Self::Bls12_377(c2), CircuitEvaluations::Bls12_377(evals)))
            }
            #[cfg(feature = "bls12_381")]
            Phase1Ceremony::Bls12_381(c1) => {
                let qap = Qap::read_from(qap_reader)?;
                let (c2, evals) = phase2::Contribution::prepare(c1, &qap, rng)?;
                Ok((Self::Bls12_381(c2), CircuitEvaluations::Bls12_381(evals)))
            }
            #[cfg(feature = "bw6_761")]
            Phase1Ceremony::Bw6_761(c1) => {
                let qap = Qap::read_from(qap_reader)?;
                let (c2, evals) = phase2::Contribution::prepare(c1, &qap, rng)?;
                Ok((Self::Bw6_761(c2), CircuitEvaluations::Bw6_761(evals)))
            }
        }
    }

    /// The curve this contribution lives on.
    pub fn curve(&self) -> CurveId {
        match self {
            #[cfg(feature = "bn254")]
            Self::Bn254(_) => CurveId::Bn254,
            #[cfg(feature = "bls12_377")]
            Self::Bls12_377(_) => CurveId::Bls12_377,
            #[cfg(feature = "bls12_381")]
            Self::Bls12_381(_) => CurveId::Bls12_381,
            #[cfg(feature = "bw6_761")]
            Self::Bw6_761(_) => CurveId::Bw6_761,
        }
    }

    /// Folds a fresh δ into this contribution.
    pub fn contribute<R: RngCore + ?Sized>(&self, rng: &mut R) -> Self {
        match self {
            #[cfg(feature = "bn254")]
            Self::Bn254(c) => Self::Bn254(phase2::Contribution::contribute(c, rng)),
            #[cfg(feature = "bls12_377")]
            Self::Bls12_377(c) => Self::Bls12_377(phase2::Contribution::contribute(c, rng)),
            #[cfg(feature = "bls12_381")]
            Self::Bls12_381(c) => Self::Bls12_381(phase2::Contribution::contribute(c, rng)),
            #[cfg(feature = "bw6_761")]
            Self::Bw6_761(c) => Self::Bw6_761(phase2::Contribution::contribute(c, rng)),
        }
    }

    /// Verifies this contribution against its predecessor.
    pub fn verify(&self, prev: &Self) -> Result<(), Error> {
        match (self, prev) {
            #[cfg(feature = "bn254")]
            (Self::Bn254(c), Self::Bn254(p)) => c.verify(p),
            #[cfg(feature = "bls12_377")]
            (Self::Bls12_377(c), Self::Bls12_377(p)) => c.verify(p),
            #[cfg(feature = "bls12_381")]
            (Self::Bls12_381(c), Self::Bls12_381(p)) => c.verify(p),
            #[cfg(feature = "bw6_761")]
            (Self::Bw6_761(c), Self::Bw6_761(p)) => c.verify(p),
            #[allow(unreachable_patterns)]
            _ => Err(mismatch()),
        }
    }

    /// The sealed transcript hash.
    pub fn hash(&self) -> [u8; 32] {
        dispatch!(self, |c| c.hash)
    }

    /// Writes the contribution in its canonical byte layout.
    pub fn write_to<W: std::io::Write>(&self, writer: &mut W) -> Result<(), Error> {
        dispatch!(self, |c| c.write_to(writer))
    }

    /// Reads a contribution for the given curve.
    pub fn read_from<R: std::io::Read>(curve: CurveId, reader: &mut R) -> Result<Self, Error> {
        match curve {
            #[cfg(feature = "bn254")]
            CurveId::Bn254 => Ok(Self::Bn254(phase2::Contribution::read_from(reader)?)),
            #[cfg(feature = "bls12_377")]
            CurveId::Bls12_377 => Ok(Self::Bls12_377(phase2::Contribution::read_from(reader)?)),
            #[cfg(feature = "bls12_381")]
            CurveId::Bls12_381 => Ok(Self::Bls12_381(phase2::Contribution::read_from(reader)?)),
            #[cfg(feature = "bw6_761")]
            CurveId::Bw6_761 => Ok(Self::Bw6_761(phase2::Contribution::read_from(reader)?)),
            #[allow(unreachable_patterns)]
            other => Err(disabled(other)),
        }
    }
}

impl CircuitEvaluations {
    /// Writes the evaluations in their canonical byte layout.
    pub fn write_to<W: std::io::Write>(&self, writer: &mut W) -> Result<(), Error> {
        dispatch!(self, |e| e.write_to(writer))
    }

    /// Reads evaluations for the given curve.
    pub fn read_from<R: std::io::Read>(curve: CurveId, reader: &mut R) -> Result<Self, Error> {
        match curve {
            #[cfg(feature = "bn254")]
            CurveId::Bn254 => Ok(Self::Bn254(phase2::Evaluations::read_from(reader)?)),
            #[cfg(feature = "bls12_377")]
            CurveId::Bls12_377 => Ok(Self::Bls12_377(phase2::Evaluations::read_from(reader)?)),
            #[cfg(feature = "bls12_381")]
            CurveId::Bls12_381 => Ok(Self::Bls12_381(phase2::Evaluations::read_from(reader)?)),
            #[cfg(feature = "bw6_761")]
            CurveId::Bw6_761 => Ok(Self::Bw6_761(phase2::Evaluations::read_from(reader)?)),
            #[allow(unreachable_patterns)]
            other => Err(disabled(other)),
        }
    }
}

#[cfg(test)]
#[cfg(feature = "bn254")]
mod tests {
    use ark_std::UniformRand;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn front_door_chain_and_roundtrip() {
        let mut rng = StdRng::seed_from_u64(61);
        let root = Phase1Ceremony::initialize(CurveId::Bn254, 4, &mut rng).expect("initialize");
        assert_eq!(root.curve(), CurveId::Bn254);
        root.verify_initial().expect("valid root");

        let next = root.contribute(&mut rng);
        next.verify(&root).expect("valid contribution");

        let mut buf = Vec::new();
        next.write_to(&mut buf).expect("write");
        let restored =
            Phase1Ceremony::read_from(CurveId::Bn254, &mut buf.as_slice()).expect("read");
        assert_eq!(restored.hash(), next.hash());
        restored.verify(&root).expect("restored contribution verifies");
    }

    #[test]
    fn front_door_phase2_via_qap_bytes() {
        let mut rng = StdRng::seed_from_u64(62);
        let mut tip = Phase1Ceremony::initialize(CurveId::Bn254, 4, &mut rng).expect("initialize");
        for _ in 0..2 {
            tip = tip.contribute(&mut rng);
        }

        let qap = {
            use ark_bn254::Fr;
            let matrix = |rng: &mut StdRng| -> Vec<Vec<Fr>> {
                (0..6)
                    .map(|_| (0..8).map(|_| Fr::rand(rng)).collect())
                    .collect()
            };
            Qap {
                num_constraints: 8,
                num_wires: 6,
                num_public: 2,
                a: matrix(&mut rng),
                b: matrix(&mut rng),
                c: matrix(&mut rng),
            }
        };
        let mut qap_bytes = Vec::new();
        qap.write_to(&mut qap_bytes).expect("write qap");

        let (root, evaluations) =
            Phase2Ceremony::prepare(&tip, &mut qap_bytes.as_slice(), &mut rng).expect("prepare");
        assert_eq!(root.curve(), CurveId::Bn254);

        let next = root.contribute(&mut rng);
        next.verify(&root).expect("valid contribution");

        let mut buf = Vec::new();
        evaluations.write_to(&mut buf).expect("write evaluations");
        CircuitEvaluations::read_from(CurveId::Bn254, &mut buf.as_slice()).expect("read");
    }
}
