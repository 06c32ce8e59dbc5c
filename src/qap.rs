//! Quadratic Arithmetic Program loading.
//!
//! A QAP is consumed read-only by Phase 2. The binary layout is three
//! little-endian `u32` headers (`num_constraints`, `num_wires`,
//! `num_public`) followed, for each wire, by the three dense coefficient
//! vectors `a`, `b`, `c` of length `num_constraints` in the scalar field's
//! canonical encoding.

use ark_ff::PrimeField;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::errors::Error;

/// Dense QAP matrices: wire polynomials in the Lagrange (per-constraint)
/// basis, indexed `[wire][constraint]`.
#[derive(Debug)]
pub struct Qap<F: PrimeField> {
    /// Number of constraints (columns).
    pub num_constraints: usize,
    /// Number of wires (rows).
    pub num_wires: usize,
    /// Leading wires that are public inputs.
    pub num_public: usize,
    /// Left-input coefficients per wire.
    pub a: Vec<Vec<F>>,
    /// Right-input coefficients per wire.
    pub b: Vec<Vec<F>>,
    /// Output coefficients per wire.
    pub c: Vec<Vec<F>>,
}

impl<F: PrimeField> Clone for Qap<F> {
    fn clone(&self) -> Self {
        Self {
            num_constraints: self.num_constraints,
            num_wires: self.num_wires,
            num_public: self.num_public,
            a: self.a.clone(),
            b: self.b.clone(),
            c: self.c.clone(),
        }
    }
}

impl<F: PrimeField> PartialEq for Qap<F> {
    fn eq(&self, other: &Self) -> bool {
        self.num_constraints == other.num_constraints
            && self.num_wires == other.num_wires
            && self.num_public == other.num_public
            && self.a == other.a
            && self.b == other.b
            && self.c == other.c
    }
}

impl<F: PrimeField> Qap<F> {
    /// Decodes a QAP from its binary layout.
    pub fn read_from<R: std::io::Read>(reader: &mut R) -> Result<Self, Error> {
        let num_constraints = reader.read_u32::<LittleEndian>().map_err(truncated)? as usize;
        let num_wires = reader.read_u32::<LittleEndian>().map_err(truncated)? as usize;
        let num_public = reader.read_u32::<LittleEndian>().map_err(truncated)? as usize;

        if num_public > num_wires {
            return Err(Error::MalformedQap(format!(
                "{num_public} public wires declared but only {num_wires} wires"
            )));
        }

        let mut read_matrix = || -> Result<Vec<F>, Error> {
            (0..num_constraints)
                .map(|_| {
                    F::deserialize_compressed(&mut *reader)
                        .map_err(|err| Error::MalformedQap(format!("invalid field element: {err}")))
                })
                .collect()
        };

        let mut a = Vec::with_capacity(num_wires);
        let mut b = Vec::with_capacity(num_wires);
        let mut c = Vec::with_capacity(num_wires);
        for _ in 0..num_wires {
            a.push(read_matrix()?);
            b.push(read_matrix()?);
            c.push(read_matrix()?);
        }

        Ok(Self {
            num_constraints,
            num_wires,
            num_public,
            a,
            b,
            c,
        })
    }

    /// Encodes the QAP in the layout [`read_from`](Self::read_from) expects.
    pub fn write_to<W: std::io::Write>(&self, writer: &mut W) -> Result<(), Error> {
        writer.write_u32::<LittleEndian>(self.num_constraints as u32)?;
        writer.write_u32::<LittleEndian>(self.num_wires as u32)?;
        writer.write_u32::<LittleEndian>(self.num_public as u32)?;
        for wire in 0..self.num_wires {
            for row in [&self.a[wire], &self.b[wire], &self.c[wire]] {
                for coeff in row {
                    coeff.serialize_compressed(&mut *writer)?;
                }
            }
        }
        Ok(())
    }

    /// Number of private (non-public) wires.
    pub fn num_private(&self) -> usize {
        self.num_wires - self.num_public
    }
}

fn truncated(err: std::io::Error) -> Error {
    Error::MalformedQap(format!("truncated input: {err}"))
}

#[cfg(test)]
#[cfg(feature = "bn254")]
mod tests {
    use ark_bn254::Fr;
    use ark_std::UniformRand;
    use rand::{SeedableRng, rngs::StdRng};
    use rand_core::RngCore;

    use super::*;

    fn random_qap<R: RngCore + ?Sized>(
        rng: &mut R,
        num_constraints: usize,
        num_wires: usize,
        num_public: usize,
    ) -> Qap<Fr> {
        let matrix = |rng: &mut R| -> Vec<Vec<Fr>> {
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
    fn roundtrip() {
        let mut rng = StdRng::seed_from_u64(31);
        let qap = random_qap(&mut rng, 16, 20, 3);

        let mut buf = Vec::new();
        qap.write_to(&mut buf).expect("write");
        let restored = Qap::<Fr>::read_from(&mut buf.as_slice()).expect("read");
        assert_eq!(qap, restored);
        assert_eq!(restored.num_private(), 17);
    }

    #[test]
    fn rejects_truncated_input() {
        let mut rng = StdRng::seed_from_u64(32);
        let qap = random_qap(&mut rng, 4, 6, 2);

        let mut buf = Vec::new();
        qap.write_to(&mut buf).expect("write");
        buf.truncate(buf.len() - 7);
        assert!(matches!(
            Qap::<Fr>::read_from(&mut buf.as_slice()),
            Err(Error::MalformedQap(_))
        ));
    }

    #[test]
    fn rejects_public_exceeding_wires() {
        let mut buf = Vec::new();
        buf.write_u32::<LittleEndian>(4).expect("write");
        buf.write_u32::<LittleEndian>(3).expect("write");
        buf.write_u32::<LittleEndian>(5).expect("write");
        assert!(matches!(
            Qap::<Fr>::read_from(&mut buf.as_slice()),
            Err(Error::MalformedQap(_))
        ));
    }
}
