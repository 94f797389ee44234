//! Polynomials over an odd modulus, evaluated with the Montgomery engine.

use alloc::vec::Vec;
use core::fmt;

use crate::bignum::BigNum;
use crate::error::Error;

/// A polynomial `P(X) = a_0 + a_1*X + ... + a_d*X^d mod N` with `d + 1`
/// coefficients, index 0 being the constant term.
///
/// Coefficients are stored in Montgomery form so repeated evaluation pays the
/// domain conversion once per coefficient instead of once per term per call.
#[derive(Clone, Debug)]
pub struct Polynomial {
    /// Montgomery-form coefficients, ascending degree.
    coeffs: Vec<BigNum>,
    modulus: BigNum,
}

impl Polynomial {
    /// Allocate a degree-`degree` polynomial over `modulus` with all
    /// coefficients zero.
    pub fn new(degree: usize, modulus: BigNum) -> Self {
        let coeffs = (0..=degree).map(|_| BigNum::zero(modulus.width())).collect();
        Self { coeffs, modulus }
    }

    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    pub fn modulus(&self) -> &BigNum {
        &self.modulus
    }

    /// Store a plain-form coefficient, converting it into Montgomery form.
    /// The value must be reduced modulo the modulus.
    pub fn set_coeff(&mut self, index: usize, value: BigNum) -> Result<(), Error> {
        if index >= self.coeffs.len() {
            return Err(Error::IndexOutOfRange {
                index,
                degree: self.degree(),
            });
        }
        self.coeffs[index] = value.to_mont(&self.modulus)?;
        Ok(())
    }

    /// Plain-form copy of a coefficient. The stored Montgomery representation
    /// is left untouched.
    pub fn coeff(&self, index: usize) -> Result<BigNum, Error> {
        if index >= self.coeffs.len() {
            return Err(Error::IndexOutOfRange {
                index,
                degree: self.degree(),
            });
        }
        self.coeffs[index].from_mont(&self.modulus)
    }

    /// Evaluate `P(x) mod N` in the plain domain.
    ///
    /// Term by term: `x` is lifted into Montgomery form once, each power
    /// `x^i` is recomputed with a fresh exponentiation, multiplied by the
    /// stored coefficient and accumulated. That is `O(d)` independent
    /// exponentiations rather than Horner's `O(d)` multiplications, trading
    /// speed for keeping each term's computation self-contained.
    pub fn evaluate(&self, x: &BigNum) -> Result<BigNum, Error> {
        let n = &self.modulus;
        let xm = x.to_mont(n)?;

        let mut acc = BigNum::zero(n.width());
        for (i, coeff) in self.coeffs.iter().enumerate() {
            let e = BigNum::from_bytes_be(&(i as u32).to_be_bytes());
            let term = xm
                .mont_exp(&e, n)?
                .mont_mul(coeff, n)?
                .from_mont(n)?;
            acc = acc.mod_add(&term, n)?;
        }

        Ok(acc)
    }
}

#[cfg(feature = "std")]
impl Polynomial {
    /// Read `degree + 1` coefficients from a stream.
    ///
    /// The wire format carries the coefficients in their internal Montgomery
    /// form with no header, so the reader must supply the same degree and
    /// modulus the writer used.
    pub fn read_from<R: std::io::Read>(
        reader: &mut R,
        degree: usize,
        modulus: BigNum,
    ) -> std::io::Result<Self> {
        let width = modulus.width();
        let coeffs = (0..=degree)
            .map(|_| BigNum::read_from(reader, width))
            .collect::<std::io::Result<Vec<_>>>()?;
        Ok(Self { coeffs, modulus })
    }

    /// Write all coefficients, ascending index, in Montgomery form.
    pub fn write_to<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for coeff in &self.coeffs {
            coeff.write_to(writer)?;
        }
        Ok(())
    }
}

/// Renders as a sum of terms, e.g. `03 + 05*X + 01*X^2`, with coefficients
/// shown in plain form.
impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, coeff) in self.coeffs.iter().enumerate() {
            let plain = coeff.from_mont(&self.modulus).map_err(|_| fmt::Error)?;
            write!(f, "{plain}")?;
            if i == 1 {
                write!(f, "*X")?;
            } else if i > 1 {
                write!(f, "*X^{i}")?;
            }
            if i < self.degree() {
                write!(f, " + ")?;
            }
        }
        Ok(())
    }
}
