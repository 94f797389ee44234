//! Fixed-width big number type with Montgomery modular arithmetic.
//!
//! A [`BigNum`] is an unsigned integer stored as big-endian bytes with a
//! width chosen at construction. Every multi-operand operation requires all
//! operands (including the modulus) to share that width and fails with
//! [`Error::WidthMismatch`] otherwise. Montgomery-domain values represent
//! `v * R mod N` with `R = 256^width`; the modulus must be odd for the
//! Montgomery routines to be correct, which is not checked.

use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;

use rand::Rng;

#[cfg(feature = "fuzzing")]
use arbitrary::Arbitrary;

#[cfg(feature = "zeroize_memory")]
use zeroize::Zeroize;

use crate::error::Error;

/// Multiplicative inverses modulo 256 of the odd residues, indexed by
/// `odd_byte >> 1`. Drives the per-digit correction step of Montgomery
/// multiplication.
const INV256: [u8; 0x80] = [
    0x01, 0xab, 0xcd, 0xb7, 0x39, 0xa3, 0xc5, 0xef, //
    0xf1, 0x1b, 0x3d, 0xa7, 0x29, 0x13, 0x35, 0xdf, //
    0xe1, 0x8b, 0xad, 0x97, 0x19, 0x83, 0xa5, 0xcf, //
    0xd1, 0xfb, 0x1d, 0x87, 0x09, 0xf3, 0x15, 0xbf, //
    0xc1, 0x6b, 0x8d, 0x77, 0xf9, 0x63, 0x85, 0xaf, //
    0xb1, 0xdb, 0xfd, 0x67, 0xe9, 0xd3, 0xf5, 0x9f, //
    0xa1, 0x4b, 0x6d, 0x57, 0xd9, 0x43, 0x65, 0x8f, //
    0x91, 0xbb, 0xdd, 0x47, 0xc9, 0xb3, 0xd5, 0x7f, //
    0x81, 0x2b, 0x4d, 0x37, 0xb9, 0x23, 0x45, 0x6f, //
    0x71, 0x9b, 0xbd, 0x27, 0xa9, 0x93, 0xb5, 0x5f, //
    0x61, 0x0b, 0x2d, 0x17, 0x99, 0x03, 0x25, 0x4f, //
    0x51, 0x7b, 0x9d, 0x07, 0x89, 0x73, 0x95, 0x3f, //
    0x41, 0xeb, 0x0d, 0xf7, 0x79, 0xe3, 0x05, 0x2f, //
    0x31, 0x5b, 0x7d, 0xe7, 0x69, 0x53, 0x75, 0x1f, //
    0x21, 0xcb, 0xed, 0xd7, 0x59, 0xc3, 0xe5, 0x0f, //
    0x11, 0x3b, 0x5d, 0xc7, 0x49, 0x33, 0x55, 0xff, //
];

/// Fixed-width unsigned big number, most significant byte first.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "fuzzing", derive(Arbitrary))]
#[cfg_attr(feature = "zeroize_memory", derive(Zeroize))]
#[cfg_attr(feature = "zeroize_memory", zeroize(drop))]
pub struct BigNum {
    v: Vec<u8>,
}

/// Full-width addition into `acc`, returning the carry bit.
fn add_assign(acc: &mut [u8], b: &[u8]) -> u8 {
    let mut carry: u16 = 0;
    for i in (0..acc.len()).rev() {
        let dig = acc[i] as u16 + b[i] as u16 + carry;
        acc[i] = dig as u8;
        carry = dig >> 8;
    }
    carry as u8
}

/// Full-width subtraction from `acc`, returning the borrow bit.
fn sub_assign(acc: &mut [u8], b: &[u8]) -> u8 {
    let mut carry: u16 = 1;
    for i in (0..acc.len()).rev() {
        let dig = acc[i] as u16 + 0xFF - b[i] as u16 + carry;
        acc[i] = dig as u8;
        carry = dig >> 8;
    }
    1 - carry as u8
}

/// Subtract `n` until the value drops below it. Only safe for values within
/// a small multiple of `n`.
fn reduce_assign(v: &mut [u8], n: &[u8]) {
    while (&*v).cmp(n) != Ordering::Less {
        sub_assign(v, n);
    }
}

/// Double a value modulo `n` in place.
fn double_mod_assign(v: &mut [u8], n: &[u8]) {
    let mut carry: u16 = 0;
    for i in (0..v.len()).rev() {
        let dig = ((v[i] as u16) << 1) | carry;
        v[i] = dig as u8;
        carry = dig >> 8;
    }
    if carry != 0 {
        sub_assign(v, n);
    }
    reduce_assign(v, n);
}

/// One digit-serial Montgomery step: fold `a * b` into the accumulator, add
/// the multiple of `n` that zeroes the low byte, and shift that byte out.
///
/// `z` is chosen so that `acc[last] + a[last]*b + n[last]*z ≡ 0 (mod 256)`,
/// which needs `n` odd so its low byte has an inverse in `INV256`.
fn mont_muladd_digit(acc: &mut [u8], a: &[u8], b: u8, n: &[u8]) {
    let last = n.len() - 1;

    let z = acc[last]
        .wrapping_add(a[last].wrapping_mul(b))
        .wrapping_neg()
        .wrapping_mul(INV256[(n[last] >> 1) as usize]);

    let mut dig: u32 = acc[last] as u32 + a[last] as u32 * b as u32 + n[last] as u32 * z as u32;
    dig >>= 8;

    for i in (0..last).rev() {
        dig += acc[i] as u32 + a[i] as u32 * b as u32 + n[i] as u32 * z as u32;
        acc[i + 1] = dig as u8;
        dig >>= 8;
    }

    acc[0] = dig as u8;
    dig >>= 8;

    if dig != 0 {
        sub_assign(acc, n);
    }

    reduce_assign(acc, n);
}

fn hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl BigNum {
    /// Zero-valued number of the given byte width.
    pub fn zero(width: usize) -> Self {
        Self {
            v: vec![0; width],
        }
    }

    /// The number 1 at the given byte width.
    pub fn one(width: usize) -> Self {
        let mut v = vec![0; width];
        v[width - 1] = 1;
        Self { v }
    }

    /// Take ownership of big-endian bytes; the width is the slice length.
    pub fn from_bytes_be(bytes: &[u8]) -> Self {
        Self {
            v: bytes.to_vec(),
        }
    }

    /// Parse an uppercase or lowercase hex string into a number of the given
    /// width. Shorter strings are zero-extended on the left; odd-length
    /// strings, non-hex digits and strings wider than `width` are rejected.
    pub fn from_hex(s: &str, width: usize) -> Result<Self, Error> {
        let raw = s.as_bytes();
        if raw.len() % 2 != 0 {
            return Err(Error::InvalidHex);
        }
        if raw.len() / 2 > width {
            return Err(Error::HexOverflow { width });
        }

        let mut v = vec![0u8; width];
        let offset = width - raw.len() / 2;
        for (i, pair) in raw.chunks_exact(2).enumerate() {
            let hi = hex_digit(pair[0]).ok_or(Error::InvalidHex)?;
            let lo = hex_digit(pair[1]).ok_or(Error::InvalidHex)?;
            v[offset + i] = (hi << 4) | lo;
        }

        Ok(Self { v })
    }

    /// Uniform random value in `[0, 256^width)`.
    pub fn random<R: Rng>(width: usize, rng: &mut R) -> Self {
        let mut v = vec![0u8; width];
        rng.fill_bytes(&mut v);
        Self { v }
    }

    /// Random value below `modulus`, drawn at full width and folded with
    /// [`reduce`](Self::reduce). Slightly biased, like the original scheme
    /// this reproduces; the fold is linear, so the modulus should have a
    /// nonzero top byte.
    pub fn random_mod<R: Rng>(modulus: &Self, rng: &mut R) -> Self {
        let mut num = Self::random(modulus.width(), rng);
        reduce_assign(&mut num.v, &modulus.v);
        num
    }

    /// Byte width fixed at construction.
    pub fn width(&self) -> usize {
        self.v.len()
    }

    /// Big-endian bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.v
    }

    pub fn is_zero(&self) -> bool {
        self.v.iter().all(|&b| b == 0)
    }

    fn check_width(&self, other: &Self) -> Result<(), Error> {
        if self.v.len() != other.v.len() {
            return Err(Error::WidthMismatch {
                expected: self.v.len(),
                got: other.v.len(),
            });
        }
        Ok(())
    }

    /// `(self + other) mod modulus`. Operands are expected in `[0, modulus)`;
    /// a leftover carry is folded back with one subtraction and a final
    /// reduction pass.
    pub fn mod_add(&self, other: &Self, modulus: &Self) -> Result<Self, Error> {
        self.check_width(other)?;
        self.check_width(modulus)?;

        let mut v = self.v.clone();
        if add_assign(&mut v, &other.v) != 0 {
            sub_assign(&mut v, &modulus.v);
        }
        reduce_assign(&mut v, &modulus.v);

        Ok(Self { v })
    }

    /// `(self - other) mod modulus`. A borrow is repaired by adding the
    /// modulus back once; operands must already be in `[0, modulus)`.
    pub fn mod_sub(&self, other: &Self, modulus: &Self) -> Result<Self, Error> {
        self.check_width(other)?;
        self.check_width(modulus)?;

        let mut v = self.v.clone();
        if sub_assign(&mut v, &other.v) != 0 {
            add_assign(&mut v, &modulus.v);
        }

        Ok(Self { v })
    }

    /// Fold into `[0, modulus)` by repeated subtraction. Linear in the
    /// quotient; only meant for values within a small multiple of the
    /// modulus (e.g. after one addition), not a general modulo.
    pub fn reduce(mut self, modulus: &Self) -> Result<Self, Error> {
        self.check_width(modulus)?;
        reduce_assign(&mut self.v, &modulus.v);
        Ok(self)
    }

    /// Montgomery product `self * other * R^-1 mod modulus`, `R = 256^width`.
    ///
    /// Digit-serial: each byte of `other`, least significant first, is folded
    /// into an accumulator together with a correction multiple of the modulus
    /// that keeps the intermediate single-width. Requires an odd modulus.
    pub fn mont_mul(&self, other: &Self, modulus: &Self) -> Result<Self, Error> {
        self.check_width(other)?;
        self.check_width(modulus)?;

        let mut acc = vec![0u8; self.v.len()];
        for &digit in other.v.iter().rev() {
            mont_muladd_digit(&mut acc, &self.v, digit, &modulus.v);
        }

        Ok(Self { v: acc })
    }

    /// Lift a plain value into the Montgomery domain: `self * R mod modulus`,
    /// computed as `8 * width` modular doublings. The value must already be
    /// reduced.
    pub fn to_mont(&self, modulus: &Self) -> Result<Self, Error> {
        self.check_width(modulus)?;
        if self.v.as_slice().cmp(&modulus.v) != Ordering::Less {
            return Err(Error::ValueOutOfRange);
        }

        let mut v = self.v.clone();
        for _ in 0..8 * v.len() {
            double_mod_assign(&mut v, &modulus.v);
        }

        Ok(Self { v })
    }

    /// Drop a Montgomery-domain value back to the plain domain by one
    /// Montgomery multiplication with 1.
    pub fn from_mont(&self, modulus: &Self) -> Result<Self, Error> {
        self.mont_mul(&Self::one(modulus.width()), modulus)
    }

    /// Montgomery-domain exponentiation: for a base representing `a`, returns
    /// the Montgomery image of `a^exponent mod modulus`.
    ///
    /// The exponent is read as a plain big-endian bit string over all
    /// `8 * exponent.width()` bits, most significant first; its width is
    /// independent of the operand width. Square-and-multiply with a
    /// bit-dependent branch: not constant-time, so exponents leak timing.
    pub fn mont_exp(&self, exponent: &Self, modulus: &Self) -> Result<Self, Error> {
        self.check_width(modulus)?;

        let mut s = Self::one(modulus.width()).to_mont(modulus)?;
        for &byte in exponent.v.iter() {
            let mut mask = 0x80u8;
            while mask != 0 {
                let t = s.mont_mul(&s, modulus)?;
                s = if byte & mask != 0 {
                    t.mont_mul(self, modulus)?
                } else {
                    t
                };
                mask >>= 1;
            }
        }

        Ok(s)
    }

    /// Montgomery-domain modular inverse via Fermat's little theorem:
    /// exponentiation by `modulus - 2`. Correct only for prime moduli, which
    /// is not checked; a composite modulus or a zero input yields garbage.
    pub fn mont_inv(&self, modulus: &Self) -> Result<Self, Error> {
        self.check_width(modulus)?;

        let mut e = modulus.v.clone();
        let two = {
            let mut v = vec![0u8; e.len()];
            v[e.len() - 1] = 2;
            v
        };
        sub_assign(&mut e, &two);

        self.mont_exp(&Self { v: e }, modulus)
    }
}

#[cfg(feature = "std")]
impl BigNum {
    /// Read exactly `width` raw big-endian bytes from a stream.
    pub fn read_from<R: std::io::Read>(reader: &mut R, width: usize) -> std::io::Result<Self> {
        let mut v = vec![0u8; width];
        reader.read_exact(&mut v)?;
        Ok(Self { v })
    }

    /// Write the raw big-endian bytes to a stream.
    pub fn write_to<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.v)
    }
}

/// Numeric ordering, defined only between numbers of equal width.
impl PartialOrd for BigNum {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.v.len() != other.v.len() {
            return None;
        }
        Some(self.v.cmp(&other.v))
    }
}

impl fmt::Display for BigNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.v {
            write!(f, "{b:02X}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for BigNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigNum(0x{self})")
    }
}
