//! [Shamir's Secret Sharing](https://en.wikipedia.org/wiki/Shamir%27s_Secret_Sharing)
//! over a prime field, built on a fixed-width byte-serial Montgomery
//! arithmetic engine.
//!
//! A secret in `[0, N)` for a caller-chosen prime modulus `N` is embedded as
//! the constant term of a random degree-`t` polynomial; shares are points
//! `(x, P(x) mod N)` and any `t + 1` of them reconstruct the secret by
//! Lagrange interpolation at zero.
//!
//! # Usage
//! ## (std)
//!
//! ```
//! use primeshare::{BigNum, SecretSharing};
//!
//! // The secp256k1 field prime, 32 bytes wide
//! let n = BigNum::from_hex(
//!     "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F",
//!     32,
//! )
//! .unwrap();
//! let secret = BigNum::from_hex(
//!     "098765432100DEADBEEF000000000000000000000000CAFEBABE001234567890",
//!     32,
//! )
//! .unwrap();
//!
//! // Degree 3, so 4 shares are needed to reconstruct
//! let sss = SecretSharing::new(n, 3);
//! # #[cfg(feature = "std")]
//! # {
//! let poly = sss.random_polynomial(&secret).unwrap();
//! let shares = sss.shares(&poly, 4).unwrap();
//! // Recover the original secret!
//! assert_eq!(sss.recover(&shares).unwrap(), secret);
//! # }
//! ```
//!
//! ## (no std)
//!
//! ```
//! use primeshare::{BigNum, SecretSharing};
//! use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
//!
//! let n = BigNum::from_hex(
//!     "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F",
//!     32,
//! )
//! .unwrap();
//! let secret = BigNum::from_hex("2A", 32).unwrap();
//!
//! let sss = SecretSharing::new(n, 3);
//! // Bring your own RNG when `std` is not available
//! let mut rng = ChaCha8Rng::from_seed([0x90; 32]);
//! let poly = sss.random_polynomial_rng(&secret, &mut rng).unwrap();
//! let shares = sss.shares_rng(&poly, 4, &mut rng).unwrap();
//! assert_eq!(sss.recover(&shares).unwrap(), secret);
//! ```
//!
//! # Caller contracts
//!
//! The arithmetic engine never validates that the modulus is odd (required by
//! Montgomery multiplication) or prime (required by Fermat inversion and the
//! sharing math); a bad modulus yields wrong numbers, not errors. Likewise
//! [`SecretSharing::recover`] does not compare the share count against the
//! threshold: fewer than `degree + 1` shares interpolate the wrong polynomial
//! and silently return the wrong value. Duplicate evaluation points, however,
//! are detected and rejected.
//!
//! # Feature flags
//!
//! - `std` — enables the `thread_rng`-backed convenience methods and the
//!   binary codecs. Without `std`, use the `*_rng` variants.
//! - `zeroize_memory` — clears big numbers and shares on drop.
//! - `fuzzing` — derives `Arbitrary` on the public types for the fuzz
//!   targets.
#![cfg_attr(not(feature = "std"), no_std)]

mod bignum;
mod error;
mod poly;
mod share;

extern crate alloc;

use alloc::vec::Vec;
use hashbrown::HashSet;
use rand::Rng;

pub use bignum::BigNum;
pub use error::Error;
pub use poly::Polynomial;
pub use share::Share;

/// Threshold secret-sharing scheme over a prime modulus.
///
/// Holds the modulus `N` and the polynomial degree `t`; exactly `t + 1`
/// shares at pairwise-distinct points reconstruct the secret.
///
/// Usage example:
/// ```
/// # use primeshare::{BigNum, SecretSharing};
/// # use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
/// let n = BigNum::from_hex(
///     "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F",
///     32,
/// )
/// .unwrap();
/// let sss = SecretSharing::new(n, 3);
/// let secret = BigNum::from_hex("1234", 32).unwrap();
/// let mut rng = ChaCha8Rng::from_seed([0x90; 32]);
/// let poly = sss.random_polynomial_rng(&secret, &mut rng).unwrap();
/// let shares = sss.shares_rng(&poly, 4, &mut rng).unwrap();
/// assert_eq!(sss.recover(&shares).unwrap(), secret);
/// ```
pub struct SecretSharing {
    modulus: BigNum,
    degree: usize,
}

impl SecretSharing {
    /// Scheme over `modulus` with sharing polynomials of the given degree.
    /// The modulus must be an odd prime; neither property is checked.
    pub fn new(modulus: BigNum, degree: usize) -> Self {
        Self { modulus, degree }
    }

    pub fn modulus(&self) -> &BigNum {
        &self.modulus
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Number of shares mathematically required to reconstruct.
    pub fn threshold(&self) -> usize {
        self.degree + 1
    }

    /// Build a random sharing polynomial with `secret` as its constant term;
    /// the remaining coefficients are drawn from `rng` and reduced modulo the
    /// modulus. The secret must be in `[0, N)`.
    ///
    /// This method is useful when `std` is not available. For typical usage
    /// see [`random_polynomial`](Self::random_polynomial).
    pub fn random_polynomial_rng<R: Rng>(
        &self,
        secret: &BigNum,
        rng: &mut R,
    ) -> Result<Polynomial, Error> {
        let mut poly = Polynomial::new(self.degree, self.modulus.clone());
        poly.set_coeff(0, secret.clone())?;
        for i in 1..=self.degree {
            poly.set_coeff(i, BigNum::random_mod(&self.modulus, rng))?;
        }
        Ok(poly)
    }

    /// Build a random sharing polynomial using the thread-local CSPRNG.
    #[cfg(feature = "std")]
    pub fn random_polynomial(&self, secret: &BigNum) -> Result<Polynomial, Error> {
        let mut rng = rand::thread_rng();
        self.random_polynomial_rng(secret, &mut rng)
    }

    /// Derive the share for a caller-chosen evaluation point:
    /// `(x, P(x) mod N)`. The point must be in `[0, N)`; note that `x = 0`
    /// would hand out the secret itself.
    pub fn create_share(&self, poly: &Polynomial, x: &BigNum) -> Result<Share, Error> {
        Ok(Share {
            x: x.clone(),
            y: poly.evaluate(x)?,
        })
    }

    /// Generate `count` shares at random evaluation points.
    ///
    /// Points are drawn independently, so with a modulus far wider than the
    /// share count collisions are negligible; a collision surfaces later as
    /// [`Error::DuplicateShare`] during recovery.
    pub fn shares_rng<R: Rng>(
        &self,
        poly: &Polynomial,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<Share>, Error> {
        (0..count)
            .map(|_| {
                let x = BigNum::random_mod(&self.modulus, rng);
                self.create_share(poly, &x)
            })
            .collect()
    }

    /// Generate `count` shares at random points using the thread-local CSPRNG.
    #[cfg(feature = "std")]
    pub fn shares(&self, poly: &Polynomial, count: usize) -> Result<Vec<Share>, Error> {
        let mut rng = rand::thread_rng();
        self.shares_rng(poly, count, &mut rng)
    }

    /// Recover the secret `P(0)` from a set of shares by modular Lagrange
    /// interpolation at zero:
    ///
    /// `secret = Σ_k y_k · Π_{j≠k} x_j · (x_j − x_k)^{-1} mod N`
    ///
    /// Shares with duplicate evaluation points make a denominator zero and
    /// are rejected. The share count is **not** compared against the
    /// threshold: supplying fewer than `degree + 1` shares interpolates a
    /// different polynomial and silently yields the wrong value (see the
    /// crate-level caller contracts).
    pub fn recover(&self, shares: &[Share]) -> Result<BigNum, Error> {
        if shares.is_empty() {
            return Err(Error::NoShares);
        }

        let mut points: HashSet<&[u8]> = HashSet::new();
        for share in shares {
            if !points.insert(share.x.as_bytes()) {
                return Err(Error::DuplicateShare);
            }
        }

        let n = &self.modulus;
        let mut secret = BigNum::zero(n.width());

        for (k, sk) in shares.iter().enumerate() {
            let mut acc = sk.y.to_mont(n)?;
            for (j, sj) in shares.iter().enumerate() {
                if j == k {
                    continue;
                }
                // x_j - x_k; zero means the points coincide modulo N
                let diff = sj.x.mod_sub(&sk.x, n)?;
                if diff.is_zero() {
                    return Err(Error::DuplicateShare);
                }
                let inv = diff.to_mont(n)?.mont_inv(n)?;
                acc = acc.mont_mul(&sj.x.to_mont(n)?, n)?.mont_mul(&inv, n)?;
            }
            secret = secret.mod_add(&acc.from_mont(n)?, n)?;
        }

        Ok(secret)
    }
}

#[cfg(test)]
mod tests {
    use super::{BigNum, Error, SecretSharing, Share};
    use alloc::vec::Vec;
    use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

    const SECP256K1_P: &str =
        "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F";
    const SECRET: &str = "098765432100DEADBEEF000000000000000000000000CAFEBABE001234567890";

    fn scheme(degree: usize) -> SecretSharing {
        SecretSharing::new(BigNum::from_hex(SECP256K1_P, 32).unwrap(), degree)
    }

    fn make_shares(sss: &SecretSharing, secret: &BigNum, count: usize, seed: u8) -> Vec<Share> {
        let mut rng = ChaCha8Rng::from_seed([seed; 32]);
        let poly = sss.random_polynomial_rng(secret, &mut rng).unwrap();
        sss.shares_rng(&poly, count, &mut rng).unwrap()
    }

    #[test]
    fn test_end_to_end_secp256k1() {
        let sss = scheme(3);
        let secret = BigNum::from_hex(SECRET, 32).unwrap();
        let shares = make_shares(&sss, &secret, 4, 0x10);
        assert_eq!(sss.recover(&shares).unwrap(), secret);
    }

    #[test]
    fn test_recover_is_order_independent() {
        let sss = scheme(3);
        let secret = BigNum::from_hex(SECRET, 32).unwrap();
        let shares = make_shares(&sss, &secret, 4, 0x11);
        let shuffled = [
            shares[2].clone(),
            shares[0].clone(),
            shares[3].clone(),
            shares[1].clone(),
        ];
        assert_eq!(sss.recover(&shuffled).unwrap(), secret);
    }

    #[test]
    fn test_extra_shares_still_recover() {
        let sss = scheme(3);
        let secret = BigNum::from_hex(SECRET, 32).unwrap();
        let shares = make_shares(&sss, &secret, 6, 0x12);
        assert_eq!(sss.recover(&shares).unwrap(), secret);
    }

    #[test]
    fn test_under_threshold_gives_wrong_value() {
        // 3 shares of a degree-3 polynomial interpolate the wrong polynomial;
        // the result is well-defined but not the secret. This is the
        // documented caller contract, not an error path.
        let sss = scheme(3);
        let secret = BigNum::from_hex(SECRET, 32).unwrap();
        let shares = make_shares(&sss, &secret, 3, 0x13);
        let wrong = sss.recover(&shares).unwrap();
        assert_ne!(wrong, secret);
    }

    #[test]
    fn test_duplicate_point_err() {
        let sss = scheme(3);
        let secret = BigNum::from_hex(SECRET, 32).unwrap();
        let mut shares = make_shares(&sss, &secret, 4, 0x14);
        shares[1] = shares[0].clone();
        assert_eq!(sss.recover(&shares), Err(Error::DuplicateShare));
    }

    #[test]
    fn test_empty_share_set_err() {
        let sss = scheme(3);
        assert_eq!(sss.recover(&[]), Err(Error::NoShares));
    }

    #[test]
    fn test_small_field_manual_points() {
        // N = 251, P(X) = 42 + c1*X of degree 1: shares at x = 1, 2
        let n = BigNum::from_hex("FB", 1).unwrap();
        let sss = SecretSharing::new(n.clone(), 1);
        let secret = BigNum::from_hex("2A", 1).unwrap();
        let mut rng = ChaCha8Rng::from_seed([0x15; 32]);
        let poly = sss.random_polynomial_rng(&secret, &mut rng).unwrap();

        let shares = [
            sss.create_share(&poly, &BigNum::from_hex("01", 1).unwrap()).unwrap(),
            sss.create_share(&poly, &BigNum::from_hex("02", 1).unwrap()).unwrap(),
        ];
        assert_eq!(sss.recover(&shares).unwrap(), secret);
    }

    #[test]
    fn test_constant_term_is_secret() {
        let sss = scheme(2);
        let secret = BigNum::from_hex(SECRET, 32).unwrap();
        let mut rng = ChaCha8Rng::from_seed([0x16; 32]);
        let poly = sss.random_polynomial_rng(&secret, &mut rng).unwrap();
        assert_eq!(poly.coeff(0).unwrap(), secret);
        assert_eq!(poly.degree(), 2);
    }

    #[test]
    fn test_unreduced_secret_rejected() {
        // secret >= N must fail fast instead of being silently folded
        let n = BigNum::from_hex("FB", 1).unwrap();
        let sss = SecretSharing::new(n, 1);
        let secret = BigNum::from_hex("FC", 1).unwrap();
        let mut rng = ChaCha8Rng::from_seed([0x17; 32]);
        assert_eq!(
            sss.random_polynomial_rng(&secret, &mut rng).unwrap_err(),
            Error::ValueOutOfRange
        );
    }

    #[test]
    fn test_share_bytes_roundtrip_through_recovery() {
        let sss = scheme(3);
        let secret = BigNum::from_hex(SECRET, 32).unwrap();
        let shares = make_shares(&sss, &secret, 4, 0x18);

        let restored: Vec<Share> = shares
            .iter()
            .map(|s| Share::try_from(Vec::from(s).as_slice()).unwrap())
            .collect();
        assert_eq!(sss.recover(&restored).unwrap(), secret);
    }
}
