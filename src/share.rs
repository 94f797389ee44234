use alloc::vec::Vec;

use crate::bignum::BigNum;
use crate::error::Error;

#[cfg(feature = "fuzzing")]
use arbitrary::Arbitrary;

#[cfg(feature = "zeroize_memory")]
use zeroize::Zeroize;

/// One share of a split secret: an evaluation point `x` and the polynomial
/// value `y = P(x) mod N`. Both carry the modulus width; `x` must accompany
/// `y` for reconstruction. Can be serialized to and from a byte array.
///
/// Usage example:
/// ```
/// use primeshare::{BigNum, SecretSharing, Share};
/// use core::convert::TryFrom;
/// use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
/// # fn send_to_printer(_: Vec<u8>) {}
///
/// let n = BigNum::from_hex(
///     "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F",
///     32,
/// )
/// .unwrap();
/// let secret = BigNum::from_hex("2A", 32).unwrap();
/// let sss = SecretSharing::new(n, 2);
/// let mut rng = ChaCha8Rng::from_seed([0x90; 32]);
/// let poly = sss.random_polynomial_rng(&secret, &mut rng).unwrap();
/// let shares = sss.shares_rng(&poly, 3, &mut rng).unwrap();
///
/// // Transmit the share bytes to a printer
/// for s in &shares {
///     send_to_printer(Vec::from(s));
/// }
///
/// // Rebuild shares from raw bytes and recover the secret
/// let restored: Vec<Share> = shares
///     .iter()
///     .map(|s| Share::try_from(Vec::from(s).as_slice()).unwrap())
///     .collect();
/// assert_eq!(sss.recover(&restored).unwrap(), secret);
/// ```
///
/// # Serialization format
/// `x` bytes followed by `y` bytes, each exactly the modulus width, most
/// significant byte first. There is no header: the reader recovers the width
/// by halving the buffer length.
#[derive(Clone)]
#[cfg_attr(feature = "fuzzing", derive(Arbitrary, Debug))]
#[cfg_attr(feature = "zeroize_memory", derive(Zeroize))]
#[cfg_attr(feature = "zeroize_memory", zeroize(drop))]
pub struct Share {
    /// The evaluation point.
    pub x: BigNum,
    /// The polynomial value at `x`.
    pub y: BigNum,
}

/// Converts a share to a byte vector: the `x` bytes followed by the `y` bytes.
impl From<&Share> for Vec<u8> {
    fn from(s: &Share) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(s.x.width() + s.y.width());
        bytes.extend_from_slice(s.x.as_bytes());
        bytes.extend_from_slice(s.y.as_bytes());
        bytes
    }
}

impl core::convert::TryFrom<&[u8]> for Share {
    type Error = Error;

    fn try_from(s: &[u8]) -> Result<Share, Self::Error> {
        if s.is_empty() || s.len() % 2 != 0 {
            return Err(Error::InvalidShareEncoding);
        }
        let (x, y) = s.split_at(s.len() / 2);
        Ok(Share {
            x: BigNum::from_bytes_be(x),
            y: BigNum::from_bytes_be(y),
        })
    }
}
