#![no_main]
use libfuzzer_sys::fuzz_target;

use arbitrary::Arbitrary;
use primeshare::{BigNum, SecretSharing, Share};

// 2^64 - 59, an 8-byte prime
const MODULUS: &str = "FFFFFFFFFFFFFFC5";

#[derive(Debug, Arbitrary)]
struct Parameters {
    pub degree: u8,
    pub shares: Vec<Share>,
}

fuzz_target!(|params: Parameters| {
    let n = BigNum::from_hex(MODULUS, 8).unwrap();
    let sss = SecretSharing::new(n, (params.degree & 0x07) as usize);

    // cap the share count; recovery is quadratic in it
    let shares = &params.shares[..params.shares.len().min(8)];
    let _secret = sss.recover(shares);
});
