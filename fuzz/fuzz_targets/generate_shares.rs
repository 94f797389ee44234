#![no_main]
use libfuzzer_sys::fuzz_target;

use arbitrary::Arbitrary;
use primeshare::{BigNum, SecretSharing, Share};

// 2^64 - 59, an 8-byte prime
const MODULUS: &str = "FFFFFFFFFFFFFFC5";

#[derive(Debug, Arbitrary)]
struct Parameters {
    pub degree: u8,
    pub secret: u64,
    pub n_shares: u8,
}

fuzz_target!(|params: Parameters| {
    let n = BigNum::from_hex(MODULUS, 8).unwrap();
    let secret = BigNum::from_bytes_be(&params.secret.to_be_bytes())
        .reduce(&n)
        .unwrap();

    let sss = SecretSharing::new(n, (params.degree & 0x07) as usize);
    if let Ok(poly) = sss.random_polynomial(&secret) {
        let _shares: Result<Vec<Share>, _> = sss.shares(&poly, (params.n_shares & 0x0F) as usize);
    }
});
