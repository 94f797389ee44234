//! Demonstration driver: split a fixed 32-byte secret over the secp256k1
//! field prime and reconstruct it from the generated shares.
//!
//! Takes an optional share count as the first argument (default 4, the
//! threshold for the degree-3 polynomial used here). Passing 3 reproduces the
//! historical under-threshold demo: recovery still prints a value, just not
//! the secret.

use std::env;
use std::process::ExitCode;

use primeshare::{BigNum, SecretSharing};

const SECP256K1_P: &str =
    "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F";
const SECRET: &str = "098765432100DEADBEEF000000000000000000000000CAFEBABE001234567890";

fn run(count: usize) -> Result<(), primeshare::Error> {
    let modulus = BigNum::from_hex(SECP256K1_P, 32)?;
    let secret = BigNum::from_hex(SECRET, 32)?;

    let sss = SecretSharing::new(modulus, 3);
    let poly = sss.random_polynomial(&secret)?;
    let shares = sss.shares(&poly, count)?;

    for share in &shares {
        println!("P({}) = {}", share.x, share.y);
    }

    let recovered = sss.recover(&shares)?;
    println!("secret = {recovered}");

    Ok(())
}

fn main() -> ExitCode {
    let count = match env::args().nth(1).map(|arg| arg.parse::<usize>()) {
        None => 4,
        Some(Ok(count)) if count > 0 => count,
        _ => {
            eprintln!("usage: primeshare-demo [share-count]");
            return ExitCode::FAILURE;
        }
    };

    match run(count) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
