//! Error type shared by the arithmetic engine and the sharing protocol.

/// Failures reported by `primeshare` operations.
///
/// Arithmetic primitives validate structural preconditions only: operand
/// widths and value ranges. They never check that a modulus is odd or prime;
/// violating those contracts yields mathematically wrong results, not errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("operand width mismatch: expected {expected} bytes, got {got}")]
    WidthMismatch { expected: usize, got: usize },
    #[error("invalid hex string: odd length or non-hex digit")]
    InvalidHex,
    #[error("hex value does not fit in {width} bytes")]
    HexOverflow { width: usize },
    #[error("value is not reduced modulo the modulus")]
    ValueOutOfRange,
    #[error("coefficient index {index} exceeds polynomial degree {degree}")]
    IndexOutOfRange { index: usize, degree: usize },
    #[error("duplicate evaluation point in share set")]
    DuplicateShare,
    #[error("no shares provided")]
    NoShares,
    #[error("share encoding must be a non-empty even number of bytes")]
    InvalidShareEncoding,
}
