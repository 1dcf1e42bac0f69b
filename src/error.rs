// Error type shared by the RSA routines
// Invalid parameters and exhausted searches surface here; I/O errors are wrapped

use num_bigint::BigUint;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RsaError {
    #[error("n must be greater than 3, got {0}")]
    InvalidCandidate(BigUint),

    #[error("k must be at least 1")]
    InvalidRounds,

    #[error("bit length must be at least {min}, got {got}")]
    BitLengthTooSmall { min: u64, got: u64 },

    #[error("no modular inverse exists for the chosen exponent")]
    NoInverse,

    #[error("block value needs {needed} bytes but the block width is {width}")]
    BlockTooWide { width: usize, needed: usize },

    #[error("no {0} key file found")]
    KeyFileNotFound(&'static str),

    #[error("malformed key file {path}: {reason}")]
    MalformedKeyFile { path: PathBuf, reason: String },

    #[error("Fermat factorization failed within {0} tries")]
    FactorizationExhausted(u64),

    #[error("invalid modulus: {0}")]
    InvalidModulus(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the RSA routines
pub type Result<T> = std::result::Result<T, RsaError>;
