// Textbook RSA pipeline
// Primality testing, key generation, a fixed-width file codec and a
// Fermat factorization attack against narrow-gap moduli

pub mod error;
pub mod ops;
pub mod rsa;
pub mod util;

pub use error::{Result, RsaError};
