// Fermat factorization attack on RSA moduli
// Effective when the two primes are numerically close, as naive generation tends to produce

use crate::error::{Result, RsaError};
use log::{error, info};
use num_bigint::BigUint;
use num_integer::Roots;

/// Outcome of a successful factorization, with the number of tries it took
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Factored {
    pub p: BigUint,
    pub q: BigUint,
    pub tries: u64,
}

/// Crack an RSA modulus by Fermat factorization.
///
/// Searches increasing a from ceil(sqrt(n)) for the first a where a^2 - n
/// is a perfect square b^2, giving n = (a - b)(a + b). With `max_tries`
/// set, errors once that many candidates have been tested without success;
/// without it the search is unbounded.
pub fn crack_rsa(n: &BigUint, max_tries: Option<u64>) -> Result<Factored> {
    // a = ceil(sqrt(n))
    let mut a = n.sqrt();
    while &a * &a < *n {
        a += 1u8;
    }

    let mut tries = 0u64;
    loop {
        tries += 1;
        let b2 = &a * &a - n;
        if let Some(b) = exact_sqrt(&b2) {
            let p = &a - &b;
            let q = &a + &b;
            info!("found factors after {} tries", tries);
            return Ok(Factored { p, q, tries });
        }

        a += 1u8;

        if let Some(limit) = max_tries {
            if tries >= limit {
                error!("reached max_tries={} without success", limit);
                return Err(RsaError::FactorizationExhausted(limit));
            }
        }
    }
}

/// Integer square root of x if x is a perfect square.
/// Squares are 0, 1, 4 or 9 mod 16, so most misses are filtered with one mask.
fn exact_sqrt(x: &BigUint) -> Option<BigUint> {
    let low = x.to_u64_digits().first().copied().unwrap_or(0);
    if !matches!(low & 0xF, 0 | 1 | 4 | 9) {
        return None;
    }

    let s = x.sqrt();
    if &s * &s == *x {
        Some(s)
    } else {
        None
    }
}
