// RSA key generation
// Two half-length primes, naive exponent search, modular inverse for d

use crate::error::{Result, RsaError};
use crate::rsa::bigint::{gcd, mod_inverse, mod_pow};
use crate::rsa::prime::generate_prime;
use log::debug;
use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Pow};
use rand::{CryptoRng, Rng};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// RSA public key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    pub e: BigUint,
    pub n: BigUint,
    pub bits: u64,
}

/// RSA private key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateKey {
    pub d: BigUint,
    pub n: BigUint,
    pub bits: u64,
}

/// RSA key pair (both public and private keys)
#[derive(Debug, Clone)]
pub struct KeyPair {
    pub public: PublicKey,
    pub private: PrivateKey,
}

impl PublicKey {
    /// Encrypt a single integer block: c = m^e mod n
    pub fn encrypt_block(&self, m: &BigUint) -> BigUint {
        mod_pow(m, &self.e, &self.n)
    }

    /// Write the key as two decimal lines: exponent, then modulus
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, format!("{}\n{}", self.e, self.n))?;
        Ok(())
    }

    /// Read a key file written by save; bits is recovered from the modulus
    pub fn load(path: &Path) -> Result<Self> {
        let (e, n) = read_key_file(path)?;
        let bits = n.bits();
        Ok(Self { e, n, bits })
    }
}

impl PrivateKey {
    /// Decrypt a single integer block: m = c^d mod n
    pub fn decrypt_block(&self, c: &BigUint) -> BigUint {
        mod_pow(c, &self.d, &self.n)
    }

    /// Write the key as two decimal lines: exponent, then modulus
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, format!("{}\n{}", self.d, self.n))?;
        Ok(())
    }

    /// Read a key file written by save; bits is recovered from the modulus
    pub fn load(path: &Path) -> Result<Self> {
        let (d, n) = read_key_file(path)?;
        let bits = n.bits();
        Ok(Self { d, n, bits })
    }
}

/// Generates a pair of RSA keys with a modulus of at least `bits` bits.
///
/// Samples two independent primes of half the target length until they
/// differ and their product reaches the bit-length floor, then searches
/// for a random public exponent in [phi^2, phi^8] coprime to phi(n).
pub fn generate_keys<R: Rng + CryptoRng + ?Sized>(bits: u64, rng: &mut R) -> Result<KeyPair> {
    if bits < 4 {
        return Err(RsaError::BitLengthTooSmall { min: 4, got: bits });
    }

    let (p, q, n) = loop {
        let p = generate_prime(bits / 2, rng)?;
        let q = generate_prime(bits / 2, rng)?;
        let n = &p * &q;
        if p != q && n.bits() >= bits {
            break (p, q, n);
        }
    };
    debug!("selected primes p ({} bits) and q ({} bits)", p.bits(), q.bits());

    let phi = (&p - 1u8) * (&q - 1u8);

    let low = (&phi).pow(2u32);
    let high = (&phi).pow(8u32) + 1u8;
    let e = loop {
        let e = rng.gen_biguint_range(&low, &high);
        if gcd(&e, &phi).is_one() {
            break e;
        }
    };

    let d = mod_inverse(&e, &phi).ok_or(RsaError::NoInverse)?;
    debug!("derived exponent pair for a {}-bit modulus", n.bits());

    Ok(KeyPair {
        public: PublicKey {
            e,
            n: n.clone(),
            bits,
        },
        private: PrivateKey { d, n, bits },
    })
}

fn read_key_file(path: &Path) -> Result<(BigUint, BigUint)> {
    let content = fs::read_to_string(path)?;
    let mut lines = content.lines();
    let exponent = parse_key_line(lines.next(), path)?;
    let modulus = parse_key_line(lines.next(), path)?;
    Ok((exponent, modulus))
}

fn parse_key_line(line: Option<&str>, path: &Path) -> Result<BigUint> {
    let line = line.ok_or_else(|| RsaError::MalformedKeyFile {
        path: path.to_path_buf(),
        reason: "expected two lines".to_string(),
    })?;

    BigUint::from_str(line.trim()).map_err(|e| RsaError::MalformedKeyFile {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_keys_round_trip() {
        let mut rng = StdRng::seed_from_u64(10);
        let pair = generate_keys(64, &mut rng).unwrap();
        let n = &pair.public.n;

        let samples = [
            BigUint::from(0u8),
            BigUint::from(1u8),
            BigUint::from(42u8),
            BigUint::from(123_456u32),
            n - 1u8,
        ];
        for m in &samples {
            let c = pair.public.encrypt_block(m);
            let back = pair.private.decrypt_block(&c);
            assert_eq!(&back, m, "round trip failed for m = {}", m);
        }
    }

    #[test]
    fn test_generate_keys_modulus_floor() {
        let mut rng = StdRng::seed_from_u64(11);

        for bits in [16u64, 32, 64] {
            let pair = generate_keys(bits, &mut rng).unwrap();
            assert!(pair.public.n.bits() >= bits);
            assert_eq!(pair.public.n, pair.private.n);
            assert_eq!(pair.public.bits, bits);
        }
    }

    #[test]
    fn test_generate_keys_rejects_tiny_bit_length() {
        let mut rng = StdRng::seed_from_u64(12);
        let result = generate_keys(3, &mut rng);
        assert!(matches!(
            result,
            Err(RsaError::BitLengthTooSmall { min: 4, .. })
        ));
    }

    #[test]
    fn test_key_files_round_trip() {
        let mut rng = StdRng::seed_from_u64(13);
        let pair = generate_keys(32, &mut rng).unwrap();
        let dir = tempfile::tempdir().unwrap();

        let pub_path = dir.path().join("id_rsa32.pub");
        let priv_path = dir.path().join("id_rsa32");
        pair.public.save(&pub_path).unwrap();
        pair.private.save(&priv_path).unwrap();

        let public = PublicKey::load(&pub_path).unwrap();
        let private = PrivateKey::load(&priv_path).unwrap();
        assert_eq!(public.e, pair.public.e);
        assert_eq!(public.n, pair.public.n);
        assert_eq!(private.d, pair.private.d);
        assert_eq!(private.n, pair.private.n);
        assert_eq!(public.bits, public.n.bits());
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("id_rsa16.pub");

        fs::write(&path, "17\n").unwrap();
        assert!(matches!(
            PublicKey::load(&path),
            Err(RsaError::MalformedKeyFile { .. })
        ));

        fs::write(&path, "seventeen\n91").unwrap();
        assert!(matches!(
            PublicKey::load(&path),
            Err(RsaError::MalformedKeyFile { .. })
        ));
    }
}
