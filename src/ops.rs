// Command-level operations behind the CLI flags
// Key pair generation to disk, whole-file encryption and decryption, cracking

use crate::error::{Result, RsaError};
use crate::rsa::attack::{crack_rsa, Factored};
use crate::rsa::keygen::{generate_keys, PrivateKey, PublicKey};
use crate::util::blocks::{read_blocks, write_blocks};
use log::{debug, info};
use num_bigint::BigUint;
use rand::{CryptoRng, Rng};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Key lengths probed when looking for an existing key file, largest first
const KEY_LENGTHS: [u64; 11] = [2048, 1024, 512, 256, 128, 64, 32, 16, 8, 4, 2];

/// Conventional file name for a public key of the given length
pub fn public_key_name(bits: u64) -> String {
    format!("id_rsa{}.pub", bits)
}

/// Conventional file name for a private key of the given length
pub fn private_key_name(bits: u64) -> String {
    format!("id_rsa{}", bits)
}

/// Plaintext block width: strictly smaller than the modulus
fn plain_block_len(bits: u64) -> usize {
    ((bits - 1) / 8) as usize
}

/// Ciphertext block width: wide enough for any residue mod n
fn cipher_block_len(bits: u64) -> usize {
    ((bits + 7) / 8) as usize
}

fn find_key_file<F>(dir: &Path, kind: &'static str, name: F) -> Result<PathBuf>
where
    F: Fn(u64) -> String,
{
    KEY_LENGTHS
        .iter()
        .map(|&bits| dir.join(name(bits)))
        .find(|path| path.is_file())
        .ok_or(RsaError::KeyFileNotFound(kind))
}

fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

/// Generates a key pair and saves both halves into `dir`.
/// Returns the public and private key file paths.
pub fn save_keys<R: Rng + CryptoRng + ?Sized>(
    bits: u64,
    dir: &Path,
    rng: &mut R,
) -> Result<(PathBuf, PathBuf)> {
    info!("generating {}-bit RSA keys...", bits);
    let pair = generate_keys(bits, rng)?;
    debug!("public key: ({}, {})", pair.public.e, pair.public.n);
    debug!("private key: ({}, {})", pair.private.d, pair.private.n);

    let pub_path = dir.join(public_key_name(bits));
    pair.public.save(&pub_path)?;
    info!("saved public key to {}", pub_path.display());

    let priv_path = dir.join(private_key_name(bits));
    pair.private.save(&priv_path)?;
    info!("saved private key to {}", priv_path.display());

    Ok((pub_path, priv_path))
}

/// Encrypts a file with the first public key found in `key_dir`.
/// The ciphertext is written next to the input as `<file>.enc`.
pub fn encrypt_file(path: &Path, key_dir: &Path) -> Result<PathBuf> {
    info!("encrypting file: {}", path.display());

    let keyfile = find_key_file(key_dir, "public", public_key_name)?;
    let key = PublicKey::load(&keyfile)?;
    info!("using public key from {}", keyfile.display());

    let bits = key.n.bits();
    let blocks = read_blocks(path, plain_block_len(bits))?;
    debug!("read {} blocks from {}", blocks.len(), path.display());

    let encrypted: Vec<BigUint> = blocks.iter().map(|m| key.encrypt_block(m)).collect();
    debug!("encrypted all blocks");

    let out = append_suffix(path, ".enc");
    write_blocks(&encrypted, &out, cipher_block_len(bits))?;
    info!("encryption complete: {}", out.display());

    Ok(out)
}

/// Decrypts a file with the first private key found in `key_dir`.
/// The plaintext is written next to the input as `<file>.dec`.
pub fn decrypt_file(path: &Path, key_dir: &Path) -> Result<PathBuf> {
    let keyfile = find_key_file(key_dir, "private", private_key_name)?;
    let key = PrivateKey::load(&keyfile)?;
    info!("using private key from {}", keyfile.display());

    let bits = key.n.bits();
    let blocks = read_blocks(path, cipher_block_len(bits))?;
    debug!("read {} encrypted blocks from {}", blocks.len(), path.display());

    let decrypted: Vec<BigUint> = blocks.iter().map(|c| key.decrypt_block(c)).collect();
    debug!("decrypted all blocks");

    let out = append_suffix(path, ".dec");
    write_blocks(&decrypted, &out, plain_block_len(bits))?;
    info!("decryption complete: {}", out.display());

    Ok(out)
}

/// Parses a decimal modulus and runs the Fermat factorization attack on it.
pub fn crack(modulus: &str, max_tries: Option<u64>) -> Result<Factored> {
    let n = BigUint::from_str(modulus.trim())
        .map_err(|_| RsaError::InvalidModulus(modulus.to_string()))?;
    crack_rsa(&n, max_tries)
}
