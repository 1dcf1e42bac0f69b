// End-to-end exercise: generate keys, encrypt a file, decrypt it back,
// then break the modulus with the Fermat attack

use num_bigint::BigUint;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rsa_lab::ops;
use rsa_lab::rsa::attack::crack_rsa;
use rsa_lab::rsa::keygen::PublicKey;
use std::fs;

#[test]
fn file_round_trip_with_fresh_keys() {
    let dir = tempfile::tempdir().unwrap();
    let mut rng = StdRng::seed_from_u64(99);

    ops::save_keys(64, dir.path(), &mut rng).unwrap();

    // 64-bit modulus -> 7-byte plaintext blocks
    let mut data = vec![0u8; 7 * 20];
    rng.fill(data.as_mut_slice());
    let plain = dir.path().join("secret.bin");
    fs::write(&plain, &data).unwrap();

    let encrypted = ops::encrypt_file(&plain, dir.path()).unwrap();
    let decrypted = ops::decrypt_file(&encrypted, dir.path()).unwrap();

    assert_eq!(fs::read(&decrypted).unwrap(), data);
}

#[test]
fn generated_modulus_falls_to_fermat() {
    let dir = tempfile::tempdir().unwrap();
    let mut rng = StdRng::seed_from_u64(100);

    let (pub_path, _) = ops::save_keys(48, dir.path(), &mut rng).unwrap();
    let public = PublicKey::load(&pub_path).unwrap();

    // Half-length primes with forced top bits leave a narrow gap
    let factored = crack_rsa(&public.n, None).unwrap();
    assert_eq!(&factored.p * &factored.q, public.n);
    assert!(factored.p > BigUint::from(1u8));
    assert!(factored.q >= factored.p);
}
