// RSA exercise modules
// Exports the primality oracle, key generation and the Fermat attack

pub mod attack;
pub mod bigint;
pub mod keygen;
pub mod prime;

pub use attack::{crack_rsa, Factored};
pub use keygen::{generate_keys, KeyPair, PrivateKey, PublicKey};
pub use prime::{generate_prime, is_prime, miller_rabin};
