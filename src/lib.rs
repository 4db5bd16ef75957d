//! Toy RSA over 32-bit integers.
//!
//! Key generation, raw encryption and decryption, and recovery of the private
//! key from the public key by factoring the modulus. Primes are around 16 bits
//! and the random source is not cryptographic: this crate exists to show how
//! RSA works and why small keys break, not to protect anything.

pub mod rsa;
pub mod util;

pub use rsa::{KeyMaterial, Rsa32Error, Rsa32Result};
pub use util::KeyGenConfig;
