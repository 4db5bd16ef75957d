// RSA Module - Main module file
// Exports the 32-bit RSA engine

pub mod crack;
pub mod decrypt;
pub mod encrypt;
pub mod error;
pub mod keygen;
pub mod numtheory;

pub use decrypt::{decrypt_blocks, decrypt_u32};
pub use encrypt::{encrypt_blocks, encrypt_u32};
pub use error::{Rsa32Error, Rsa32Result};
pub use keygen::KeyMaterial;
pub use numtheory::{
    checked_pow_mod, gcd, is_prime, mod_inverse, pow_mod, random_number, random_prime,
    smallest_prime_pair,
};
