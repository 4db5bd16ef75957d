// RSA Errors
// Failure kinds reported by key derivation, prime search and key recovery

use thiserror::Error;

/// Errors that can occur while deriving, using or recovering key material
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rsa32Error {
    #[error("key derivation failed: {reason}")]
    KeyDerivation { reason: &'static str },

    #[error("no prime found between {min} and {max}")]
    PrimeSearchExhausted { min: u32, max: u32 },

    #[error("could not find a prime factor of n = {n}")]
    Factorization { n: u32 },

    #[error("modulus must be at least 1")]
    InvalidModulus,

    #[error("p * q overflows 32 bits (p = {p}, q = {q})")]
    ModulusOverflow { p: u32, q: u32 },

    #[error("{value} cannot be used as a prime factor")]
    InvalidPrime { value: u32 },

    #[error("p and q must differ, both are {value}")]
    IdenticalPrimes { value: u32 },

    #[error("operation cancelled")]
    Cancelled,
}

/// Result type for RSA operations
pub type Rsa32Result<T> = Result<T, Rsa32Error>;
