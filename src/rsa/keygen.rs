// RSA Key Generation
// Implements 32-bit key material derivation (modulus, totient and exponents)

use std::fmt;

use rand::rngs::StdRng;
use rand::{thread_rng, Rng, SeedableRng};

use super::error::{Rsa32Error, Rsa32Result};
use super::numtheory::{gcd, mod_inverse, random_prime, smallest_prime_pair};
use crate::util::config::KeyGenConfig;

/// RSA key material. Every field fits in 32 bits.
///
/// A value may be fully derived (all six fields) or reduced to `e`, `d` and
/// `n`, which is all the cipher operations need. Exponents only make sense
/// together with the modulus and totient they were derived from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyMaterial {
    e: u32, // Public exponent
    d: u32, // Private exponent
    p: u32, // First prime factor
    q: u32, // Second prime factor
    n: u32, // Modulus = p * q
    z: u32, // Totient = (p - 1) * (q - 1)
}

impl KeyMaterial {
    /// Empty key material, every field zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Reduced key material holding only the exponents and the modulus
    pub fn from_public_private(e: u32, d: u32, n: u32) -> Self {
        Self { e, d, n, ..Self::default() }
    }

    /// Reduced key material that also carries the totient
    pub fn with_totient(e: u32, d: u32, n: u32, z: u32) -> Self {
        Self { e, d, n, z, ..Self::default() }
    }

    pub fn e(&self) -> u32 {
        self.e
    }

    pub fn d(&self) -> u32 {
        self.d
    }

    pub fn p(&self) -> u32 {
        self.p
    }

    pub fn q(&self) -> u32 {
        self.q
    }

    pub fn n(&self) -> u32 {
        self.n
    }

    pub fn z(&self) -> u32 {
        self.z
    }

    pub fn set_e(&mut self, e: u32) {
        self.e = e;
    }

    pub fn set_d(&mut self, d: u32) {
        self.d = d;
    }

    pub fn set_p(&mut self, p: u32) {
        self.p = p;
    }

    pub fn set_q(&mut self, q: u32) {
        self.q = q;
    }

    pub fn set_n(&mut self, n: u32) {
        self.n = n;
    }

    pub fn set_z(&mut self, z: u32) {
        self.z = z;
    }

    /// Reset every field to zero
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Generate fresh key material from the default prime range.
    ///
    /// A non-zero seed gives a reproducible key. A seed of 0 draws from the
    /// thread-local generator instead.
    pub fn randomize_keys(&mut self, seed: u64) -> Rsa32Result<()> {
        let config = KeyGenConfig::default();
        if seed != 0 {
            let mut rng = StdRng::seed_from_u64(seed);
            self.randomize_keys_with(&mut rng, &config)
        } else {
            self.randomize_keys_with(&mut thread_rng(), &config)
        }
    }

    /// Generate fresh key material using the given random source and range
    pub fn randomize_keys_with<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        config: &KeyGenConfig,
    ) -> Rsa32Result<()> {
        let low = config.prime_range_low;
        let high = config.prime_range_high;

        // Step 1: Make sure the range can produce a usable pair at all
        let (smallest, next) = smallest_prime_pair(low, high).ok_or_else(|| {
            log::warn!("range [{}, {}] cannot yield two different primes", low, high);
            Rsa32Error::PrimeSearchExhausted {
                min: low.min(high),
                max: low.max(high),
            }
        })?;
        if smallest.checked_mul(next).is_none() {
            log::warn!("every prime pair from [{}, {}] overflows 32 bits", low, high);
            return Err(Rsa32Error::ModulusOverflow { p: smallest, q: next });
        }

        // Step 2: Draw two different primes whose product fits in 32 bits,
        // starting over whenever a search comes up empty
        let (p, q) = loop {
            let (Ok(p), Ok(q)) = (random_prime(rng, low, high), random_prime(rng, low, high)) else {
                continue;
            };
            if p != q && p.checked_mul(q).is_some() {
                break (p, q);
            }
        };
        log::debug!("drew primes p = {}, q = {}", p, q);

        // Step 3: Derive n, z, e and d
        self.calculate_keys(p, q)
    }

    /// Derive n, z, e and d from two different primes.
    ///
    /// On failure the fields written so far stay set; call [`clear`](Self::clear)
    /// or drop the value.
    pub fn calculate_keys(&mut self, p: u32, q: u32) -> Rsa32Result<()> {
        for value in [p, q] {
            if value <= 1 {
                return Err(Rsa32Error::InvalidPrime { value });
            }
        }
        if p == q {
            return Err(Rsa32Error::IdenticalPrimes { value: p });
        }

        self.calculate_modulus_and_totient(p, q)?;
        self.calculate_public_key()?;
        self.calculate_private_key()
    }

    /// Set p and q, then n = p * q and z = (p - 1) * (q - 1)
    pub fn calculate_modulus_and_totient(&mut self, p: u32, q: u32) -> Rsa32Result<()> {
        self.p = p;
        self.q = q;

        let n = p.checked_mul(q).ok_or(Rsa32Error::ModulusOverflow { p, q })?;
        let z = u64::from(p).saturating_sub(1) * u64::from(q).saturating_sub(1);

        self.n = n;
        // z < n whenever n did not overflow
        self.z = z as u32;
        Ok(())
    }

    /// Pick the smallest odd e >= 3 that is coprime with z.
    /// 2 is never considered.
    pub fn calculate_public_key(&mut self) -> Rsa32Result<()> {
        self.e = 0;

        let mut candidate = 3u32;
        while candidate < self.z {
            if gcd(self.z, candidate) == 1 {
                self.e = candidate;
                log::debug!("public exponent e = {}", candidate);
                return Ok(());
            }
            candidate += 2;
        }

        log::warn!("no public exponent coprime with z = {}", self.z);
        Err(Rsa32Error::KeyDerivation {
            reason: "no odd exponent below z is coprime with z",
        })
    }

    /// Find the smallest d with d * e ≡ 1 (mod z), given e, n and z.
    ///
    /// Equivalent to searching i = 0, 1, .. n - 1 for the first
    /// (i * z + 1) divisible by e: the multiplier i that produces d must be
    /// below n, otherwise derivation fails.
    pub fn calculate_private_key(&mut self) -> Rsa32Result<()> {
        self.d = 0;

        let d = mod_inverse(self.e, self.z).ok_or_else(|| {
            log::warn!("e = {} has no inverse modulo z = {}", self.e, self.z);
            Rsa32Error::KeyDerivation {
                reason: "e has no inverse modulo z",
            }
        })?;

        // d * e = i * z + 1
        let multiplier = (u64::from(d) * u64::from(self.e)).saturating_sub(1) / u64::from(self.z);
        if multiplier >= u64::from(self.n) {
            log::warn!("inverse multiplier {} is not below n = {}", multiplier, self.n);
            return Err(Rsa32Error::KeyDerivation {
                reason: "no private exponent found below n",
            });
        }

        self.d = d;
        log::debug!("private exponent d = {}", d);
        Ok(())
    }
}

impl fmt::Display for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Prime 1(P):      {}", self.p)?;
        writeln!(f, "Prime 2(Q):      {}", self.q)?;
        writeln!(f, "Shared Key(N):   {}", self.n)?;
        writeln!(f, "Phi N(Z):        {}", self.z)?;
        writeln!(f, "Public key(E):   {}", self.e)?;
        write!(f, "Private key(D):  {}", self.d)
    }
}
