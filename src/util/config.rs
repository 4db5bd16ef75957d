// Key Generation Configuration
// Prime range used when drawing random key material

/// Lowest prime candidate: 46341 is the first value whose square
/// exceeds 2^31, so two such primes give a modulus near the top of u32.
pub const DEFAULT_PRIME_RANGE_LOW: u32 = 46341;

/// Highest prime candidate (largest 16-bit value).
pub const DEFAULT_PRIME_RANGE_HIGH: u32 = 65535;

/// Configuration for random key generation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyGenConfig {
    pub prime_range_low: u32,
    pub prime_range_high: u32,
}

impl Default for KeyGenConfig {
    fn default() -> Self {
        Self {
            prime_range_low: DEFAULT_PRIME_RANGE_LOW,
            prime_range_high: DEFAULT_PRIME_RANGE_HIGH,
        }
    }
}

impl KeyGenConfig {
    pub fn with_prime_range(mut self, low: u32, high: u32) -> Self {
        self.prime_range_low = low;
        self.prime_range_high = high;
        self
    }
}
