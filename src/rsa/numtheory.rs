// RSA Number Theory Primitives
// Fixed-width (u32) helpers with u64 intermediates for the toy RSA engine

use num_integer::{Integer, Roots};
use rand::Rng;

use super::error::{Rsa32Error, Rsa32Result};

/// Deterministic primality test by trial division.
///
/// Checks 2 and even numbers up front, then tries odd divisors up to
/// `floor(sqrt(number))`. Cost is O(√n): fine for the 32-bit range this crate
/// works in, far too slow for real key sizes.
pub fn is_prime(number: u32) -> bool {
    if number <= 1 {
        return false;
    }
    if number == 2 {
        return true;
    }
    if number.is_even() {
        return false;
    }

    let square_root = number.sqrt();
    let mut divisor = 3u32;
    while divisor <= square_root {
        if number % divisor == 0 {
            return false;
        }
        divisor += 2;
    }

    true
}

/// Uniformly distributed number in `[min, max]`; inverted bounds are swapped.
pub fn random_number<R: Rng + ?Sized>(rng: &mut R, min: u32, max: u32) -> u32 {
    let (low, high) = if min > max { (max, min) } else { (min, max) };
    rng.gen_range(low..=high)
}

/// Search for a prime starting at a random point of `[min, max]`.
///
/// The start is forced odd and the scan walks forward in steps of 2 for at
/// most `max - min` candidates. The bound is loose: the prime returned may be
/// larger than `max`.
pub fn random_prime<R: Rng + ?Sized>(rng: &mut R, min: u32, max: u32) -> Rsa32Result<u32> {
    let mut number = random_number(rng, min, max);

    // Make sure the number is odd
    if number.is_even() {
        number += 1;
    }

    let (min, max) = if min > max { (max, min) } else { (min, max) };
    let diff = max - min;

    scan_for_prime(number, diff).ok_or_else(|| {
        log::debug!("no prime found in {} candidates from {}", diff, number);
        Rsa32Error::PrimeSearchExhausted { min, max }
    })
}

/// The two smallest distinct primes [`random_prime`] can return for
/// `[min, max]`, or None when the range cannot yield two different primes.
pub fn smallest_prime_pair(min: u32, max: u32) -> Option<(u32, u32)> {
    let (min, max) = if min > max { (max, min) } else { (min, max) };
    let diff = max - min;
    let first_start = if min.is_even() { min + 1 } else { min };
    let last_start = if max.is_even() { max + 1 } else { max };

    let first = scan_for_prime(first_start, diff)?;

    // Only a start above `first` can reach another prime, and the next prime
    // is the first one any such start meets.
    let above = first.checked_add(2)?;
    if above > last_start {
        return None;
    }
    let second = scan_for_prime(above, u32::MAX)?;
    let start = second.min(last_start);
    if (second - start) / 2 < diff {
        Some((first, second))
    } else {
        None
    }
}

/// Check `candidates` odd numbers from `start` upwards for a prime
fn scan_for_prime(start: u32, candidates: u32) -> Option<u32> {
    let mut number = start;
    for _ in 0..candidates {
        if is_prime(number) {
            return Some(number);
        }
        number = number.checked_add(2)?;
    }
    None
}

/// Euclid's algorithm. Expects the larger argument first.
///
/// When `b >= a` the function returns `a` straight away instead of swapping;
/// callers always pass the totient first, so the guard only triggers on
/// degenerate input.
pub fn gcd(mut a: u32, mut b: u32) -> u32 {
    if b >= a {
        return a;
    }

    while b != 0 {
        let c = a % b;
        a = b;
        b = c;
    }

    a
}

/// Modular exponentiation: base^exponent mod modulus.
/// Uses square-and-multiply with u64 intermediates. A zero modulus yields 0.
///
/// The result is always reduced, so a modulus of 1 gives 0 even for a zero
/// exponent (`pow_mod(b, 0, 1) == 0`, not 1).
pub fn pow_mod(base: u32, exponent: u32, modulus: u32) -> u32 {
    if modulus < 1 {
        return 0;
    }

    let modulus = u64::from(modulus);
    let mut result = 1 % modulus;
    let mut base = u64::from(base) % modulus;
    let mut exponent = exponent;

    while exponent > 0 {
        if exponent.is_odd() {
            result = (result * base) % modulus;
        }
        exponent >>= 1;
        base = (base * base) % modulus;
    }

    // result < modulus <= u32::MAX
    result as u32
}

/// Same as [`pow_mod`] but reports a zero modulus instead of returning 0.
pub fn checked_pow_mod(base: u32, exponent: u32, modulus: u32) -> Rsa32Result<u32> {
    if modulus == 0 {
        return Err(Rsa32Error::InvalidModulus);
    }
    Ok(pow_mod(base, exponent, modulus))
}

/// Compute modular inverse: value^(-1) mod modulus
/// Returns the unique result in `[0, modulus)`, or None if no inverse exists
pub fn mod_inverse(value: u32, modulus: u32) -> Option<u32> {
    if value == 0 || modulus == 0 {
        return None;
    }

    let egcd = i64::from(value).extended_gcd(&i64::from(modulus));
    if egcd.gcd != 1 {
        return None;
    }

    let inverse = egcd.x.mod_floor(&i64::from(modulus));
    u32::try_from(inverse).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;
    use num_traits::ToPrimitive;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sieve(limit: usize) -> Vec<bool> {
        let mut flags = vec![true; limit + 1];
        flags[0] = false;
        flags[1] = false;
        let mut i = 2;
        while i * i <= limit {
            if flags[i] {
                let mut j = i * i;
                while j <= limit {
                    flags[j] = false;
                    j += i;
                }
            }
            i += 1;
        }
        flags
    }

    #[test]
    fn test_is_prime_matches_sieve() {
        let reference = sieve(10_000);
        for (value, expected) in reference.iter().enumerate() {
            assert_eq!(is_prime(value as u32), *expected, "value {}", value);
        }
    }

    #[test]
    fn test_is_prime_boundaries() {
        assert!(!is_prime(0));
        assert!(!is_prime(1));
        assert!(is_prime(2));
        assert!(is_prime(3));
        assert!(!is_prime(4));
        assert!(is_prime(65521));
        assert!(!is_prime(65535));
        assert!(is_prime(65537));
        assert!(is_prime(4_294_967_291));
        assert!(!is_prime(u32::MAX));
    }

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(35, 12), 1);
        assert_eq!(gcd(48, 18), 6);
        assert_eq!(gcd(3120, 7), 1);
        assert_eq!(gcd(3120, 9), 3);
        assert_eq!(gcd(100, 0), 100);
    }

    #[test]
    fn test_gcd_short_circuits_on_reversed_order() {
        // Not swapped: the first argument comes straight back
        assert_eq!(gcd(12, 35), 12);
        assert_eq!(gcd(7, 7), 7);
    }

    #[test]
    fn test_pow_mod() {
        assert_eq!(pow_mod(4, 13, 497), 445);
        // 3^5 mod 7 = 243 mod 7 = 5
        assert_eq!(pow_mod(3, 5, 7), 5);
        assert_eq!(pow_mod(123, 0, 1000), 1);
        assert_eq!(pow_mod(1234, 1, 1000), 234);
        assert_eq!(pow_mod(0, 5, 13), 0);
    }

    #[test]
    fn test_pow_mod_modulus_one() {
        assert_eq!(pow_mod(5, 0, 1), 0);
        assert_eq!(pow_mod(0, 0, 1), 0);
        assert_eq!(pow_mod(u32::MAX, 7, 1), 0);
        assert_eq!(pow_mod(0, 0, 2), 1);
    }

    #[test]
    fn test_pow_mod_zero_modulus() {
        assert_eq!(pow_mod(5, 3, 0), 0);
        assert_eq!(checked_pow_mod(5, 3, 0), Err(Rsa32Error::InvalidModulus));
        assert_eq!(checked_pow_mod(4, 13, 497), Ok(445));
    }

    #[test]
    fn test_pow_mod_matches_repeated_multiplication() {
        for base in [2u32, 7, 10, 96] {
            for exponent in 0u32..12 {
                let modulus = 97u64;
                let mut expected = 1u64;
                for _ in 0..exponent {
                    expected = (expected * u64::from(base)) % modulus;
                }
                assert_eq!(u64::from(pow_mod(base, exponent, 97)), expected);
            }
        }
    }

    #[test]
    fn test_pow_mod_matches_bigint_at_full_width() {
        let cases = [
            (u32::MAX - 1, u32::MAX, u32::MAX),
            (2_148_322_498, 613_779_943, 2_148_322_499),
            (12345, 1_560_996_131, 4_292_870_399),
        ];
        for (base, exponent, modulus) in cases {
            let expected = BigUint::from(base)
                .modpow(&BigUint::from(exponent), &BigUint::from(modulus))
                .to_u32()
                .unwrap();
            assert_eq!(pow_mod(base, exponent, modulus), expected);
        }
    }

    #[test]
    fn test_mod_inverse() {
        // 3 * 5 = 15 ≡ 1 mod 7, so inverse of 3 mod 7 is 5
        assert_eq!(mod_inverse(3, 7), Some(5));
        assert_eq!(mod_inverse(7, 3120), Some(1783));
        assert_eq!(mod_inverse(6, 3120), None);
        assert_eq!(mod_inverse(0, 3120), None);
    }

    #[test]
    fn test_mod_inverse_matches_linear_search() {
        let z = 3120u64;
        for e in (3u32..200).step_by(2) {
            let brute = (0..z)
                .find(|i| (i * z + 1) % u64::from(e) == 0)
                .map(|i| ((i * z + 1) / u64::from(e)) as u32);
            assert_eq!(mod_inverse(e, 3120), brute, "e = {}", e);
        }
    }

    #[test]
    fn test_random_prime_in_default_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let prime = random_prime(&mut rng, 46341, 65535).unwrap();
            assert!(is_prime(prime));
            assert!(prime >= 46341);
        }
    }

    #[test]
    fn test_random_prime_swaps_inverted_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let prime = random_prime(&mut rng, 200, 100).unwrap();
        assert!(is_prime(prime));
        assert!(prime >= 100);
    }

    #[test]
    fn test_random_prime_exhausted() {
        let mut rng = StdRng::seed_from_u64(1);
        // A zero-width span never scans a candidate
        assert_eq!(
            random_prime(&mut rng, 24, 24),
            Err(Rsa32Error::PrimeSearchExhausted { min: 24, max: 24 })
        );
    }

    #[test]
    fn test_smallest_prime_pair() {
        // Start 91 reaches nothing within 3 candidates, 93 reaches 97
        assert_eq!(smallest_prime_pair(89, 92), Some((89, 97)));
        assert_eq!(smallest_prime_pair(92, 89), Some((89, 97)));
        assert_eq!(smallest_prime_pair(46341, 65535), Some((46349, 46351)));
        assert_eq!(smallest_prime_pair(70000, 80000), Some((70001, 70003)));
    }

    #[test]
    fn test_smallest_prime_pair_unreachable() {
        assert_eq!(smallest_prime_pair(24, 24), None);
        // Only 89 is reachable: 97 is three steps past the last start
        assert_eq!(smallest_prime_pair(89, 90), None);
        assert_eq!(smallest_prime_pair(u32::MAX - 4, u32::MAX), None);
    }

    #[test]
    fn test_random_number_range() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let value = random_number(&mut rng, 10, 20);
            assert!((10..=20).contains(&value));
        }
        assert_eq!(random_number(&mut rng, 5, 5), 5);
    }
}
