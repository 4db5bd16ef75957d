// RSA Key Recovery
// Recovers the private key from (e, n) by factoring the 32-bit modulus

use num_integer::Roots;

use super::error::{Rsa32Error, Rsa32Result};
use super::keygen::KeyMaterial;
use super::numtheory::is_prime;

impl KeyMaterial {
    /// Recover p, q, z and d from e and n alone.
    ///
    /// Factoring a 32-bit modulus takes at most a few thousand trial
    /// divisions, which is why keys of this size offer no protection.
    /// p and q may come back swapped relative to the original derivation.
    pub fn crack_private_key(&mut self) -> Rsa32Result<()> {
        self.crack_private_key_with(|| false)
    }

    /// Same as [`crack_private_key`](Self::crack_private_key), calling
    /// `should_stop` once per search step; returning true aborts with
    /// [`Rsa32Error::Cancelled`].
    pub fn crack_private_key_with<F>(&mut self, mut should_stop: F) -> Rsa32Result<()>
    where
        F: FnMut() -> bool,
    {
        let n = self.n();
        let p = find_factor(n, &mut should_stop)?;
        let q = n / p;
        log::debug!("factored n = {} into p = {}, q = {}", n, p, q);

        self.set_p(p);
        self.set_q(q);
        // (p - 1) * (q - 1) < p * q = n
        self.set_z((p - 1) * (q - 1));

        self.calculate_private_key()
    }
}

/// Start at the closest prime at or below sqrt(n), then step down by 2 until
/// a divisor of n turns up.
fn find_factor<F>(n: u32, should_stop: &mut F) -> Rsa32Result<u32>
where
    F: FnMut() -> bool,
{
    let mut candidate = n.sqrt();

    // Closest prime below the square root
    loop {
        if candidate < 2 {
            log::warn!("no prime below sqrt({})", n);
            return Err(Rsa32Error::Factorization { n });
        }
        if should_stop() {
            return Err(Rsa32Error::Cancelled);
        }
        if is_prime(candidate) {
            break;
        }
        candidate -= 1;
    }

    while candidate >= 2 {
        if should_stop() {
            return Err(Rsa32Error::Cancelled);
        }
        if n % candidate == 0 {
            return Ok(candidate);
        }
        candidate = match candidate.checked_sub(2) {
            Some(next) => next,
            None => break,
        };
    }

    log::warn!("no factor of {} found", n);
    Err(Rsa32Error::Factorization { n })
}
