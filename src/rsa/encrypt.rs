// RSA Encryption Implementation
// Raw (unpadded) encryption of 32-bit message blocks

use super::keygen::KeyMaterial;
use super::numtheory::pow_mod;

impl KeyMaterial {
    /// Compute c = m^e mod n.
    ///
    /// Only messages below n survive a round trip; larger values are reduced
    /// modulo n.
    pub fn encrypt(&self, message: u32) -> u32 {
        pow_mod(message, self.e(), self.n())
    }
}

/// Encrypt a u32 value using the public part of the key material
pub fn encrypt_u32(message: u32, key: &KeyMaterial) -> u32 {
    key.encrypt(message)
}

/// Encrypt each block independently
pub fn encrypt_blocks(blocks: &[u32], key: &KeyMaterial) -> Vec<u32> {
    blocks.iter().map(|&block| key.encrypt(block)).collect()
}
