// RSA Decryption Implementation
// Raw (unpadded) decryption of 32-bit ciphertext blocks

use super::keygen::KeyMaterial;
use super::numtheory::pow_mod;

impl KeyMaterial {
    /// Compute m = c^d mod n
    pub fn decrypt(&self, ciphertext: u32) -> u32 {
        pow_mod(ciphertext, self.d(), self.n())
    }
}

/// Decrypt a u32 ciphertext using the private part of the key material
pub fn decrypt_u32(ciphertext: u32, key: &KeyMaterial) -> u32 {
    key.decrypt(ciphertext)
}

/// Decrypt each block independently
pub fn decrypt_blocks(blocks: &[u32], key: &KeyMaterial) -> Vec<u32> {
    blocks.iter().map(|&block| key.decrypt(block)).collect()
}
