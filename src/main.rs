use std::io::{self, BufRead};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rsa32::{KeyGenConfig, KeyMaterial};

const MESSAGE: u32 = 12345;

fn main() -> anyhow::Result<()> {
    // Seed from the wall clock
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is before the Unix epoch")?
        .as_secs();
    let mut rng = StdRng::seed_from_u64(seed);

    let mut key = KeyMaterial::new();
    key.randomize_keys_with(&mut rng, &KeyGenConfig::default())
        .context("failed to generate key material")?;

    let encrypted = key.encrypt(MESSAGE);
    let decrypted = key.decrypt(encrypted);

    println!("Original message:\t{}", MESSAGE);
    println!("Encrypted message:\t{} (0x{})", encrypted, hex::encode(encrypted.to_be_bytes()));
    println!("Decrypted message:\t{}", decrypted);
    println!();
    println!("{}", key);
    println!();

    // Recover the private key from the public half only
    let mut cracked = KeyMaterial::from_public_private(key.e(), 0, key.n());
    cracked
        .crack_private_key()
        .context("failed to recover the private key")?;
    println!("Cracked from (E, N):");
    println!("{}", cracked);
    println!("Decrypted with cracked key:\t{}", cracked.decrypt(encrypted));

    // Wait for any input in order to close the program
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(())
}
