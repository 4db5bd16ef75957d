// Utility Module
// Configuration shared by the RSA engine

pub mod config;

pub use config::KeyGenConfig;
