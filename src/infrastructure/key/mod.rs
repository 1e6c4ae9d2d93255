//! API key generation

mod generator;

pub use generator::KeyGenerator;
