//! Library interface for lsb-matching-with-seed.
//! Allows the binaries and integration tests to reach the core modules.

pub mod address_stream;
pub mod codec;
pub mod engine;
pub mod error;
pub mod image;
pub mod mutator;
pub mod prng;
pub mod seed;

pub use engine::StegoEngine;
pub use error::{Result, StegoError};
