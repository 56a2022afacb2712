use thiserror::Error;

/// Failure modes the core surfaces to callers. Never retried internally;
/// partial writes already performed on the image are not rolled back.
#[derive(Debug, Error)]
pub enum StegoError {
    /// `hide` ran out of free pixels before writing every payload byte and the sentinel.
    #[error(
        "capacity exceeded: need {needed} pixels for {payload_len} byte(s) + sentinel, only {available} free"
    )]
    CapacityExceeded {
        payload_len: usize,
        needed: usize,
        available: usize,
    },

    /// `extract` ran out of free pixels before decoding a sentinel byte.
    #[error("truncated: address stream exhausted after {bytes_recovered} byte(s), no sentinel seen")]
    Truncated { bytes_recovered: usize },

    /// `advance` was called with no further seed in the chain.
    #[error("no more seeds: already at level {level} of {chain_len}")]
    NoMoreSeeds { level: usize, chain_len: usize },

    /// The engine was constructed with zero seeds.
    #[error("seed chain must contain at least one seed")]
    EmptySeedChain,

    /// The image accessor reports a pixel format the core cannot carry data in.
    #[error("unsupported pixel format: {reason}")]
    UnsupportedPixelFormat { reason: String },
}

pub type Result<T> = std::result::Result<T, StegoError>;
