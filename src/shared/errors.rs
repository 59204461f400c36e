//! Error handling for the pool model and its snapshot boundary

use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

/// Pricing errors: the snapshot cannot answer the query
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
    #[error("Asset {0} is not one of this pool's reserves")]
    InvalidAsset(Pubkey),

    #[error("Pool reserve on the input side is empty")]
    EmptyPool,

    #[error("Amount overflows u64")]
    Overflow,
}

/// Errors raised while turning a wire/storage snapshot into a `Pool`
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Invalid pubkey for {field}: {value}")]
    InvalidKey { field: &'static str, value: String },

    #[error("Invalid fee ratio {numerator}/{denominator}: must be in [0, 1)")]
    InvalidFeeRatio { numerator: u64, denominator: u64 },

    #[error("Token A and token B share the reserve account {0}")]
    DuplicateReserve(Pubkey),

    #[error("Unsupported snapshot format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse TOML snapshot: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to encode TOML snapshot: {0}")]
    TomlEncode(#[from] toml::ser::Error),
}
