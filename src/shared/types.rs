//! Common types used across the pool model

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use std::fmt;

use crate::shared::errors::SnapshotError;

/// Which reserve of the pool an amount belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

/// Fraction of gross swap output withheld as a fee, always in [0, 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeeRatio {
    numerator: u64,
    denominator: u64,
}

impl FeeRatio {
    pub const ZERO: FeeRatio = FeeRatio {
        numerator: 0,
        denominator: 1,
    };

    pub fn new(numerator: u64, denominator: u64) -> Result<Self, SnapshotError> {
        if denominator == 0 || numerator >= denominator {
            return Err(SnapshotError::InvalidFeeRatio {
                numerator,
                denominator,
            });
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    pub fn numerator(&self) -> u64 {
        self.numerator
    }

    pub fn denominator(&self) -> u64 {
        self.denominator
    }

    pub fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    pub fn as_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

impl Default for FeeRatio {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for FeeRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// One side of the pool: the reserve account holding the asset and its mint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenHandle {
    /// Reserve account owned by the pool authority. This is the asset identifier.
    pub account: Pubkey,
    pub mint: Pubkey,
    pub decimals: u8,
    pub symbol: Option<String>,
}

impl TokenHandle {
    pub fn new(account: Pubkey, mint: Pubkey, decimals: u8) -> Self {
        Self {
            account,
            mint,
            decimals,
            symbol: None,
        }
    }

    /// Symbol if known, otherwise the mint address
    pub fn label(&self) -> String {
        self.symbol
            .clone()
            .unwrap_or_else(|| self.mint.to_string())
    }
}

/// Administrative pool fields carried through unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolKeys {
    pub address: Pubkey,
    pub authority: Pubkey,
    /// Bump seed of the derived pool authority
    pub nonce: u8,
    pub pool_token_mint: Pubkey,
}
