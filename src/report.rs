// src/report.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::liquidity::{DepositQuote, WithdrawQuote};
use crate::pool::{Pool, SwapQuote};
use crate::shared::types::Side;

#[derive(Debug, Serialize, Deserialize)]
pub struct QuoteReport {
    pub pool: PoolDetails,
    pub quote: Quote,
    pub timestamp: DateTime<Utc>,
}

/// Snapshot the quote was computed from
#[derive(Debug, Serialize, Deserialize)]
pub struct PoolDetails {
    pub address: String,
    pub token_a: TokenDetails,
    pub token_b: TokenDetails,
    pub fee_ratio: String,
    pub rate: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenDetails {
    pub account: String,
    pub mint: String,
    pub symbol: Option<String>,
    pub decimals: u8,
    pub reserve: u64,
    pub reserve_ui: f64, // Reserve in UI format (considering decimals)
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Quote {
    Rate {
        rate: f64,
        liquidity: u64,
    },
    Swap {
        #[serde(flatten)]
        swap: SwapQuote,
        implied_rate: f64,
        /// `None` when the input reserve would overflow u64
        post_swap_reserves: Option<(u64, u64)>,
    },
    Deposit(DepositQuote),
    Withdraw(WithdrawQuote),
    PoolValue {
        pool_tokens: u64,
        token_a_value: u64,
        token_b_value: u64,
        pool_tokens_for_token_a: u64,
        pool_tokens_for_token_b: u64,
    },
}

/// Convert a raw amount to UI units
pub fn to_ui_amount(amount: u64, decimals: u8) -> f64 {
    amount as f64 / 10_f64.powi(decimals as i32)
}

impl PoolDetails {
    pub fn from_pool(pool: &Pool) -> Self {
        let token = |side: Side| {
            let handle = pool.handle(side);
            let reserve = pool.reserve(side);
            TokenDetails {
                account: handle.account.to_string(),
                mint: handle.mint.to_string(),
                symbol: handle.symbol.clone(),
                decimals: handle.decimals,
                reserve,
                reserve_ui: to_ui_amount(reserve, handle.decimals),
            }
        };
        Self {
            address: pool.address().to_string(),
            token_a: token(Side::A),
            token_b: token(Side::B),
            fee_ratio: pool.fee_ratio().to_string(),
            rate: pool.rate(),
        }
    }
}

impl QuoteReport {
    pub fn new(pool: &Pool, quote: Quote) -> Self {
        Self {
            pool: PoolDetails::from_pool(pool),
            quote,
            timestamp: Utc::now(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
