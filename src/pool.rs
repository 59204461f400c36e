// src/pool.rs
//! Point-in-time snapshot of a constant-product token swap pool.
//!
//! A `Pool` is read from ledger state, queried, and dropped. It has no
//! mutators: the effect of a swap or deposit is observed by reading a new
//! snapshot, never by updating this one.
//!
//! Liquidity tokens are pegged 1:1 to token A, so the pool token supply is
//! `reserve_a`. This is a property of the mirrored program, not a general AMM
//! law.

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use crate::math::{fee_amount, gross_swap_output};
use crate::shared::errors::{PoolError, SnapshotError};
use crate::shared::types::{FeeRatio, PoolKeys, Side, TokenHandle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pool {
    keys: PoolKeys,
    token_a: TokenHandle,
    token_b: TokenHandle,
    reserve_a: u64,
    reserve_b: u64,
    fee_ratio: FeeRatio,
}

/// Breakdown of a single swap against a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapQuote {
    pub input_side: Side,
    pub amount_in: u64,
    pub gross_output: u64,
    pub fee: u64,
    pub net_output: u64,
    #[serde(skip)]
    reserve_in: u64,
    #[serde(skip)]
    reserve_out: u64,
}

impl SwapQuote {
    pub fn output_side(&self) -> Side {
        self.input_side.other()
    }

    /// Reserves `(A, B)` the next snapshot should show once this swap lands.
    /// The withheld fee stays in the pool. `Overflow` if the input reserve
    /// could not hold the deposited amount, or if the quote was decoded from a
    /// report and no longer carries its reserves.
    pub fn post_swap_reserves(&self) -> Result<(u64, u64), PoolError> {
        let new_in = self
            .reserve_in
            .checked_add(self.amount_in)
            .ok_or(PoolError::Overflow)?;
        let new_out = self
            .reserve_out
            .checked_sub(self.net_output)
            .ok_or(PoolError::Overflow)?;
        Ok(match self.input_side {
            Side::A => (new_in, new_out),
            Side::B => (new_out, new_in),
        })
    }
}

impl Pool {
    pub fn new(
        keys: PoolKeys,
        token_a: TokenHandle,
        token_b: TokenHandle,
        reserve_a: u64,
        reserve_b: u64,
        fee_ratio: FeeRatio,
    ) -> Result<Self, SnapshotError> {
        if token_a.account == token_b.account {
            return Err(SnapshotError::DuplicateReserve(token_a.account));
        }
        Ok(Self {
            keys,
            token_a,
            token_b,
            reserve_a,
            reserve_b,
            fee_ratio,
        })
    }

    pub fn keys(&self) -> &PoolKeys {
        &self.keys
    }

    pub fn address(&self) -> Pubkey {
        self.keys.address
    }

    pub fn token_a(&self) -> &TokenHandle {
        &self.token_a
    }

    pub fn token_b(&self) -> &TokenHandle {
        &self.token_b
    }

    pub fn reserve_a(&self) -> u64 {
        self.reserve_a
    }

    pub fn reserve_b(&self) -> u64 {
        self.reserve_b
    }

    pub fn fee_ratio(&self) -> FeeRatio {
        self.fee_ratio
    }

    pub fn handle(&self, side: Side) -> &TokenHandle {
        match side {
            Side::A => &self.token_a,
            Side::B => &self.token_b,
        }
    }

    pub fn reserve(&self, side: Side) -> u64 {
        match side {
            Side::A => self.reserve_a,
            Side::B => self.reserve_b,
        }
    }

    /// Which side an asset identifier refers to
    pub fn side_of(&self, asset: &Pubkey) -> Result<Side, PoolError> {
        if *asset == self.token_a.account {
            Ok(Side::A)
        } else if *asset == self.token_b.account {
            Ok(Side::B)
        } else {
            Err(PoolError::InvalidAsset(*asset))
        }
    }

    /// Spot price of A in units of B, or 0 for an empty A reserve
    pub fn rate(&self) -> f64 {
        if self.reserve_a == 0 {
            return 0.0;
        }
        self.reserve_b as f64 / self.reserve_a as f64
    }

    pub fn liquidity(&self) -> u64 {
        self.reserve_a
    }

    /// True iff `{from, to}` is exactly this pool's pair, in either order
    pub fn matches(&self, from: &Pubkey, to: &Pubkey) -> bool {
        let (a, b) = (&self.token_a.account, &self.token_b.account);
        (from == a && to == b) || (from == b && to == a)
    }

    pub fn swap_quote(&self, input_asset: &Pubkey, amount_in: u64) -> Result<SwapQuote, PoolError> {
        let input_side = self.side_of(input_asset)?;
        self.swap_quote_from(input_side, amount_in)
    }

    pub fn swap_quote_from(&self, input_side: Side, amount_in: u64) -> Result<SwapQuote, PoolError> {
        let reserve_in = self.reserve(input_side);
        let reserve_out = self.reserve(input_side.other());
        if reserve_in == 0 {
            return Err(PoolError::EmptyPool);
        }

        let gross_output = gross_swap_output(reserve_in, reserve_out, amount_in);
        let fee = fee_amount(gross_output, self.fee_ratio);

        Ok(SwapQuote {
            input_side,
            amount_in,
            gross_output,
            fee,
            net_output: gross_output - fee,
            reserve_in,
            reserve_out,
        })
    }

    /// Net amount of the other asset received for `amount_in` of `input_asset`
    pub fn swap_output(&self, input_asset: &Pubkey, amount_in: u64) -> Result<u64, PoolError> {
        Ok(self.swap_quote(input_asset, amount_in)?.net_output)
    }

    pub fn token_a_amount_for(&self, token_b_in: u64) -> Result<u64, PoolError> {
        Ok(self.swap_quote_from(Side::B, token_b_in)?.net_output)
    }

    pub fn token_b_amount_for(&self, token_a_in: u64) -> Result<u64, PoolError> {
        Ok(self.swap_quote_from(Side::A, token_a_in)?.net_output)
    }

    /// Effective rate including fee and price impact, or 0 for a zero amount
    pub fn implied_rate(&self, from_asset: &Pubkey, from_amount: u64) -> Result<f64, PoolError> {
        self.side_of(from_asset)?;
        if from_amount == 0 {
            return Ok(0.0);
        }
        let output = self.swap_output(from_asset, from_amount)?;
        Ok(output as f64 / from_amount as f64)
    }

    pub fn token_a_value_of_pool_tokens(&self, pool_tokens: u64) -> u64 {
        pool_tokens
    }

    pub fn token_b_value_of_pool_tokens(&self, pool_tokens: u64) -> Result<u64, PoolError> {
        self.token_b_amount_for(self.token_a_value_of_pool_tokens(pool_tokens))
    }

    pub fn pool_token_value_of_token_a(&self, token_a: u64) -> u64 {
        token_a
    }

    // Collapses to the identity: B-denominated value tracks only the A-side peg.
    pub fn pool_token_value_of_token_b(&self, token_b: u64) -> u64 {
        self.pool_token_value_of_token_a(self.token_a_value_of_pool_tokens(token_b))
    }
}
