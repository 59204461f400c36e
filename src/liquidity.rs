//! Deposit and withdrawal sizing.
//!
//! Neither quote is an independent formula: both are derived from the
//! snapshot's `rate()` and pool token conversions, which drift with every
//! swap. Compute them from a freshly read `Pool` right before submitting.

use serde::{Deserialize, Serialize};

use crate::math::mul_div_ceil;
use crate::pool::Pool;
use crate::shared::errors::PoolError;

/// Amounts for a proportional deposit keyed on token A
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositQuote {
    pub token_a: u64,
    /// `token_a * rate()`, rounded up so the pool is never under-funded
    pub token_b: u64,
    pub pool_tokens: u64,
}

impl DepositQuote {
    pub fn for_token_a(pool: &Pool, token_a: u64) -> Result<Self, PoolError> {
        let token_b = if pool.reserve_a() == 0 {
            0
        } else {
            mul_div_ceil(token_a, pool.reserve_b(), pool.reserve_a())?
        };
        Ok(Self {
            token_a,
            token_b,
            pool_tokens: pool.pool_token_value_of_token_a(token_a),
        })
    }
}

/// Amounts returned for burning pool tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawQuote {
    pub pool_tokens: u64,
    pub token_a: u64,
    pub token_b: u64,
}

impl WithdrawQuote {
    pub fn for_pool_tokens(pool: &Pool, pool_tokens: u64) -> Result<Self, PoolError> {
        Ok(Self {
            pool_tokens,
            token_a: pool.token_a_value_of_pool_tokens(pool_tokens),
            token_b: pool.token_b_value_of_pool_tokens(pool_tokens)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::tests::test_pool;
    use crate::shared::types::FeeRatio;

    #[test]
    fn test_deposit_tracks_rate() {
        let pool = test_pool(1000, 2000, FeeRatio::new(1, 4).unwrap());
        let quote = DepositQuote::for_token_a(&pool, 10).unwrap();
        assert_eq!(
            quote,
            DepositQuote {
                token_a: 10,
                token_b: 20,
                pool_tokens: 10,
            }
        );
    }

    #[test]
    fn test_deposit_rounds_token_b_up() {
        let pool = test_pool(1005, 1992, FeeRatio::ZERO);
        // 3 * 1992 / 1005 = 5.94..
        assert_eq!(DepositQuote::for_token_a(&pool, 3).unwrap().token_b, 6);
    }

    #[test]
    fn test_deposit_into_empty_a_reserve() {
        let pool = test_pool(0, 2000, FeeRatio::ZERO);
        let quote = DepositQuote::for_token_a(&pool, 10).unwrap();
        assert_eq!(quote.token_b, 0);
        assert_eq!(quote.pool_tokens, 10);
    }

    #[test]
    fn test_deposit_overflow() {
        let pool = test_pool(1, u64::MAX, FeeRatio::ZERO);
        assert_eq!(
            DepositQuote::for_token_a(&pool, 2),
            Err(PoolError::Overflow)
        );
    }

    #[test]
    fn test_proportional_deposit_keeps_rate() {
        let pool = test_pool(1_000_000, 3_000_000, FeeRatio::ZERO);
        let quote = DepositQuote::for_token_a(&pool, 250_000).unwrap();
        let after = test_pool(
            pool.reserve_a() + quote.token_a,
            pool.reserve_b() + quote.token_b,
            FeeRatio::ZERO,
        );
        assert_eq!(after.rate(), pool.rate());
    }

    #[test]
    fn test_withdraw() {
        let pool = test_pool(1000, 2000, FeeRatio::new(1, 4).unwrap());
        let quote = WithdrawQuote::for_pool_tokens(&pool, 5).unwrap();
        assert_eq!(
            quote,
            WithdrawQuote {
                pool_tokens: 5,
                token_a: 5,
                token_b: 8,
            }
        );
    }

    #[test]
    fn test_withdraw_from_empty_pool() {
        let pool = test_pool(0, 0, FeeRatio::ZERO);
        assert_eq!(
            WithdrawQuote::for_pool_tokens(&pool, 5),
            Err(PoolError::EmptyPool)
        );
    }
}
