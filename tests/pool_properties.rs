//! Property-based tests for the constant-product pricing invariants

use proptest::prelude::*;
use solana_sdk::pubkey::Pubkey;
use swap_pool::{FeeRatio, Pool, PoolError, PoolKeys, Side, TokenHandle};

fn pool(reserve_a: u64, reserve_b: u64, fee: FeeRatio) -> Pool {
    let keys = PoolKeys {
        address: Pubkey::new_unique(),
        authority: Pubkey::new_unique(),
        nonce: 255,
        pool_token_mint: Pubkey::new_unique(),
    };
    Pool::new(
        keys,
        TokenHandle::new(Pubkey::new_unique(), Pubkey::new_unique(), 9),
        TokenHandle::new(Pubkey::new_unique(), Pubkey::new_unique(), 6),
        reserve_a,
        reserve_b,
        fee,
    )
    .unwrap()
}

prop_compose! {
    fn fee_strategy()(denominator in 1u64..1_000_000)(
        numerator in 0..denominator,
        denominator in Just(denominator)
    ) -> FeeRatio {
        FeeRatio::new(numerator, denominator).unwrap()
    }
}

proptest! {
    #[test]
    fn swap_preserves_product_within_one_unit(
        reserve_a in 1u64..1_000_000_000_000,
        reserve_b in 0u64..1_000_000_000_000,
        amount in 0u64..1_000_000_000_000,
        fee in fee_strategy(),
    ) {
        let pool = pool(reserve_a, reserve_b, fee);
        let quote = pool.swap_quote_from(Side::A, amount).unwrap();

        let k = reserve_a as u128 * reserve_b as u128;
        let new_a = reserve_a as u128 + amount as u128;
        let new_b = (reserve_b - quote.gross_output) as u128;

        prop_assert!(new_a * new_b <= k);
        prop_assert!(new_a * (new_b + 1) > k);
        prop_assert!(quote.net_output <= quote.gross_output);
        prop_assert!(quote.gross_output <= reserve_b);
        prop_assert_eq!(quote.gross_output - quote.fee, quote.net_output);
    }

    #[test]
    fn output_is_non_increasing_in_fee(
        reserve_a in 1u64..1_000_000_000,
        reserve_b in 1u64..1_000_000_000,
        amount in 0u64..1_000_000_000,
        denominator in 2u64..10_000,
        low in 0u64..10_000,
        high in 0u64..10_000,
    ) {
        let (x, y) = (low % denominator, high % denominator);
        let (low, high) = (x.min(y), x.max(y));

        let cheap = pool(reserve_a, reserve_b, FeeRatio::new(low, denominator).unwrap());
        let dear = pool(reserve_a, reserve_b, FeeRatio::new(high, denominator).unwrap());

        let cheap_out = cheap.token_b_amount_for(amount).unwrap();
        let dear_out = dear.token_b_amount_for(amount).unwrap();
        prop_assert!(dear_out <= cheap_out);

        let free = pool(reserve_a, reserve_b, FeeRatio::ZERO);
        prop_assert!(free.token_b_amount_for(amount).unwrap() >= cheap_out);
    }

    #[test]
    fn zero_fee_nets_gross(
        reserve_a in 1u64..u64::MAX,
        reserve_b in 0u64..u64::MAX,
        amount in 0u64..u64::MAX,
    ) {
        let pool = pool(reserve_a, reserve_b, FeeRatio::ZERO);
        let quote = pool.swap_quote_from(Side::A, amount).unwrap();
        prop_assert_eq!(quote.fee, 0);
        prop_assert_eq!(quote.net_output, quote.gross_output);
    }

    // With a fee of at least 1% and trades of at least 10_000 units, the
    // withheld fees outweigh the one-unit ceiling on each leg.
    #[test]
    fn round_trip_never_creates_value(
        reserve_a in 1_000_000u64..1_000_000_000,
        ratio_tenths in 1u64..=100,
        fee_per_mille in 10u64..=300,
        amount in 10_000u64..100_000,
    ) {
        let reserve_b = reserve_a * ratio_tenths / 10;
        let fee = FeeRatio::new(fee_per_mille, 1000).unwrap();

        let before = pool(reserve_a, reserve_b, fee);
        let forward = before.swap_quote_from(Side::A, amount).unwrap();

        let (next_a, next_b) = forward.post_swap_reserves().unwrap();
        let after = pool(next_a, next_b, fee);
        let back = after.token_a_amount_for(forward.net_output).unwrap();

        prop_assert!(back <= amount);
    }

    #[test]
    fn empty_a_reserve_rate_is_zero(
        reserve_b in 0u64..u64::MAX,
        amount in 0u64..u64::MAX,
        fee in fee_strategy(),
    ) {
        let pool = pool(0, reserve_b, fee);
        prop_assert_eq!(pool.rate(), 0.0);
        prop_assert_eq!(
            pool.swap_output(&pool.token_a().account, amount),
            Err(PoolError::EmptyPool)
        );
    }

    #[test]
    fn unknown_asset_is_rejected(
        reserve_a in 0u64..u64::MAX,
        reserve_b in 0u64..u64::MAX,
        amount in 0u64..u64::MAX,
    ) {
        let pool = pool(reserve_a, reserve_b, FeeRatio::ZERO);
        let stranger = Pubkey::new_unique();
        prop_assert_eq!(
            pool.swap_output(&stranger, amount),
            Err(PoolError::InvalidAsset(stranger))
        );
        prop_assert!(!pool.matches(&stranger, &pool.token_b().account));
    }

    #[test]
    fn pool_token_b_value_collapses_to_identity(
        reserve_a in 0u64..u64::MAX,
        reserve_b in 0u64..u64::MAX,
        tokens in 0u64..u64::MAX,
    ) {
        let pool = pool(reserve_a, reserve_b, FeeRatio::ZERO);
        prop_assert_eq!(pool.pool_token_value_of_token_b(tokens), tokens);
        prop_assert_eq!(pool.token_a_value_of_pool_tokens(tokens), tokens);
    }
}

#[test]
fn round_trip_reference_cases() {
    let quarter = FeeRatio::new(1, 4).unwrap();
    let before = pool(1000, 2000, quarter);
    let forward = before.swap_quote_from(Side::A, 5).unwrap();
    assert_eq!(forward.net_output, 8);

    let (a, b) = forward.post_swap_reserves().unwrap();
    let back = pool(a, b, quarter).token_a_amount_for(forward.net_output).unwrap();
    assert_eq!(back, 4);

    let thirty_bps = FeeRatio::new(3, 1000).unwrap();
    let before = pool(1_000_000, 1_000_000, thirty_bps);
    let forward = before.swap_quote_from(Side::A, 10_000).unwrap();
    assert_eq!(forward.gross_output, 9901);
    assert_eq!(forward.net_output, 9872);

    let (a, b) = forward.post_swap_reserves().unwrap();
    assert_eq!((a, b), (1_010_000, 990_128));
    let back = pool(a, b, thirty_bps).token_a_amount_for(forward.net_output).unwrap();
    assert_eq!(back, 9942);
}
