//! Swap Pool - off-chain model of a constant-product token swap pool
//!
//! A `Pool` is an immutable snapshot of two reserves and a fee ratio. Every
//! operation (swap, deposit, withdraw, pool token valuation) is a pure
//! computation of the amounts to submit; nothing here touches the network.

pub mod app;
pub mod config;
pub mod liquidity;
pub mod math;
pub mod pool;
pub mod report;
pub mod shared;
pub mod snapshot;

// Re-export main types for convenience
pub use liquidity::{DepositQuote, WithdrawQuote};
pub use pool::{Pool, SwapQuote};
pub use shared::errors::{PoolError, SnapshotError};
pub use shared::types::{FeeRatio, PoolKeys, Side, TokenHandle};
pub use snapshot::{load_pool, PoolSnapshot};
