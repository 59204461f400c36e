// src/app.rs
use anyhow::{Context, Result};
use clap::Subcommand;
use solana_sdk::pubkey::Pubkey;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::liquidity::{DepositQuote, WithdrawQuote};
use crate::pool::Pool;
use crate::report::{Quote, QuoteReport};
use crate::shared::types::{FeeRatio, Side};
use crate::snapshot::load_pool;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Spot rate, liquidity and reserves
    Rate,
    /// Quote a swap of `amount` units of the `from` asset
    Swap {
        /// Input asset: `a`, `b` or a reserve account address
        #[arg(long)]
        from: String,

        /// Expected output asset, checked against the pool's pair
        #[arg(long)]
        to: Option<String>,

        /// Input amount in the smallest unit of the input asset
        #[arg(long)]
        amount: u64,
    },
    /// Quote a proportional deposit keyed on token A
    Deposit {
        #[arg(long)]
        token_a: u64,
    },
    /// Quote the tokens returned for burning pool tokens
    Withdraw {
        #[arg(long)]
        pool_tokens: u64,
    },
    /// Value of pool tokens in each asset
    Value {
        #[arg(long)]
        pool_tokens: u64,
    },
}

#[derive(Debug, Clone)]
pub struct AppCfg {
    pub snapshot_path: PathBuf,
    pub json: bool,
    pub log_filter: String,
}

impl AppCfg {
    pub fn from_config(cfg: Config) -> Self {
        Self {
            snapshot_path: PathBuf::from(cfg.snapshot.path),
            json: cfg.output.json,
            log_filter: cfg.logging.filter,
        }
    }

    pub fn from_cli_args(snapshot_path: String, json: bool, log_filter: String) -> Self {
        Self {
            snapshot_path: PathBuf::from(snapshot_path),
            json,
            log_filter,
        }
    }
}

/// Resolve `a`, `b` or a base58 address to an asset identifier of `pool`
pub fn resolve_asset(pool: &Pool, asset: &str) -> Result<Pubkey> {
    match asset.to_ascii_lowercase().as_str() {
        "a" => Ok(pool.token_a().account),
        "b" => Ok(pool.token_b().account),
        _ => asset
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid asset {}: {}", asset, e)),
    }
}

/// Compute the quote for `command` against a single snapshot
pub fn quote(pool: &Pool, command: &Command) -> Result<Quote> {
    let quote = match command {
        Command::Rate => Quote::Rate {
            rate: pool.rate(),
            liquidity: pool.liquidity(),
        },
        Command::Swap { from, to, amount } => {
            let from = resolve_asset(pool, from)?;
            if let Some(to) = to {
                let to = resolve_asset(pool, to)?;
                if !pool.matches(&from, &to) {
                    return Err(anyhow::anyhow!(
                        "Pair {} -> {} does not belong to pool {}",
                        from,
                        to,
                        pool.address()
                    ));
                }
            }
            let swap = pool.swap_quote(&from, *amount)?;
            let implied_rate = pool.implied_rate(&from, *amount)?;
            debug!(
                "Swap {} {} -> gross {}, fee {}, net {}",
                swap.amount_in, swap.input_side, swap.gross_output, swap.fee, swap.net_output
            );
            Quote::Swap {
                swap,
                implied_rate,
                post_swap_reserves: swap.post_swap_reserves().ok(),
            }
        }
        Command::Deposit { token_a } => Quote::Deposit(DepositQuote::for_token_a(pool, *token_a)?),
        Command::Withdraw { pool_tokens } => {
            Quote::Withdraw(WithdrawQuote::for_pool_tokens(pool, *pool_tokens)?)
        }
        Command::Value { pool_tokens } => {
            let token_a_value = pool.token_a_value_of_pool_tokens(*pool_tokens);
            let token_b_value = pool.token_b_value_of_pool_tokens(*pool_tokens)?;
            Quote::PoolValue {
                pool_tokens: *pool_tokens,
                token_a_value,
                token_b_value,
                pool_tokens_for_token_a: pool.pool_token_value_of_token_a(token_a_value),
                pool_tokens_for_token_b: pool.pool_token_value_of_token_b(token_b_value),
            }
        }
    };
    Ok(quote)
}

fn describe_fee(fee: FeeRatio) -> String {
    if fee.is_zero() {
        "none".to_string()
    } else {
        format!("{} ({:.2}%)", fee, fee.as_f64() * 100.0)
    }
}

fn render(pool: &Pool, quote: &Quote) -> String {
    let a = pool.token_a().label();
    let b = pool.token_b().label();
    match quote {
        Quote::Rate { rate, liquidity } => format!(
            "rate: 1 {a} = {rate} {b}\nliquidity: {liquidity}\nreserves: {} {a} / {} {b}\nfee: {}",
            pool.reserve_a(),
            pool.reserve_b(),
            describe_fee(pool.fee_ratio())
        ),
        Quote::Swap {
            swap,
            implied_rate,
            post_swap_reserves,
        } => {
            let (input, output) = match swap.input_side {
                Side::A => (&a, &b),
                Side::B => (&b, &a),
            };
            let next = match post_swap_reserves {
                Some((next_a, next_b)) => format!("{next_a} {a} / {next_b} {b}"),
                None => "input reserve would overflow".to_string(),
            };
            format!(
                "swap: {} {input} -> {} {output} (gross {}, fee {})\nimplied rate: {implied_rate}\nnext reserves: {next}",
                swap.amount_in,
                swap.net_output,
                swap.gross_output,
                swap.fee
            )
        }
        Quote::Deposit(deposit) => format!(
            "deposit: {} {a} + {} {b}\npool tokens minted: {}",
            deposit.token_a, deposit.token_b, deposit.pool_tokens
        ),
        Quote::Withdraw(withdraw) => format!(
            "withdraw: {} pool tokens -> {} {a} + {} {b}",
            withdraw.pool_tokens, withdraw.token_a, withdraw.token_b
        ),
        Quote::PoolValue {
            pool_tokens,
            token_a_value,
            token_b_value,
            pool_tokens_for_token_a,
            pool_tokens_for_token_b,
        } => format!(
            "{pool_tokens} pool tokens = {token_a_value} {a} = {token_b_value} {b}\n{token_a_value} {a} = {pool_tokens_for_token_a} pool tokens\n{token_b_value} {b} = {pool_tokens_for_token_b} pool tokens"
        ),
    }
}

pub fn run(app_cfg: AppCfg, command: Command) -> Result<()> {
    info!("Loading pool snapshot from {}", app_cfg.snapshot_path.display());
    debug!("Configuration: {:?}", app_cfg);

    // Fresh snapshot per invocation; nothing is cached between commands
    let pool = load_pool(&app_cfg.snapshot_path).with_context(|| {
        format!("load pool snapshot {}", app_cfg.snapshot_path.display())
    })?;

    info!(
        "Pool {}: {} {} / {} {}, fee {}",
        pool.address(),
        pool.reserve_a(),
        pool.token_a().label(),
        pool.reserve_b(),
        pool.token_b().label(),
        pool.fee_ratio()
    );
    if pool.reserve_a() == 0 || pool.reserve_b() == 0 {
        warn!("Pool {} has an empty reserve", pool.address());
    }

    let quote = quote(&pool, &command)?;

    if app_cfg.json {
        let report = QuoteReport::new(&pool, quote);
        println!("{}", report.to_json()?);
    } else {
        println!("{}", render(&pool, &quote));
    }

    Ok(())
}
