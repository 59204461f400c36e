//! Wire/storage form of a pool snapshot.
//!
//! Keys are base58 strings so snapshot files stay readable. Converting into a
//! `Pool` validates keys and the fee ratio; converting back is lossless.

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use std::{fs, path::Path, str::FromStr};

use crate::pool::Pool;
use crate::shared::errors::SnapshotError;
use crate::shared::types::{FeeRatio, PoolKeys, TokenHandle};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub address: String,
    pub authority: String,
    pub nonce: u8,
    pub pool_token_mint: String,
    pub token_a: ReserveSnapshot,
    pub token_b: ReserveSnapshot,
    pub fees: FeeSnapshot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveSnapshot {
    pub account: String,
    pub mint: String,
    pub amount: u64,
    pub decimals: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSnapshot {
    pub numerator: u64,
    pub denominator: u64,
}

fn parse_key(field: &'static str, value: &str) -> Result<Pubkey, SnapshotError> {
    Pubkey::from_str(value).map_err(|_| SnapshotError::InvalidKey {
        field,
        value: value.to_string(),
    })
}

impl ReserveSnapshot {
    fn to_handle(&self, account_field: &'static str, mint_field: &'static str) -> Result<TokenHandle, SnapshotError> {
        Ok(TokenHandle {
            account: parse_key(account_field, &self.account)?,
            mint: parse_key(mint_field, &self.mint)?,
            decimals: self.decimals,
            symbol: self.symbol.clone(),
        })
    }

    fn from_handle(handle: &TokenHandle, amount: u64) -> Self {
        Self {
            account: handle.account.to_string(),
            mint: handle.mint.to_string(),
            amount,
            decimals: handle.decimals,
            symbol: handle.symbol.clone(),
        }
    }
}

impl TryFrom<PoolSnapshot> for Pool {
    type Error = SnapshotError;

    fn try_from(snapshot: PoolSnapshot) -> Result<Self, Self::Error> {
        let keys = PoolKeys {
            address: parse_key("address", &snapshot.address)?,
            authority: parse_key("authority", &snapshot.authority)?,
            nonce: snapshot.nonce,
            pool_token_mint: parse_key("pool_token_mint", &snapshot.pool_token_mint)?,
        };
        let token_a = snapshot.token_a.to_handle("token_a.account", "token_a.mint")?;
        let token_b = snapshot.token_b.to_handle("token_b.account", "token_b.mint")?;
        let fee_ratio = FeeRatio::new(snapshot.fees.numerator, snapshot.fees.denominator)?;

        Pool::new(
            keys,
            token_a,
            token_b,
            snapshot.token_a.amount,
            snapshot.token_b.amount,
            fee_ratio,
        )
    }
}

impl From<&Pool> for PoolSnapshot {
    fn from(pool: &Pool) -> Self {
        let keys = pool.keys();
        Self {
            address: keys.address.to_string(),
            authority: keys.authority.to_string(),
            nonce: keys.nonce,
            pool_token_mint: keys.pool_token_mint.to_string(),
            token_a: ReserveSnapshot::from_handle(pool.token_a(), pool.reserve_a()),
            token_b: ReserveSnapshot::from_handle(pool.token_b(), pool.reserve_b()),
            fees: FeeSnapshot {
                numerator: pool.fee_ratio().numerator(),
                denominator: pool.fee_ratio().denominator(),
            },
        }
    }
}

/// Snapshot file encodings, picked by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Toml,
}

impl SnapshotFormat {
    pub fn from_path(path: &Path) -> Result<Self, SnapshotError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("json") => Ok(SnapshotFormat::Json),
            Some("toml") => Ok(SnapshotFormat::Toml),
            _ => Err(SnapshotError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

impl PoolSnapshot {
    pub fn parse(contents: &str, format: SnapshotFormat) -> Result<Self, SnapshotError> {
        let snapshot = match format {
            SnapshotFormat::Json => serde_json::from_str(contents)?,
            SnapshotFormat::Toml => toml::from_str(contents)?,
        };
        Ok(snapshot)
    }

    pub fn encode(&self, format: SnapshotFormat) -> Result<String, SnapshotError> {
        let encoded = match format {
            SnapshotFormat::Json => serde_json::to_string_pretty(self)?,
            SnapshotFormat::Toml => toml::to_string_pretty(self)?,
        };
        Ok(encoded)
    }
}

/// Read a snapshot file and build a fresh `Pool` from it
pub fn load_pool<P: AsRef<Path>>(path: P) -> Result<Pool, SnapshotError> {
    let path = path.as_ref();
    let format = SnapshotFormat::from_path(path)?;
    let contents = fs::read_to_string(path)?;
    Pool::try_from(PoolSnapshot::parse(&contents, format)?)
}
