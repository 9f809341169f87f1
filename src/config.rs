//! Static, chain-keyed deployment data.

use alloy_primitives::{address, Address};

use crate::error::{Error, Result};

/// Polygon mainnet
pub const POLYGON: u64 = 137;

/// Polygon Amoy testnet
pub const AMOY: u64 = 80002;

/// Production CLOB endpoint
pub const CLOB_HOST: &str = "https://clob.polymarket.com";

/// Collateral and outcome tokens both use 6 decimals on-chain.
pub const TOKEN_DECIMALS: u32 = 6;

/// Contract set an order or settlement call is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractConfig {
    /// The exchange contract responsible for matching orders
    pub exchange: Address,
    /// The ERC20 token used as collateral
    pub collateral: Address,
    /// The ERC1155 conditional tokens contract
    pub conditional_tokens: Address,
}

const POLYGON_CONFIG: ContractConfig = ContractConfig {
    exchange: address!("4bFb41d5B3570DeFd03C39a9A4D8dE6Bd8B8982E"),
    collateral: address!("2791Bca1f2de4661ED88A30C99A7a9449Aa84174"),
    conditional_tokens: address!("4D97DCd97eC945f40cF65F87097ACe5EA0476045"),
};

const POLYGON_NEG_RISK_CONFIG: ContractConfig = ContractConfig {
    exchange: address!("C5d563A36AE78145C45a50134d48A1215220f80a"),
    collateral: address!("2791Bca1f2de4661ED88A30C99A7a9449Aa84174"),
    conditional_tokens: address!("4D97DCd97eC945f40cF65F87097ACe5EA0476045"),
};

const AMOY_CONFIG: ContractConfig = ContractConfig {
    exchange: address!("dFE02Eb6733538f8Ea35D585af8DE5958AD99E40"),
    collateral: address!("9c4e1703476e875070ee25b56a58b008cfb8fa78"),
    conditional_tokens: address!("69308FB512518e39F9b16112fA8d994F4e2Bf8bB"),
};

const AMOY_NEG_RISK_CONFIG: ContractConfig = ContractConfig {
    exchange: address!("d91E80cF2E7be2e162c6513ceD06f1dD0dA35296"),
    collateral: address!("9c4e1703476e875070ee25b56a58b008cfb8fa78"),
    conditional_tokens: address!("69308FB512518e39F9b16112fA8d994F4e2Bf8bB"),
};

/// Adapter that splits, merges, redeems and converts neg-risk positions
pub const NEG_RISK_ADAPTER: Address = address!("d91E80cF2E7be2e162c6513ceD06f1dD0dA35296");

/// Factory behind Polymarket proxy wallets (signature type 1)
pub const PROXY_WALLET_FACTORY: Address = address!("aB45c5A4B0c941a2F231C04C3f49182e1A254052");

/// Factory behind Polymarket Safe wallets (signature type 2)
pub const SAFE_PROXY_FACTORY: Address = address!("aacFeEa03eb1561C4e67d661e40682Bd20E3541b");

/// EIP-712 domain name of the Safe proxy factory
pub const SAFE_FACTORY_NAME: &str = "Polymarket Contract Proxy Factory";

/// Get the contract configuration for a chain.
///
/// `neg_risk` selects the exchange used by negative-risk (multi-outcome) markets.
pub fn get_contract_config(chain_id: u64, neg_risk: bool) -> Result<ContractConfig> {
    match (chain_id, neg_risk) {
        (POLYGON, false) => Ok(POLYGON_CONFIG),
        (POLYGON, true) => Ok(POLYGON_NEG_RISK_CONFIG),
        (AMOY, false) => Ok(AMOY_CONFIG),
        (AMOY, true) => Ok(AMOY_NEG_RISK_CONFIG),
        _ => Err(Error::config(format!("invalid chain_id: {chain_id}"))),
    }
}
