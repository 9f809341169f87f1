//! On-chain settlement calls: collateral splits and merges, redemptions,
//! neg-risk conversions and approvals.
//!
//! Everything here produces calldata only. Sending it (gas, nonces, receipts) is
//! left to the caller's RPC stack.

mod abi;
mod calls;
mod index;
mod route;

pub use calls::{
    approve_collateral, convert_positions, merge_positions, redeem_neg_risk_positions,
    redeem_positions, set_approval_for_all, split_position, transfer_collateral, BINARY_PARTITION,
};
pub use index::{get_index_set, get_market_index, neg_risk_market_id};
pub use route::{deploy_safe, route_eoa, route_proxy, route_safe, WalletRoute};

use alloy_primitives::{Address, Bytes};

/// Transaction payload: target contract and ABI-encoded calldata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
    pub to: Address,
    pub data: Bytes,
}

impl ContractCall {
    pub fn new(to: Address, data: impl Into<Bytes>) -> Self {
        Self {
            to,
            data: data.into(),
        }
    }
}
