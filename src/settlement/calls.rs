use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::SolCall;
use rust_decimal::Decimal;

use super::abi::{IConditionalTokens, IERC20, INegRiskAdapter};
use super::index::{get_index_set, neg_risk_market_id};
use super::ContractCall;
use crate::config::{ContractConfig, NEG_RISK_ADAPTER};
use crate::error::{Error, Result};
use crate::orders::to_token_decimals;

/// Index sets of the two outcomes of a binary condition
pub const BINARY_PARTITION: [u64; 2] = [1, 2];

fn partition() -> Vec<U256> {
    BINARY_PARTITION.iter().map(|i| U256::from(*i)).collect()
}

fn base_units(amount: Decimal) -> Result<U256> {
    Ok(U256::from(to_token_decimals(amount)?))
}

/// Neg-risk markets hold positions through the adapter, which mirrors the
/// conditional tokens split/merge interface.
fn position_manager(contracts: &ContractConfig, neg_risk: bool) -> Address {
    if neg_risk {
        NEG_RISK_ADAPTER
    } else {
        contracts.conditional_tokens
    }
}

/// Lock `amount` collateral into one share of each outcome.
pub fn split_position(
    contracts: &ContractConfig,
    condition_id: B256,
    amount: Decimal,
    neg_risk: bool,
) -> Result<ContractCall> {
    let data = IConditionalTokens::splitPositionCall {
        collateralToken: contracts.collateral,
        parentCollectionId: B256::ZERO,
        conditionId: condition_id,
        partition: partition(),
        amount: base_units(amount)?,
    }
    .abi_encode();
    Ok(ContractCall::new(position_manager(contracts, neg_risk), data))
}

/// Burn `amount` of each outcome back into collateral.
pub fn merge_positions(
    contracts: &ContractConfig,
    condition_id: B256,
    amount: Decimal,
    neg_risk: bool,
) -> Result<ContractCall> {
    let data = IConditionalTokens::mergePositionsCall {
        collateralToken: contracts.collateral,
        parentCollectionId: B256::ZERO,
        conditionId: condition_id,
        partition: partition(),
        amount: base_units(amount)?,
    }
    .abi_encode();
    Ok(ContractCall::new(position_manager(contracts, neg_risk), data))
}

/// Redeem every winning share of a resolved binary condition.
pub fn redeem_positions(contracts: &ContractConfig, condition_id: B256) -> ContractCall {
    let data = IConditionalTokens::redeemPositionsCall {
        collateralToken: contracts.collateral,
        parentCollectionId: B256::ZERO,
        conditionId: condition_id,
        indexSets: partition(),
    }
    .abi_encode();
    ContractCall::new(contracts.conditional_tokens, data)
}

/// Redeem neg-risk shares through the adapter.
///
/// `amounts` lists the shares held of each outcome, in outcome order.
pub fn redeem_neg_risk_positions(condition_id: B256, amounts: &[Decimal]) -> Result<ContractCall> {
    let amounts = amounts
        .iter()
        .map(|a| base_units(*a))
        .collect::<Result<Vec<_>>>()?;
    let data = INegRiskAdapter::redeemPositionsCall {
        conditionId: condition_id,
        amounts,
    }
    .abi_encode();
    Ok(ContractCall::new(NEG_RISK_ADAPTER, data))
}

/// Convert `amount` NO shares of each listed question into collateral plus YES
/// shares of every other question of the same neg-risk market.
pub fn convert_positions(question_ids: &[B256], amount: Decimal) -> Result<ContractCall> {
    let Some(first) = question_ids.first() else {
        return Err(Error::validation("convert needs at least one question id"));
    };
    let market_id = neg_risk_market_id(*first);
    if let Some(other) = question_ids
        .iter()
        .find(|q| neg_risk_market_id(**q) != market_id)
    {
        return Err(Error::validation(format!(
            "question {other} is not part of neg-risk market {market_id}"
        )));
    }

    let data = INegRiskAdapter::convertPositionsCall {
        marketId: market_id,
        indexSet: get_index_set(question_ids),
        amount: base_units(amount)?,
    }
    .abi_encode();
    Ok(ContractCall::new(NEG_RISK_ADAPTER, data))
}

/// Allow `spender` to move `amount` collateral base units.
pub fn approve_collateral(contracts: &ContractConfig, spender: Address, amount: U256) -> ContractCall {
    let data = IERC20::approveCall { spender, amount }.abi_encode();
    ContractCall::new(contracts.collateral, data)
}

/// Send `amount` collateral to `recipient`.
pub fn transfer_collateral(
    contracts: &ContractConfig,
    recipient: Address,
    amount: Decimal,
) -> Result<ContractCall> {
    let data = IERC20::transferCall {
        to: recipient,
        amount: base_units(amount)?,
    }
    .abi_encode();
    Ok(ContractCall::new(contracts.collateral, data))
}

/// Let `operator` (usually an exchange) move all outcome tokens.
pub fn set_approval_for_all(
    contracts: &ContractConfig,
    operator: Address,
    approved: bool,
) -> ContractCall {
    let data = IConditionalTokens::setApprovalForAllCall { operator, approved }.abi_encode();
    ContractCall::new(contracts.conditional_tokens, data)
}
