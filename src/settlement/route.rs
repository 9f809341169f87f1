use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;

use super::abi::{CreateSig, IProxyWalletFactory, ISafe, ISafeProxyFactory, ProxyCall};
use super::ContractCall;
use crate::config::{PROXY_WALLET_FACTORY, SAFE_PROXY_FACTORY};
use crate::error::Result;
use crate::safe::{
    create_safe_create_signature, get_packed_signature, sign_safe_transaction, SafeContract,
    SafeTransaction,
};
use crate::signing::EthSigner;
use crate::types::SignatureType;

const PROXY_CALL: u8 = 1;

/// How a call reaches its target for each kind of trading account
pub enum WalletRoute<'a> {
    /// The key's own address sends the call
    Eoa,
    /// A Polymarket proxy wallet, driven through its factory
    Proxy { factory: Address },
    /// A Safe owned by `owner`, driven through `execTransaction`
    Safe {
        safe: &'a dyn SafeContract,
        owner: &'a dyn EthSigner,
    },
}

impl<'a> WalletRoute<'a> {
    /// Proxy wallet behind the Polymarket factory
    pub fn proxy() -> Self {
        WalletRoute::Proxy {
            factory: PROXY_WALLET_FACTORY,
        }
    }

    pub fn safe(safe: &'a dyn SafeContract, owner: &'a dyn EthSigner) -> Self {
        WalletRoute::Safe { safe, owner }
    }

    /// Order signature type matching this account kind
    pub fn signature_type(&self) -> SignatureType {
        match self {
            WalletRoute::Eoa => SignatureType::Eoa,
            WalletRoute::Proxy { .. } => SignatureType::PolyProxy,
            WalletRoute::Safe { .. } => SignatureType::PolyGnosisSafe,
        }
    }

    /// Wrap `call` into the transaction the account's key actually sends.
    pub fn wrap(&self, call: ContractCall) -> Result<ContractCall> {
        match self {
            WalletRoute::Eoa => Ok(route_eoa(call)),
            WalletRoute::Proxy { factory } => Ok(route_proxy(*factory, call)),
            WalletRoute::Safe { safe, owner } => route_safe(*safe, *owner, call),
        }
    }
}

pub fn route_eoa(call: ContractCall) -> ContractCall {
    call
}

/// `factory.proxy([(CALL, to, 0, data)])`
pub fn route_proxy(factory: Address, call: ContractCall) -> ContractCall {
    let data = IProxyWalletFactory::proxyCall {
        calls: vec![ProxyCall {
            typeCode: PROXY_CALL,
            to: call.to,
            value: U256::ZERO,
            data: call.data,
        }],
    }
    .abi_encode();
    ContractCall::new(factory, data)
}

/// `safe.execTransaction(...)` signed by `owner` at the Safe's current nonce.
pub fn route_safe(
    safe: &dyn SafeContract,
    owner: &dyn EthSigner,
    call: ContractCall,
) -> Result<ContractCall> {
    let nonce = safe.nonce()?;
    let txn = SafeTransaction::call(call.to, call.data);
    let signed = sign_safe_transaction(owner, safe, &txn, nonce)?;
    let signature = get_packed_signature(&signed)?;

    let data = ISafe::execTransactionCall {
        to: txn.to,
        value: txn.value,
        data: txn.data,
        operation: txn.operation as u8,
        safeTxGas: U256::ZERO,
        baseGas: U256::ZERO,
        gasPrice: U256::ZERO,
        gasToken: Address::ZERO,
        refundReceiver: Address::ZERO,
        signatures: signature.to_vec().into(),
    }
    .abi_encode();
    Ok(ContractCall::new(safe.address(), data))
}

/// Deploy `owner`'s Safe through the Polymarket Safe factory.
pub fn deploy_safe(owner: &dyn EthSigner) -> Result<ContractCall> {
    let sig = create_safe_create_signature(owner)?;
    let data = ISafeProxyFactory::createProxyCall {
        paymentToken: Address::ZERO,
        payment: U256::ZERO,
        paymentReceiver: Address::ZERO,
        createSig: CreateSig {
            v: sig.v,
            r: sig.r,
            s: sig.s,
        },
    }
    .abi_encode();
    Ok(ContractCall::new(SAFE_PROXY_FACTORY, data))
}
