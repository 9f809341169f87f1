//! Gnosis Safe signatures.
//!
//! Two paths share the signer: approving a Safe transaction (hash computed the way
//! the Safe contract's `getTransactionHash` does, signed as a personal message and
//! packed with `v + 4`), and the one-off `CreateProxy` signature that deploys a
//! user's Safe through Polymarket's factory.

use alloy_primitives::{eip191_hash_message, Address, Bytes, B256, U256};
use alloy_sol_types::{eip712_domain, sol, SolStruct};

use crate::config::{SAFE_FACTORY_NAME, SAFE_PROXY_FACTORY};
use crate::error::{Error, Result};
use crate::signing::EthSigner;

sol! {
    #[derive(Debug)]
    struct SafeTx {
        address to;
        uint256 value;
        bytes data;
        uint8 operation;
        uint256 safeTxGas;
        uint256 baseGas;
        uint256 gasPrice;
        address gasToken;
        address refundReceiver;
        uint256 nonce;
    }

    #[derive(Debug)]
    struct CreateProxy {
        address paymentToken;
        uint256 payment;
        address paymentReceiver;
    }
}

/// Kind of call the Safe performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Operation {
    #[default]
    Call = 0,
    DelegateCall = 1,
}

/// Inner call a Safe is asked to execute.
///
/// Gas refund fields are always zero: the owner pays gas for `execTransaction`
/// directly, relayed execution is not supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeTransaction {
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
    pub operation: Operation,
}

impl SafeTransaction {
    /// Plain call with no value attached.
    pub fn call(to: Address, data: impl Into<Bytes>) -> Self {
        Self {
            to,
            value: U256::ZERO,
            data: data.into(),
            operation: Operation::Call,
        }
    }
}

/// Read access to a deployed Safe.
///
/// Implementations backed by an RPC node perform `nonce()` and
/// `getTransactionHash(...)` calls; [`LocalSafe`] computes the same values offline.
pub trait SafeContract {
    fn address(&self) -> Address;

    fn nonce(&self) -> Result<U256>;

    /// `getTransactionHash` with zero `safeTxGas`, `baseGas`, `gasPrice`,
    /// `gasToken` and `refundReceiver`.
    fn get_transaction_hash(&self, txn: &SafeTransaction, nonce: U256) -> Result<B256>;
}

/// Safe (v1.3+) whose transaction hash is derived locally from its address and chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalSafe {
    pub address: Address,
    pub chain_id: u64,
    pub nonce: U256,
}

impl LocalSafe {
    pub fn new(address: Address, chain_id: u64, nonce: U256) -> Self {
        Self {
            address,
            chain_id,
            nonce,
        }
    }
}

impl SafeContract for LocalSafe {
    fn address(&self) -> Address {
        self.address
    }

    fn nonce(&self) -> Result<U256> {
        Ok(self.nonce)
    }

    fn get_transaction_hash(&self, txn: &SafeTransaction, nonce: U256) -> Result<B256> {
        Ok(safe_tx_hash(self.address, self.chain_id, txn, nonce))
    }
}

/// EIP-712 `SafeTx` digest under the Safe's `{chainId, verifyingContract}` domain.
pub fn safe_tx_hash(safe: Address, chain_id: u64, txn: &SafeTransaction, nonce: U256) -> B256 {
    let domain = eip712_domain! {
        chain_id: chain_id,
        verifying_contract: safe,
    };
    SafeTx {
        to: txn.to,
        value: txn.value,
        data: txn.data.clone(),
        operation: txn.operation as u8,
        safeTxGas: U256::ZERO,
        baseGas: U256::ZERO,
        gasPrice: U256::ZERO,
        gasToken: Address::ZERO,
        refundReceiver: Address::ZERO,
        nonce,
    }
    .eip712_signing_hash(&domain)
}

/// Owner approval of one Safe transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedMessage {
    /// Hash returned by the Safe
    pub safe_tx_hash: B256,
    /// EIP-191 personal-message digest of `safe_tx_hash`, the value actually signed
    pub message_hash: B256,
    /// `r || s || v` with `v` in 27/28
    pub signature: [u8; 65],
}

/// Have `account` approve `txn` on `safe` at `nonce`.
pub fn sign_safe_transaction(
    account: &dyn EthSigner,
    safe: &dyn SafeContract,
    txn: &SafeTransaction,
    nonce: U256,
) -> Result<SignedMessage> {
    let safe_tx_hash = safe.get_transaction_hash(txn, nonce)?;
    let message_hash = eip191_hash_message(safe_tx_hash);
    let signature = account.sign_hash(&message_hash)?;

    tracing::debug!(
        safe = %safe.address(),
        to = %txn.to,
        %nonce,
        %safe_tx_hash,
        "safe transaction signed"
    );
    Ok(SignedMessage {
        safe_tx_hash,
        message_hash,
        signature,
    })
}

/// Signature bytes for `execTransaction` from a single owner.
pub fn get_packed_signature(signed: &SignedMessage) -> Result<[u8; 65]> {
    pack_signature(&signed.signature)
}

/// Re-encode `r || s || v` for Safe's `eth_sign` signature type.
///
/// Safe treats `v > 30` as "signed with the personal-message prefix" and
/// subtracts 4 before `ecrecover`, so both recovery conventions map to 31/32:
/// 0/1 gain 31 and 27/28 gain 4. Any other `v` is rejected.
pub fn pack_signature(signature: &[u8]) -> Result<[u8; 65]> {
    let (r, s, v) = signature_parts(signature)?;
    let v = match v {
        0 | 1 => v + 31,
        27 | 28 => v + 4,
        other => {
            return Err(Error::validation(format!(
                "invalid signature v value {other}, expected 0, 1, 27 or 28"
            )))
        }
    };

    let mut packed = [0u8; 65];
    packed[..32].copy_from_slice(r.as_slice());
    packed[32..64].copy_from_slice(s.as_slice());
    packed[64] = v;
    Ok(packed)
}

/// ECDSA signature split into its components, `v` in 27/28
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitSignature {
    pub v: u8,
    pub r: B256,
    pub s: B256,
}

/// Split `r || s || v` by byte offset: 0..32 is `r`, 32..64 is `s`, 64 is `v`.
pub fn split_signature(signature: &[u8]) -> Result<SplitSignature> {
    let (r, s, v) = signature_parts(signature)?;
    let v = match v {
        0 | 1 => v + 27,
        27 | 28 => v,
        other => {
            return Err(Error::validation(format!(
                "invalid signature v value {other}, expected 0, 1, 27 or 28"
            )))
        }
    };
    Ok(SplitSignature { v, r, s })
}

fn signature_parts(signature: &[u8]) -> Result<(B256, B256, u8)> {
    if signature.len() != 65 {
        return Err(Error::validation(format!(
            "signature must be 65 bytes, got {}",
            signature.len()
        )));
    }
    Ok((
        B256::from_slice(&signature[..32]),
        B256::from_slice(&signature[32..64]),
        signature[64],
    ))
}

/// EIP-712 digest of the zero-payment `CreateProxy` request for the Safe factory.
pub fn create_proxy_hash(chain_id: u64) -> B256 {
    let domain = eip712_domain! {
        name: SAFE_FACTORY_NAME,
        chain_id: chain_id,
        verifying_contract: SAFE_PROXY_FACTORY,
    };
    CreateProxy {
        paymentToken: Address::ZERO,
        payment: U256::ZERO,
        paymentReceiver: Address::ZERO,
    }
    .eip712_signing_hash(&domain)
}

/// Sign the Safe deployment request and split it for `createProxy`.
pub fn create_safe_create_signature(account: &dyn EthSigner) -> Result<SplitSignature> {
    let hash = create_proxy_hash(account.chain_id());
    let signature = account.sign_hash(&hash)?;
    split_signature(&signature)
}
