//! Keys and signatures.
//!
//! [`EthSigner`] is the seam every signing path goes through: order EIP-712
//! signatures, `ClobAuth` L1 headers and Safe transaction approvals.

mod eip712;
mod hmac;

pub use eip712::{
    build_signed_order, build_signed_order_with_salt, clob_auth_hash, generate_salt, order_hash,
    sign_clob_auth_message, CLOB_AUTH_MESSAGE, EXCHANGE_DOMAIN_NAME, EXCHANGE_DOMAIN_VERSION,
};
pub use hmac::build_hmac_signature;

use alloy_primitives::{Address, B256};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Produces raw ECDSA signatures for one account on one chain.
pub trait EthSigner: Send + Sync {
    /// Address derived from the key
    fn address(&self) -> Address;

    /// Chain the signatures are meant for
    fn chain_id(&self) -> u64;

    /// Sign a 32-byte digest as is (no prefix), returning `r || s || v`.
    fn sign_hash(&self, hash: &B256) -> Result<[u8; 65]>;
}

/// Local private key bound to a chain id
#[derive(Clone)]
pub struct Signer {
    key: PrivateKeySigner,
    chain_id: u64,
}

impl Signer {
    pub fn new(key: PrivateKeySigner, chain_id: u64) -> Self {
        Self { key, chain_id }
    }

    /// Parse a hex private key, with or without `0x`.
    pub fn from_private_key(private_key: &str, chain_id: u64) -> Result<Self> {
        let key = PrivateKeySigner::from_str(private_key)
            .map_err(|e| Error::Signing(format!("invalid private key: {e}")))?;
        Ok(Self::new(key, chain_id))
    }

    pub fn key(&self) -> &PrivateKeySigner {
        &self.key
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer")
            .field("address", &self.key.address())
            .field("chain_id", &self.chain_id)
            .finish()
    }
}

impl EthSigner for Signer {
    fn address(&self) -> Address {
        self.key.address()
    }

    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    fn sign_hash(&self, hash: &B256) -> Result<[u8; 65]> {
        let signature = self.key.sign_hash_sync(hash)?;
        Ok(signature.as_bytes())
    }
}

impl<S: EthSigner + ?Sized> EthSigner for Box<S> {
    fn address(&self) -> Address {
        (**self).address()
    }

    fn chain_id(&self) -> u64 {
        (**self).chain_id()
    }

    fn sign_hash(&self, hash: &B256) -> Result<[u8; 65]> {
        (**self).sign_hash(hash)
    }
}
