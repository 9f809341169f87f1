use alloy_primitives::{keccak256, Address, B256, U256};
use alloy_sol_types::{eip712_domain, sol, SolStruct, SolValue};

use super::EthSigner;
use crate::error::{Error, Result};
use crate::types::{OrderData, Side, SignatureType, SignedOrder};

pub const EXCHANGE_DOMAIN_NAME: &str = "Polymarket CTF Exchange";
pub const EXCHANGE_DOMAIN_VERSION: &str = "1";

const CLOB_AUTH_DOMAIN_NAME: &str = "ClobAuthDomain";
const CLOB_AUTH_DOMAIN_VERSION: &str = "1";
const CLOB_AUTH_TYPE: &str =
    "ClobAuth(address address,string timestamp,uint256 nonce,string message)";

/// Fixed statement every L1 authentication signs
pub const CLOB_AUTH_MESSAGE: &str = "This message attests that I control the given wallet";

sol! {
    /// Order struct hashed by the CTF exchange
    #[derive(Debug)]
    struct Order {
        uint256 salt;
        address maker;
        address signer;
        address taker;
        uint256 tokenId;
        uint256 makerAmount;
        uint256 takerAmount;
        uint256 expiration;
        uint256 nonce;
        uint256 feeRateBps;
        uint8 side;
        uint8 signatureType;
    }
}

/// Random order salt, kept below 2^32 so it survives JSON number parsing.
pub fn generate_salt() -> u64 {
    u64::from(rand::random::<u32>())
}

fn parse_uint(field: &str, value: &str) -> Result<U256> {
    U256::from_str_radix(value, 10)
        .map_err(|e| Error::validation(format!("order {field} '{value}' is not an integer: {e}")))
}

fn to_sol_order(salt: u64, data: &OrderData) -> Result<Order> {
    let side = Side::try_from(data.side)?;
    let signature_type = SignatureType::try_from(data.signature_type)?;
    Ok(Order {
        salt: U256::from(salt),
        maker: data.maker,
        signer: data.signer,
        taker: data.taker,
        tokenId: parse_uint("tokenId", &data.token_id)?,
        makerAmount: parse_uint("makerAmount", &data.maker_amount)?,
        takerAmount: parse_uint("takerAmount", &data.taker_amount)?,
        expiration: parse_uint("expiration", &data.expiration)?,
        nonce: parse_uint("nonce", &data.nonce)?,
        feeRateBps: parse_uint("feeRateBps", &data.fee_rate_bps)?,
        side: side.exchange_code(),
        signatureType: signature_type.code(),
    })
}

/// EIP-712 digest of an order under the given exchange's domain.
pub fn order_hash(exchange: Address, chain_id: u64, salt: u64, data: &OrderData) -> Result<B256> {
    let domain = eip712_domain! {
        name: EXCHANGE_DOMAIN_NAME,
        version: EXCHANGE_DOMAIN_VERSION,
        chain_id: chain_id,
        verifying_contract: exchange,
    };
    Ok(to_sol_order(salt, data)?.eip712_signing_hash(&domain))
}

/// Sign `data` for `exchange` with a fresh salt.
pub fn build_signed_order(
    exchange: Address,
    chain_id: u64,
    signer: &dyn EthSigner,
    data: OrderData,
) -> Result<SignedOrder> {
    build_signed_order_with_salt(exchange, chain_id, signer, data, generate_salt())
}

pub fn build_signed_order_with_salt(
    exchange: Address,
    chain_id: u64,
    signer: &dyn EthSigner,
    data: OrderData,
    salt: u64,
) -> Result<SignedOrder> {
    if data.signer != signer.address() {
        return Err(Error::Signing(format!(
            "order signer {} does not match key address {}",
            data.signer,
            signer.address()
        )));
    }
    let hash = order_hash(exchange, chain_id, salt, &data)?;
    let signature = signer.sign_hash(&hash)?;
    Ok(SignedOrder {
        salt,
        order: data,
        signature: signature.to_vec(),
    })
}

/// EIP-712 digest of the `ClobAuth` statement used for L1 headers.
pub fn clob_auth_hash(address: Address, chain_id: u64, timestamp: &str, nonce: u64) -> B256 {
    let domain = eip712_domain! {
        name: CLOB_AUTH_DOMAIN_NAME,
        version: CLOB_AUTH_DOMAIN_VERSION,
        chain_id: chain_id,
    };
    let struct_hash = keccak256(
        (
            keccak256(CLOB_AUTH_TYPE),
            address,
            keccak256(timestamp),
            U256::from(nonce),
            keccak256(CLOB_AUTH_MESSAGE),
        )
            .abi_encode(),
    );

    let mut digest = [0u8; 66];
    digest[0] = 0x19;
    digest[1] = 0x01;
    digest[2..34].copy_from_slice(domain.separator().as_slice());
    digest[34..].copy_from_slice(struct_hash.as_slice());
    keccak256(digest)
}

/// Sign the `ClobAuth` statement, returning a 0x-prefixed hex signature.
pub fn sign_clob_auth_message(signer: &dyn EthSigner, timestamp: i64, nonce: u64) -> Result<String> {
    let hash = clob_auth_hash(
        signer.address(),
        signer.chain_id(),
        &timestamp.to_string(),
        nonce,
    );
    let signature = signer.sign_hash(&hash)?;
    Ok(alloy_primitives::hex::encode_prefixed(signature))
}
