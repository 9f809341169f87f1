use alloy_primitives::Address;
use rust_decimal::Decimal;

use super::amounts::{get_market_order_amounts, get_order_amounts, OrderAmounts};
use super::price::calculate_market_price;
use crate::config::get_contract_config;
use crate::error::{Error, Result};
use crate::signing::{build_signed_order, EthSigner};
use crate::types::{
    CreateOrderOptions, MarketOrderArgs, OrderArgs, OrderBookSummary, OrderData, OrderSummary,
    OrderType, Side, SignatureType, SignedOrder, TickSize, TokenId,
};

/// Whether `price` lies in `[tick, 1 - tick]`.
pub fn price_valid(price: Decimal, tick_size: TickSize) -> bool {
    let tick = tick_size.as_decimal();
    tick <= price && price <= Decimal::ONE - tick
}

/// Whether tick `a` is finer than tick `b`.
pub fn is_tick_size_smaller(a: TickSize, b: TickSize) -> bool {
    a.as_decimal() < b.as_decimal()
}

/// Turns order intents into signed orders.
///
/// The signer's key produces the signature and fills the order's `signer` field;
/// the funder is the `maker` that holds the funds. For EOA accounts both are the
/// same address. For proxy and Safe wallets the funder is the wallet contract.
pub struct OrderBuilder {
    signer: Box<dyn EthSigner>,
    sig_type: SignatureType,
    funder: Address,
}

impl OrderBuilder {
    /// Create a new OrderBuilder
    ///
    /// # Arguments
    /// * `signer` - Key used to sign orders
    /// * `sig_type` - Signature type, defaults to [`SignatureType::Eoa`]
    /// * `funder` - Address holding the funds, defaults to the signer's address
    pub fn new(
        signer: impl EthSigner + 'static,
        sig_type: Option<SignatureType>,
        funder: Option<Address>,
    ) -> Self {
        let funder = funder.unwrap_or_else(|| signer.address());
        Self {
            signer: Box::new(signer),
            sig_type: sig_type.unwrap_or_default(),
            funder,
        }
    }

    pub(crate) fn signer(&self) -> &dyn EthSigner {
        &*self.signer
    }

    pub fn signer_address(&self) -> Address {
        self.signer.address()
    }

    pub fn funder(&self) -> Address {
        self.funder
    }

    pub fn signature_type(&self) -> SignatureType {
        self.sig_type
    }

    pub fn chain_id(&self) -> u64 {
        self.signer.chain_id()
    }

    /// Create and sign a limit order.
    pub fn create_order(
        &self,
        order_args: &OrderArgs,
        options: CreateOrderOptions,
    ) -> Result<SignedOrder> {
        check_price(order_args.price, options.tick_size)?;

        let amounts = get_order_amounts(
            order_args.side,
            order_args.size,
            order_args.price,
            &options.tick_size.round_config(),
        )?;

        let data = self.order_data(
            &order_args.token_id,
            amounts,
            order_args.fee_rate_bps,
            order_args.nonce,
            order_args.expiration,
            order_args.taker,
        );
        let signed = self.sign(data, options.neg_risk)?;

        tracing::debug!(
            token_id = %order_args.token_id,
            side = %order_args.side,
            price = %order_args.price,
            size = %order_args.size,
            maker_amount = amounts.maker_amount,
            taker_amount = amounts.taker_amount,
            neg_risk = options.neg_risk,
            "limit order built"
        );
        Ok(signed)
    }

    /// Create and sign a market order at `order_args.price`.
    ///
    /// Market orders never expire. Use [`Self::create_market_order_from_book`] when
    /// the price still has to be discovered.
    pub fn create_market_order(
        &self,
        order_args: &MarketOrderArgs,
        options: CreateOrderOptions,
    ) -> Result<SignedOrder> {
        let price = order_args.price.ok_or_else(|| {
            Error::validation("market order price must be set or discovered from the book")
        })?;
        check_price(price, options.tick_size)?;

        let amounts = get_market_order_amounts(
            order_args.side,
            order_args.amount,
            price,
            &options.tick_size.round_config(),
        )?;

        let data = self.order_data(
            &order_args.token_id,
            amounts,
            order_args.fee_rate_bps,
            order_args.nonce,
            0,
            order_args.taker,
        );
        let signed = self.sign(data, options.neg_risk)?;

        tracing::debug!(
            token_id = %order_args.token_id,
            side = %order_args.side,
            price = %price,
            amount = %order_args.amount,
            maker_amount = amounts.maker_amount,
            taker_amount = amounts.taker_amount,
            order_type = order_args.order_type.as_str(),
            "market order built"
        );
        Ok(signed)
    }

    /// Price a market order against `book` (unless a price was given), then sign it.
    pub fn create_market_order_from_book(
        &self,
        order_args: &MarketOrderArgs,
        book: &OrderBookSummary,
        options: CreateOrderOptions,
    ) -> Result<SignedOrder> {
        let mut args = order_args.clone();
        if args.price.is_none() {
            let price = self.calculate_market_price(
                args.side,
                book.opposing_levels(args.side),
                args.amount,
                args.order_type,
            )?;
            args.price = Some(price);
        }
        self.create_market_order(&args, options)
    }

    /// Price a market order by walking the opposing side of the book.
    pub fn calculate_market_price(
        &self,
        side: Side,
        levels: &[OrderSummary],
        amount_to_match: Decimal,
        order_type: OrderType,
    ) -> Result<Decimal> {
        let price = calculate_market_price(side, levels, amount_to_match, order_type)?;
        tracing::debug!(%side, %amount_to_match, %price, levels = levels.len(), "market price found");
        Ok(price)
    }

    fn order_data(
        &self,
        token_id: &TokenId,
        amounts: OrderAmounts,
        fee_rate_bps: u32,
        nonce: u64,
        expiration: u64,
        taker: Address,
    ) -> OrderData {
        OrderData {
            maker: self.funder,
            taker,
            token_id: token_id.as_str().to_string(),
            maker_amount: amounts.maker_amount.to_string(),
            taker_amount: amounts.taker_amount.to_string(),
            side: amounts.exchange_side(),
            fee_rate_bps: fee_rate_bps.to_string(),
            nonce: nonce.to_string(),
            signer: self.signer.address(),
            expiration: expiration.to_string(),
            signature_type: self.sig_type.code(),
        }
    }

    fn sign(&self, data: OrderData, neg_risk: bool) -> Result<SignedOrder> {
        let chain_id = self.signer.chain_id();
        let contract_config = get_contract_config(chain_id, neg_risk)?;
        build_signed_order(contract_config.exchange, chain_id, &*self.signer, data)
    }
}

fn check_price(price: Decimal, tick_size: TickSize) -> Result<()> {
    if !price_valid(price, tick_size) {
        return Err(Error::validation(format!(
            "price ({price}), min: {tick_size} - max: {}",
            Decimal::ONE - tick_size.as_decimal()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AMOY, POLYGON};
    use crate::error::LiquidityError;
    use crate::signing::order_hash;
    use crate::signing::test_support::*;
    use rust_decimal_macros::dec;

    const TOKEN: &str =
        "71321045679252212594626385532706912750332728571942532289631379312455583992563";

    fn options() -> CreateOrderOptions {
        CreateOrderOptions::new(TickSize::Hundredth, false)
    }

    #[test]
    fn test_limit_order_fields() {
        let signer = test_signer(POLYGON);
        let address = signer.address();
        let builder = OrderBuilder::new(signer, None, None);

        let args = OrderArgs::new(TOKEN, dec!(0.555), dec!(10.0), Side::Buy)
            .fee_rate_bps(10)
            .nonce(3)
            .expiration(1_900_000_000);
        let signed = builder.create_order(&args, options()).unwrap();

        let order = &signed.order;
        assert_eq!(order.maker, address);
        assert_eq!(order.signer, address);
        assert_eq!(order.taker, Address::ZERO);
        assert_eq!(order.token_id, TOKEN);
        assert_eq!(order.maker_amount, "5600000");
        assert_eq!(order.taker_amount, "10000000");
        assert_eq!(order.side, 0);
        assert_eq!(order.fee_rate_bps, "10");
        assert_eq!(order.nonce, "3");
        assert_eq!(order.expiration, "1900000000");
        assert_eq!(order.signature_type, 0);
    }

    #[test]
    fn test_proxy_funder_is_maker() {
        let signer = test_signer(POLYGON);
        let address = signer.address();
        let proxy = Address::repeat_byte(0x77);
        let builder = OrderBuilder::new(signer, Some(SignatureType::PolyProxy), Some(proxy));

        let args = OrderArgs::new(TOKEN, dec!(0.40), dec!(5), Side::Sell);
        let signed = builder.create_order(&args, options()).unwrap();
        assert_eq!(signed.order.maker, proxy);
        assert_eq!(signed.order.signer, address);
        assert_eq!(signed.order.signature_type, 1);
        assert_eq!(signed.order.side, 1);
    }

    #[test]
    fn test_neg_risk_signs_for_neg_risk_exchange() {
        let signer = test_signer(POLYGON);
        let key = signer_key(&signer);
        let builder = OrderBuilder::new(signer, None, None);
        let args = OrderArgs::new(TOKEN, dec!(0.5), dec!(10), Side::Buy);

        let signed = builder
            .create_order(&args, CreateOrderOptions::new(TickSize::Hundredth, true))
            .unwrap();
        let neg_risk_exchange = get_contract_config(POLYGON, true).unwrap().exchange;
        let hash = order_hash(neg_risk_exchange, POLYGON, signed.salt, &signed.order).unwrap();
        assert_eq!(recover(&hash, &signed.signature), key);
    }

    #[test]
    fn test_price_outside_tick_range() {
        let builder = OrderBuilder::new(test_signer(POLYGON), None, None);
        for price in [dec!(0.005), dec!(0.995), dec!(0), dec!(1)] {
            let args = OrderArgs::new(TOKEN, price, dec!(10), Side::Buy);
            let err = builder.create_order(&args, options()).unwrap_err();
            assert!(err.is_validation(), "{price}");
        }
        let edge = OrderArgs::new(TOKEN, dec!(0.01), dec!(10), Side::Buy);
        assert!(builder.create_order(&edge, options()).is_ok());
    }

    #[test]
    fn test_unknown_chain_is_config_error() {
        let builder = OrderBuilder::new(test_signer(1), None, None);
        let args = OrderArgs::new(TOKEN, dec!(0.5), dec!(10), Side::Buy);
        assert!(builder.create_order(&args, options()).unwrap_err().is_config());
    }

    #[test]
    fn test_market_order_never_expires() {
        let builder = OrderBuilder::new(test_signer(AMOY), None, None);
        let args = MarketOrderArgs::new(TOKEN, dec!(100), Side::Buy).price(dec!(0.3));
        let signed = builder.create_market_order(&args, options()).unwrap();
        assert_eq!(signed.order.expiration, "0");
        assert_eq!(signed.order.maker_amount, "100000000");
        assert_eq!(signed.order.taker_amount, "333333300");
    }

    #[test]
    fn test_market_order_requires_price() {
        let builder = OrderBuilder::new(test_signer(POLYGON), None, None);
        let args = MarketOrderArgs::new(TOKEN, dec!(100), Side::Buy);
        assert!(builder.create_market_order(&args, options()).unwrap_err().is_validation());
    }

    #[test]
    fn test_market_order_from_book() {
        let builder = OrderBuilder::new(test_signer(POLYGON), None, None);
        let book = OrderBookSummary {
            asks: vec![
                OrderSummary::new(dec!(0.60), dec!(100)),
                OrderSummary::new(dec!(0.50), dec!(100)),
            ],
            bids: vec![OrderSummary::new(dec!(0.45), dec!(100))],
            ..Default::default()
        };

        let buy = MarketOrderArgs::new(TOKEN, dec!(80), Side::Buy);
        let signed = builder
            .create_market_order_from_book(&buy, &book, options())
            .unwrap();
        // 80 USDC walks into the 0.60 level
        assert_eq!(signed.order.maker_amount, "80000000");
        assert_eq!(signed.order.taker_amount, "133333300");

        let sell = MarketOrderArgs::new(TOKEN, dec!(50), Side::Sell);
        let signed = builder
            .create_market_order_from_book(&sell, &book, options())
            .unwrap();
        assert_eq!(signed.order.maker_amount, "50000000");
        assert_eq!(signed.order.taker_amount, "22500000");
    }

    #[test]
    fn test_empty_book_builds_nothing() {
        let builder = OrderBuilder::new(test_signer(POLYGON), None, None);
        let args = MarketOrderArgs::new(TOKEN, dec!(10), Side::Buy);
        let err = builder
            .create_market_order_from_book(&args, &OrderBookSummary::default(), options())
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Liquidity(LiquidityError::EmptyBook { side: Side::Buy })
        ));
    }

    #[test]
    fn test_tick_helpers() {
        assert!(is_tick_size_smaller(TickSize::Thousandth, TickSize::Hundredth));
        assert!(!is_tick_size_smaller(TickSize::Tenth, TickSize::Hundredth));
        assert!(price_valid(dec!(0.9), TickSize::Tenth));
        assert!(!price_valid(dec!(0.95), TickSize::Tenth));
    }
}
