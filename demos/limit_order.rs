use polymarket_orders::config::POLYGON;
use polymarket_orders::types::PostOrder;
use polymarket_orders::{
    CreateOrderOptions, EthSigner, OrderArgs, OrderBuilder, OrderType, Side, Signer, TickSize,
};
use rust_decimal::Decimal;
use std::str::FromStr;

fn main() -> polymarket_orders::Result<()> {
    // Replace with your actual private key
    let private_key =
        std::env::var("PRIVATE_KEY").expect("PRIVATE_KEY environment variable not set");
    let api_key = std::env::var("POLY_API_KEY").unwrap_or_else(|_| "<api-key>".to_string());

    let signer = Signer::from_private_key(&private_key, POLYGON)?;
    println!("Signer address: {}", signer.address());

    // EOA wallet: the key's address is both signer and maker
    let builder = OrderBuilder::new(signer, None, None);

    let token_id = "109648317055340591503076024421581448189531885907475125926203413622318314876012";
    let args = OrderArgs::new(
        token_id,
        Decimal::from_str("0.50").unwrap(), // price
        Decimal::from_str("10.0").unwrap(), // size
        Side::Buy,
    );

    // Tick size and neg risk come from /tick-size and /neg-risk for a live market
    let options = CreateOrderOptions::new(TickSize::Hundredth, false);
    let order = builder.create_order(&args, options)?;

    println!("Maker amount: {}", order.order.maker_amount);
    println!("Taker amount: {}", order.order.taker_amount);
    println!("Signature:    {}", order.signature_hex());

    // Body the exchange expects on POST /order (signed here, not posted)
    let body = PostOrder::new(order, api_key, OrderType::Gtc);
    println!("\n{}", serde_json::to_string_pretty(&body)?);

    Ok(())
}
