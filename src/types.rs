use clap::Parser;

#[derive(Debug, Parser)]
#[clap(name="futcli")]
#[clap(about="futcli places a single order on Binance USDT-M futures TESTNET", long_about=None)]
pub struct CommandlineArgs {
    /// Trading symbol, e.g. BTCUSDT
    #[clap(short='s', long)]
    pub symbol: String,

    /// Order side: BUY or SELL
    #[clap(long)]
    pub side: String,

    /// Order type: MARKET, LIMIT, or STOP_LIMIT
    #[clap(long="type")]
    pub order_type: String,

    /// Order quantity, e.g. 0.001
    #[clap(short='q', long)]
    pub qty: String,

    /// Price; required for LIMIT and STOP_LIMIT orders
    #[clap(long)]
    pub price: Option<String>,

    /// Stop price; required for STOP_LIMIT orders
    #[clap(long)]
    pub stop_price: Option<String>,

    /// Binance API key (or set BINANCE_API_KEY env variable)
    #[clap(long)]
    pub api_key: Option<String>,

    /// Binance API secret (or set BINANCE_API_SECRET env variable)
    #[clap(long)]
    pub api_secret: Option<String>,
}

/// Order side as understood by the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

/// Internal order type. `StopLimit` is sent to the exchange as type STOP
/// with both price and stopPrice set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderType {
    Market,
    Limit,
    StopLimit,
}

/// Normalized and validated order parameters. Constructed only by the
/// validator; either every rule holds or this value never exists.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderIntent {
    pub symbol: String,
    pub side: Side,
    pub order_type: OrderType,
    pub quantity: f64,
    pub price: Option<f64>,
    pub stop_price: Option<f64>,
}

/// Resolved API credentials, from command line or environment.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
}

/// Error type for the whole tool. Every failure path converges here and is
/// printed as a single `Error: <message>` line at top level.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("API credentials are required. Provide --api-key / --api-secret or set BINANCE_API_KEY / BINANCE_API_SECRET environment variables.")]
    MissingCredentials,

    /// Malformed, missing, or inconsistent user input; message names the field.
    #[error("{0}")]
    Validation(String),

    /// Any failure raised while submitting the order, carrying the
    /// underlying message. Callers never need to distinguish subtypes.
    #[error("order submission failed: {0}")]
    Submission(String),
}

/// Order record returned by the futures order endpoint.
// Response structure reference:
// {
//   "orderId": 12345,
//   "symbol": "BTCUSDT",
//   "status": "NEW",
//   "clientOrderId": "...",
//   "price": "0",
//   "avgPrice": "0.0",
//   "origQty": "0.001",
//   "executedQty": "0",
//   "timeInForce": "GTC",
//   "type": "MARKET",
//   "side": "BUY",
//   ...
// }
#[derive(Debug, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub order_id: u64,
    pub symbol: String,
    pub side: String,
    #[serde(rename = "type")]
    pub order_type: String,
    pub status: String,
    pub executed_qty: String,
    #[serde(default)]
    pub client_order_id: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub avg_price: String,
    #[serde(default)]
    pub orig_qty: String,
    #[serde(default)]
    pub time_in_force: String,
    #[serde(default)]
    pub stop_price: String,
}

/// Error body returned by the exchange on a non-success HTTP status.
#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub struct ExchangeErrorResponse {
    pub code: i64,
    pub msg: String,
}
