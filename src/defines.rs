/// Base URL of Binance USDT-M futures TESTNET.
/// This tool is testnet-only by design; there is no mainnet switch.
pub const TESTNET_FUTURES_BASE_URL: &str = "https://testnet.binancefuture.com";

/// Order placement endpoint (USDT-M futures).
pub const ORDER_ENDPOINT: &str = "/fapi/v1/order";

/// Environment variable names for credentials, used as fallback when
/// --api-key / --api-secret are not given on the command line.
pub const ENV_API_KEY: &str = "BINANCE_API_KEY";
pub const ENV_API_SECRET: &str = "BINANCE_API_SECRET";

/// recvWindow sent with every signed request, in milliseconds.
pub const RECV_WINDOW_MS: u64 = 5000;

/// Minimum accepted symbol length. Shallow sanity check only; the exchange
/// performs the authoritative symbol validation.
pub const MIN_SYMBOL_LEN: usize = 6;
