use crate::defines::{ORDER_ENDPOINT, RECV_WINDOW_MS, TESTNET_FUTURES_BASE_URL};
use crate::types::{BotError, Credentials, ExchangeErrorResponse, OrderIntent, OrderResponse, OrderType};

use isahc::{ReadResponseExt, Request, RequestExt};
use ring::hmac;

/// Order placement request in the exchange's parameter vocabulary.
/// Produced from an `OrderIntent` by `build_order_request`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    pub symbol: String,
    pub side: &'static str,
    pub order_type: &'static str,
    pub quantity: f64,
    pub time_in_force: Option<&'static str>,
    pub price: Option<f64>,
    pub stop_price: Option<f64>,
}

/// The single operation this tool needs from an exchange: submit one order.
/// Any conforming implementation can be swapped in without touching
/// validation or mapping.
pub trait ExchangeApi {
    fn submit_order(&self, request: &OrderRequest) -> Result<OrderResponse, BotError>;
}

/// Map a validated intent to the exchange's order parameters.
///
/// MARKET      -> MARKET
/// LIMIT       -> LIMIT + timeInForce=GTC + price
/// STOP_LIMIT  -> STOP  + timeInForce=GTC + price + stopPrice
pub fn build_order_request(intent: &OrderIntent) -> OrderRequest {
    let time_in_force = match intent.order_type {
        OrderType::Market => None,
        OrderType::Limit | OrderType::StopLimit => Some("GTC"),
    };
    OrderRequest {
        symbol: intent.symbol.clone(),
        side: intent.side.as_str(),
        order_type: intent.order_type.exchange_str(),
        quantity: intent.quantity,
        time_in_force,
        price: intent.price,
        stop_price: match intent.order_type {
            OrderType::StopLimit => intent.stop_price,
            _ => None,
        },
    }
}

/// Build the mapped request, submit it through `api`, and log the outcome.
pub fn place_order(api: &dyn ExchangeApi, intent: &OrderIntent) -> Result<OrderResponse, BotError> {
    let request = build_order_request(intent);
    log::info!(
        "placing order | symbol={} side={} type={} qty={} price={:?} stopPrice={:?}",
        request.symbol,
        request.side,
        request.order_type,
        request.quantity,
        request.price,
        request.stop_price
    );

    match api.submit_order(&request) {
        Ok(order) => {
            log::info!("order placed successfully, orderId={}", order.order_id);
            Ok(order)
        }
        Err(e) => {
            log::error!("{}", e);
            Err(e)
        }
    }
}

/// Exchange client for Binance USDT-M futures TESTNET. Performs the signed
/// HTTP request; every failure surfaces as `BotError::Submission`.
pub struct BinanceFuturesApi {
    base_url: String,
    credentials: Credentials,
}

impl BinanceFuturesApi {
    pub fn new(credentials: Credentials) -> Self {
        Self::with_base_url(credentials, TESTNET_FUTURES_BASE_URL)
    }

    /// Mainly for tests pointing at a local server.
    pub fn with_base_url(credentials: Credentials, base_url: &str) -> Self {
        BinanceFuturesApi {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        }
    }
}

impl ExchangeApi for BinanceFuturesApi {
    fn submit_order(&self, request: &OrderRequest) -> Result<OrderResponse, BotError> {
        let query = build_query(request, timestamp_ms());
        let signature = sign_query(&self.credentials.api_secret, &query);
        let url = format!(
            "{}{}?{}&signature={}",
            self.base_url, ORDER_ENDPOINT, query, signature
        );

        let mut response = Request::post(url)
            .header("X-MBX-APIKEY", self.credentials.api_key.as_str())
            .body(())
            .map_err(|e| BotError::Submission(e.to_string()))?
            .send()
            .map_err(|e| BotError::Submission(e.to_string()))?;

        if !response.status().is_success() {
            let body = response.text().unwrap_or_default();
            return Err(submission_error(response.status().as_u16(), &body));
        }

        response
            .json::<OrderResponse>()
            .map_err(|e| BotError::Submission(format!("malformed order response: {}", e)))
    }
}

/// Build the unsigned query string. Pair order is fixed so the same request
/// always serializes identically.
fn build_query(request: &OrderRequest, timestamp_ms: u64) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    query.append_pair("symbol", &request.symbol);
    query.append_pair("side", request.side);
    query.append_pair("type", request.order_type);
    query.append_pair("quantity", &request.quantity.to_string());
    if let Some(tif) = request.time_in_force {
        query.append_pair("timeInForce", tif);
    }
    if let Some(price) = request.price {
        query.append_pair("price", &price.to_string());
    }
    if let Some(stop_price) = request.stop_price {
        query.append_pair("stopPrice", &stop_price.to_string());
    }
    query.append_pair("recvWindow", &RECV_WINDOW_MS.to_string());
    query.append_pair("timestamp", &timestamp_ms.to_string());
    query.finish()
}

/// HMAC-SHA256 over the query string, hex-encoded, as required for signed
/// endpoints.
fn sign_query(api_secret: &str, query: &str) -> String {
    let key = hmac::Key::new(hmac::HMAC_SHA256, api_secret.as_bytes());
    let tag = hmac::sign(&key, query.as_bytes());
    to_hex(tag.as_ref())
}

fn to_hex(bytes: &[u8]) -> String {
    use std::fmt::Write as _;
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut s, b| {
        let _ = write!(s, "{:02x}", b);
        s
    })
}

fn timestamp_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// Fold a non-success HTTP response into the uniform submission error,
/// preferring the exchange's own `msg` when the body parses.
fn submission_error(status: u16, body: &str) -> BotError {
    match serde_json::from_str::<ExchangeErrorResponse>(body) {
        Ok(err) => BotError::Submission(format!(
            "exchange rejected the order (HTTP {}, code {}): {}",
            status, err.code, err.msg
        )),
        Err(_) if body.trim().is_empty() => BotError::Submission(format!("HTTP {}", status)),
        Err(_) => BotError::Submission(format!("HTTP {}: {}", status, body.trim())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OrderIntent, Side};
    use std::cell::RefCell;

    fn market_intent() -> OrderIntent {
        OrderIntent {
            symbol: "BTCUSDT".to_string(),
            side: Side::Buy,
            order_type: OrderType::Market,
            quantity: 0.001,
            price: None,
            stop_price: None,
        }
    }

    fn stop_limit_intent() -> OrderIntent {
        OrderIntent {
            symbol: "BTCUSDT".to_string(),
            side: Side::Buy,
            order_type: OrderType::StopLimit,
            quantity: 0.01,
            price: Some(50000.0),
            stop_price: Some(49000.0),
        }
    }

    #[test]
    fn market_request_carries_no_price_fields() {
        let request = build_order_request(&market_intent());
        assert_eq!(request.symbol, "BTCUSDT");
        assert_eq!(request.side, "BUY");
        assert_eq!(request.order_type, "MARKET");
        assert_eq!(request.quantity, 0.001);
        assert_eq!(request.time_in_force, None);
        assert_eq!(request.price, None);
        assert_eq!(request.stop_price, None);
    }

    #[test]
    fn limit_request_adds_gtc_and_price() {
        let intent = OrderIntent {
            order_type: OrderType::Limit,
            price: Some(30000.0),
            ..market_intent()
        };
        let request = build_order_request(&intent);
        assert_eq!(request.order_type, "LIMIT");
        assert_eq!(request.time_in_force, Some("GTC"));
        assert_eq!(request.price, Some(30000.0));
        assert_eq!(request.stop_price, None);
    }

    #[test]
    fn stop_limit_maps_to_exchange_stop_type() {
        let request = build_order_request(&stop_limit_intent());
        assert_eq!(request.order_type, "STOP");
        assert_eq!(request.time_in_force, Some("GTC"));
        assert_eq!(request.price, Some(50000.0));
        assert_eq!(request.stop_price, Some(49000.0));
    }

    #[test]
    fn mapping_is_deterministic() {
        let intent = stop_limit_intent();
        assert_eq!(build_order_request(&intent), build_order_request(&intent));
    }

    #[test]
    fn query_string_contains_all_stop_limit_fields() {
        let query = build_query(&build_order_request(&stop_limit_intent()), 1650000000000);
        assert_eq!(
            query,
            "symbol=BTCUSDT&side=BUY&type=STOP&quantity=0.01&timeInForce=GTC\
             &price=50000&stopPrice=49000&recvWindow=5000&timestamp=1650000000000"
        );
    }

    #[test]
    fn query_string_for_market_order_has_no_optional_fields() {
        let query = build_query(&build_order_request(&market_intent()), 1650000000000);
        assert_eq!(
            query,
            "symbol=BTCUSDT&side=BUY&type=MARKET&quantity=0.001\
             &recvWindow=5000&timestamp=1650000000000"
        );
    }

    #[test]
    fn signature_matches_exchange_reference_vector() {
        // reference request/secret from the exchange's signed-endpoint docs
        let secret = "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j";
        let query = "symbol=LTCBTC&side=BUY&type=LIMIT&timeInForce=GTC&quantity=1&price=0.1\
                     &recvWindow=5000&timestamp=1499827319559";
        assert_eq!(
            sign_query(secret, query),
            "c8db56825ae71d6d79447849e617115f4a920fa2acdcab2b053c4b2838bd6b71"
        );
    }

    #[test]
    fn exchange_error_body_surfaces_its_message() {
        let err = submission_error(400, r#"{"code":-2019,"msg":"Margin is insufficient."}"#);
        let msg = err.to_string();
        assert!(msg.contains("Margin is insufficient."), "message: {}", msg);
        assert!(msg.contains("-2019"), "message: {}", msg);
    }

    #[test]
    fn unparseable_error_body_falls_back_to_raw_text() {
        let err = submission_error(502, "Bad Gateway");
        assert!(err.to_string().contains("HTTP 502: Bad Gateway"));
    }

    struct FailingApi;

    impl ExchangeApi for FailingApi {
        fn submit_order(&self, _request: &OrderRequest) -> Result<OrderResponse, BotError> {
            Err(BotError::Submission("connection reset by peer".to_string()))
        }
    }

    #[test]
    fn client_failure_surfaces_as_uniform_submission_error() {
        let err = place_order(&FailingApi, &market_intent()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("order submission failed"), "message: {}", msg);
        assert!(msg.contains("connection reset by peer"), "message: {}", msg);
    }

    struct RecordingApi {
        seen: RefCell<Option<OrderRequest>>,
    }

    impl ExchangeApi for RecordingApi {
        fn submit_order(&self, request: &OrderRequest) -> Result<OrderResponse, BotError> {
            *self.seen.borrow_mut() = Some(request.clone());
            Ok(OrderResponse {
                order_id: 12345,
                symbol: request.symbol.clone(),
                side: request.side.to_string(),
                order_type: request.order_type.to_string(),
                status: "NEW".to_string(),
                executed_qty: "0".to_string(),
                client_order_id: String::new(),
                price: String::new(),
                avg_price: String::new(),
                orig_qty: String::new(),
                time_in_force: String::new(),
                stop_price: String::new(),
            })
        }
    }

    #[test]
    fn place_order_passes_mapped_request_through_unchanged() {
        let api = RecordingApi { seen: RefCell::new(None) };
        let intent = stop_limit_intent();
        let order = place_order(&api, &intent).unwrap();
        assert_eq!(order.order_id, 12345);
        assert_eq!(api.seen.borrow().as_ref().unwrap(), &build_order_request(&intent));
    }
}
