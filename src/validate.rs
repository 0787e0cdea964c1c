use crate::defines::MIN_SYMBOL_LEN;
use crate::types::{BotError, CommandlineArgs, OrderIntent, OrderType, Side};

/// Validate and normalize a futures symbol (e.g. BTCUSDT).
pub fn validate_symbol(raw: &str) -> Result<String, BotError> {
    let symbol = raw.trim();
    if symbol.is_empty() {
        return Err(BotError::Validation("Symbol must not be empty.".to_string()));
    }
    let symbol = symbol.to_uppercase();
    // shallow sanity check only; the exchange does full validation
    if symbol.len() < MIN_SYMBOL_LEN {
        return Err(BotError::Validation(
            "Symbol looks invalid (too short). Example: BTCUSDT.".to_string(),
        ));
    }
    Ok(symbol)
}

/// Validate order side: BUY or SELL.
pub fn validate_side(raw: &str) -> Result<Side, BotError> {
    match raw.trim().to_uppercase().as_str() {
        "BUY" => Ok(Side::Buy),
        "SELL" => Ok(Side::Sell),
        _ => Err(BotError::Validation("Side must be BUY or SELL.".to_string())),
    }
}

/// Validate order type, folding in recognized aliases
/// (MKT, STOP-LIMIT, STOPLIMIT).
pub fn validate_order_type(raw: &str) -> Result<OrderType, BotError> {
    let t = raw.trim().to_uppercase();
    let t = match t.as_str() {
        "MKT" => "MARKET",
        "STOP-LIMIT" | "STOPLIMIT" => "STOP_LIMIT",
        other => other,
    };
    match t {
        "MARKET" => Ok(OrderType::Market),
        "LIMIT" => Ok(OrderType::Limit),
        "STOP_LIMIT" => Ok(OrderType::StopLimit),
        _ => Err(BotError::Validation(
            "Order type must be MARKET, LIMIT, or STOP_LIMIT.".to_string(),
        )),
    }
}

/// Validate that `raw` parses as a strictly positive float.
/// `field_name` is used verbatim in error messages.
pub fn validate_positive_float(raw: &str, field_name: &str) -> Result<f64, BotError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| BotError::Validation(format!("{} must be a number.", field_name)))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(BotError::Validation(format!(
            "{} must be greater than 0.",
            field_name
        )));
    }
    Ok(value)
}

/// Validate and normalize all order-related CLI arguments into an
/// `OrderIntent`. Rules apply in order; the first failure wins and no
/// partial result is produced.
pub fn validate_order(args: &CommandlineArgs) -> Result<OrderIntent, BotError> {
    let symbol = validate_symbol(&args.symbol)?;
    let side = validate_side(&args.side)?;
    let order_type = validate_order_type(&args.order_type)?;
    let quantity = validate_positive_float(&args.qty, "Quantity")?;

    let price = if order_type.requires_price() {
        match &args.price {
            Some(raw) => Some(validate_positive_float(raw, "Price")?),
            None => {
                return Err(BotError::Validation(
                    "Price is required for LIMIT and STOP_LIMIT orders.".to_string(),
                ))
            }
        }
    } else {
        None
    };

    let stop_price = if order_type.requires_stop_price() {
        match &args.stop_price {
            Some(raw) => Some(validate_positive_float(raw, "Stop price")?),
            None => {
                return Err(BotError::Validation(
                    "stop-price is required for STOP_LIMIT orders.".to_string(),
                ))
            }
        }
    } else {
        None
    };

    Ok(OrderIntent {
        symbol,
        side,
        order_type,
        quantity,
        price,
        stop_price,
    })
}
