use crate::defines::{ENV_API_KEY, ENV_API_SECRET};
use crate::types::{BotError, CommandlineArgs, Credentials, OrderResponse};

use std::time::Instant;

/// Initialize logging for the process. Uses `try_init` so calling this more
/// than once within a process is harmless. Level defaults to info and is
/// overridable via RUST_LOG.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .try_init();
}

/// Resolve API credentials from command line arguments, falling back to
/// environment variables. Missing either half is a fatal configuration
/// error; nothing touches the network before this check passes.
pub fn resolve_credentials(args: &CommandlineArgs) -> Result<Credentials, BotError> {
    let api_key = args
        .api_key
        .clone()
        .or_else(|| std::env::var(ENV_API_KEY).ok())
        .filter(|v| !v.is_empty());
    let api_secret = args
        .api_secret
        .clone()
        .or_else(|| std::env::var(ENV_API_SECRET).ok())
        .filter(|v| !v.is_empty());

    match (api_key, api_secret) {
        (Some(api_key), Some(api_secret)) => Ok(Credentials { api_key, api_secret }),
        _ => Err(BotError::MissingCredentials),
    }
}

pub fn measure_start(start: &mut Instant) {
    *start = Instant::now();
}

/// Returns elapsed milliseconds since `start`, logging it when `log_result`
/// is set.
pub fn measure_end(start: &Instant, log_result: bool) -> f64 {
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    if log_result {
        log::debug!("api call took {:.2}ms", elapsed_ms);
    }
    elapsed_ms
}

/// Print a clean order summary for the user.
pub fn print_order_summary(order: &OrderResponse) {
    println!("\n=== Order Summary ===");
    println!("Order ID         : {}", order.order_id);
    println!("Symbol           : {}", order.symbol);
    println!("Side             : {}", order.side);
    println!("Type             : {}", order.order_type);
    println!("Status           : {}", order.status);
    println!("Executed Quantity: {}", order.executed_qty);
    println!("=====================\n");
}
