mod api;
mod defines;
mod impls;
mod types;
mod util;
mod validate;

use clap::Parser;
use types::*;
use util::*;

fn main() {
    init_logging();

    // report operator interrupts cleanly instead of dying mid-request with
    // no output
    if let Err(e) = ctrlc::set_handler(|| {
        println!("\nExecution interrupted by user.");
        std::process::exit(130);
    }) {
        log::warn!("could not install interrupt handler: {}", e);
    }

    let cmd_args = CommandlineArgs::parse();

    match run(&cmd_args) {
        Ok(order) => print_order_summary(&order),
        Err(e) => {
            log::error!("{}", e);
            println!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(cmd_args: &CommandlineArgs) -> Result<OrderResponse, BotError> {
    let intent = validate::validate_order(cmd_args)?;
    log::info!(
        "validated order params | symbol={} side={} type={} qty={}",
        intent.symbol,
        intent.side,
        intent.order_type,
        intent.quantity
    );

    // credentials are checked before anything touches the network
    let credentials = resolve_credentials(cmd_args)?;
    let exchange = api::BinanceFuturesApi::new(credentials);

    let mut start = std::time::Instant::now();
    measure_start(&mut start);
    let result = api::place_order(&exchange, &intent);
    measure_end(&start, true);

    result
}
