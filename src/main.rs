//! nextbus entry point: parses CLI and runs the one-shot fetch/report cycle.
//! The main function is intentionally thin and delegates to the runtime in `app`.

mod app;
mod arrivals;
mod cli;
mod fetch;
mod table;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();
    let config = cli::parse();
    if let Err(e) = app::run(config).await {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
