use clap::Parser;

/// Stop-arrivals endpoint queried when no URL argument is given.
pub const DEFAULT_URL: &str = "http://localhost:3000/stop/Parc%20du%20Bel-Air";

/// Immutable configuration used by the application runtime
#[derive(Debug, Clone)]
pub struct Config {
    pub url: String,
}

/// User-facing CLI arguments (kept private to the CLI layer)
#[derive(Parser, Debug)]
#[command(name = "nextbus", version, about = "Upcoming departures for a transit stop")]
struct Args {
    /// Stop-query URL returning a JSON array of arrivals
    #[arg(value_name = "URL")]
    url: Option<String>,
}

/// Parse CLI options into an application Config
pub fn parse() -> Config {
    let args = Args::parse();
    Config {
        url: args.url.unwrap_or_else(|| DEFAULT_URL.to_string()),
    }
}
