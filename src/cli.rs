use crate::config::RestavoConfig;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "restavo",
    about = "Compare hotel prices, book stays and chat with a travel assistant",
    long_about = "Restavo is a terminal client for the Restavo booking backend. It compares simulated prices across booking sites, keeps your favorites and bookings in sync with the server, and relays questions to the travel assistant.",
    version
)]
pub struct Cli {
    /// Backend API root (overrides config files)
    #[arg(long, env = "RESTAVO_API_URL")]
    pub base_url: Option<String>,

    /// Extra config file applied after ~/.restavo/config.toml and ./.restavo/config.toml
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Send one message to the assistant and exit (if not provided, starts interactive REPL)
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// Print a price comparison for this city and exit
    #[arg(long, conflicts_with = "prompt")]
    pub search: Option<String>,

    #[arg(long)]
    pub min_rating: Option<f64>,

    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Command-line flags are the last config layer.
    pub fn apply_to(&self, config: &mut RestavoConfig) {
        if let Some(ref base_url) = self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(rating) = self.min_rating {
            config.default_min_rating = rating;
        }
    }
}
