mod config;
mod logging;
mod news;
mod ui;
mod util;

use anyhow::Result;
use console::Term;
use std::{env, io};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse a minimal CLI: optional --config <path>, -v
    let mut args = env::args().skip(1);
    let mut config_override: Option<String> = None;
    let mut verbose = false;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                if let Some(p) = args.next() {
                    config_override = Some(p);
                }
            }
            "-v" | "--verbose" => verbose = true,
            "-h" | "--help" => {
                print_help();
                return Ok(());
            }
            other => eprintln!("ignoring unknown argument: {}", other),
        }
    }

    logging::init(verbose);
    let cfg = config::load(config_override)?;
    let fetcher = news::HeadlineFetcher::new(&cfg)?;

    // Clear terminal at startup for a clean UI
    let _ = Term::stdout().clear_screen();
    news::run(&cfg, &fetcher, &mut ui::TermInput, &mut io::stdout()).await
}

fn print_help() {
    println!("top-stories");
    println!("Usage: top-stories [--config <path>] [-v|--verbose]");
    println!("  --config <path>  Path to a config.toml (api_key, base_url, header)");
    println!("  -v, --verbose    Debug logging on stderr (RUST_LOG overrides)");
    println!("The API key may also be given in the {} environment variable.", config::API_KEY_ENV);
}
