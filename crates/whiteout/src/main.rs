//! Whiteout CLI - make white and near-white image backgrounds transparent.
//!
//! Every matching image in a folder is decoded, its white-ish pixels get
//! alpha 0, and the result is saved as PNG next to the input or in a separate
//! output folder.
//!
//! # Usage
//!
//! ```bash
//! # Convert every png/jpg/jpeg/webp in ./logos, writing *_transparent.png beside them
//! whiteout ./logos
//!
//! # Recurse, mirror the folder layout into ./out, be more aggressive
//! whiteout ./scans -r -k -o ./out -t 220
//!
//! # Show the effective configuration
//! whiteout --show-config
//! ```

use clap::Parser;

mod cli;
mod logging;

/// Whiteout - make white/near-white backgrounds transparent across a folder of images.
#[derive(Parser, Debug)]
#[command(name = "whiteout")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Config file to use instead of the default location
    #[arg(long, env = "WHITEOUT_CONFIG", value_name = "FILE")]
    config: Option<std::path::PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    show_config: bool,

    #[command(flatten)]
    convert: cli::convert::ConvertArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so config problems go straight to stderr.
    let config = match &cli.config {
        Some(path) => whiteout_core::Config::load_from(path)?,
        None => match whiteout_core::Config::load() {
            Ok(config) => config,
            Err(e) => {
                eprintln!(
                    "Warning: Failed to load config: {e}\n  \
                     Using default configuration. Config file: {}",
                    whiteout_core::Config::default_path().display()
                );
                whiteout_core::Config::default()
            }
        },
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Whiteout v{}", whiteout_core::VERSION);

    if cli.show_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    cli::convert::execute(cli.convert, &config)
}
