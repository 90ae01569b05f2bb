//! Trie proof inspector.
//!
//! ```shell
//! RUST_LOG=info cargo run --release -- state --account-address 0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045
//! ```
//! or
//! ```shell
//! cargo run --release -- storage --account-address <ADDR> --slot 0x0 --save proof.json
//! cargo run --release -- replay proof.json
//! ```

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use trie_proof_script::{cli::Args, commands};

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    // Setup the logger.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Parse the command line arguments.
    let args = Args::parse();

    match commands::run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
