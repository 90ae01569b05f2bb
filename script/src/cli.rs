use std::path::PathBuf;

use alloy::primitives::{Address, U256};
use clap::{Parser, Subcommand};
use url::Url;

/// Walk Ethereum state and storage trie proofs from a pinned block root.
#[derive(Parser, Debug)]
#[command(name = "trieproof", author, version, about, long_about = None)]
pub struct Args {
    /// Archive node JSON-RPC endpoint.
    #[arg(long, env = "RPC_URL", default_value = "http://localhost:8545", global = true)]
    pub rpc_url: Url,

    /// Block to pin the state root to. Defaults to the latest block.
    #[arg(long, env = "BLOCK_HEIGHT", global = true)]
    pub block_height: Option<u64>,

    /// Also list every proof node with its digest.
    #[arg(long, global = true)]
    pub nodes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Walk the state trie to an account.
    State {
        #[arg(long)]
        account_address: Address,

        /// Write the fetched proof to a JSON bundle.
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Walk an account's storage trie to a slot.
    Storage {
        #[arg(long)]
        account_address: Address,

        /// Slot index, decimal or 0x-prefixed hex.
        #[arg(long, value_parser = parse_slot)]
        slot: U256,

        /// Write the fetched storage proof to a JSON bundle.
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Re-walk a saved proof bundle without touching the network.
    Replay { file: PathBuf },
}

fn parse_slot(src: &str) -> Result<U256, String> {
    let parsed = match src.strip_prefix("0x").or_else(|| src.strip_prefix("0X")) {
        Some(hex) => U256::from_str_radix(hex, 16),
        None => U256::from_str_radix(src, 10),
    };
    parsed.map_err(|err| format!("invalid storage slot {src}: {err}"))
}
