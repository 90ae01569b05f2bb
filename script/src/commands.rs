use std::io::{self, Write};
use std::path::Path;

use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::providers::ProviderBuilder;
use anyhow::{anyhow, bail, Context};
use tracing::{error, info};
use trie_proof::{account_path, trace, walk, ProofSet};

use crate::bundle::{ProofBundle, TrieKind};
use crate::cli::{Args, Command};
use crate::render;
use crate::rpc;

/// Run the selected command. Returns whether the walk reached a value.
pub async fn run(args: Args) -> anyhow::Result<bool> {
    match &args.command {
        Command::State {
            account_address,
            save,
        } => state(&args, *account_address, save.as_deref()).await,
        Command::Storage {
            account_address,
            slot,
            save,
        } => storage(&args, *account_address, *slot, save.as_deref()).await,
        Command::Replay { file } => {
            let bundle = ProofBundle::load(file)?;
            info!(block = bundle.block, trie = ?bundle.trie, root = %bundle.root, "replaying bundle");
            inspect(&bundle, args.nodes)
        }
    }
}

async fn state(args: &Args, address: Address, save: Option<&Path>) -> anyhow::Result<bool> {
    let provider = ProviderBuilder::new().on_http(args.rpc_url.clone());
    let block = rpc::pin_block(&provider, args.block_height).await?;
    let response = rpc::fetch_proof(&provider, address, vec![], block.number).await?;

    let bundle = ProofBundle {
        block: block.number,
        trie: TrieKind::State,
        root: block.state_root,
        key: Bytes::copy_from_slice(address.as_slice()),
        proof: response.account_proof,
    };
    if let Some(path) = save {
        bundle.save(path)?;
        info!(path = %path.display(), "saved proof bundle");
    }
    inspect(&bundle, args.nodes)
}

async fn storage(
    args: &Args,
    address: Address,
    slot: U256,
    save: Option<&Path>,
) -> anyhow::Result<bool> {
    let provider = ProviderBuilder::new().on_http(args.rpc_url.clone());
    let block = rpc::pin_block(&provider, args.block_height).await?;
    let slot_key = B256::new(slot.to_be_bytes::<32>());
    let response = rpc::fetch_proof(&provider, address, vec![slot_key], block.number).await?;

    let storage_root = pin_storage_root(
        block.state_root,
        address,
        &response.account_proof,
        response.storage_hash,
    )?;
    info!(%storage_root, "pinned storage root");

    let storage_proof = response
        .storage_proof
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("no storage proof returned for slot {slot}"))?;

    let bundle = ProofBundle {
        block: block.number,
        trie: TrieKind::Storage,
        root: storage_root,
        key: Bytes::copy_from_slice(slot_key.as_slice()),
        proof: storage_proof.proof,
    };
    if let Some(path) = save {
        bundle.save(path)?;
        info!(path = %path.display(), "saved proof bundle");
    }
    inspect(&bundle, args.nodes)
}

/// Walk the account proof from `state_root` and return the storage root of the
/// account it proves. `storage_hash` is what the node reported and must agree.
fn pin_storage_root(
    state_root: B256,
    address: Address,
    account_proof: &[Bytes],
    storage_hash: B256,
) -> anyhow::Result<B256> {
    let account_set = ProofSet::build(account_proof).context("failed to decode account proof")?;
    let terminal = walk(&state_root.0, &account_path(address.as_slice()), &account_set)
        .context("account proof does not lead from the state root to the account")?;
    let account = terminal
        .value
        .as_account()
        .ok_or_else(|| anyhow!("account leaf does not decode as an account"))?;

    let storage_root = B256::new(account.storage_root);
    if storage_root != storage_hash {
        bail!(
            "storage root {storage_root} proven by the account proof does not match reported storageHash {storage_hash}"
        );
    }
    Ok(storage_root)
}

/// Build the proof set, walk it and render the result to stdout.
fn inspect(bundle: &ProofBundle, show_nodes: bool) -> anyhow::Result<bool> {
    let proof_set = bundle.proof_set().context("failed to decode proof")?;
    let target = bundle.target_path()?;
    info!(
        blobs = bundle.proof.len(),
        nodes = proof_set.len(),
        "built proof set"
    );

    let mut out = io::stdout().lock();
    if show_nodes {
        render::proof_nodes(&mut out, &bundle.proof)?;
        writeln!(out)?;
    }

    let walked = trace(&bundle.root.0, &target, &proof_set);
    render::logical_path(&mut out, &target, &walked)?;
    out.flush()?;

    match &walked.outcome {
        Ok(_) => Ok(true),
        Err(err) => {
            error!(hops = walked.hops.len(), %err, "walk failed");
            Ok(false)
        }
    }
}
