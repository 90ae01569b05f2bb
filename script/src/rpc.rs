//! Proof acquisition over JSON-RPC.

use alloy::primitives::{Address, B256};
use alloy::providers::Provider;
use alloy::rpc::types::{BlockId, BlockNumberOrTag, EIP1186AccountProofResponse};
use alloy::transports::Transport;
use anyhow::{anyhow, bail, Context};
use tracing::{debug, info};

/// A block whose state root the walk is pinned to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PinnedBlock {
    pub number: u64,
    pub state_root: B256,
}

/// Resolve `height` (or the latest block) and read its state root from the header.
pub async fn pin_block<T, P>(provider: &P, height: Option<u64>) -> anyhow::Result<PinnedBlock>
where
    T: Transport + Clone,
    P: Provider<T>,
{
    let latest = provider
        .get_block_number()
        .await
        .context("failed to get latest block number")?;
    let number = match height {
        Some(height) if height > latest => {
            bail!("block height {height} exceeds latest block {latest}")
        }
        Some(height) => height,
        None => latest,
    };

    let block = provider
        .get_block_by_number(BlockNumberOrTag::Number(number), false)
        .await
        .with_context(|| format!("failed to get block #{number}"))?
        .ok_or_else(|| anyhow!("block #{number} not found"))?;

    let pinned = PinnedBlock {
        number,
        state_root: block.header.state_root,
    };
    info!(block = pinned.number, state_root = %pinned.state_root, "pinned state root");
    Ok(pinned)
}

/// `eth_getProof` for `address` and `slots` at `block`.
pub async fn fetch_proof<T, P>(
    provider: &P,
    address: Address,
    slots: Vec<B256>,
    block: u64,
) -> anyhow::Result<EIP1186AccountProofResponse>
where
    T: Transport + Clone,
    P: Provider<T>,
{
    debug!(%address, slots = slots.len(), block, "requesting proof");
    let response = provider
        .get_proof(address, slots)
        .block_id(BlockId::Number(BlockNumberOrTag::Number(block)))
        .await
        .with_context(|| format!("failed to get proof for account {address} at block #{block}"))?;

    info!(
        %address,
        block,
        account_nodes = response.account_proof.len(),
        storage_proofs = response.storage_proof.len(),
        "fetched proof"
    );
    Ok(response)
}
