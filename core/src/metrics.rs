use crate::handle::{NodeHandle, PeerRecord};
use crate::snapshot::{Network, NodeStatus, RawSnapshot, classify_network};
use crate::view::{BlockSummary, PeerInfo};
use std::time::Duration;

/// How many recent blocks the dashboard shows.
pub const RECENT_BLOCKS_MAX: usize = 5;

/// Source of the highest known chain height.
///
/// The dashboard has no peer-height aggregation, so the production
/// implementation fabricates an estimate; anything smarter can be plugged
/// in here without touching the rest of the derivation.
pub trait HeightEstimator: Send + Sync {
    fn highest(&self, current: u64) -> u64;
}

/// Estimates the chain tip as the local height plus a fixed offset.
#[derive(Debug, Clone, Copy)]
pub struct OffsetEstimator {
    pub offset: u64,
}

impl Default for OffsetEstimator {
    fn default() -> Self {
        Self { offset: 100 }
    }
}

impl HeightEstimator for OffsetEstimator {
    fn highest(&self, current: u64) -> u64 {
        current.saturating_add(self.offset)
    }
}

/// Renders elapsed time with the largest applicable units, minutes last.
///
/// Below an hour this is minutes only, "0m" included; a zero-valued leading
/// unit is never emitted.
pub fn format_uptime(elapsed: Duration) -> String {
    let minutes = elapsed.as_secs() / 60;
    if minutes < 60 {
        return format!("{}m", minutes);
    }

    let hours = minutes / 60;
    let minutes = minutes % 60;

    if hours < 24 {
        return format!("{}h {}m", hours, minutes);
    }

    let days = hours / 24;
    let hours = hours % 24;

    format!("{}d {}h {}m", days, hours, minutes)
}

/// Integer percentage of the chain the node has replayed, floor-rounded
/// and clamped to [0, 100]. Zero unless the node is actually syncing at a
/// nonzero height.
pub fn sync_percentage(status: NodeStatus, height: u64, highest: u64) -> u8 {
    if status != NodeStatus::Syncing || height == 0 || highest == 0 {
        return 0;
    }
    let pct = height.saturating_mul(100) / highest;
    pct.min(100) as u8
}

/// Flattens peer records into display rows.
///
/// An unmeasured latency becomes 0 ms and a missing advertised address
/// becomes empty; one sparse peer never hides the others.
pub fn peer_rows(peers: &[PeerRecord]) -> Vec<PeerInfo> {
    peers
        .iter()
        .map(|peer| PeerInfo {
            id: peer.id.clone(),
            ip: peer.ip.to_string(),
            address: peer.advertised_addr.clone().unwrap_or_default(),
            latency_ms: peer.latency.map(|rtt| rtt.as_millis() as u64).unwrap_or(0),
        })
        .collect()
}

/// Collects up to `limit` block summaries walking down from `height`,
/// newest first.
///
/// A block the store cannot return is skipped but still consumes one step
/// of the walk, so at most `limit` loads happen per call whatever the
/// store looks like.
pub async fn recent_blocks(node: &dyn NodeHandle, height: u64, limit: usize) -> Vec<BlockSummary> {
    let mut blocks = Vec::with_capacity(limit);
    let floor = height.saturating_sub(limit as u64);
    let mut cursor = height;

    while cursor > 0 && cursor > floor {
        if let Some(meta) = node.block_meta(cursor).await {
            blocks.push(BlockSummary {
                height: cursor,
                hash: hex::encode(&meta.hash),
                time: meta.time.format("%Y-%m-%d %H:%M:%S").to_string(),
                tx_count: meta.tx_count,
            });
        }
        cursor -= 1;
    }

    blocks
}

/// Everything the assembler needs beyond the raw snapshot.
#[derive(Debug, Clone)]
pub struct Derived {
    pub uptime: String,
    pub sync_percentage: u8,
    pub network: Network,
    pub peers: Vec<PeerInfo>,
    pub blocks: Vec<BlockSummary>,
}

/// Computes every derived metric for one request.
///
/// Infallible: block gaps and sparse peers degrade inside the helpers,
/// never out of them.
pub async fn derive(
    node: &dyn NodeHandle,
    snapshot: &RawSnapshot,
    estimator: &dyn HeightEstimator,
) -> Derived {
    Derived {
        uptime: format_uptime(snapshot.started_at.elapsed()),
        sync_percentage: sync_percentage(
            snapshot.status,
            snapshot.height,
            estimator.highest(snapshot.height),
        ),
        network: classify_network(&snapshot.p2p),
        peers: peer_rows(&snapshot.peers),
        blocks: recent_blocks(node, snapshot.height, RECENT_BLOCKS_MAX).await,
    }
}
