use crate::handle::{NodeHandle, P2pConfig, PeerRecord};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

/// Coarse node liveness as shown in the dashboard header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    Online,
    Syncing,
    Offline,
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NodeStatus::Online => "online",
            NodeStatus::Syncing => "syncing",
            NodeStatus::Offline => "offline",
        };
        write!(f, "{}", s)
    }
}

/// Heuristic network label derived from configuration flags.
///
/// Best effort only: the flags were not designed to carry network identity,
/// so real deployments can be mislabeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
    Localnet,
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Localnet => "localnet",
        };
        write!(f, "{}", s)
    }
}

/// Liveness from the two reactor flags. Not listening wins over syncing.
pub fn node_status(listening: bool, catching_up: bool) -> NodeStatus {
    if !listening {
        return NodeStatus::Offline;
    }
    if catching_up {
        return NodeStatus::Syncing;
    }
    NodeStatus::Online
}

/// Labels the network from P2P flags.
///
/// Later checks override earlier ones; the order is a compatibility
/// contract. In particular a non-strict address book always yields
/// `Localnet`, whatever the other flags say.
pub fn classify_network(p2p: &P2pConfig) -> Network {
    let mut network = Network::Mainnet;
    if p2p.test_dial_fail || p2p.test_fuzz {
        network = Network::Testnet;
    }
    if p2p.seed_mode {
        network = Network::Testnet;
    }
    if !p2p.addr_book_strict {
        network = Network::Localnet;
    }
    network
}

/// Point-in-time extraction of the node's observable state.
///
/// Assembled from independent accessor calls with no lock spanning them, so
/// fields can disagree by a few instants (peer count versus the materialized
/// peer list, height versus the stored blocks). Consumers treat it as one
/// moment anyway.
#[derive(Debug, Clone)]
pub struct RawSnapshot {
    pub node_id: String,
    pub status: NodeStatus,
    pub height: u64,
    /// P2P listen address lives at `p2p.laddr`.
    pub p2p: P2pConfig,
    pub rpc_laddr: String,
    pub grpc_laddr: String,
    pub peer_count: usize,
    pub mempool_size: usize,
    pub version: String,
    /// Fixed at server construction, shared by every snapshot of one server.
    pub started_at: Instant,
    pub peers: Vec<PeerRecord>,
}

impl RawSnapshot {
    /// Reads every dashboard input from the handle in one pass.
    ///
    /// Never fails: a field the node cannot answer comes back as its zero
    /// value and the rest of the snapshot is unaffected.
    pub async fn read(node: &dyn NodeHandle, started_at: Instant) -> Self {
        let listening = node.is_listening().await;
        let catching_up = node.catching_up().await;
        let config = node.config().await;

        Self {
            node_id: node.node_id().await,
            status: node_status(listening, catching_up),
            height: node.block_height().await,
            p2p: config.p2p,
            rpc_laddr: config.rpc_laddr,
            grpc_laddr: config.grpc_laddr,
            peer_count: node.peer_count().await,
            mempool_size: node.mempool_size().await,
            version: config.version,
            started_at,
            peers: node.peers().await,
        }
    }
}
