use crate::metrics::Derived;
use crate::snapshot::{Network, NodeStatus, RawSnapshot};
use serde::Serialize;

/// Price shown in the economics row. Fixed until a real fee market feeds it.
pub const GAS_PRICE: f64 = 1.5;

const CONSENSUS_MODE: &str = "Test";
const SYNC_MODE: &str = "Test";
const FEATURES: [&str; 2] = ["Webserver", "Database"];

/// One row of the peer table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeerInfo {
    pub id: String,
    pub ip: String,
    pub address: String,
    pub latency_ms: u64,
}

/// One row of the latest-blocks table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockSummary {
    pub height: u64,
    pub hash: String,
    pub time: String,
    pub tx_count: usize,
}

/// Static node configuration block shown under the metric grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigInfo {
    pub consensus: String,
    pub sync_mode: String,
    pub features: Vec<String>,
    pub p2p_port: String,
    pub rpc_port: String,
}

/// Everything one page render needs, fully materialized.
///
/// Built fresh for every request and never shared between requests; the
/// render layer gets owned strings and vectors it can keep as long as it
/// likes.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardViewModel {
    pub node_id: String,
    pub status: NodeStatus,
    pub current_height: u64,
    /// Best-effort upper bound; equals `current_height` when unknown.
    pub highest_block: u64,
    pub p2p_listen_addr: String,
    pub rpc_listen_addr: String,
    pub grpc_listen_addr: String,
    pub peer_count: usize,
    pub pending_tx_count: usize,
    pub version: String,
    pub sync_percentage: u8,
    pub network: Network,
    pub uptime: String,
    pub gas_price: f64,
    pub peers: Vec<PeerInfo>,
    pub latest_blocks: Vec<BlockSummary>,
    pub config: ConfigInfo,
}

/// Text after the final `:` of a listen address, empty when there is none.
fn extract_port(addr: &str) -> String {
    match addr.rsplit_once(':') {
        Some((_, port)) => port.to_string(),
        None => String::new(),
    }
}

/// Combines snapshot and derived metrics into one view model.
///
/// Pure and infallible; every collection is copied out of its source so
/// the model stays stable however the node moves on.
pub fn assemble(snapshot: &RawSnapshot, derived: &Derived) -> DashboardViewModel {
    DashboardViewModel {
        node_id: snapshot.node_id.clone(),
        status: snapshot.status,
        current_height: snapshot.height,
        highest_block: snapshot.height,
        p2p_listen_addr: snapshot.p2p.laddr.clone(),
        rpc_listen_addr: snapshot.rpc_laddr.clone(),
        grpc_listen_addr: snapshot.grpc_laddr.clone(),
        peer_count: snapshot.peer_count,
        pending_tx_count: snapshot.mempool_size,
        version: snapshot.version.clone(),
        sync_percentage: derived.sync_percentage,
        network: derived.network,
        uptime: derived.uptime.clone(),
        gas_price: GAS_PRICE,
        peers: derived.peers.clone(),
        latest_blocks: derived.blocks.clone(),
        config: ConfigInfo {
            consensus: CONSENSUS_MODE.to_string(),
            sync_mode: SYNC_MODE.to_string(),
            features: FEATURES.iter().map(|f| f.to_string()).collect(),
            p2p_port: extract_port(&snapshot.p2p.laddr),
            rpc_port: extract_port(&snapshot.rpc_laddr),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::P2pConfig;
    use std::time::Instant;

    fn sample_snapshot() -> RawSnapshot {
        RawSnapshot {
            node_id: "node-a1".to_string(),
            status: NodeStatus::Online,
            height: 42,
            p2p: P2pConfig {
                laddr: "tcp://0.0.0.0:26656".to_string(),
                seed_mode: false,
                addr_book_strict: true,
                test_dial_fail: false,
                test_fuzz: false,
            },
            rpc_laddr: "tcp://127.0.0.1:26657".to_string(),
            grpc_laddr: "tcp://127.0.0.1:26658".to_string(),
            peer_count: 2,
            mempool_size: 9,
            version: "1.2.3".to_string(),
            started_at: Instant::now(),
            peers: Vec::new(),
        }
    }

    fn sample_derived() -> Derived {
        Derived {
            uptime: "1h 5m".to_string(),
            sync_percentage: 0,
            network: Network::Mainnet,
            peers: vec![PeerInfo {
                id: "p1".to_string(),
                ip: "10.0.0.1".to_string(),
                address: "10.0.0.1:26656".to_string(),
                latency_ms: 12,
            }],
            blocks: vec![BlockSummary {
                height: 42,
                hash: "ff".repeat(32),
                time: "2024-05-01 12:00:00".to_string(),
                tx_count: 7,
            }],
        }
    }

    #[test]
    fn test_extract_port() {
        assert_eq!(extract_port("tcp://0.0.0.0:26656"), "26656");
        assert_eq!(extract_port("127.0.0.1:8080"), "8080");
        assert_eq!(extract_port("[::1]:9090"), "9090");
        assert_eq!(extract_port("noport"), "");
        assert_eq!(extract_port(""), "");
        assert_eq!(extract_port("trailing:"), "");
    }

    #[test]
    fn test_assemble_maps_every_field() {
        let model = assemble(&sample_snapshot(), &sample_derived());

        assert_eq!(model.node_id, "node-a1");
        assert_eq!(model.status, NodeStatus::Online);
        assert_eq!(model.current_height, 42);
        assert_eq!(model.highest_block, 42);
        assert_eq!(model.p2p_listen_addr, "tcp://0.0.0.0:26656");
        assert_eq!(model.rpc_listen_addr, "tcp://127.0.0.1:26657");
        assert_eq!(model.grpc_listen_addr, "tcp://127.0.0.1:26658");
        assert_eq!(model.peer_count, 2);
        assert_eq!(model.pending_tx_count, 9);
        assert_eq!(model.version, "1.2.3");
        assert_eq!(model.network, Network::Mainnet);
        assert_eq!(model.uptime, "1h 5m");
        assert_eq!(model.gas_price, GAS_PRICE);
        assert_eq!(model.peers.len(), 1);
        assert_eq!(model.latest_blocks.len(), 1);
        assert_eq!(model.config.consensus, "Test");
        assert_eq!(model.config.sync_mode, "Test");
        assert_eq!(model.config.features, vec!["Webserver", "Database"]);
        assert_eq!(model.config.p2p_port, "26656");
        assert_eq!(model.config.rpc_port, "26657");
    }

    #[test]
    fn test_assemble_copies_collections() {
        let snapshot = sample_snapshot();
        let mut derived = sample_derived();
        let model = assemble(&snapshot, &derived);

        derived.peers.clear();
        derived.blocks[0].tx_count = 999;

        assert_eq!(model.peers.len(), 1);
        assert_eq!(model.latest_blocks[0].tx_count, 7);
    }

    #[test]
    fn test_view_model_serializes_lowercase_enums() {
        let model = assemble(&sample_snapshot(), &sample_derived());
        let json = serde_json::to_value(&model).unwrap();

        assert_eq!(json["status"], "online");
        assert_eq!(json["network"], "mainnet");
        assert_eq!(json["gas_price"], 1.5);
        assert_eq!(json["config"]["features"][0], "Webserver");
    }
}
