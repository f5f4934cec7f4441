use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::net::IpAddr;
use std::time::Duration;
use tokio::sync::RwLock;

/// One connected peer as reported by the node's peer table.
///
/// This is a value copy taken at read time, not a live view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerRecord {
    pub id: String,
    pub ip: IpAddr,
    /// Address the peer advertises for dialing, if it sent one.
    pub advertised_addr: Option<String>,
    /// Measured round trip, absent until the first ping completes.
    pub latency: Option<Duration>,
}

/// Header-level facts about one stored block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockMeta {
    pub hash: Vec<u8>,
    pub time: DateTime<Utc>,
    pub tx_count: usize,
}

/// P2P settings plus the flags the network classifier reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct P2pConfig {
    pub laddr: String,
    pub seed_mode: bool,
    pub addr_book_strict: bool,
    pub test_dial_fail: bool,
    pub test_fuzz: bool,
}

/// The slice of node configuration the dashboard reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeConfig {
    pub p2p: P2pConfig,
    pub rpc_laddr: String,
    pub grpc_laddr: String,
    pub version: String,
}

/// Read-only capability handle onto the running node.
///
/// Implementations are shared across request tasks and may be mutated
/// concurrently by the node itself; no accessor is synchronized with any
/// other, so two calls can observe different moments of the node's life.
/// Every accessor must return rather than block indefinitely.
#[async_trait::async_trait]
pub trait NodeHandle: Send + Sync {
    async fn node_id(&self) -> String;

    /// Whether the P2P transport currently accepts connections.
    async fn is_listening(&self) -> bool;

    /// Whether consensus is still replaying blocks to reach the chain tip.
    async fn catching_up(&self) -> bool;

    async fn block_height(&self) -> u64;

    /// Header data for the block at `height`, `None` if missing or pruned.
    async fn block_meta(&self, height: u64) -> Option<BlockMeta>;

    async fn peers(&self) -> Vec<PeerRecord>;

    async fn peer_count(&self) -> usize;

    /// Number of transactions waiting in the mempool.
    async fn mempool_size(&self) -> usize;

    async fn config(&self) -> NodeConfig;
}

/// In-memory node for tests and demos.
///
/// Not a real node: state only changes through the setters below.
pub struct MockNode {
    inner: RwLock<MockState>,
}

struct MockState {
    node_id: String,
    listening: bool,
    catching_up: bool,
    height: u64,
    blocks: HashMap<u64, BlockMeta>,
    peers: Vec<PeerRecord>,
    mempool_size: usize,
    config: NodeConfig,
}

impl MockNode {
    pub fn new() -> Self {
        let config = NodeConfig {
            p2p: P2pConfig {
                laddr: "tcp://0.0.0.0:26656".to_string(),
                seed_mode: false,
                addr_book_strict: true,
                test_dial_fail: false,
                test_fuzz: false,
            },
            rpc_laddr: "tcp://127.0.0.1:26657".to_string(),
            grpc_laddr: "tcp://127.0.0.1:26658".to_string(),
            version: "0.1.0".to_string(),
        };
        Self {
            inner: RwLock::new(MockState {
                node_id: "mocknode".to_string(),
                listening: true,
                catching_up: false,
                height: 0,
                blocks: HashMap::new(),
                peers: Vec::new(),
                mempool_size: 0,
                config,
            }),
        }
    }

    pub async fn set_node_id(&self, id: &str) {
        self.inner.write().await.node_id = id.to_string();
    }

    pub async fn set_listening(&self, listening: bool) {
        self.inner.write().await.listening = listening;
    }

    pub async fn set_catching_up(&self, catching_up: bool) {
        self.inner.write().await.catching_up = catching_up;
    }

    pub async fn set_height(&self, height: u64) {
        self.inner.write().await.height = height;
    }

    /// Stores a block without moving the height cursor.
    pub async fn insert_block(&self, height: u64, meta: BlockMeta) {
        self.inner.write().await.blocks.insert(height, meta);
    }

    /// Drops a stored block, leaving a gap in the history.
    pub async fn remove_block(&self, height: u64) {
        self.inner.write().await.blocks.remove(&height);
    }

    /// Appends a block on top of the current height and returns the new height.
    pub async fn commit_block(&self, hash: Vec<u8>, tx_count: usize) -> u64 {
        let mut state = self.inner.write().await;
        let height = state.height + 1;
        state.blocks.insert(height, BlockMeta { hash, time: Utc::now(), tx_count });
        state.height = height;
        height
    }

    pub async fn add_peer(&self, peer: PeerRecord) {
        self.inner.write().await.peers.push(peer);
    }

    pub async fn set_peers(&self, peers: Vec<PeerRecord>) {
        self.inner.write().await.peers = peers;
    }

    pub async fn set_mempool_size(&self, size: usize) {
        self.inner.write().await.mempool_size = size;
    }

    pub async fn set_config(&self, config: NodeConfig) {
        self.inner.write().await.config = config;
    }
}

impl Default for MockNode {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl NodeHandle for MockNode {
    async fn node_id(&self) -> String {
        self.inner.read().await.node_id.clone()
    }

    async fn is_listening(&self) -> bool {
        self.inner.read().await.listening
    }

    async fn catching_up(&self) -> bool {
        self.inner.read().await.catching_up
    }

    async fn block_height(&self) -> u64 {
        self.inner.read().await.height
    }

    async fn block_meta(&self, height: u64) -> Option<BlockMeta> {
        self.inner.read().await.blocks.get(&height).cloned()
    }

    async fn peers(&self) -> Vec<PeerRecord> {
        self.inner.read().await.peers.clone()
    }

    async fn peer_count(&self) -> usize {
        self.inner.read().await.peers.len()
    }

    async fn mempool_size(&self) -> usize {
        self.inner.read().await.mempool_size
    }

    async fn config(&self) -> NodeConfig {
        self.inner.read().await.config.clone()
    }
}
