use anyhow::Result;
use clap::Parser;
use rand::Rng;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use vigil_core::{MockNode, NodeConfig, P2pConfig, PeerRecord};
use vigil_http::{Context, DashboardConfig, DashboardServer};

/// Serves the node dashboard over a simulated node that commits one block
/// per second.
#[derive(Parser)]
#[command(name = "vigil-demo")]
struct Args {
    /// Bind address; overrides DASHBOARD_IPV4 / DASHBOARD_PORT
    #[arg(long)]
    addr: Option<SocketAddr>,
    /// Start the simulated node mid-sync
    #[arg(long)]
    syncing: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))),
        )
        .init();

    let args = Args::parse();
    let addr = args.addr.unwrap_or_else(|| DashboardConfig::from_env().socket_addr());

    let node = Arc::new(MockNode::new());
    seed(&node, args.syncing).await;
    tokio::spawn(simulate(node.clone()));

    let ctx = Arc::new(Context::new(node));
    let mut server = DashboardServer::new(addr, ctx);
    server.start().await?;
    if let Some(local) = server.local_addr() {
        info!("dashboard ready at http://{local}/");
    }

    tokio::signal::ctrl_c().await?;
    info!("shutting down");
    server.shutdown(Duration::from_secs(5)).await?;
    Ok(())
}

async fn seed(node: &MockNode, syncing: bool) {
    node.set_node_id("vigil-demo-node").await;
    node.set_catching_up(syncing).await;
    node.set_config(NodeConfig {
        p2p: P2pConfig {
            laddr: "tcp://0.0.0.0:26656".to_string(),
            seed_mode: false,
            addr_book_strict: true,
            test_dial_fail: false,
            test_fuzz: false,
        },
        rpc_laddr: "tcp://127.0.0.1:26657".to_string(),
        grpc_laddr: "tcp://127.0.0.1:26658".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
    .await;

    for (i, octets) in [[10u8, 0, 0, 11], [10, 0, 0, 12], [10, 0, 0, 13]].iter().enumerate() {
        let ip = Ipv4Addr::new(octets[0], octets[1], octets[2], octets[3]);
        node.add_peer(PeerRecord {
            id: format!("peer-{}", i + 1),
            ip: IpAddr::V4(ip),
            advertised_addr: Some(format!("{ip}:26656")),
            latency: Some(Duration::from_millis(20 + 15 * i as u64)),
        })
        .await;
    }
}

async fn simulate(node: Arc<MockNode>) {
    let mut ticker = interval(Duration::from_secs(1));
    loop {
        ticker.tick().await;
        let (hash, txs, mempool, peers) = {
            let mut rng = rand::thread_rng();
            (
                rand::random::<[u8; 32]>().to_vec(),
                rng.gen_range(0..40),
                rng.gen_range(0..120),
                sample_peers(&mut rng),
            )
        };
        let height = node.commit_block(hash, txs).await;
        node.set_mempool_size(mempool).await;
        node.set_peers(peers).await;
        if height == 120 {
            // the mid-sync demo catches up after two minutes
            node.set_catching_up(false).await;
        }
        if height % 60 == 0 {
            info!("simulated chain at height {height}");
        }
    }
}

fn sample_peers(rng: &mut impl Rng) -> Vec<PeerRecord> {
    (0..rng.gen_range(2..=4u8))
        .map(|i| {
            let ip = Ipv4Addr::new(10, 0, 0, 11 + i);
            PeerRecord {
                id: format!("peer-{}", i + 1),
                ip: IpAddr::V4(ip),
                advertised_addr: Some(format!("{ip}:26656")),
                latency: Some(Duration::from_millis(rng.gen_range(5..80))),
            }
        })
        .collect()
}
