use vigil_core::{BlockSummary, DashboardViewModel, PeerInfo};

pub fn page(model: &DashboardViewModel) -> String {
    let node_id = esc(&model.node_id);
    let version = esc(&model.version);
    let status = model.status;
    let network = model.network;
    let uptime = &model.uptime;
    let current_height = model.current_height;
    let highest_block = model.highest_block;
    let peer_count = model.peer_count;
    let pending_tx_count = model.pending_tx_count;
    let sync_percentage = model.sync_percentage;
    let gas_price = model.gas_price;

    let p2p_addr = esc(&model.p2p_listen_addr);
    let rpc_addr = esc(&model.rpc_listen_addr);
    let grpc_addr = esc(&model.grpc_listen_addr);

    let consensus = esc(&model.config.consensus);
    let sync_mode = esc(&model.config.sync_mode);
    let features = esc(&model.config.features.join(", "));
    let p2p_port = esc(&model.config.p2p_port);
    let rpc_port = esc(&model.config.rpc_port);

    let peer_rows = format_peer_rows(&model.peers);
    let block_rows = format_block_rows(&model.latest_blocks);

    format!(
        r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{node_id} - Node Status</title>
    <style>
        * {{ margin: 0; padding: 0; box-sizing: border-box; }}
        body {{
            font-family: system-ui, -apple-system, sans-serif;
            background: #0f1419;
            color: #ffffff;
            line-height: 1.6;
        }}
        .container {{ max-width: 1200px; margin: 0 auto; padding: 20px; }}
        h1 {{ color: #00d4ff; margin-bottom: 10px; text-align: center; font-size: 2.2rem; }}
        .subtitle {{ text-align: center; color: #8e8e93; margin-bottom: 10px; }}

        .status-line {{ text-align: center; margin-bottom: 30px; }}
        .badge {{
            display: inline-block;
            padding: 4px 14px;
            border-radius: 12px;
            font-weight: 600;
            text-transform: uppercase;
            font-size: 0.85rem;
        }}
        .badge-online {{ background: #0c2f1f; color: #00ff88; }}
        .badge-syncing {{ background: #332200; color: #ff9900; }}
        .badge-offline {{ background: #331111; color: #ff4444; }}

        .cards-grid {{
            display: grid;
            grid-template-columns: repeat(4, 1fr);
            gap: 16px;
            margin-bottom: 24px;
        }}
        .card {{
            background: #1e1e1e;
            border-radius: 12px;
            padding: 18px;
            border: 1px solid #333;
        }}
        .card-title {{
            color: #8e8e93;
            font-size: 0.8rem;
            text-transform: uppercase;
            letter-spacing: 0.05em;
            margin-bottom: 6px;
        }}
        .card-value {{ color: #ffffff; font-size: 1.6rem; font-weight: 700; }}
        .card-value.accent {{ color: #00d4ff; }}
        .card-value.green {{ color: #00ff88; }}
        .card-value.orange {{ color: #ff9900; }}

        .sync-track {{
            background: #333;
            border-radius: 4px;
            height: 8px;
            margin-top: 8px;
            overflow: hidden;
        }}
        .sync-fill {{ background: #00d4ff; height: 100%; }}

        .panel {{
            background: #1e1e1e;
            border-radius: 12px;
            padding: 20px;
            border: 1px solid #333;
            margin-bottom: 24px;
        }}
        .panel-title {{
            color: #00d4ff;
            font-size: 1.1rem;
            font-weight: 600;
            margin-bottom: 14px;
        }}
        .kv-row {{
            display: flex;
            justify-content: space-between;
            padding: 6px 0;
            border-bottom: 1px solid #2a2a2a;
            font-size: 0.9rem;
        }}
        .kv-row:last-child {{ border-bottom: none; }}
        .kv-key {{ color: #8e8e93; }}
        .kv-value {{ font-family: monospace; }}

        table {{ width: 100%; border-collapse: collapse; }}
        th {{
            color: #8e8e93;
            text-align: left;
            font-size: 0.8rem;
            text-transform: uppercase;
            letter-spacing: 0.05em;
            padding: 8px;
            border-bottom: 1px solid #333;
        }}
        td {{
            padding: 8px;
            border-bottom: 1px solid #2a2a2a;
            font-size: 0.9rem;
            font-family: monospace;
        }}
        tr:last-child td {{ border-bottom: none; }}
        .empty {{ color: #666; text-align: center; padding: 16px; }}
        .hash {{ color: #00d4ff; word-break: break-all; }}

        @media (max-width: 1024px) {{
            .cards-grid {{ grid-template-columns: repeat(2, 1fr); }}
        }}
        @media (max-width: 768px) {{
            .container {{ padding: 15px; }}
            .cards-grid {{ grid-template-columns: 1fr; }}
            h1 {{ font-size: 1.6rem; }}
        }}
    </style>
</head>
<body>
    <div class="container">
        <h1>🛰️ {node_id}</h1>
        <p class="subtitle">v{version} · {network}</p>
        <div class="status-line">
            <span class="badge badge-{status}">{status}</span>
        </div>

        <div class="cards-grid">
            <div class="card">
                <div class="card-title">Current Height</div>
                <div class="card-value accent">{current_height}</div>
            </div>
            <div class="card">
                <div class="card-title">Highest Block</div>
                <div class="card-value">{highest_block}</div>
            </div>
            <div class="card">
                <div class="card-title">Peers</div>
                <div class="card-value orange">{peer_count}</div>
            </div>
            <div class="card">
                <div class="card-title">Pending Txs</div>
                <div class="card-value">{pending_tx_count}</div>
            </div>
            <div class="card">
                <div class="card-title">Sync Progress</div>
                <div class="card-value accent">{sync_percentage}%</div>
                <div class="sync-track"><div class="sync-fill" style="width: {sync_percentage}%"></div></div>
            </div>
            <div class="card">
                <div class="card-title">Uptime</div>
                <div class="card-value green">{uptime}</div>
            </div>
            <div class="card">
                <div class="card-title">Gas Price</div>
                <div class="card-value">{gas_price}</div>
            </div>
            <div class="card">
                <div class="card-title">Network</div>
                <div class="card-value green">{network}</div>
            </div>
        </div>

        <div class="panel">
            <div class="panel-title">Listen Addresses</div>
            <div class="kv-row"><span class="kv-key">P2P</span><span class="kv-value">{p2p_addr}</span></div>
            <div class="kv-row"><span class="kv-key">RPC</span><span class="kv-value">{rpc_addr}</span></div>
            <div class="kv-row"><span class="kv-key">gRPC</span><span class="kv-value">{grpc_addr}</span></div>
        </div>

        <div class="panel">
            <div class="panel-title">Node Configuration</div>
            <div class="kv-row"><span class="kv-key">Consensus</span><span class="kv-value">{consensus}</span></div>
            <div class="kv-row"><span class="kv-key">Sync Mode</span><span class="kv-value">{sync_mode}</span></div>
            <div class="kv-row"><span class="kv-key">Features</span><span class="kv-value">{features}</span></div>
            <div class="kv-row"><span class="kv-key">P2P Port</span><span class="kv-value">{p2p_port}</span></div>
            <div class="kv-row"><span class="kv-key">RPC Port</span><span class="kv-value">{rpc_port}</span></div>
        </div>

        <div class="panel">
            <div class="panel-title">Connected Peers</div>
            <table>
                <tr><th>ID</th><th>IP</th><th>Address</th><th>Latency</th></tr>
                {peer_rows}
            </table>
        </div>

        <div class="panel">
            <div class="panel-title">Latest Blocks</div>
            <table>
                <tr><th>Height</th><th>Hash</th><th>Time</th><th>Txs</th></tr>
                {block_rows}
            </table>
        </div>
    </div>
    <script>
        // Auto-refresh page every 5 seconds
        setInterval(() => {{
            location.reload();
        }}, 5000);
    </script>
</body>
</html>
"#
    )
}

fn format_peer_rows(peers: &[PeerInfo]) -> String {
    if peers.is_empty() {
        return r#"<tr><td colspan="4" class="empty">No peers connected</td></tr>"#.to_string();
    }

    let mut result = String::new();
    for peer in peers {
        result.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{} ms</td></tr>\n",
            esc(&peer.id),
            esc(&peer.ip),
            esc(&peer.address),
            peer.latency_ms
        ));
    }
    result
}

fn format_block_rows(blocks: &[BlockSummary]) -> String {
    if blocks.is_empty() {
        return r#"<tr><td colspan="4" class="empty">No blocks yet</td></tr>"#.to_string();
    }

    let mut result = String::new();
    for block in blocks {
        result.push_str(&format!(
            "<tr><td>{}</td><td class=\"hash\">{}</td><td>{}</td><td>{}</td></tr>\n",
            block.height,
            esc(&block.hash),
            esc(&block.time),
            block.tx_count
        ));
    }
    result
}

fn esc(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;").replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_core::{ConfigInfo, Network, NodeStatus};

    fn model() -> DashboardViewModel {
        DashboardViewModel {
            node_id: "view-node".to_string(),
            status: NodeStatus::Online,
            current_height: 100,
            highest_block: 100,
            p2p_listen_addr: "tcp://0.0.0.0:26656".to_string(),
            rpc_listen_addr: "tcp://127.0.0.1:26657".to_string(),
            grpc_listen_addr: "tcp://127.0.0.1:26658".to_string(),
            peer_count: 1,
            pending_tx_count: 2,
            version: "0.1.0".to_string(),
            sync_percentage: 0,
            network: Network::Mainnet,
            uptime: "3m".to_string(),
            gas_price: 1.5,
            peers: vec![PeerInfo {
                id: "peer-1".to_string(),
                ip: "10.0.0.1".to_string(),
                address: "10.0.0.1:26656".to_string(),
                latency_ms: 20,
            }],
            latest_blocks: vec![BlockSummary {
                height: 100,
                hash: "ab".repeat(32),
                time: "2024-05-01 12:00:00".to_string(),
                tx_count: 3,
            }],
            config: ConfigInfo {
                consensus: "Test".to_string(),
                sync_mode: "Test".to_string(),
                features: vec!["Webserver".to_string(), "Database".to_string()],
                p2p_port: "26656".to_string(),
                rpc_port: "26657".to_string(),
            },
        }
    }

    #[test]
    fn test_page_shows_node_data() {
        let html = page(&model());
        assert!(html.contains("view-node"));
        assert!(html.contains("badge-online"));
        assert!(html.contains("peer-1"));
        assert!(html.contains(&"ab".repeat(32)));
        assert!(html.contains("Webserver, Database"));
        assert!(html.contains("20 ms"));
    }

    #[test]
    fn test_page_empty_states() {
        let mut m = model();
        m.peers.clear();
        m.latest_blocks.clear();
        let html = page(&m);
        assert!(html.contains("No peers connected"));
        assert!(html.contains("No blocks yet"));
    }

    #[test]
    fn test_page_escapes_node_data() {
        let mut m = model();
        m.node_id = "<script>alert(1)</script>".to_string();
        m.peers[0].address = "addr\"onmouseover=\"x".to_string();
        let html = page(&m);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("addr&quot;onmouseover=&quot;x"));
    }

    #[test]
    fn test_esc() {
        assert_eq!(esc("a&b"), "a&amp;b");
        assert_eq!(esc("<i>"), "&lt;i&gt;");
        assert_eq!(esc("plain"), "plain");
    }
}
