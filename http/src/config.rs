use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

/// Bind address for the dashboard listener.
///
/// The embedding process usually passes an explicit address; `from_env` is
/// for standalone runs and reads `DASHBOARD_IPV4` / `DASHBOARD_PORT`,
/// falling back to defaults on anything unset or unparsable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardConfig {
    pub ipv4: Ipv4Addr,
    pub port: u16,
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        let ipv4 = std::env::var("DASHBOARD_IPV4")
            .unwrap_or_else(|_| "0.0.0.0".to_string())
            .parse()
            .unwrap_or(Ipv4Addr::new(0, 0, 0, 0));
        let port =
            std::env::var("DASHBOARD_PORT").unwrap_or_else(|_| "8080".to_string()).parse().unwrap_or(8080);
        Self { ipv4, port }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::V4(SocketAddrV4::new(self.ipv4, self.port))
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self { ipv4: Ipv4Addr::new(0, 0, 0, 0), port: 8080 }
    }
}
