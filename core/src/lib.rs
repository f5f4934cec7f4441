pub mod handle;
pub mod metrics;
pub mod snapshot;
pub mod view;

pub use handle::{BlockMeta, MockNode, NodeConfig, NodeHandle, P2pConfig, PeerRecord};
pub use metrics::{Derived, HeightEstimator, OffsetEstimator};
pub use snapshot::{Network, NodeStatus, RawSnapshot};
pub use view::{BlockSummary, ConfigInfo, DashboardViewModel, PeerInfo};
