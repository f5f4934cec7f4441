pub mod config;
pub mod models;
pub mod render;
mod routes;
pub mod server;
mod views {
    pub mod dashboard;
}

pub use config::DashboardConfig;
pub use render::{HtmlViews, NODE_TEMPLATE, RenderError, Renderer};
pub use server::{Context, DashboardServer, ServerError};
