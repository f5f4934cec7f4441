use crate::server::Context;
use axum::Router;
use std::sync::Arc;

pub mod dashboard;

pub fn app(ctx: Arc<Context>) -> Router {
    Router::new().merge(dashboard::router(ctx))
}
