use crate::render::NODE_TEMPLATE;
use crate::server::Context;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use std::sync::Arc;
use tracing::warn;

pub fn router(ctx: Arc<Context>) -> Router {
    // get() alone would also serve HEAD through the handler; the route is
    // GET only, every other method is method-not-allowed
    Router::new().route("/", get(index).head(method_not_allowed)).with_state(ctx)
}

async fn method_not_allowed() -> StatusCode {
    StatusCode::METHOD_NOT_ALLOWED
}

async fn index(State(ctx): State<Arc<Context>>) -> Response {
    let model = ctx.view_model().await;
    match ctx.renderer().render(NODE_TEMPLATE, &model) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            warn!("dashboard render failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
