use crate::views;
use vigil_core::DashboardViewModel;

/// Template name the root route renders.
pub const NODE_TEMPLATE: &str = "node";

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("unknown template {0:?}")]
    UnknownTemplate(String),
    #[error("template {template:?} failed: {reason}")]
    Failed { template: String, reason: String },
}

/// Turns a view model into a page body.
///
/// Rendering is pure string work; a failure here surfaces to the client as
/// a 500 with the error text, nothing else.
pub trait Renderer: Send + Sync {
    fn render(&self, template: &str, model: &DashboardViewModel) -> Result<String, RenderError>;
}

/// Production renderer backed by the built-in view functions.
pub struct HtmlViews;

impl Renderer for HtmlViews {
    fn render(&self, template: &str, model: &DashboardViewModel) -> Result<String, RenderError> {
        match template {
            NODE_TEMPLATE => Ok(views::dashboard::page(model)),
            other => Err(RenderError::UnknownTemplate(other.to_string())),
        }
    }
}
