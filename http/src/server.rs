use crate::render::{HtmlViews, Renderer};
use crate::routes;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use vigil_core::metrics::{self, HeightEstimator, OffsetEstimator};
use vigil_core::view;
use vigil_core::{DashboardViewModel, NodeHandle, RawSnapshot};

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to bind dashboard listener: {0}")]
    Bind(#[from] std::io::Error),
    #[error("dashboard server already running")]
    AlreadyRunning,
    #[error("dashboard server not running")]
    NotRunning,
    #[error("shutdown deadline elapsed with requests still in flight")]
    ShutdownTimeout,
}

/// Everything a request handler needs, shared read-only across requests.
///
/// Holds no per-request state; each request reads and copies what it needs
/// through [`view_model`](Context::view_model).
pub struct Context {
    node: Arc<dyn NodeHandle>,
    renderer: Arc<dyn Renderer>,
    estimator: Arc<dyn HeightEstimator>,
    started_at: Instant,
}

impl Context {
    pub fn new(node: Arc<dyn NodeHandle>) -> Self {
        Self {
            node,
            renderer: Arc::new(HtmlViews),
            estimator: Arc::new(OffsetEstimator::default()),
            started_at: Instant::now(),
        }
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_estimator(mut self, estimator: Arc<dyn HeightEstimator>) -> Self {
        self.estimator = estimator;
        self
    }

    pub fn renderer(&self) -> &dyn Renderer {
        self.renderer.as_ref()
    }

    /// Runs the full read, derive, assemble pipeline once.
    ///
    /// Every call recomputes from the live node; nothing is cached between
    /// requests.
    pub async fn view_model(&self) -> DashboardViewModel {
        let snapshot = RawSnapshot::read(self.node.as_ref(), self.started_at).await;
        let derived = metrics::derive(self.node.as_ref(), &snapshot, self.estimator.as_ref()).await;
        view::assemble(&snapshot, &derived)
    }
}

struct Running {
    local_addr: SocketAddr,
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

/// Owns the dashboard listener lifecycle: stopped, running, stopped again.
pub struct DashboardServer {
    addr: SocketAddr,
    ctx: Arc<Context>,
    running: Option<Running>,
}

impl DashboardServer {
    pub fn new(addr: SocketAddr, ctx: Arc<Context>) -> Self {
        Self { addr, ctx, running: None }
    }

    /// Binds the listener and starts serving in a background task.
    ///
    /// Returns as soon as the listener is accepting; the only failure is
    /// the bind itself.
    pub async fn start(&mut self) -> Result<(), ServerError> {
        if self.running.is_some() {
            return Err(ServerError::AlreadyRunning);
        }

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        let app = routes::app(self.ctx.clone()).layer(TraceLayer::new_for_http());
        let (stop, stop_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let shutdown = async {
                // fires on shutdown() and on server drop alike
                let _ = stop_rx.await;
            };
            if let Err(e) = axum::serve(listener, app).with_graceful_shutdown(shutdown).await {
                error!("dashboard server error: {e}");
            }
        });

        info!("dashboard listening on {local_addr}");
        self.running = Some(Running { local_addr, stop, task });
        Ok(())
    }

    /// Address the listener actually bound, once running. Useful when the
    /// configured port was 0.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.running.as_ref().map(|r| r.local_addr)
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Stops accepting connections and waits up to `deadline` for in-flight
    /// requests to finish. Requests still open past the deadline are
    /// abandoned and [`ServerError::ShutdownTimeout`] is returned.
    pub async fn shutdown(&mut self, deadline: Duration) -> Result<(), ServerError> {
        let Some(running) = self.running.take() else {
            return Err(ServerError::NotRunning);
        };

        let _ = running.stop.send(());
        let mut task = running.task;
        match tokio::time::timeout(deadline, &mut task).await {
            Ok(join) => {
                if let Err(e) = join {
                    warn!("dashboard serve task ended abnormally: {e}");
                }
                info!("dashboard stopped");
                Ok(())
            }
            Err(_) => {
                task.abort();
                warn!("dashboard shutdown deadline elapsed, abandoning in-flight requests");
                Err(ServerError::ShutdownTimeout)
            }
        }
    }
}
