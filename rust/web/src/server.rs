use crate::handlers;
use crate::middleware::with_request_logging;
use crate::static_handler::StaticHandler;
use arcana_engine::SpreadRegistry;
use arcana_oracle::{create_narrator, AssetResolver, Oracle};
use std::convert::Infallible;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::info;
use warp::filters::BoxedFilter;
use warp::hyper::body::Bytes;
use warp::reply::{Reply, Response};
use warp::Filter;

/// Reading bodies are small; anything larger is rejected before parsing.
const MAX_BODY_BYTES: u64 = 16 * 1024;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    host: String,
    port: u16,
    assets_dir: PathBuf,
    narrator: String,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16, assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            host: host.into(),
            port,
            assets_dir: assets_dir.into(),
            narrator: "gemini".to_string(),
        }
    }

    pub fn with_narrator(mut self, narrator: impl Into<String>) -> Self {
        self.narrator = narrator.into();
        self
    }

    /// Ephemeral port and the offline narrator.
    pub fn for_tests() -> Self {
        let dir = std::env::temp_dir().join("arcana_web_assets");
        Self::new("127.0.0.1", 0, dir).with_narrator("template")
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    pub fn narrator(&self) -> &str {
        &self.narrator
    }
}

#[derive(Debug, Clone)]
pub struct AppContext {
    config: ServerConfig,
    oracle: Arc<Oracle>,
    static_handler: Arc<StaticHandler>,
}

impl AppContext {
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        let narrator = create_narrator(config.narrator())
            .map_err(|err| ServerError::ConfigError(err.to_string()))?;
        let oracle = Oracle::standard()
            .with_narrator(narrator)
            .with_assets(AssetResolver::new(config.assets_dir()));
        let static_handler = StaticHandler::new(config.assets_dir().to_path_buf());

        Ok(Self::new_with_dependencies(
            config,
            Arc::new(oracle),
            Arc::new(static_handler),
        ))
    }

    pub fn new_with_dependencies(
        config: ServerConfig,
        oracle: Arc<Oracle>,
        static_handler: Arc<StaticHandler>,
    ) -> Self {
        Self {
            config,
            oracle,
            static_handler,
        }
    }

    pub fn new_for_tests() -> Self {
        Self::new(ServerConfig::for_tests()).expect("test context")
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn oracle(&self) -> Arc<Oracle> {
        Arc::clone(&self.oracle)
    }

    pub fn static_handler(&self) -> Arc<StaticHandler> {
        Arc::clone(&self.static_handler)
    }
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

#[derive(Debug, Clone)]
pub struct WebServer {
    context: AppContext,
}

impl WebServer {
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        let context = AppContext::new(config)?;
        Ok(Self { context })
    }

    pub fn from_context(context: AppContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub async fn start(self) -> Result<ServerHandle, ServerError> {
        let WebServer { context } = self;
        let config = context.config().clone();
        let bind_addr = Self::bind_addr(&config)?;

        let preflight = if bind_addr.port() != 0 {
            Some(std::net::TcpListener::bind(bind_addr).map_err(ServerError::BindError)?)
        } else {
            None
        };
        drop(preflight);

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let routes = Self::routes(&context);
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
        };

        let (addr, server_future) = warp::serve(routes)
            .try_bind_with_graceful_shutdown(bind_addr, shutdown_signal)
            .map_err(Self::map_warp_error)?;

        info!(
            address = %addr,
            narrator = %config.narrator(),
            assets = %config.assets_dir().display(),
            "web server listening"
        );

        let task = tokio::spawn(async move {
            server_future.await;
            Ok(())
        });

        Ok(ServerHandle::new(addr, shutdown_tx, task, context))
    }

    fn bind_addr(config: &ServerConfig) -> Result<SocketAddr, ServerError> {
        let host = config.host();

        if let Ok(addr) = host.parse::<SocketAddr>() {
            return Ok(addr);
        }

        if let Ok(ip) = host.parse::<std::net::IpAddr>() {
            return Ok(SocketAddr::new(ip, config.port()));
        }

        let candidate = format!("{}:{}", host, config.port());
        let mut addrs = candidate.to_socket_addrs().map_err(|err| {
            ServerError::ConfigError(format!("failed to resolve address `{candidate}`: {err}"))
        })?;

        addrs.next().ok_or_else(|| {
            ServerError::ConfigError(format!("failed to resolve address `{candidate}`"))
        })
    }

    fn map_warp_error(err: warp::Error) -> ServerError {
        use std::error::Error as StdError;

        if let Some(source) = err.source() {
            if let Some(io_err) = source.downcast_ref::<std::io::Error>() {
                let recreated = std::io::Error::new(io_err.kind(), io_err.to_string());
                return ServerError::BindError(recreated);
            }
        }

        ServerError::ConfigError(err.to_string())
    }

    /// All routes, open to browser clients from any origin, wrapped in request
    /// logging.
    pub fn routes(context: &AppContext) -> BoxedFilter<(Response,)> {
        let health = Self::health_route();
        let api_routes = Self::api_routes(context);
        let asset_routes = Self::asset_routes(context);

        let cors = warp::cors()
            .allow_any_origin()
            .allow_methods(vec!["GET", "POST"])
            .allow_any_header();

        with_request_logging(
            health
                .or(api_routes)
                .unify()
                .or(asset_routes)
                .unify()
                .with(cors)
                .map(|reply| Reply::into_response(reply))
                .boxed(),
        )
        .boxed()
    }

    fn health_route() -> BoxedFilter<(Response,)> {
        warp::path("health")
            .and(warp::get())
            .and(warp::path::end())
            .map(|| handlers::health().into_response())
            .boxed()
    }

    fn api_routes(context: &AppContext) -> BoxedFilter<(Response,)> {
        let spreads = warp::path!("v1" / "spreads")
            .and(warp::get())
            .map(|| handlers::list_spreads(SpreadRegistry::standard()).into_response());

        let readings = warp::path!("v1" / "readings")
            .and(warp::post())
            .and(warp::body::content_length_limit(MAX_BODY_BYTES))
            .and(Self::with_oracle(context.oracle()))
            .and(warp::body::bytes())
            .and_then(|oracle: Arc<Oracle>, body: Bytes| async move {
                let response = handlers::create_reading(oracle, body).await;
                Ok::<_, Infallible>(response)
            });

        spreads.or(readings).unify().boxed()
    }

    fn asset_routes(context: &AppContext) -> BoxedFilter<(Response,)> {
        warp::path!("assets" / "cards" / ..)
            .and(warp::path::tail())
            .and(warp::get())
            .and(Self::with_static_handler(context.static_handler()))
            .and_then(
                |tail: warp::path::Tail, handler: Arc<StaticHandler>| async move {
                    let response = handler
                        .card_image(tail.as_str())
                        .await
                        .unwrap_or_else(|err| handler.error_response(err));
                    Ok::<_, Infallible>(response)
                },
            )
            .boxed()
    }

    fn with_oracle(
        oracle: Arc<Oracle>,
    ) -> impl Filter<Extract = (Arc<Oracle>,), Error = Infallible> + Clone {
        warp::any().map(move || Arc::clone(&oracle))
    }

    fn with_static_handler(
        handler: Arc<StaticHandler>,
    ) -> impl Filter<Extract = (Arc<StaticHandler>,), Error = Infallible> + Clone {
        warp::any().map(move || handler.clone())
    }
}

#[derive(Debug)]
pub struct ServerHandle {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<Result<(), ServerError>>>,
    context: AppContext,
}

impl ServerHandle {
    fn new(
        addr: SocketAddr,
        shutdown: oneshot::Sender<()>,
        task: JoinHandle<Result<(), ServerError>>,
        context: AppContext,
    ) -> Self {
        Self {
            addr,
            shutdown: Some(shutdown),
            task: Some(task),
            context,
        }
    }

    pub fn address(&self) -> SocketAddr {
        self.addr
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub async fn shutdown(mut self) -> Result<(), ServerError> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }

        if let Some(task) = self.task.take() {
            match task.await {
                Ok(result) => result?,
                Err(err) => {
                    return Err(ServerError::ConfigError(format!(
                        "server task join error: {err}"
                    )))
                }
            }
        }

        Ok(())
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }

        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
