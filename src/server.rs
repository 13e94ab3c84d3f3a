//! Gesedels HTTP Server
//!
//! Plaintext HTTP interface over the pair store, served by axum on tokio.
//! Store calls run on the blocking pool since redb transactions are synchronous.

use crate::{
    db,
    error::{GesedelsError, Result},
    response::{write_error, write_failure, write_http},
    store::{PairStore, Store},
};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    routing::get,
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::{net::TcpListener, sync::broadcast};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

/// Gesedels server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub db_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            db_path: PathBuf::from("./gesedels.db"),
        }
    }
}

/// Gesedels HTTP server
pub struct GesedelsServer {
    config: ServerConfig,
    store: Arc<dyn Store>,
    shutdown_tx: broadcast::Sender<()>,
}

impl GesedelsServer {
    /// Create a new server instance, opening the database at `config.db_path`
    pub fn new(config: ServerConfig) -> Result<Self> {
        info!("Opening database: {}", config.db_path.display());
        let store = PairStore::new(db::open(&config.db_path)?);
        Ok(Self::with_store(config, Arc::new(store)))
    }

    /// Create a server instance over an existing store
    pub fn with_store(config: ServerConfig, store: Arc<dyn Store>) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            config,
            store,
            shutdown_tx,
        }
    }

    /// Build the request router
    pub fn router(&self) -> Router {
        router(Arc::clone(&self.store))
    }

    /// Bind to the configured address and serve until shutdown
    pub async fn run(&self) -> Result<()> {
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        self.serve(listener).await
    }

    /// Serve requests on an already bound listener until shutdown
    pub async fn serve(&self, listener: TcpListener) -> Result<()> {
        info!("Gesedels server listening on {}", listener.local_addr()?);

        let mut shutdown_rx = self.shutdown_tx.subscribe();
        axum::serve(listener, self.router())
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
                info!("Shutdown signal received, stopping server...");
            })
            .await?;

        info!("Server stopped");
        Ok(())
    }

    /// Trigger graceful shutdown
    pub fn shutdown(&self) -> Result<()> {
        self.shutdown_tx.send(()).map_err(|_| {
            GesedelsError::Server("Failed to send shutdown signal".to_string())
        })?;
        Ok(())
    }
}

/// Build the request router over a store
pub fn router(store: Arc<dyn Store>) -> Router {
    Router::new()
        .route("/", get(get_index))
        .route(
            "/:user/:name",
            get(get_pair)
                .put(set_pair)
                .delete(delete_pair)
                .fallback(method_not_allowed),
        )
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

async fn get_index() -> Response {
    write_http(StatusCode::OK, "Hello.")
}

async fn not_found() -> Response {
    write_failure(StatusCode::NOT_FOUND, "no such endpoint")
}

async fn method_not_allowed() -> Response {
    write_failure(StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
}

async fn get_pair(
    State(store): State<Arc<dyn Store>>,
    Path((user, name)): Path<(String, String)>,
) -> Response {
    debug!("GET {}:{}", user, name);

    let result = {
        let (user, name) = (user.clone(), name.clone());
        run_blocking(move || store.get(&user, &name)).await
    };

    match result {
        Ok(Some(value)) => {
            // Stored values already end in exactly one newline.
            let value = value.strip_suffix('\n').unwrap_or(&value);
            write_http(StatusCode::OK, value)
        }
        Ok(None) => write_failure(
            StatusCode::NOT_FOUND,
            format_args!("pair {}:{} does not exist", user, name),
        ),
        Err(e) => store_failure("GET", &user, &name, e),
    }
}

async fn set_pair(
    State(store): State<Arc<dyn Store>>,
    Path((user, name)): Path<(String, String)>,
    body: Bytes,
) -> Response {
    debug!("PUT {}:{} ({} bytes)", user, name, body.len());

    let value = match String::from_utf8(body.to_vec()) {
        Ok(value) => value,
        Err(_) => return write_failure(StatusCode::BAD_REQUEST, "value is not valid UTF-8"),
    };

    let result = {
        let (user, name) = (user.clone(), name.clone());
        run_blocking(move || store.set(&user, &name, &value)).await
    };

    match result {
        Ok(()) => write_http(StatusCode::OK, format_args!("set {}:{}", user, name)),
        Err(e) => store_failure("PUT", &user, &name, e),
    }
}

async fn delete_pair(
    State(store): State<Arc<dyn Store>>,
    Path((user, name)): Path<(String, String)>,
) -> Response {
    debug!("DELETE {}:{}", user, name);

    let result = {
        let (user, name) = (user.clone(), name.clone());
        run_blocking(move || store.delete(&user, &name)).await
    };

    match result {
        Ok(()) => write_http(StatusCode::OK, format_args!("deleted {}:{}", user, name)),
        Err(e) => store_failure("DELETE", &user, &name, e),
    }
}

/// Run a store operation on the blocking thread pool
async fn run_blocking<T, F>(op: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(op).await?
}

fn store_failure(method: &str, user: &str, name: &str, err: GesedelsError) -> Response {
    error!("{} {}:{} failed: {}", method, user, name, err);
    write_error(StatusCode::INTERNAL_SERVER_ERROR, err)
}
