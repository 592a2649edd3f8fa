//! Server configuration and lifecycle.
//!
//! # Responsibility
//! - Hold listen/logging settings with production defaults.
//! - Bind the listener, build state and run until shutdown.
//!
//! # Invariants
//! - Logging is initialized by the caller before `serve` runs.
//! - Shutdown is graceful: in-flight requests finish before `serve` returns.

use crate::routes::create_router;
use crate::state::AppState;
use lazytodo_core::{default_log_level, RepoError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::future::Future;
use tokio::net::TcpListener;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    /// Absolute directory for rolling log files; `None` logs to stderr.
    pub log_dir: Option<String>,
    /// Start with the six sample todos.
    pub seed: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_level: default_log_level().to_string(),
            log_dir: None,
            seed: true,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug)]
pub enum ServerError {
    Bind {
        addr: String,
        source: std::io::Error,
    },
    Seed(RepoError),
    Serve(std::io::Error),
}

impl Display for ServerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bind { addr, source } => write!(f, "failed to bind `{addr}`: {source}"),
            Self::Seed(err) => write!(f, "failed to seed todo collection: {err}"),
            Self::Serve(err) => write!(f, "server error: {err}"),
        }
    }
}

impl Error for ServerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Bind { source, .. } => Some(source),
            Self::Seed(err) => Some(err),
            Self::Serve(err) => Some(err),
        }
    }
}

/// Binds `config.bind_addr()` and serves until Ctrl-C.
pub async fn serve(config: &ServerConfig) -> Result<(), ServerError> {
    let state = if config.seed {
        AppState::seeded().map_err(ServerError::Seed)?
    } else {
        AppState::empty()
    };

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await.map_err(|source| {
        error!("event=server_bind module=http status=error addr={addr} error={source}");
        ServerError::Bind {
            addr: addr.clone(),
            source,
        }
    })?;

    serve_with_listener(listener, state, shutdown_signal()).await
}

/// Serves `state` on an already bound listener until `shutdown` resolves.
pub async fn serve_with_listener(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ServerError> {
    let local_addr = listener
        .local_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|_| "unknown".to_string());
    let todo_count = state.todos.read().await.len();
    info!("event=server_start module=http status=ok addr={local_addr} todos={todo_count}");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ServerError::Serve)?;

    info!("event=server_stop module=http status=ok addr={local_addr}");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        // Without a signal handler the server keeps running until killed.
        error!("event=server_signal module=http status=error error={err}");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::{serve_with_listener, ServerConfig};
    use crate::state::AppState;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::sync::oneshot;

    #[test]
    fn default_config_binds_localhost_8000_with_seed() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr(), "127.0.0.1:8000");
        assert!(config.seed);
        assert!(config.log_dir.is_none());
    }

    #[tokio::test]
    async fn serves_over_tcp_until_shutdown() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let server = tokio::spawn(serve_with_listener(
            listener,
            AppState::empty(),
            async move {
                let _ = stop_rx.await;
            },
        ));

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /todos HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();

        assert!(response.starts_with("HTTP/1.1 200"), "{response}");
        assert!(response.ends_with("[]"), "{response}");

        stop_tx.send(()).unwrap();
        server.await.unwrap().unwrap();
    }
}
