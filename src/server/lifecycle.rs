use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::{TcpListener, ToSocketAddrs};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::domain::ports::DestinationStore;
use crate::server::{router, AppState};
use crate::utils::error::{ApiError, Result};

/// A running server bound to a socket.
///
/// The socket is held from `start` until `stop` returns; dropping the handle
/// without stopping aborts the serve task.
pub struct ServerHandle {
    local_addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<std::io::Result<()>>>,
}

impl ServerHandle {
    /// Binds `addr` (port 0 picks a free port) and serves in the background.
    pub async fn start<A>(addr: A, store: Arc<dyn DestinationStore>) -> Result<Self>
    where
        A: ToSocketAddrs + std::fmt::Display,
    {
        let requested = addr.to_string();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ApiError::BindError {
                addr: requested,
                source,
            })?;
        let local_addr = listener.local_addr()?;
        tracing::info!("Successfully bound HTTP listener to {}", local_addr);

        let app = router(AppState::new(store));
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    // 發送端被丟棄時也視為關閉訊號
                    let _ = shutdown_rx.await;
                })
                .await
        });

        Ok(Self {
            local_addr,
            shutdown_tx: Some(shutdown_tx),
            task: Some(task),
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.local_addr)
    }

    /// Stops accepting connections, drains in-flight requests and waits for
    /// the serve task to finish.
    pub async fn stop(mut self) -> Result<()> {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }

        let Some(task) = self.task.take() else {
            return Ok(());
        };

        match task.await {
            Ok(Ok(())) => {
                tracing::info!("Server on {} stopped", self.local_addr);
                Ok(())
            }
            Ok(Err(e)) => Err(ApiError::ServerError {
                message: format!("serve loop failed: {}", e),
            }),
            Err(e) => Err(ApiError::ServerError {
                message: format!("serve task did not complete: {}", e),
            }),
        }
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
pub async fn wait_for_shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to register SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl-C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
