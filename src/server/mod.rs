//! HTTP service boundary for the reqline pipeline.
//!
//! One listener, one connection task per accepted socket, graceful shutdown
//! on SIGTERM / Ctrl-C: stop accepting, let in-flight requests drain, then
//! return from [`Server::serve`].

mod routes;

pub use routes::{MAX_BODY_BYTES, handle_reqline};

use std::net::SocketAddr;

use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::Result;
use crate::http::Client;

pub struct Server {
    listener: TcpListener,
    client: Client,
}

impl Server {
    /// Binds the listener immediately so the caller learns about a busy
    /// port before [`serve`](Server::serve) is spawned.
    pub async fn bind(addr: SocketAddr) -> Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            client: Client::new(),
        })
    }

    /// The bound address. Useful with port 0.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts connections until a shutdown signal arrives, then drains
    /// in-flight connections before returning.
    pub async fn serve(self) -> Result<()> {
        info!(addr = %self.listener.local_addr()?, "reqline service listening");

        // Tracks spawned connection tasks so shutdown can wait them out.
        let mut tasks = tokio::task::JoinSet::new();

        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                // Check shutdown before the accept arm so a signal stops new
                // connections even when more are queued.
                biased;

                () = &mut shutdown => {
                    info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                    break;
                }

                res = self.listener.accept() => {
                    let (stream, remote_addr) = match res {
                        Ok(accepted) => accepted,
                        Err(e) => {
                            error!("accept error: {e}");
                            continue;
                        }
                    };

                    let client = self.client.clone();
                    let io = TokioIo::new(stream);

                    tasks.spawn(async move {
                        let svc = service_fn(move |req| {
                            let client = client.clone();
                            async move {
                                Ok::<_, std::convert::Infallible>(
                                    routes::dispatch(client, req).await,
                                )
                            }
                        });

                        if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                            .serve_connection(io, svc)
                            .await
                        {
                            error!(peer = %remote_addr, "connection error: {e}");
                        }
                    });
                }

                // Reap finished tasks so the set does not grow unbounded.
                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        while tasks.join_next().await.is_some() {}

        info!("reqline service stopped");
        Ok(())
    }
}

/// Resolves on the first shutdown signal: SIGTERM or Ctrl-C on Unix,
/// Ctrl-C only elsewhere.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let sigterm = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = sigterm => {}
    }
}
