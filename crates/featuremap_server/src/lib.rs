//! GraphQL server for the feature map store.
//!
//! Wires configuration, the store context, the GraphQL schema and the axum
//! router into a running service.

pub mod config;
pub mod graphql;
pub mod http;

use anyhow::Context as _;
use featuremap_core::{core_version, StoreContext};
use log::{error, info};
use std::sync::Arc;

pub use config::ServerConfig;
pub use graphql::{build_schema, FeatureSchema, MissingTargetPolicy};

/// Runs the server until a shutdown signal arrives.
///
/// A store that cannot be reached does not stop startup; requests that need
/// it fail individually.
pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let store = Arc::new(StoreContext::connect(config.database_url.as_deref()));
    let schema = build_schema(Arc::clone(&store), config.missing_target_policy());

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    let local_addr = listener.local_addr()?;
    info!(
        "event=server_ready module=server status=ok url=http://{local_addr}/ version={} store_connected={}",
        core_version(),
        store.is_connected()
    );

    axum::serve(listener, http::router(schema))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("event=server_stop module=server status=ok");
    if let Err(err) = store.close() {
        error!("event=store_close module=server status=error error={err}");
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("event=signal module=server status=error signal=ctrl_c error={err}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!("event=signal module=server status=error signal=terminate error={err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("event=shutdown module=server status=start");
}
