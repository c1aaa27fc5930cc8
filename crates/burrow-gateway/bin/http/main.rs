mod cli;

use crate::cli::{GeneratorArg, CLI};
use burrow_gateway::{App, AppState};
use burrow_generator::{Base58Generator, Base62Generator, Generator};
use burrow_storage::{LogStore, StoreSettings};
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "burrow=info,burrow_gateway=info,burrow_storage=info,tower_http=info".into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CLI::try_parse()?;

    info!(
        listen_addr = %config.listen_addr,
        store = %config.store.display(),
        queue_capacity = config.queue_capacity,
        sync = config.sync,
        generator = %config.generator,
        "starting burrow"
    );

    let generator: Box<dyn Generator> = match config.generator {
        GeneratorArg::Base62 => Box::new(Base62Generator),
        GeneratorArg::Base58 => Box::new(Base58Generator),
    };
    let settings = StoreSettings::builder()
        .path(config.store)
        .queue_capacity(config.queue_capacity)
        .sync(config.sync)
        .build();

    // Without a writable log there is no durability path: refuse to serve.
    let store = Arc::new(LogStore::open(settings, generator).await?);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(listener, App::router(AppState::new(store.clone())))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped, draining log writer");
    match Arc::try_unwrap(store) {
        Ok(store) => store.shutdown().await?,
        Err(store) => store.flush().await?,
    }
    info!("log drained");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
