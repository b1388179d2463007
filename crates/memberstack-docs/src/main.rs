mod catalog;
mod category;
mod config;
mod dispatch;
mod error;
mod markdown;
mod methods;
mod model;
mod resources;
mod search;
mod server;
mod source;

use std::sync::Arc;

use rmcp::{ServiceExt, transport::stdio};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::Config;
use dispatch::Dispatcher;
use server::MemberstackDocsServer;
use source::FsSource;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout is reserved for MCP JSON-RPC
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting memberstack-docs MCP server");

    let config = Config::from_env()?;
    info!(
        docs_path = %config.docs_path,
        tcp = config.tcp_listen_addr.is_some(),
        "configuration loaded"
    );

    let dispatcher = Dispatcher::new(Arc::new(FsSource::new(config.docs_path())));
    let catalog = dispatcher.catalog();
    if catalog.is_empty() {
        warn!(
            docs_path = %config.docs_path,
            "no documents found, requests will see an empty corpus until the directory is populated"
        );
    } else {
        info!(documents = catalog.len(), "corpus scanned");
    }

    let server = MemberstackDocsServer::new(dispatcher);

    if let Some(addr) = config.tcp_listen_addr.as_deref() {
        let listener = TcpListener::bind(addr).await?;
        info!(listen_addr = %addr, "MCP server ready, serving on TCP");
        loop {
            let (stream, peer) = listener.accept().await?;
            let server = server.clone();
            tokio::spawn(async move {
                info!(peer = %peer, "MCP client connected");
                let service = server.serve(stream).await.inspect_err(|e| {
                    tracing::error!(error = %e, "MCP server error");
                })?;
                service.waiting().await?;
                info!(peer = %peer, "MCP client disconnected");
                Ok::<(), anyhow::Error>(())
            });
        }
    } else {
        info!("MCP server ready, serving on stdio");
        let service = server.serve(stdio()).await.inspect_err(|e| {
            tracing::error!(error = %e, "MCP server error");
        })?;
        service.waiting().await?;
        info!("MCP server shut down");
    }
    Ok(())
}
