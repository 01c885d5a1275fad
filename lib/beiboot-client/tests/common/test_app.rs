#![allow(
    clippy::missing_errors_doc,
    dead_code,
    missing_docs,
    clippy::expect_used
)]
use std::net::SocketAddr;

use anyhow::Context;
use tokio::task::JoinHandle;
use tracing::info;

use beiboot_client::{ApiClient, ApiClientBuilder};

use super::stub_server::router;

/// A stub Beiboot server on a random local port, with a client pointing at it.
#[derive(Debug, derive_more::Deref)]
pub struct TestApp {
    #[deref]
    client: ApiClient,
    addr: SocketAddr,
    server: JoinHandle<()>,
}

impl TestApp {
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_with(|builder| builder).await
    }

    /// Starts the server, the client being configured by `configure`.
    pub async fn start_with(
        configure: impl FnOnce(ApiClientBuilder) -> ApiClientBuilder,
    ) -> anyhow::Result<Self> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .context("bind test listener")?;
        let addr = listener.local_addr()?;
        info!(%addr, "launching stub server");

        let server = tokio::spawn(async move {
            axum::serve(listener, router())
                .await
                .expect("stub server running");
        });

        let builder = ApiClient::builder()
            .with_port(addr.port())
            .with_base_path("/api")
            .context("valid base path")?;
        let client = configure(builder).build()?;

        Ok(Self {
            client,
            addr,
            server,
        })
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// A client builder for the stub server, without the defaults of [`Self::client`].
    pub fn builder(&self) -> anyhow::Result<ApiClientBuilder> {
        let builder = ApiClient::builder()
            .with_port(self.addr.port())
            .with_base_path("/api")
            .context("valid base path")?;
        Ok(builder)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.server.abort();
    }
}
