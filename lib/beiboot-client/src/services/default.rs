use crate::client::{ApiClient, CallHandle, Payload};

/// The endpoints mounted at the root.
#[derive(Debug, Clone, Copy)]
pub struct DefaultApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn default_api(&self) -> DefaultApi<'_> {
        DefaultApi { client: self }
    }
}

impl DefaultApi<'_> {
    /// `GET /`
    pub fn root(&self) -> CallHandle<Payload> {
        self.client.get("/").send_payload()
    }

    /// `GET /sentry-debug/`: makes the server raise an error.
    pub fn trigger_error(&self) -> CallHandle<Payload> {
        self.client.get("/sentry-debug/").send_payload()
    }
}
