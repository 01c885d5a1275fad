use crate::client::{ApiClient, CallHandle, Payload};

/// The `/debug/` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct DebugApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn debug(&self) -> DebugApi<'_> {
        DebugApi { client: self }
    }
}

impl DebugApi<'_> {
    /// `GET /debug/headers`: echoes the request headers seen by the server.
    pub fn headers(&self) -> CallHandle<Payload> {
        self.client.get("/debug/headers").send_payload()
    }

    /// `GET /debug/sentry`: makes the server raise an error.
    pub fn trigger_error(&self) -> CallHandle<Payload> {
        self.client.get("/debug/sentry").send_payload()
    }
}
