use http::StatusCode;

use super::VALIDATION_ERROR;
use crate::client::{ApiClient, CallHandle, CallPath, Payload};
use crate::models::UserHeaders;

/// The `/connections/` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionsApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn connections(&self) -> ConnectionsApi<'_> {
        ConnectionsApi { client: self }
    }
}

impl ConnectionsApi<'_> {
    /// `GET /connections/{cluster_name}/ghost-tunnel/`: the ghostunnel
    /// connection material of a cluster.
    pub fn ghost_tunnel(&self, cluster_name: &str, user: &UserHeaders) -> CallHandle<Payload> {
        let path = CallPath::from("/connections/{cluster_name}/ghost-tunnel/")
            .add_param("cluster_name", cluster_name.to_string());
        self.client
            .get(path)
            .with_headers(user.to_call_headers())
            .with_error(StatusCode::UNPROCESSABLE_ENTITY, VALIDATION_ERROR)
            .send_payload()
    }
}
