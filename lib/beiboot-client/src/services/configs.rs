use http::StatusCode;

use super::VALIDATION_ERROR;
use crate::client::{ApiClient, CallHandle, CallPath, Payload};
use crate::models::UserHeaders;

/// The `/configs/` endpoints, scoped by the forwarded user identity.
#[derive(Debug, Clone, Copy)]
pub struct ConfigsApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn configs(&self) -> ConfigsApi<'_> {
        ConfigsApi { client: self }
    }
}

impl ConfigsApi<'_> {
    fn get(&self, path: CallPath, user: &UserHeaders) -> CallHandle<Payload> {
        self.client
            .get(path)
            .with_headers(user.to_call_headers())
            .with_error(StatusCode::UNPROCESSABLE_ENTITY, VALIDATION_ERROR)
            .send_payload()
    }

    /// `GET /configs/`: the cluster configurations visible to the user.
    pub fn list(&self, user: &UserHeaders) -> CallHandle<Payload> {
        self.get("/configs/".into(), user)
    }

    /// `GET /configs/default/refresh/`
    pub fn refresh_default(&self, user: &UserHeaders) -> CallHandle<Payload> {
        self.get("/configs/default/refresh/".into(), user)
    }

    /// `GET /configs/{config_name}/refresh/`: reloads one configuration.
    pub fn refresh(&self, config_name: &str, user: &UserHeaders) -> CallHandle<Payload> {
        let path = CallPath::from("/configs/{config_name}/refresh/")
            .add_param("config_name", config_name.to_string());
        self.get(path, user)
    }
}
