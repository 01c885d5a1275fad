use http::StatusCode;

use super::VALIDATION_ERROR;
use crate::client::{ApiCall, ApiClient, CallHandle, CallPath, Payload};
use crate::models::{BeibootRequest, BeibootResponse};

/// `user-id` sent when none is given.
pub const DEFAULT_USER_ID: &str = "default";

const USER_ID: &str = "user-id";

/// The `/clusters/` endpoints.
///
/// Every method takes the optional `user-id` the clusters are scoped to,
/// [`DEFAULT_USER_ID`] being used when absent.
///
/// ```rust,no_run
/// use beiboot_client::ApiClient;
/// use beiboot_client::models::BeibootRequest;
///
/// # async fn example() -> Result<(), beiboot_client::ApiClientError> {
/// let client = ApiClient::builder().with_port(8080).build()?;
/// let clusters = client.clusters();
///
/// let created = clusters
///     .create(&BeibootRequest::new("demo"), Some("jane"))
///     .result()
///     .await?;
/// let state = clusters.state(&created.name, Some("jane")).result().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ClustersApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn clusters(&self) -> ClustersApi<'_> {
        ClustersApi { client: self }
    }
}

impl ClustersApi<'_> {
    fn call(&self, method: http::Method, path: CallPath, user_id: Option<&str>) -> ApiCall {
        self.client
            .call(method, path)
            .with_header(USER_ID, user_id.unwrap_or(DEFAULT_USER_ID).to_string())
            .with_error(StatusCode::UNPROCESSABLE_ENTITY, VALIDATION_ERROR)
    }

    /// `GET /clusters/`: the clusters of the user.
    pub fn list(&self, user_id: Option<&str>) -> CallHandle<Vec<BeibootResponse>> {
        self.call(http::Method::GET, "/clusters/".into(), user_id).send()
    }

    /// `POST /clusters/`: creates a cluster.
    pub fn create(
        &self,
        request: &BeibootRequest,
        user_id: Option<&str>,
    ) -> CallHandle<BeibootResponse> {
        match self
            .call(http::Method::POST, "/clusters/".into(), user_id)
            .json(request)
        {
            Ok(call) => call.send(),
            Err(error) => CallHandle::rejected(error),
        }
    }

    /// `DELETE /clusters/{name}`: deletes a cluster.
    pub fn delete(&self, name: &str, user_id: Option<&str>) -> CallHandle<BeibootResponse> {
        let path = CallPath::from("/clusters/{name}").add_param("name", name.to_string());
        self.call(http::Method::DELETE, path, user_id).send()
    }

    /// `GET /clusters/{name}/state`
    pub fn state(&self, name: &str, user_id: Option<&str>) -> CallHandle<BeibootResponse> {
        let path = CallPath::from("/clusters/{name}/state").add_param("name", name.to_string());
        self.call(http::Method::GET, path, user_id).send()
    }

    /// `GET /clusters/{name}/kubeconfig`: kubeconfig of a ready cluster.
    pub fn kubeconfig(&self, name: &str, user_id: Option<&str>) -> CallHandle<Payload> {
        let path =
            CallPath::from("/clusters/{name}/kubeconfig").add_param("name", name.to_string());
        self.call(http::Method::GET, path, user_id).send_payload()
    }

    /// `GET /clusters/{name}/mtls`: client certificates of the tunnel.
    pub fn mtls(&self, name: &str, user_id: Option<&str>) -> CallHandle<Payload> {
        let path = CallPath::from("/clusters/{name}/mtls").add_param("name", name.to_string());
        self.call(http::Method::GET, path, user_id).send_payload()
    }
}
