use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Kubernetes distribution used to boot a cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BeibootProvider {
    /// [k3s](https://k3s.io), the only provider the operator ships with.
    K3s,
    /// A provider this client does not know about yet.
    #[serde(other)]
    Unknown,
}

/// Lifecycle state of a Beiboot cluster, as reported by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BeibootState {
    /// The cluster has been requested but not picked up yet.
    #[display("REQUESTED")]
    Requested,
    /// Kubernetes objects are being created.
    #[display("CREATING")]
    Creating,
    /// Objects exist, the workload is not scheduled yet.
    #[display("PENDING")]
    Pending,
    /// The server and nodes are running.
    #[display("RUNNING")]
    Running,
    /// The cluster accepts connections.
    #[display("READY")]
    Ready,
    /// The operator gave up on this cluster.
    #[display("ERROR")]
    Error,
    /// The cluster is being torn down.
    #[display("TERMINATING")]
    Terminating,
    /// A state this client does not know about yet.
    #[display("UNKNOWN")]
    #[serde(other)]
    Unknown,
}

impl BeibootState {
    /// Whether the cluster can be connected to.
    pub fn is_ready(self) -> bool {
        matches!(self, Self::Running | Self::Ready)
    }
}

/// Tunables of a cluster request.
///
/// Every field is optional: the server falls back to its configured defaults.
/// Resource maps are keyed by `requests` / `limits`, then by `cpu` / `memory`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeibootParameters {
    /// Kubernetes version, e.g. `1.26.0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k8s_version: Option<String>,
    /// Port mappings, e.g. `8080:80`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ports: Option<Vec<String>>,
    /// Number of agent nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<u32>,
    /// Maximum lifetime, e.g. `1h`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_lifetime: Option<String>,
    /// Maximum time without a connected session, e.g. `5m`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_session_timeout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_resources: Option<BTreeMap<String, BTreeMap<String, String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_resources: Option<BTreeMap<String, BTreeMap<String, String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_storage_requests: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_storage_requests: Option<String>,
}

/// Body of `POST /clusters/`.
///
/// ```rust
/// use beiboot_client::models::{BeibootParameters, BeibootProvider, BeibootRequest};
///
/// let request = BeibootRequest::new("demo")
///     .with_provider(BeibootProvider::K3s)
///     .with_parameters(BeibootParameters {
///         nodes: Some(2),
///         ..Default::default()
///     })
///     .with_label("team", "platform");
/// assert_eq!(request.name, "demo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeibootRequest {
    /// Cluster name, unique per user.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<BeibootProvider>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<BeibootParameters>,
    /// Free-form labels attached to the cluster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
}

impl BeibootRequest {
    /// Creates a request with server defaults for everything but the name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            provider: None,
            parameters: None,
            labels: None,
        }
    }

    pub fn with_provider(mut self, provider: BeibootProvider) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_parameters(mut self, parameters: BeibootParameters) -> Self {
        self.parameters = Some(parameters);
        self
    }

    /// Adds a label, replacing any previous value for the same key.
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Cluster summary returned by the `clusters` endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeibootResponse {
    pub name: String,
    /// Kubernetes namespace hosting the cluster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// `None` while the operator has not reported a state yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<BeibootState>,
}
