use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Name of a tunable cluster parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClusterParameter {
    /// Kubernetes version, e.g. `1.26.0`.
    K8sVersion,
    /// Number of nodes.
    NodeCount,
    /// Maximum lifetime, e.g. `1h`.
    Lifetime,
    /// Maximum time without a connected session, e.g. `5m`.
    SessionTimeout,
}

/// A parameter carrying a string value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringParameter {
    pub name: ClusterParameter,
    pub value: Option<String>,
}

/// A parameter carrying an integer value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegerParameter {
    pub name: ClusterParameter,
    pub value: Option<i64>,
}

/// Either kind of cluster parameter, as found in [`ClusterRequest::parameters`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::From)]
#[serde(untagged)]
pub enum ClusterParameterValue {
    Integer(IntegerParameter),
    String(StringParameter),
}

impl ClusterParameterValue {
    /// Builds a string-valued parameter.
    pub fn string(name: ClusterParameter, value: impl Into<String>) -> Self {
        Self::String(StringParameter {
            name,
            value: Some(value.into()),
        })
    }

    /// Builds an integer-valued parameter.
    pub fn integer(name: ClusterParameter, value: i64) -> Self {
        Self::Integer(IntegerParameter {
            name,
            value: Some(value),
        })
    }

    /// The parameter name, whatever the value type.
    pub fn name(&self) -> ClusterParameter {
        match self {
            Self::Integer(param) => param.name,
            Self::String(param) => param.name,
        }
    }
}

/// Cluster request expressed as a list of named parameters.
///
/// This is the shape used by the parameter-based generation of the API; the
/// `clusters` service of this crate sends [`BeibootRequest`](super::BeibootRequest).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<ClusterParameterValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ports: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
}

impl ClusterRequest {
    /// Creates a request without parameters, ports, nor labels.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: None,
            ports: None,
            labels: None,
        }
    }

    /// Appends a parameter.
    pub fn with_parameter(mut self, parameter: impl Into<ClusterParameterValue>) -> Self {
        self.parameters
            .get_or_insert_with(Vec::new)
            .push(parameter.into());
        self
    }

    /// Appends a port mapping, e.g. `8080:80`.
    pub fn with_port(mut self, port: impl Into<String>) -> Self {
        self.ports.get_or_insert_with(Vec::new).push(port.into());
        self
    }
}
