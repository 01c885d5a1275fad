//! Request and response bodies of the Beiboot API.
//!
//! - [`BeibootRequest`] / [`BeibootResponse`] - cluster lifecycle payloads
//! - [`ClusterRequest`] - parameter-list flavour of a cluster request
//! - [`HttpValidationError`] - body of `422 Unprocessable Entity` responses
//! - [`UserHeaders`] - identity forwarded by the authenticating proxy

mod beiboot;
pub use self::beiboot::{
    BeibootParameters, BeibootProvider, BeibootRequest, BeibootResponse, BeibootState,
};

mod cluster;
pub use self::cluster::{ClusterParameter, ClusterParameterValue, ClusterRequest, IntegerParameter, StringParameter};

mod user;
pub use self::user::UserHeaders;

mod validation;
pub use self::validation::{HttpValidationError, LocationItem, ValidationError};
