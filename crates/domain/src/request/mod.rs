//! Request editing types

mod auth;
mod definition;
mod headers;
mod method;
mod query;

pub use auth::{AuthConfig, AuthType, Credentials};
pub use definition::{RequestDefinition, RequestPatch};
pub use headers::Headers;
pub use method::HttpMethod;
pub use query::{QueryParam, QueryParams};
