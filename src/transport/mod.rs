//! HTTP plumbing shared by both service clients.

mod http;
mod response;

pub(crate) use http::extract_error_message;
pub use http::{BaseService, BaseServiceBuilder};
pub use response::DetailedResponse;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}
