//! The I/O seam between the store and the network.
//!
//! The core never opens sockets. The host hands the store something that can
//! turn an [`HttpRequest`] into an [`HttpResponse`]; the CLI does this over
//! `ureq`, tests do it with scripted fakes.

use async_trait::async_trait;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes a single HTTP round trip.
///
/// Implementations must return non-2xx responses as `Ok`; status
/// interpretation belongs to `TodoClient`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}
