//! HTTP transport seam for the OpenAQ client.
//!
//! The client only needs authenticated GETs returning a status and a body,
//! so the transport is a small trait. `ReqwestTransport` (behind the `api`
//! feature) is the production implementation; tests script responses.

use crate::error::Result;
use std::future::Future;

/// Status code and raw body of one HTTP response.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// An authenticated HTTP GET.
pub trait Transport {
    /// Issue a GET against `url` with the `X-API-Key` header set to `api_key`.
    ///
    /// Returns `Err` only when no response was received at all; non-success
    /// statuses come back as a `TransportResponse`.
    fn get(&self, url: &str, api_key: &str) -> impl Future<Output = Result<TransportResponse>>;
}

#[cfg(feature = "api")]
pub use self::reqwest_transport::ReqwestTransport;

#[cfg(feature = "api")]
mod reqwest_transport {
    use super::{Transport, TransportResponse};
    use crate::error::Result;
    use reqwest::Client;

    /// `Transport` backed by a shared `reqwest::Client`.
    #[derive(Clone, Default)]
    pub struct ReqwestTransport {
        client: Client,
    }

    impl ReqwestTransport {
        pub fn new(client: Client) -> Self {
            Self { client }
        }
    }

    impl Transport for ReqwestTransport {
        async fn get(&self, url: &str, api_key: &str) -> Result<TransportResponse> {
            let response = self
                .client
                .get(url)
                .header("X-API-Key", api_key)
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(TransportResponse { status, body })
        }
    }
}
