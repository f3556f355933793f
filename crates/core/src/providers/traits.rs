use async_trait::async_trait;

use crate::errors::CoreError;

/// One HTTP response: status plus raw body text. The body is only parsed
/// by callers that have already decided the status is acceptable.
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    /// Success range check, the `response.ok` equivalent.
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait abstraction over the HTTP transport.
///
/// The refresh pipeline only ever issues GETs against fully-built URLs,
/// so one method is enough. Tests substitute a scripted fake to exercise
/// the pipeline without a network.
#[async_trait]
pub trait HttpGateway: Send + Sync {
    /// Issue a GET. Transport failures are errors; non-2xx statuses are
    /// not (the caller decides whether a 500 is fatal or a skip).
    async fn get(&self, url: &str) -> Result<HttpReply, CoreError>;
}

/// Trait abstraction over the inter-request delay in the US fetch loop,
/// so tests can count pauses instead of sleeping through them.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pace(&self);
}
