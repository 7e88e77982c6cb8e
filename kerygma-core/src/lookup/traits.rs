//! Generator trait for the external text-generation capability

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::GenerateError;

/// The external generative capability behind a lookup feature.
///
/// Implementations make one request per call and never retry; a failure is
/// reported once to the caller.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Structured result produced for a query
    type Output: Clone + Serialize + DeserializeOwned + Send + 'static;

    /// Produce a result for `query`
    async fn generate(&self, query: &str) -> Result<Self::Output, GenerateError>;
}
