//! Trait definitions for LLM backends.

use async_trait::async_trait;
use tintoretto_core::{GenerateRequest, GenerateResponse};
use tintoretto_error::TintorettoResult;

/// Core trait that all text-generation backends must implement.
///
/// This provides the minimal interface the transposition engine needs:
/// synchronous (request/response) text generation plus identification of
/// the provider and model for run metadata.
#[async_trait]
pub trait TintorettoDriver: Send + Sync {
    /// Generate model output given a conversation request.
    async fn generate(&self, req: &GenerateRequest) -> TintorettoResult<GenerateResponse>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gemini-2.5-flash").
    fn model_name(&self) -> &str;
}
