//! Google Gemini API implementation.
//!
//! This module provides a client for the Google Gemini API with support for:
//! - Per-request model selection (different requests can use different models)
//! - Client pooling with lazy initialization (one client per model)
//! - Automatic retry with exponential backoff and jitter
//! - Thread-safe concurrent access
//!
//! # Architecture
//!
//! The [`GeminiClient`] maintains a pool of model-specific clients. When a
//! request specifies a model (via `GenerateRequest.model`), the client either
//! retrieves the existing client for that model or creates a new one
//! on-demand. This lets the bible-building and scene-generation calls of a
//! single run target different models when the caller asks for it.
//!
//! # Example
//!
//! ```no_run
//! use tintoretto_models::GeminiClient;
//! use tintoretto_core::{GenerateRequest, Message};
//! use tintoretto_interface::TintorettoDriver;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiClient::new()?;
//!
//! // Use the default model (gemini-2.5-flash)
//! let request1 = GenerateRequest::builder()
//!     .messages(vec![Message::user("Hello")])
//!     .build()?;
//! let response1 = client.generate(&request1).await?;
//!
//! // Override to use a different model
//! let request2 = GenerateRequest::builder()
//!     .messages(vec![Message::user("Complex task")])
//!     .model("gemini-2.5-pro")
//!     .build()?;
//! let response2 = client.generate(&request2).await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::env;
use std::sync::{Arc, Mutex};
use tokio_retry2::{Retry, RetryError, strategy::ExponentialBackoff, strategy::jitter};
use tracing::{debug, info, instrument, warn};

use gemini_rust::{Gemini, client::Model};

use tintoretto_core::{GenerateRequest, GenerateResponse, Role};
use tintoretto_error::{GeminiError, GeminiErrorKind, RetryableError, TintorettoResult};
use tintoretto_interface::TintorettoDriver;

use super::GeminiResult;

/// Default model when neither the client nor the request overrides it.
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Client for Google Gemini API with per-model client pooling.
///
/// This client maintains a cache of model-specific Gemini clients, created
/// lazily on first use for each model.
pub struct GeminiClient {
    /// Cache of model-specific REST API clients
    clients: Arc<Mutex<HashMap<String, Gemini>>>,
    /// API key for creating new clients
    api_key: String,
    /// Default model name when req.model is None
    model_name: String,
    /// Retry configuration
    no_retry: bool,
    max_retries: Option<usize>,
    retry_backoff_ms: Option<u64>,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let client_count = self.clients.lock().unwrap().len();
        f.debug_struct("GeminiClient")
            .field("model_name", &self.model_name)
            .field("cached_clients", &client_count)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Convert a model name string to a gemini-rust Model enum variant.
    ///
    /// Maps common model name strings to their corresponding Model enum variants.
    /// Uses Model::Custom for unrecognized model names, automatically adding the
    /// "models/" prefix required by the Gemini API.
    ///
    /// # Examples
    ///
    /// - "gemini-2.5-flash" → Model::Gemini25Flash
    /// - "gemini-2.0-flash" → Model::Custom("models/gemini-2.0-flash")
    /// - "models/gemini-2.0-flash" → Model::Custom("models/gemini-2.0-flash") (preserved)
    fn model_name_to_enum(name: &str) -> Model {
        match name {
            "gemini-2.5-flash" => Model::Gemini25Flash,
            "gemini-2.5-flash-lite" => Model::Gemini25FlashLite,
            "gemini-2.5-pro" => Model::Gemini25Pro,
            other => {
                // Add "models/" prefix if not already present
                if other.starts_with("models/") {
                    Model::Custom(other.to_string())
                } else {
                    Model::Custom(format!("models/{}", other))
                }
            }
        }
    }

    /// Create a new Gemini client with the default model.
    ///
    /// Reads the API key from the `GEMINI_API_KEY` environment variable.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use tintoretto_models::GeminiClient;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = GeminiClient::new()?;
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(name = "gemini_client_new")]
    pub fn new() -> TintorettoResult<Self> {
        Self::new_internal(DEFAULT_MODEL).map_err(Into::into)
    }

    /// Create a new Gemini client with a specific default model.
    ///
    /// Individual requests may still override the model via
    /// `GenerateRequest.model`.
    #[instrument(name = "gemini_client_new_with_model")]
    pub fn new_with_model(model_name: &str) -> TintorettoResult<Self> {
        Self::new_internal(model_name).map_err(Into::into)
    }

    /// Create a new Gemini client with retry configuration.
    ///
    /// # Arguments
    ///
    /// * `no_retry` - Disable automatic retry
    /// * `max_retries` - Override maximum retry attempts
    /// * `retry_backoff_ms` - Override initial backoff delay
    ///
    /// # Example
    ///
    /// ```no_run
    /// use tintoretto_models::GeminiClient;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// // Create client with retry disabled
    /// let client = GeminiClient::new_with_retry(true, None, None)?;
    ///
    /// // Create client with custom retry limits
    /// let client = GeminiClient::new_with_retry(false, Some(3), Some(1000))?;
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(name = "gemini_client_new_with_retry")]
    pub fn new_with_retry(
        no_retry: bool,
        max_retries: Option<usize>,
        retry_backoff_ms: Option<u64>,
    ) -> TintorettoResult<Self> {
        let mut client = Self::new_internal(DEFAULT_MODEL)?;
        client.no_retry = no_retry;
        client.max_retries = max_retries;
        client.retry_backoff_ms = retry_backoff_ms;
        Ok(client)
    }

    /// Internal constructor that returns Gemini-specific errors.
    fn new_internal(model_name: &str) -> GeminiResult<Self> {
        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| GeminiError::new(GeminiErrorKind::MissingApiKey))?;

        Ok(Self {
            clients: Arc::new(Mutex::new(HashMap::new())),
            api_key,
            model_name: model_name.to_string(),
            no_retry: false,
            max_retries: None,
            retry_backoff_ms: None,
        })
    }

    /// Get or create the SDK client for a model.
    fn client_for(&self, model_name: &str) -> GeminiResult<Gemini> {
        let mut clients = self.clients.lock().unwrap();
        if let Some(client) = clients.get(model_name) {
            return Ok(client.clone());
        }

        let model_enum = Self::model_name_to_enum(model_name);
        let client = Gemini::with_model(&self.api_key, model_enum)
            .map_err(|e| GeminiError::new(GeminiErrorKind::ClientCreation(e.to_string())))?;
        clients.insert(model_name.to_string(), client.clone());
        Ok(client)
    }

    /// Build and execute a single request against the SDK.
    ///
    /// The SDK builder is consumed by `execute`, so retries rebuild the
    /// request from scratch on every attempt.
    async fn execute_once(
        &self,
        client: &Gemini,
        req: &GenerateRequest,
    ) -> GeminiResult<GenerateResponse> {
        let mut builder = client.generate_content();
        let mut system_prompt = None;

        for msg in &req.messages {
            match msg.role {
                Role::System => {
                    // Gemini uses a separate system prompt
                    system_prompt = Some(msg.content.clone());
                }
                Role::User => {
                    builder = builder.with_user_message(&msg.content);
                }
                Role::Assistant => {
                    builder = builder.with_model_message(&msg.content);
                }
            }
        }

        if let Some(prompt) = system_prompt {
            builder = builder.with_system_prompt(&prompt);
        }

        if let Some(temp) = req.temperature {
            builder = builder.with_temperature(temp);
        }

        if let Some(max_tokens) = req.max_tokens {
            builder = builder.with_max_output_tokens(max_tokens as i32);
        }

        let response = builder.execute().await.map_err(Self::parse_gemini_error)?;

        let text = response.text();
        if text.trim().is_empty() {
            return Err(GeminiError::new(GeminiErrorKind::EmptyResponse(
                "candidate list was empty or contained no text".to_string(),
            )));
        }
        debug!(response_chars = text.len(), "Gemini response received");

        Ok(GenerateResponse { text })
    }

    /// Internal generate method that returns Gemini-specific errors.
    async fn generate_internal(&self, req: &GenerateRequest) -> GeminiResult<GenerateResponse> {
        // Determine which model to use
        let model_name = req.model.as_deref().unwrap_or(&self.model_name);
        let client = self.client_for(model_name)?;

        let prompt_chars: usize = req.messages.iter().map(|m| m.content.len()).sum();
        debug!(model = model_name, prompt_chars, "Dispatching Gemini request");

        // Check if retry is disabled
        if self.no_retry {
            return self.execute_once(&client, req).await;
        }

        // Try once to get an error-specific retry strategy
        let (initial_ms, max_retries, max_delay_secs) =
            match self.execute_once(&client, req).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    if !e.is_retryable() {
                        warn!(error = %e, "Permanent Gemini error, failing immediately");
                        return Err(e);
                    }

                    let (mut init_ms, mut retries, delay_secs) = e.retry_strategy_params();

                    // Apply caller overrides
                    if let Some(override_backoff) = self.retry_backoff_ms {
                        init_ms = override_backoff;
                    }
                    if let Some(override_retries) = self.max_retries {
                        retries = override_retries;
                    }

                    info!(
                        error = %e,
                        model = model_name,
                        initial_backoff_ms = init_ms,
                        max_retries = retries,
                        max_delay_secs = delay_secs,
                        "Gemini request failed, will retry with configured strategy"
                    );

                    (init_ms, retries, delay_secs)
                }
            };

        // Configure retry strategy
        let retry_strategy = ExponentialBackoff::from_millis(initial_ms)
            .factor(2)
            .max_delay(std::time::Duration::from_secs(max_delay_secs))
            .map(jitter)
            .take(max_retries);

        Retry::spawn(retry_strategy, || async {
            match self.execute_once(&client, req).await {
                Ok(response) => Ok(response),
                Err(e) => {
                    if e.is_retryable() {
                        warn!(error = %e, "Gemini request failed, will retry");
                        Err(RetryError::Transient {
                            err: e,
                            retry_after: None,
                        })
                    } else {
                        warn!(error = %e, "Permanent Gemini error, failing immediately");
                        Err(RetryError::Permanent(e))
                    }
                }
            }
        })
        .await
    }

    /// Parse gemini-rust errors to extract HTTP status codes.
    ///
    /// Converts generic API error strings into structured GeminiError
    /// with HTTP status codes when available.
    fn parse_gemini_error(err: impl std::fmt::Display) -> GeminiError {
        let err_msg = err.to_string();

        // Try to extract HTTP status code from error message
        // Example: "bad response from server; code 503; description: ..."
        if let Some(status_code) = Self::extract_status_code(&err_msg) {
            GeminiError::new(GeminiErrorKind::HttpError {
                status_code,
                message: err_msg,
            })
        } else {
            GeminiError::new(GeminiErrorKind::ApiRequest(err_msg))
        }
    }

    /// Extract HTTP status code from error message string.
    ///
    /// Parses strings like "bad response from server; code 503; description: ..."
    /// and extracts the numeric status code.
    fn extract_status_code(error_msg: &str) -> Option<u16> {
        if let Some(code_start) = error_msg.find("code ") {
            let code_str = &error_msg[code_start + 5..];
            let end = code_str
                .find(|c: char| !c.is_numeric())
                .unwrap_or(code_str.len());
            return code_str[..end].parse().ok();
        }
        None
    }
}

#[async_trait]
impl TintorettoDriver for GeminiClient {
    async fn generate(&self, req: &GenerateRequest) -> TintorettoResult<GenerateResponse> {
        self.generate_internal(req).await.map_err(Into::into)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    /// Returns the default model name used when `GenerateRequest.model` is None.
    ///
    /// Note: This returns the default model configured at client creation time.
    /// Individual requests may use different models by specifying `GenerateRequest.model`.
    fn model_name(&self) -> &str {
        &self.model_name
    }
}
