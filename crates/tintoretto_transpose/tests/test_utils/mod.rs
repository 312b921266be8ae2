//! Test utilities for transposition tests.
//!
//! Provides a scripted driver so pipeline behavior can be tested without
//! real API calls.

#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tintoretto_core::{GenerateRequest, GenerateResponse};
use tintoretto_error::{GeminiError, GeminiErrorKind, TintorettoResult};
use tintoretto_interface::TintorettoDriver;

/// One scripted response in a sequence.
pub enum MockResponse {
    Success(String),
    Error(GeminiErrorKind),
}

enum MockBehavior {
    Success(String),
    Error(GeminiErrorKind),
    FailThenSucceed {
        failures: usize,
        kind: GeminiErrorKind,
        text: String,
    },
    Sequence(Vec<MockResponse>),
}

/// Scripted LLM driver that records every request it receives.
pub struct MockDriver {
    behavior: MockBehavior,
    calls: AtomicUsize,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl MockDriver {
    /// Always respond with the same text.
    pub fn new_success(text: &str) -> Self {
        Self::with_behavior(MockBehavior::Success(text.to_string()))
    }

    /// Always fail with the given error kind.
    pub fn new_error(kind: GeminiErrorKind) -> Self {
        Self::with_behavior(MockBehavior::Error(kind))
    }

    /// Fail `failures` times, then respond with `text`.
    pub fn new_fail_then_succeed(failures: usize, kind: GeminiErrorKind, text: &str) -> Self {
        Self::with_behavior(MockBehavior::FailThenSucceed {
            failures,
            kind,
            text: text.to_string(),
        })
    }

    /// Respond with the scripted sequence, one entry per call.
    pub fn new_sequence(responses: Vec<MockResponse>) -> Self {
        Self::with_behavior(MockBehavior::Sequence(responses))
    }

    fn with_behavior(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Number of generate calls received.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Snapshot of every request received, in call order.
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl TintorettoDriver for MockDriver {
    async fn generate(&self, req: &GenerateRequest) -> TintorettoResult<GenerateResponse> {
        let call_index = self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req.clone());

        match &self.behavior {
            MockBehavior::Success(text) => Ok(GenerateResponse { text: text.clone() }),
            MockBehavior::Error(kind) => Err(GeminiError::new(kind.clone()).into()),
            MockBehavior::FailThenSucceed {
                failures,
                kind,
                text,
            } => {
                if call_index < *failures {
                    Err(GeminiError::new(kind.clone()).into())
                } else {
                    Ok(GenerateResponse { text: text.clone() })
                }
            }
            MockBehavior::Sequence(responses) => {
                match responses.get(call_index) {
                    Some(MockResponse::Success(text)) => {
                        Ok(GenerateResponse { text: text.clone() })
                    }
                    Some(MockResponse::Error(kind)) => {
                        Err(GeminiError::new(kind.clone()).into())
                    }
                    None => Err(GeminiError::new(GeminiErrorKind::ApiRequest(
                        "mock sequence exhausted".to_string(),
                    ))
                    .into()),
                }
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
