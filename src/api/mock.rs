/*!
 * Mock validator for testing.
 *
 * - `MockValidator::responding(response)` - Always returns the given response
 * - `MockValidator::rejecting(status, body)` - Always fails with a remote rejection
 * - `MockValidator::unreachable()` - Always fails with a transport error
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::api::ComposeValidator;
use crate::errors::ClientError;
use crate::model::ValidationResponse;
use crate::request::ValidationRequest;

/// Behavior mode for the mock validator
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Succeeds with the given response
    Respond(ValidationResponse),
    /// Fails as if the service returned an error status
    Reject { status_code: u16, body: String },
    /// Fails as if no response was received
    Unreachable,
}

/// A request seen by the mock
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub organization: String,
    pub request: ValidationRequest,
}

/// Mock validator recording every call it receives
#[derive(Debug, Clone)]
pub struct MockValidator {
    behavior: MockBehavior,
    call_count: Arc<AtomicUsize>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockValidator {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(AtomicUsize::new(0)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn responding(response: ValidationResponse) -> Self {
        Self::new(MockBehavior::Respond(response))
    }

    pub fn rejecting(status_code: u16, body: impl Into<String>) -> Self {
        Self::new(MockBehavior::Reject {
            status_code,
            body: body.into(),
        })
    }

    pub fn unreachable() -> Self {
        Self::new(MockBehavior::Unreachable)
    }

    /// Number of calls made so far
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Calls made so far, oldest first
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ComposeValidator for MockValidator {
    async fn validate_compose(
        &self,
        organization: &str,
        request: &ValidationRequest,
    ) -> Result<ValidationResponse, ClientError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                organization: organization.to_string(),
                request: request.clone(),
            });
        }

        match &self.behavior {
            MockBehavior::Respond(response) => Ok(response.clone()),
            MockBehavior::Reject { status_code, body } => Err(ClientError::RemoteRejection {
                status_code: *status_code,
                body: body.clone(),
            }),
            MockBehavior::Unreachable => Err(ClientError::Transport(
                "error trying to connect: connection refused".to_string(),
            )),
        }
    }
}
