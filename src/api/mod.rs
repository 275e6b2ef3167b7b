/*!
 * Client side of the compose validation API.
 *
 * - `compose`: HTTP client for the validation service
 * - `mock`: In-memory validator for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ClientError;
use crate::model::ValidationResponse;
use crate::request::ValidationRequest;

/// The single network boundary of the pipeline.
///
/// Implementations make exactly one attempt per call; there is no retry.
#[async_trait]
pub trait ComposeValidator: Send + Sync + Debug {
    /// Submit a compose document for validation and translation
    ///
    /// # Arguments
    /// * `organization` - Tenant the compose file is validated for
    /// * `request` - Canonical compose text and translation hints
    ///
    /// # Returns
    /// * `Result<ValidationResponse, ClientError>` - The decoded response or a classified failure
    async fn validate_compose(
        &self,
        organization: &str,
        request: &ValidationRequest,
    ) -> Result<ValidationResponse, ClientError>;
}

pub mod compose;
pub mod mock;

pub use compose::ComposeClient;
pub use mock::MockValidator;
