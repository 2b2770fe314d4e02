//! Request context threaded through every application handler.
//!
//! Handlers never read identity or correlation data from ambient state.
//! The HTTP layer builds a `RequestContext` from the authenticated user and
//! the request id, and passes it explicitly.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AuthenticatedUser, EmailAddress};

/// Caller identity and tracing context for a single request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated caller.
    pub caller: EmailAddress,

    /// Roles granted by the identity provider.
    #[serde(default)]
    pub roles: Vec<String>,

    /// Links log lines of one request. Taken from `x-request-id` when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,
}

impl RequestContext {
    /// Creates a context for the given caller.
    pub fn new(caller: EmailAddress) -> Self {
        Self {
            caller,
            roles: Vec::new(),
            correlation_id: None,
        }
    }

    /// Builds a context from a validated session.
    pub fn from_user(user: &AuthenticatedUser) -> Self {
        Self {
            caller: user.email.clone(),
            roles: user.roles.clone(),
            correlation_id: None,
        }
    }

    /// Builder: Add correlation ID for request tracing.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Returns the correlation ID, generating one if not set.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    /// Returns the correlation ID only if explicitly set.
    pub fn correlation_id_opt(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}
