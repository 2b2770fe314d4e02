//! Authentication types for the domain layer.
//!
//! These types represent an authenticated caller extracted from a bearer
//! token. They carry no provider dependencies; any token issuer can populate
//! them through the `SessionValidator` port.

use thiserror::Error;

use super::EmailAddress;

/// Authenticated user extracted from a validated token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Subject identifier assigned by the identity provider.
    pub subject: String,

    /// Email address; the identity reference used by cycles.
    pub email: EmailAddress,

    /// Display name if the token carried one.
    pub display_name: Option<String>,

    /// Roles granted by the identity provider.
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user without roles.
    pub fn new(
        subject: impl Into<String>,
        email: EmailAddress,
        display_name: Option<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            email,
            display_name,
            roles: Vec::new(),
        }
    }

    /// Builder: attach roles.
    pub fn with_roles(mut self, roles: Vec<String>) -> Self {
        self.roles = roles;
        self
    }

    /// Returns the user's display name, or email as fallback.
    pub fn display_name_or_email(&self) -> &str {
        self.display_name.as_deref().unwrap_or(self.email.as_str())
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired.
    #[error("Token expired")]
    TokenExpired,

    /// The token is valid but carries no usable email claim.
    #[error("Token has no usable email claim")]
    MissingEmail,

    /// The authentication service is unavailable (network, config, etc.).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the user should re-authenticate.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidToken | AuthError::TokenExpired | AuthError::MissingEmail
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(raw: &str) -> EmailAddress {
        EmailAddress::parse("email", raw).unwrap()
    }

    #[test]
    fn display_name_or_email_prefers_name() {
        let user = AuthenticatedUser::new("sub", email("a@x.com"), Some("Alice".to_string()));
        assert_eq!(user.display_name_or_email(), "Alice");
    }

    #[test]
    fn display_name_or_email_falls_back_to_email() {
        let user = AuthenticatedUser::new("sub", email("bob@x.com"), None);
        assert_eq!(user.display_name_or_email(), "bob@x.com");
    }

    #[test]
    fn auth_error_service_unavailable_displays_message() {
        let err = AuthError::service_unavailable("Connection refused");
        assert_eq!(format!("{}", err), "Auth service unavailable: Connection refused");
    }

    #[test]
    fn token_errors_require_reauthentication() {
        assert!(AuthError::InvalidToken.requires_reauthentication());
        assert!(AuthError::TokenExpired.requires_reauthentication());
        assert!(AuthError::MissingEmail.requires_reauthentication());
        assert!(!AuthError::service_unavailable("down").requires_reauthentication());
    }
}
