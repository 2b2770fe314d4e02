//! Participant directory port.
//!
//! Resolves participant emails to display details (name, job role, level).

use async_trait::async_trait;

use crate::domain::cycle::Participant;
use crate::domain::foundation::{DomainError, EmailAddress};

#[async_trait]
pub trait ParticipantDirectory: Send + Sync {
    /// Fetch details for the given emails.
    ///
    /// Unknown emails are simply absent from the result.
    async fn find_by_emails(&self, emails: &[EmailAddress]) -> Result<Vec<Participant>, DomainError>;
}
