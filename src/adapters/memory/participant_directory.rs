//! In-memory participant directory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::cycle::Participant;
use crate::domain::foundation::{DomainError, EmailAddress};
use crate::ports::ParticipantDirectory;

#[derive(Debug, Clone, Default)]
pub struct InMemoryParticipantDirectory {
    participants: Arc<RwLock<HashMap<EmailAddress, Participant>>>,
}

impl InMemoryParticipantDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, participant: Participant) {
        self.participants
            .write()
            .await
            .insert(participant.email.clone(), participant);
    }
}

#[async_trait]
impl ParticipantDirectory for InMemoryParticipantDirectory {
    async fn find_by_emails(&self, emails: &[EmailAddress]) -> Result<Vec<Participant>, DomainError> {
        let participants = self.participants.read().await;
        Ok(emails
            .iter()
            .filter_map(|email| participants.get(email).cloned())
            .collect())
    }
}
