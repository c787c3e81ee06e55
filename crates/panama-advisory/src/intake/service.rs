use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;

use super::domain::{ConsultationRequest, LeadId, LeadStatus};
use super::repository::{
    ConsultationAlert, LeadRecord, LeadRepository, NotificationPublisher, NotifyError,
    RepositoryError,
};
use super::validation::{IntakeGuard, IntakeViolation};

/// Service composing the intake guard, repository, and notification hook.
pub struct ConsultationService<R, N> {
    guard: IntakeGuard,
    repository: Arc<R>,
    notifier: Arc<N>,
}

static LEAD_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_lead_id() -> LeadId {
    let id = LEAD_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    LeadId(format!("lead-{id:06}"))
}

impl<R, N> ConsultationService<R, N>
where
    R: LeadRepository + 'static,
    N: NotificationPublisher + 'static,
{
    pub fn new(repository: Arc<R>, notifier: Arc<N>) -> Self {
        Self {
            guard: IntakeGuard::new(),
            repository,
            notifier,
        }
    }

    /// Validate and store a consultation request, then notify the advisory
    /// team. Returns the repository-backed record.
    pub fn submit(
        &self,
        request: ConsultationRequest,
    ) -> Result<LeadRecord, ConsultationServiceError> {
        let mut profile = self.guard.profile_from_request(request)?;
        let lead_id = next_lead_id();
        profile.lead_id = lead_id.clone();

        let record = LeadRecord {
            profile,
            status: LeadStatus::Received,
            received_at: Utc::now(),
        };

        let stored = self.repository.insert(record)?;

        let mut details = BTreeMap::new();
        details.insert(
            "interest".to_string(),
            stored.profile.interest.label().to_string(),
        );
        details.insert(
            "language".to_string(),
            stored.profile.preferred_language.label().to_string(),
        );
        self.notifier.publish(ConsultationAlert {
            template: "consultation_received".to_string(),
            lead_id,
            details,
        })?;

        Ok(stored)
    }

    /// Fetch a lead and current status for API responses.
    pub fn get(&self, lead_id: &LeadId) -> Result<LeadRecord, ConsultationServiceError> {
        let record = self
            .repository
            .fetch(lead_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Record that an advisor reached out to the lead.
    pub fn mark_contacted(&self, lead_id: &LeadId) -> Result<LeadRecord, ConsultationServiceError> {
        let mut record = self
            .repository
            .fetch(lead_id)?
            .ok_or(RepositoryError::NotFound)?;
        record.status = LeadStatus::Contacted;
        self.repository.update(record.clone())?;
        Ok(record)
    }
}

/// Error raised by the consultation service.
#[derive(Debug, thiserror::Error)]
pub enum ConsultationServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
}
