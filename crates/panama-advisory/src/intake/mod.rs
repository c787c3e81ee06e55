//! Consultation request intake: validation guard, lead repository and
//! notification traits, the composing service, and its HTTP router.

pub mod domain;
mod repository;
mod router;
mod service;
mod validation;

pub use domain::{
    ConsultationRequest, Language, LeadId, LeadProfile, LeadStatus, ServiceInterest,
};
pub use repository::{
    ConsultationAlert, LeadRecord, LeadRepository, LeadStatusView, NotificationPublisher,
    NotifyError, RepositoryError,
};
pub use router::intake_router;
pub use service::{ConsultationService, ConsultationServiceError};
pub use validation::{IntakeGuard, IntakeViolation};
