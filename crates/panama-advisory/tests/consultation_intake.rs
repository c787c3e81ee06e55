//! Integration specifications for consultation intake: validation, lead
//! storage, notification publication, and the HTTP router.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use panama_advisory::intake::{
        ConsultationAlert, ConsultationRequest, ConsultationService, Language, LeadId, LeadRecord,
        LeadRepository, NotificationPublisher, NotifyError, RepositoryError, ServiceInterest,
    };

    pub(super) fn request() -> ConsultationRequest {
        ConsultationRequest {
            full_name: "Mariana Solis".to_string(),
            email: "mariana.solis@example.com".to_string(),
            phone: Some("+507 6000-1234".to_string()),
            preferred_language: Language::En,
            interest: ServiceInterest::Residency,
            message: "Looking to relocate under the Qualified Investor Visa.".to_string(),
        }
    }

    #[derive(Default, Clone)]
    pub(super) struct MemoryRepository {
        records: Arc<Mutex<HashMap<LeadId, LeadRecord>>>,
    }

    impl LeadRepository for MemoryRepository {
        fn insert(&self, record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
            let mut guard = self.records.lock().expect("lock");
            if guard.contains_key(&record.profile.lead_id) {
                return Err(RepositoryError::Conflict);
            }
            guard.insert(record.profile.lead_id.clone(), record.clone());
            Ok(record)
        }

        fn update(&self, record: LeadRecord) -> Result<(), RepositoryError> {
            let mut guard = self.records.lock().expect("lock");
            guard.insert(record.profile.lead_id.clone(), record);
            Ok(())
        }

        fn fetch(&self, id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError> {
            let guard = self.records.lock().expect("lock");
            Ok(guard.get(id).cloned())
        }

        fn pending(&self, _limit: usize) -> Result<Vec<LeadRecord>, RepositoryError> {
            Ok(Vec::new())
        }
    }

    #[derive(Default, Clone)]
    pub(super) struct MemoryNotifier {
        events: Arc<Mutex<Vec<ConsultationAlert>>>,
    }

    impl MemoryNotifier {
        pub(super) fn events(&self) -> Vec<ConsultationAlert> {
            self.events.lock().expect("lock").clone()
        }
    }

    impl NotificationPublisher for MemoryNotifier {
        fn publish(&self, notification: ConsultationAlert) -> Result<(), NotifyError> {
            self.events.lock().expect("lock").push(notification);
            Ok(())
        }
    }

    pub(super) fn build_service() -> (
        ConsultationService<MemoryRepository, MemoryNotifier>,
        Arc<MemoryRepository>,
        Arc<MemoryNotifier>,
    ) {
        let repository = Arc::new(MemoryRepository::default());
        let notifier = Arc::new(MemoryNotifier::default());
        let service = ConsultationService::new(repository.clone(), notifier.clone());
        (service, repository, notifier)
    }
}

mod service {
    use super::common::*;
    use panama_advisory::intake::{ConsultationServiceError, LeadRepository, LeadStatus};

    #[test]
    fn valid_request_is_stored_and_notified() {
        let (service, repository, notifier) = build_service();
        let record = service.submit(request()).expect("submission succeeds");

        assert_eq!(record.status, LeadStatus::Received);
        assert!(record.profile.lead_id.0.starts_with("lead-"));

        let stored = repository
            .fetch(&record.profile.lead_id)
            .expect("repo fetch")
            .expect("record present");
        assert_eq!(stored.profile.email, "mariana.solis@example.com");

        let events = notifier.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].template, "consultation_received");
        assert_eq!(
            events[0].details.get("interest").map(String::as_str),
            Some("residency")
        );
    }

    #[test]
    fn invalid_email_is_an_intake_violation() {
        let (service, _, notifier) = build_service();
        let mut bad = request();
        bad.email = "not-an-email".to_string();

        match service.submit(bad) {
            Err(ConsultationServiceError::Intake(err)) => {
                assert!(err.to_string().contains("e-mail"));
            }
            other => panic!("expected intake violation, got {other:?}"),
        }
        assert!(notifier.events().is_empty());
    }

    #[test]
    fn contacted_leads_change_status() {
        let (service, _, _) = build_service();
        let record = service.submit(request()).expect("submission succeeds");
        let updated = service
            .mark_contacted(&record.profile.lead_id)
            .expect("status update");
        assert_eq!(updated.status, LeadStatus::Contacted);
    }
}

mod routing {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use panama_advisory::intake::{intake_router, ConsultationService};
    use tower::ServiceExt;

    fn build_router() -> axum::Router {
        let repository = Arc::new(MemoryRepository::default());
        let notifier = Arc::new(MemoryNotifier::default());
        let service = Arc::new(ConsultationService::new(repository, notifier));
        intake_router(service)
    }

    #[tokio::test]
    async fn post_consultations_returns_tracking_id() {
        let router = build_router();

        let http_request = Request::builder()
            .method("POST")
            .uri("/api/v1/consultations")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_vec(&request()).expect("serialize request"),
            ))
            .expect("request");

        let response = router
            .clone()
            .oneshot(http_request)
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload: Value = serde_json::from_slice(&body).expect("json");
        assert!(payload.get("lead_id").is_some());
        assert_eq!(
            payload.get("status").and_then(|status| status.as_str()),
            Some("received"),
        );
    }

    #[tokio::test]
    async fn blank_message_is_rejected_with_422() {
        let router = build_router();
        let mut bad = request();
        bad.message = "  ".to_string();

        let http_request = Request::builder()
            .method("POST")
            .uri("/api/v1/consultations")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&bad).expect("serialize")))
            .expect("request");

        let response = router
            .clone()
            .oneshot(http_request)
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn unknown_lead_answers_with_a_pending_view() {
        let router = build_router();
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/v1/consultations/lead-does-not-exist")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), 1024).await.expect("body");
        let payload: Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(payload.get("lead_id"), Some(&json!("lead-does-not-exist")));
        assert_eq!(payload.get("status"), Some(&json!("received")));
    }
}
