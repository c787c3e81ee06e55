use metrics_exporter_prometheus::PrometheusHandle;
use panama_advisory::advisory::projection::{Currency, InvestmentKind};
use panama_advisory::intake::{
    ConsultationAlert, LeadId, LeadRecord, LeadRepository, LeadStatus, NotificationPublisher,
    NotifyError, RepositoryError,
};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryLeadRepository {
    records: Arc<Mutex<HashMap<LeadId, LeadRecord>>>,
}

impl LeadRepository for InMemoryLeadRepository {
    fn insert(&self, record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.profile.lead_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.profile.lead_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: LeadRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.profile.lead_id) {
            guard.insert(record.profile.lead_id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn pending(&self, _limit: usize) -> Result<Vec<LeadRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| record.status == LeadStatus::Received)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryNotifier {
    events: Arc<Mutex<Vec<ConsultationAlert>>>,
}

impl NotificationPublisher for InMemoryNotifier {
    fn publish(&self, notification: ConsultationAlert) -> Result<(), NotifyError> {
        let mut guard = self.events.lock().expect("notifier mutex poisoned");
        guard.push(notification);
        Ok(())
    }
}

impl InMemoryNotifier {
    pub(crate) fn events(&self) -> Vec<ConsultationAlert> {
        self.events.lock().expect("notifier mutex poisoned").clone()
    }
}

pub(crate) fn parse_investment_kind(raw: &str) -> Result<InvestmentKind, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "residency" => Ok(InvestmentKind::Residency),
        "real-estate" | "real_estate" => Ok(InvestmentKind::RealEstate),
        "medical" => Ok(InvestmentKind::Medical),
        "infrastructure" => Ok(InvestmentKind::Infrastructure),
        other => Err(format!(
            "unknown investment kind '{other}' (expected residency, real-estate, medical, or infrastructure)"
        )),
    }
}

pub(crate) fn parse_currency(raw: &str) -> Result<Currency, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "usd" => Ok(Currency::Usd),
        "cny" => Ok(Currency::Cny),
        other => Err(format!("unknown currency '{other}' (expected usd or cny)")),
    }
}
