use serde::{Deserialize, Serialize};

/// Identifier wrapper for consultation leads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeadId(pub String);

/// Site languages a prospect can ask to be contacted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Zh,
}

impl Language {
    pub const fn label(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Zh => "中文",
        }
    }
}

/// Advisory area the consultation is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceInterest {
    Residency,
    RealEstate,
    MedicalTourism,
    Infrastructure,
}

impl ServiceInterest {
    pub const fn label(self) -> &'static str {
        match self {
            ServiceInterest::Residency => "residency",
            ServiceInterest::RealEstate => "real_estate",
            ServiceInterest::MedicalTourism => "medical_tourism",
            ServiceInterest::Infrastructure => "infrastructure",
        }
    }
}

/// Raw consultation form submission as posted by the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultationRequest {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub preferred_language: Language,
    pub interest: ServiceInterest,
    pub message: String,
}

/// Sanitized lead after intake validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadProfile {
    pub lead_id: LeadId,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub preferred_language: Language,
    pub interest: ServiceInterest,
    pub message: String,
}

/// Follow-up status tracked for each lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeadStatus {
    Received,
    Contacted,
    Closed,
}

impl LeadStatus {
    pub const fn label(self) -> &'static str {
        match self {
            LeadStatus::Received => "received",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Closed => "closed",
        }
    }
}
