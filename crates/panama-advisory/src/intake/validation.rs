use super::domain::{ConsultationRequest, LeadId, LeadProfile};

/// Validation errors raised by the intake guard.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeViolation {
    #[error("full name is required")]
    MissingFullName,
    #[error("'{found}' is not a usable e-mail address")]
    InvalidEmail { found: String },
    #[error("message is required")]
    EmptyMessage,
    #[error("'{found}' is not a usable phone number")]
    InvalidPhone { found: String },
}

/// Guard responsible for producing sanitized [`LeadProfile`] instances.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntakeGuard;

impl IntakeGuard {
    pub fn new() -> Self {
        Self
    }

    /// Convert an inbound form submission into a sanitized lead profile.
    pub fn profile_from_request(
        &self,
        request: ConsultationRequest,
    ) -> Result<LeadProfile, IntakeViolation> {
        let full_name = request.full_name.trim().to_string();
        if full_name.is_empty() {
            return Err(IntakeViolation::MissingFullName);
        }

        let email = request.email.trim().to_ascii_lowercase();
        if !plausible_email(&email) {
            return Err(IntakeViolation::InvalidEmail {
                found: request.email,
            });
        }

        let message = request.message.trim().to_string();
        if message.is_empty() {
            return Err(IntakeViolation::EmptyMessage);
        }

        let phone = match request.phone {
            Some(raw) => {
                let trimmed = raw.trim().to_string();
                if trimmed.is_empty() {
                    None
                } else if plausible_phone(&trimmed) {
                    Some(trimmed)
                } else {
                    return Err(IntakeViolation::InvalidPhone { found: raw });
                }
            }
            None => None,
        };

        Ok(LeadProfile {
            lead_id: LeadId("pending".to_string()),
            full_name,
            email,
            phone,
            preferred_language: request.preferred_language,
            interest: request.interest,
            message,
        })
    }
}

fn plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.starts_with('.')
        && domain
            .rsplit_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && tld.len() >= 2)
}

fn plausible_phone(phone: &str) -> bool {
    let digits: String = phone
        .chars()
        .filter(|ch| !matches!(ch, ' ' | '+' | '-' | '(' | ')'))
        .collect();
    (7..=15).contains(&digits.len()) && digits.chars().all(|ch| ch.is_ascii_digit())
}
