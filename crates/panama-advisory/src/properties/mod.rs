//! Access to the external property listing engine: wire types, the outbound
//! directory trait with its HTTP and in-memory sample implementations, and
//! the paginated feed consumed by listing views.

mod client;
mod feed;
mod router;
pub mod samples;
mod types;

pub use client::HttpPropertyDirectory;
pub use feed::{FeedSnapshot, LoadMoreOutcome, PropertyFeed};
pub use router::properties_router;
pub use samples::SampleDirectory;
pub use types::{
    AgentInquiry, MapPin, MarketStats, Property, PropertyFilters, PropertyPage, TourRequest,
};

/// Failure taxonomy for property data access. Rendered to a single
/// user-facing string at the feed boundary; no retries anywhere.
#[derive(Debug, thiserror::Error)]
pub enum PropertiesError {
    #[error("could not reach the property service: {0}")]
    Transport(String),
    #[error("property service answered {code}: {message}")]
    Status { code: u16, message: String },
    #[error("could not decode property data: {0}")]
    Decode(String),
}

impl PropertiesError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            PropertiesError::Status { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Outbound surface of the listing engine. Implemented by the ureq-backed
/// client and by the in-memory sample directory so feeds, routers, and tests
/// run against the same contract.
pub trait PropertyDirectory: Send + Sync {
    fn list(&self, filters: &PropertyFilters) -> Result<PropertyPage, PropertiesError>;

    /// Follow a `next`/`previous` cursor returned by an earlier page.
    fn page_at(&self, cursor: &str) -> Result<PropertyPage, PropertiesError>;

    fn detail(&self, property_id: u64) -> Result<Property, PropertiesError>;

    fn featured(&self) -> Result<Vec<Property>, PropertiesError>;

    fn search(
        &self,
        query: &str,
        filters: &PropertyFilters,
    ) -> Result<PropertyPage, PropertiesError>;

    fn similar(&self, property_id: u64) -> Result<Vec<Property>, PropertiesError>;

    fn investment_opportunities(&self) -> Result<Vec<Property>, PropertiesError>;

    fn map_data(&self) -> Result<Vec<MapPin>, PropertiesError>;

    fn stats(&self) -> Result<MarketStats, PropertiesError>;

    fn track_view(&self, property_id: u64) -> Result<(), PropertiesError>;

    fn favorite(&self, property_id: u64) -> Result<(), PropertiesError>;

    fn contact_agent(
        &self,
        property_id: u64,
        inquiry: &AgentInquiry,
    ) -> Result<(), PropertiesError>;

    fn schedule_tour(&self, property_id: u64, request: &TourRequest)
        -> Result<(), PropertiesError>;
}
