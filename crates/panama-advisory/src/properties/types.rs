use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One listing as served by the property engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: u64,
    pub name: String,
    pub property_type: String,
    pub location: String,
    pub price: f64,
    pub bedrooms: u32,
    pub bathrooms: f64,
    pub area: f64,
    pub year_built: u32,
    pub roi: f64,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// Cursor-paginated page in the engine's wire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyPage {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<Property>,
}

/// Query-string filters for list and search requests. Keys mirror the engine
/// parameters (`location`, `property_type`, `min_price`, `max_price`,
/// `bedrooms`); unknown keys pass through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyFilters {
    entries: BTreeMap<String, String>,
}

impl PropertyFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one filter; an empty value clears the key instead.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if value.trim().is_empty() {
            self.entries.remove(&key);
        } else {
            self.entries.insert(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl FromIterator<(String, String)> for PropertyFilters {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut filters = Self::new();
        for (key, value) in iter {
            filters.set(key, value);
        }
        filters
    }
}

/// Marker for the listings map view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPin {
    pub id: u64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub price: f64,
}

/// Aggregate figures for the portfolio overview page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketStats {
    pub total_listings: u64,
    pub average_price: f64,
    pub average_roi: f64,
}

/// Inquiry forwarded to the listing agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentInquiry {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Tour scheduling request for a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TourRequest {
    pub name: String,
    pub email: String,
    pub requested_date: NaiveDate,
}
