use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{
    AgentInquiry, MapPin, MarketStats, PropertiesError, Property, PropertyDirectory,
    PropertyFilters, PropertyPage, TourRequest,
};
use crate::config::PropertiesConfig;

/// ureq-backed client for the external property listing engine. Calls are
/// blocking; async handlers drive it through `tokio::task::spawn_blocking`.
pub struct HttpPropertyDirectory {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpPropertyDirectory {
    pub fn new(base_url: &str) -> Self {
        Self {
            agent: ureq::agent(),
            base_url: PropertiesConfig::normalize_base_url(base_url),
        }
    }

    pub fn from_config(config: &PropertiesConfig) -> Self {
        Self::new(&config.api_base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/properties{path}", self.base_url)
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        filters: &PropertyFilters,
        extra: &[(&str, &str)],
    ) -> Result<T, PropertiesError> {
        let mut request = self.agent.get(url);
        for (key, value) in extra {
            request = request.query(key, value);
        }
        for (key, value) in filters.iter() {
            request = request.query(key, value);
        }

        let response = request.call().map_err(map_call_error)?;
        response
            .into_json::<T>()
            .map_err(|err| PropertiesError::Decode(err.to_string()))
    }

    fn post_empty(&self, url: &str) -> Result<(), PropertiesError> {
        self.agent.post(url).call().map_err(map_call_error)?;
        Ok(())
    }

    fn post_json(&self, url: &str, body: &impl Serialize) -> Result<(), PropertiesError> {
        self.agent
            .post(url)
            .send_json(body)
            .map_err(map_call_error)?;
        Ok(())
    }
}

fn map_call_error(error: ureq::Error) -> PropertiesError {
    match error {
        ureq::Error::Status(code, response) => {
            let message = response
                .into_string()
                .unwrap_or_else(|_| "upstream error".to_string());
            PropertiesError::Status { code, message }
        }
        ureq::Error::Transport(transport) => PropertiesError::Transport(transport.to_string()),
    }
}

impl PropertyDirectory for HttpPropertyDirectory {
    fn list(&self, filters: &PropertyFilters) -> Result<PropertyPage, PropertiesError> {
        self.get_json(&self.endpoint("/"), filters, &[])
    }

    fn page_at(&self, cursor: &str) -> Result<PropertyPage, PropertiesError> {
        // Cursors from the engine are absolute URLs.
        self.get_json(cursor, &PropertyFilters::new(), &[])
    }

    fn detail(&self, property_id: u64) -> Result<Property, PropertiesError> {
        self.get_json(
            &self.endpoint(&format!("/{property_id}/")),
            &PropertyFilters::new(),
            &[],
        )
    }

    fn featured(&self) -> Result<Vec<Property>, PropertiesError> {
        self.get_json(&self.endpoint("/featured/"), &PropertyFilters::new(), &[])
    }

    fn search(
        &self,
        query: &str,
        filters: &PropertyFilters,
    ) -> Result<PropertyPage, PropertiesError> {
        self.get_json(&self.endpoint("/search/"), filters, &[("q", query)])
    }

    fn similar(&self, property_id: u64) -> Result<Vec<Property>, PropertiesError> {
        self.get_json(
            &self.endpoint(&format!("/{property_id}/similar/")),
            &PropertyFilters::new(),
            &[],
        )
    }

    fn investment_opportunities(&self) -> Result<Vec<Property>, PropertiesError> {
        self.get_json(
            &self.endpoint("/investment-opportunities/"),
            &PropertyFilters::new(),
            &[],
        )
    }

    fn map_data(&self) -> Result<Vec<MapPin>, PropertiesError> {
        self.get_json(&self.endpoint("/map-data/"), &PropertyFilters::new(), &[])
    }

    fn stats(&self) -> Result<MarketStats, PropertiesError> {
        self.get_json(&self.endpoint("/stats/"), &PropertyFilters::new(), &[])
    }

    fn track_view(&self, property_id: u64) -> Result<(), PropertiesError> {
        self.post_empty(&self.endpoint(&format!("/{property_id}/track-view/")))
    }

    fn favorite(&self, property_id: u64) -> Result<(), PropertiesError> {
        self.post_empty(&self.endpoint(&format!("/{property_id}/favorite/")))
    }

    fn contact_agent(
        &self,
        property_id: u64,
        inquiry: &AgentInquiry,
    ) -> Result<(), PropertiesError> {
        self.post_json(
            &self.endpoint(&format!("/{property_id}/contact-agent/")),
            inquiry,
        )
    }

    fn schedule_tour(
        &self,
        property_id: u64,
        request: &TourRequest,
    ) -> Result<(), PropertiesError> {
        self.post_json(
            &self.endpoint(&format!("/{property_id}/schedule-tour/")),
            request,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_builds_from_a_normalized_base() {
        let client = HttpPropertyDirectory::new("https://listings.example.com/properties/");
        assert_eq!(client.base_url(), "https://listings.example.com");
        assert_eq!(
            client.endpoint("/featured/"),
            "https://listings.example.com/properties/featured/"
        );
    }
}
