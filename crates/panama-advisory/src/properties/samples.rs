//! Curated sample listings and an in-memory [`PropertyDirectory`] over them.
//!
//! The marketing team maintains the sample catalogue as a CSV export; it is
//! embedded so the comparison widget, the CLI demo, and the tests exercise
//! the full directory contract without the external engine.

use std::sync::Mutex;

use serde::Deserialize;

use super::{
    AgentInquiry, MapPin, MarketStats, PropertiesError, Property, PropertyDirectory,
    PropertyFilters, PropertyPage, TourRequest,
};

const SAMPLE_LISTINGS_CSV: &str = "\
id,name,property_type,location,price,bedrooms,bathrooms,area,year_built,roi,latitude,longitude,features
1,Ocean Reef Residences 8A,apartment,Punta Pacifica,450000,2,2.5,145,2019,6.5,8.9773,-79.5089,ocean view;concierge;pool
2,Casco Antiguo Loft,apartment,Casco Viejo,320000,1,1,98,1926,8.2,8.9530,-79.5352,restored facade;rooftop terrace
3,Costa del Este Family Tower,apartment,Costa del Este,650000,3,3.5,210,2021,5.8,9.0107,-79.4654,smart home;gym;marina access
4,Boquete Highland Villa,house,Boquete,495000,4,3,320,2016,7.4,8.7800,-82.4430,coffee farm view;garden
5,Coronado Beach House,house,Coronado,380000,3,2,240,2012,7.0,8.5180,-79.8890,beachfront;solar panels
6,Santa Maria Golf Estate,house,Santa Maria,1250000,5,5.5,480,2020,4.9,9.0450,-79.4330,golf course;private pool
7,Obarrio Business Suites 12,commercial,Obarrio,540000,0,2,175,2018,9.1,8.9850,-79.5230,corner unit;fitted offices
8,Bocas Overwater Bungalow,house,Bocas del Toro,295000,2,1.5,110,2017,8.8,9.3400,-82.2420,overwater;dock
9,Panama Pacifico Garden Flat,apartment,Panama Pacifico,265000,2,2,120,2022,6.2,8.9150,-79.5990,new build;near airport
";

const DEFAULT_PAGE_SIZE: usize = 4;
const FEATURED_COUNT: usize = 3;
const SIMILAR_COUNT: usize = 3;
const OPPORTUNITY_ROI_FLOOR: f64 = 7.0;

#[derive(Debug, Deserialize)]
struct SampleRow {
    id: u64,
    name: String,
    property_type: String,
    location: String,
    price: f64,
    bedrooms: u32,
    bathrooms: f64,
    area: f64,
    year_built: u32,
    roi: f64,
    latitude: f64,
    longitude: f64,
    features: String,
}

impl From<SampleRow> for Property {
    fn from(row: SampleRow) -> Self {
        Property {
            id: row.id,
            name: row.name,
            property_type: row.property_type,
            location: row.location,
            price: row.price,
            bedrooms: row.bedrooms,
            bathrooms: row.bathrooms,
            area: row.area,
            year_built: row.year_built,
            roi: row.roi,
            features: row
                .features
                .split(';')
                .map(|feature| feature.trim().to_string())
                .filter(|feature| !feature.is_empty())
                .collect(),
            latitude: Some(row.latitude),
            longitude: Some(row.longitude),
        }
    }
}

/// Parse the embedded catalogue.
pub fn sample_listings() -> Result<Vec<Property>, PropertiesError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(SAMPLE_LISTINGS_CSV.as_bytes());

    let mut listings = Vec::new();
    for record in reader.deserialize::<SampleRow>() {
        let row = record.map_err(|err| PropertiesError::Decode(err.to_string()))?;
        listings.push(Property::from(row));
    }
    Ok(listings)
}

/// In-memory directory over the sample catalogue, with real cursor
/// pagination. Interaction posts are recorded so demos and tests can assert
/// on them.
pub struct SampleDirectory {
    listings: Vec<Property>,
    page_size: usize,
    views: Mutex<Vec<u64>>,
    favorites: Mutex<Vec<u64>>,
    inquiries: Mutex<Vec<(u64, AgentInquiry)>>,
    tours: Mutex<Vec<(u64, TourRequest)>>,
}

impl SampleDirectory {
    pub fn new() -> Result<Self, PropertiesError> {
        Ok(Self::from_listings(sample_listings()?))
    }

    pub fn from_listings(listings: Vec<Property>) -> Self {
        Self {
            listings,
            page_size: DEFAULT_PAGE_SIZE,
            views: Mutex::new(Vec::new()),
            favorites: Mutex::new(Vec::new()),
            inquiries: Mutex::new(Vec::new()),
            tours: Mutex::new(Vec::new()),
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn listings(&self) -> &[Property] {
        &self.listings
    }

    pub fn recorded_views(&self) -> Vec<u64> {
        self.views.lock().expect("views mutex poisoned").clone()
    }

    pub fn recorded_favorites(&self) -> Vec<u64> {
        self.favorites
            .lock()
            .expect("favorites mutex poisoned")
            .clone()
    }

    pub fn recorded_inquiries(&self) -> Vec<(u64, AgentInquiry)> {
        self.inquiries
            .lock()
            .expect("inquiries mutex poisoned")
            .clone()
    }

    pub fn recorded_tours(&self) -> Vec<(u64, TourRequest)> {
        self.tours.lock().expect("tours mutex poisoned").clone()
    }

    fn filtered(&self, filters: &PropertyFilters) -> Vec<Property> {
        self.listings
            .iter()
            .filter(|property| matches_filters(property, filters))
            .cloned()
            .collect()
    }

    fn paged(&self, filters: &PropertyFilters, offset: usize) -> PropertyPage {
        let filtered = self.filtered(filters);
        let count = filtered.len() as u64;

        let end = (offset + self.page_size).min(filtered.len());
        let start = offset.min(filtered.len());
        let results = filtered[start..end].to_vec();

        let next = (end < filtered.len()).then(|| encode_cursor(end, filters));
        let previous =
            (start > 0).then(|| encode_cursor(start.saturating_sub(self.page_size), filters));

        PropertyPage {
            count,
            next,
            previous,
            results,
        }
    }
}

fn matches_filters(property: &Property, filters: &PropertyFilters) -> bool {
    for (key, value) in filters.iter() {
        let hit = match key {
            "location" => property
                .location
                .to_lowercase()
                .contains(&value.to_lowercase()),
            "property_type" => property.property_type.eq_ignore_ascii_case(value),
            "min_price" => value
                .parse::<f64>()
                .map(|floor| property.price >= floor)
                .unwrap_or(false),
            "max_price" => value
                .parse::<f64>()
                .map(|ceiling| property.price <= ceiling)
                .unwrap_or(false),
            "bedrooms" => value
                .parse::<u32>()
                .map(|minimum| property.bedrooms >= minimum)
                .unwrap_or(false),
            "q" => {
                let needle = value.to_lowercase();
                property.name.to_lowercase().contains(&needle)
                    || property.location.to_lowercase().contains(&needle)
                    || property
                        .features
                        .iter()
                        .any(|feature| feature.to_lowercase().contains(&needle))
            }
            // Unknown keys never match anything locally.
            _ => false,
        };
        if !hit {
            return false;
        }
    }
    true
}

fn encode_cursor(offset: usize, filters: &PropertyFilters) -> String {
    let mut cursor = format!("offset={offset}");
    for (key, value) in filters.iter() {
        cursor.push('&');
        cursor.push_str(key);
        cursor.push('=');
        cursor.push_str(value);
    }
    cursor
}

fn decode_cursor(cursor: &str) -> Result<(usize, PropertyFilters), PropertiesError> {
    let mut offset = None;
    let mut filters = PropertyFilters::new();

    for pair in cursor.split('&') {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| PropertiesError::Decode(format!("unrecognized cursor '{cursor}'")))?;
        if key == "offset" {
            let parsed = value
                .parse::<usize>()
                .map_err(|_| PropertiesError::Decode(format!("unrecognized cursor '{cursor}'")))?;
            offset = Some(parsed);
        } else {
            filters.set(key, value);
        }
    }

    let offset =
        offset.ok_or_else(|| PropertiesError::Decode(format!("unrecognized cursor '{cursor}'")))?;
    Ok((offset, filters))
}

impl PropertyDirectory for SampleDirectory {
    fn list(&self, filters: &PropertyFilters) -> Result<PropertyPage, PropertiesError> {
        Ok(self.paged(filters, 0))
    }

    fn page_at(&self, cursor: &str) -> Result<PropertyPage, PropertiesError> {
        let (offset, filters) = decode_cursor(cursor)?;
        Ok(self.paged(&filters, offset))
    }

    fn detail(&self, property_id: u64) -> Result<Property, PropertiesError> {
        self.listings
            .iter()
            .find(|property| property.id == property_id)
            .cloned()
            .ok_or(PropertiesError::Status {
                code: 404,
                message: format!("property {property_id} not found"),
            })
    }

    fn featured(&self) -> Result<Vec<Property>, PropertiesError> {
        let mut ranked = self.listings.clone();
        ranked.sort_by(|a, b| b.roi.total_cmp(&a.roi));
        ranked.truncate(FEATURED_COUNT);
        Ok(ranked)
    }

    fn search(
        &self,
        query: &str,
        filters: &PropertyFilters,
    ) -> Result<PropertyPage, PropertiesError> {
        let mut filters = filters.clone();
        filters.set("q", query);
        Ok(self.paged(&filters, 0))
    }

    fn similar(&self, property_id: u64) -> Result<Vec<Property>, PropertiesError> {
        let reference = self.detail(property_id)?;
        Ok(self
            .listings
            .iter()
            .filter(|candidate| {
                candidate.id != reference.id
                    && (candidate.property_type == reference.property_type
                        || candidate.location == reference.location)
            })
            .take(SIMILAR_COUNT)
            .cloned()
            .collect())
    }

    fn investment_opportunities(&self) -> Result<Vec<Property>, PropertiesError> {
        Ok(self
            .listings
            .iter()
            .filter(|property| property.roi >= OPPORTUNITY_ROI_FLOOR)
            .cloned()
            .collect())
    }

    fn map_data(&self) -> Result<Vec<MapPin>, PropertiesError> {
        Ok(self
            .listings
            .iter()
            .filter_map(|property| {
                Some(MapPin {
                    id: property.id,
                    name: property.name.clone(),
                    latitude: property.latitude?,
                    longitude: property.longitude?,
                    price: property.price,
                })
            })
            .collect())
    }

    fn stats(&self) -> Result<MarketStats, PropertiesError> {
        let total = self.listings.len() as u64;
        let (price_sum, roi_sum) = self
            .listings
            .iter()
            .fold((0.0, 0.0), |(price, roi), property| {
                (price + property.price, roi + property.roi)
            });

        let divisor = if total == 0 { 1.0 } else { total as f64 };
        Ok(MarketStats {
            total_listings: total,
            average_price: price_sum / divisor,
            average_roi: roi_sum / divisor,
        })
    }

    fn track_view(&self, property_id: u64) -> Result<(), PropertiesError> {
        self.views
            .lock()
            .expect("views mutex poisoned")
            .push(property_id);
        Ok(())
    }

    fn favorite(&self, property_id: u64) -> Result<(), PropertiesError> {
        self.favorites
            .lock()
            .expect("favorites mutex poisoned")
            .push(property_id);
        Ok(())
    }

    fn contact_agent(
        &self,
        property_id: u64,
        inquiry: &AgentInquiry,
    ) -> Result<(), PropertiesError> {
        self.inquiries
            .lock()
            .expect("inquiries mutex poisoned")
            .push((property_id, inquiry.clone()));
        Ok(())
    }

    fn schedule_tour(
        &self,
        property_id: u64,
        request: &TourRequest,
    ) -> Result<(), PropertiesError> {
        self.tours
            .lock()
            .expect("tours mutex poisoned")
            .push((property_id, request.clone()));
        Ok(())
    }
}
