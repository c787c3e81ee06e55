use crate::properties::Property;
use serde::{Deserialize, Serialize};

/// Hard cap on concurrently compared listings.
pub const MAX_COMPARED: usize = 3;

/// Numeric listing attributes the comparison table ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonAttribute {
    Price,
    Bedrooms,
    Bathrooms,
    Area,
    YearBuilt,
    Roi,
}

impl ComparisonAttribute {
    pub const ALL: [ComparisonAttribute; 6] = [
        ComparisonAttribute::Price,
        ComparisonAttribute::Bedrooms,
        ComparisonAttribute::Bathrooms,
        ComparisonAttribute::Area,
        ComparisonAttribute::YearBuilt,
        ComparisonAttribute::Roi,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ComparisonAttribute::Price => "Price",
            ComparisonAttribute::Bedrooms => "Bedrooms",
            ComparisonAttribute::Bathrooms => "Bathrooms",
            ComparisonAttribute::Area => "Area (m\u{b2})",
            ComparisonAttribute::YearBuilt => "Year Built",
            ComparisonAttribute::Roi => "Projected ROI (%)",
        }
    }

    /// Lower price wins; every other attribute favors the maximum.
    pub const fn favors_minimum(self) -> bool {
        matches!(self, ComparisonAttribute::Price)
    }

    pub fn value_of(self, property: &Property) -> f64 {
        match self {
            ComparisonAttribute::Price => property.price,
            ComparisonAttribute::Bedrooms => f64::from(property.bedrooms),
            ComparisonAttribute::Bathrooms => property.bathrooms,
            ComparisonAttribute::Area => property.area,
            ComparisonAttribute::YearBuilt => f64::from(property.year_built),
            ComparisonAttribute::Roi => property.roi,
        }
    }
}

/// Errors raised when editing the comparison selection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComparisonError {
    #[error("comparison is limited to {} properties at a time", MAX_COMPARED)]
    SelectionFull,
    #[error("property {0} is already selected for comparison")]
    AlreadySelected(u64),
}

/// The transient selection a visitor builds while comparing listings.
#[derive(Debug, Clone, Default)]
pub struct ComparisonSet {
    entries: Vec<Property>,
}

impl ComparisonSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, property: Property) -> Result<(), ComparisonError> {
        if self.entries.iter().any(|entry| entry.id == property.id) {
            return Err(ComparisonError::AlreadySelected(property.id));
        }
        if self.entries.len() >= MAX_COMPARED {
            return Err(ComparisonError::SelectionFull);
        }
        self.entries.push(property);
        Ok(())
    }

    /// Removing never fails; absent ids are reported as `false`.
    pub fn remove(&mut self, property_id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != property_id);
        self.entries.len() != before
    }

    pub fn entries(&self) -> &[Property] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rank every attribute across the current selection. Recomputed from
    /// scratch each call, so removals need no bookkeeping.
    pub fn matrix(&self) -> ComparisonMatrix {
        let columns = self
            .entries
            .iter()
            .map(|property| ComparisonColumn {
                property_id: property.id,
                name: property.name.clone(),
            })
            .collect();

        let rows = ComparisonAttribute::ALL
            .iter()
            .map(|attribute| {
                let values: Vec<f64> = self
                    .entries
                    .iter()
                    .map(|property| attribute.value_of(property))
                    .collect();
                let best = best_flags(&values, attribute.favors_minimum());
                ComparisonRow {
                    attribute: *attribute,
                    label: attribute.label(),
                    values,
                    best,
                }
            })
            .collect();

        ComparisonMatrix { columns, rows }
    }
}

/// Column header for the rendered comparison table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonColumn {
    pub property_id: u64,
    pub name: String,
}

/// One attribute row; `best` flags align with the selection order and mark
/// every entry tied at the favorable extreme.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub attribute: ComparisonAttribute,
    pub label: &'static str,
    pub values: Vec<f64>,
    pub best: Vec<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonMatrix {
    pub columns: Vec<ComparisonColumn>,
    pub rows: Vec<ComparisonRow>,
}

fn best_flags(values: &[f64], favors_minimum: bool) -> Vec<bool> {
    let extreme = values.iter().copied().fold(
        if favors_minimum {
            f64::INFINITY
        } else {
            f64::NEG_INFINITY
        },
        |acc, value| {
            if favors_minimum {
                acc.min(value)
            } else {
                acc.max(value)
            }
        },
    );

    values.iter().map(|value| *value == extreme).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::Property;

    fn listing(id: u64, price: f64, bedrooms: u32, area: f64) -> Property {
        Property {
            id,
            name: format!("Listing {id}"),
            property_type: "apartment".to_string(),
            location: "Punta Pacifica".to_string(),
            price,
            bedrooms,
            bathrooms: 2.0,
            area,
            year_built: 2018,
            roi: 6.0,
            features: vec!["ocean view".to_string()],
        }
    }

    #[test]
    fn lowest_price_wins_the_price_row() {
        let mut set = ComparisonSet::new();
        set.add(listing(1, 450_000.0, 2, 120.0)).expect("add");
        set.add(listing(2, 650_000.0, 3, 180.0)).expect("add");
        set.add(listing(3, 320_000.0, 1, 80.0)).expect("add");

        let matrix = set.matrix();
        let price_row = &matrix.rows[0];
        assert_eq!(price_row.attribute, ComparisonAttribute::Price);
        assert_eq!(price_row.best, vec![false, false, true]);
    }

    #[test]
    fn ties_flag_every_tied_entry() {
        let mut set = ComparisonSet::new();
        set.add(listing(1, 400_000.0, 3, 150.0)).expect("add");
        set.add(listing(2, 500_000.0, 3, 150.0)).expect("add");

        let matrix = set.matrix();
        let bedrooms_row = matrix
            .rows
            .iter()
            .find(|row| row.attribute == ComparisonAttribute::Bedrooms)
            .expect("bedrooms row");
        assert_eq!(bedrooms_row.best, vec![true, true]);
    }

    #[test]
    fn fourth_listing_is_rejected() {
        let mut set = ComparisonSet::new();
        for id in 1..=3 {
            set.add(listing(id, 100_000.0 * id as f64, 2, 100.0))
                .expect("within cap");
        }
        let overflow = set.add(listing(4, 900_000.0, 4, 200.0));
        assert_eq!(overflow, Err(ComparisonError::SelectionFull));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn duplicate_listing_is_rejected() {
        let mut set = ComparisonSet::new();
        set.add(listing(7, 100_000.0, 2, 100.0)).expect("add");
        assert_eq!(
            set.add(listing(7, 100_000.0, 2, 100.0)),
            Err(ComparisonError::AlreadySelected(7))
        );
    }

    #[test]
    fn removal_recomputes_over_the_remaining_set() {
        let mut set = ComparisonSet::new();
        set.add(listing(1, 450_000.0, 2, 120.0)).expect("add");
        set.add(listing(2, 650_000.0, 3, 180.0)).expect("add");
        set.add(listing(3, 320_000.0, 1, 80.0)).expect("add");

        assert!(set.remove(3));
        assert!(!set.remove(3));

        let matrix = set.matrix();
        let price_row = &matrix.rows[0];
        assert_eq!(price_row.best, vec![true, false]);
    }
}
