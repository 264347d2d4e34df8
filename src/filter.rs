//! Availability filter: pure narrowing of a spot listing.
//!
//! `filter_spots` is side-effect free, deterministic, and order-preserving:
//! it never sorts, only drops spots that fail a criterion. All four criteria
//! are ANDed together.

use crate::spot::ParkingSpot;
use serde::{Deserialize, Serialize};

/// Parking-type tag filter.
///
/// A non-`All` type keeps spots carrying at least one amenity whose text
/// contains the type's keyword. `All` passes every spot; so does any tag
/// the filter does not recognize, which parses to `All`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParkingType {
    #[default]
    All,
    Covered,
    Valet,
    Security,
}

impl ParkingType {
    /// The amenity keyword associated with this type, if any.
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            ParkingType::All => None,
            ParkingType::Covered => Some("covered"),
            ParkingType::Valet => Some("valet"),
            ParkingType::Security => Some("security"),
        }
    }

    /// Parse a UI-supplied tag; unrecognized tags pass all spots.
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "covered" => ParkingType::Covered,
            "valet" => ParkingType::Valet,
            "security" => ParkingType::Security,
            _ => ParkingType::All,
        }
    }
}

/// Search criteria supplied by the UI collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotFilters {
    /// Price ceiling: keep spots with `price <= max_price`.
    pub max_price: f64,
    pub parking_type: ParkingType,
    /// Requested amenity set. A spot passes only if it carries every
    /// requested amenity (AND semantics, exact match).
    pub amenities: Vec<String>,
}

impl Default for SpotFilters {
    fn default() -> Self {
        SpotFilters {
            max_price: 500.0,
            parking_type: ParkingType::All,
            amenities: Vec::new(),
        }
    }
}

/// Narrow `spots` by free-text query and filter criteria.
///
/// The text query matches case-insensitively as a substring of the spot's
/// name OR address; an empty query passes all spots.
pub fn filter_spots(spots: &[ParkingSpot], query: &str, filters: &SpotFilters) -> Vec<ParkingSpot> {
    let query = query.to_lowercase();

    spots
        .iter()
        .filter(|spot| {
            if !query.is_empty()
                && !spot.name.to_lowercase().contains(&query)
                && !spot.address.to_lowercase().contains(&query)
            {
                return false;
            }

            if spot.price > filters.max_price {
                return false;
            }

            if let Some(keyword) = filters.parking_type.keyword() {
                if !spot.has_amenity_like(keyword) {
                    return false;
                }
            }

            filters
                .amenities
                .iter()
                .all(|wanted| spot.amenities.contains(wanted))
        })
        .cloned()
        .collect()
}
