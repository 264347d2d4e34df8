//! Spot registry: owner-facing spot record management and search.
//!
//! Leaf dependency for booking creation. Listing and search only ever see
//! spots in Active status; the availability filter itself is the pure
//! function in [`crate::filter`].

use crate::error::{Error, Result};
use crate::filter::{filter_spots, SpotFilters};
use crate::spot::{ParkingSpot, PriceType, SpotStatus};
use crate::store::ParkingStore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Input for listing a new spot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSpot {
    pub owner_id: String,
    pub name: String,
    pub address: String,
    pub description: String,
    pub price: f64,
    pub price_type: PriceType,
    pub total_slots: u32,
    pub amenities: Vec<String>,
    pub opening_hours: String,
    pub phone: Option<String>,
}

/// Owner-facing registry over the spot records of a [`ParkingStore`].
#[derive(Clone)]
pub struct SpotRegistry<S: ParkingStore> {
    store: S,
}

impl<S: ParkingStore> SpotRegistry<S> {
    /// Create a registry over the given store.
    pub fn new(store: S) -> Self {
        SpotRegistry { store }
    }

    /// List a new spot. Assigns the id, opens all slots, and sets the spot
    /// Active.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` for an empty name/address, a
    /// non-positive price, or a zero slot count.
    pub async fn add(&self, new_spot: NewSpot) -> Result<ParkingSpot> {
        if new_spot.name.trim().is_empty() || new_spot.address.trim().is_empty() {
            return Err(Error::Validation(
                "Spot name and address are required".to_string(),
            ));
        }
        if new_spot.price <= 0.0 {
            return Err(Error::Validation("Price must be positive".to_string()));
        }
        if new_spot.total_slots == 0 {
            return Err(Error::Validation(
                "Spot must have at least one slot".to_string(),
            ));
        }

        let spot = ParkingSpot {
            id: Uuid::new_v4().to_string(),
            owner_id: new_spot.owner_id,
            name: new_spot.name,
            address: new_spot.address,
            description: new_spot.description,
            price: new_spot.price,
            price_type: new_spot.price_type,
            total_slots: new_spot.total_slots,
            available_slots: new_spot.total_slots,
            status: SpotStatus::Active,
            amenities: new_spot.amenities,
            opening_hours: new_spot.opening_hours,
            phone: new_spot.phone,
            rating: 0.0,
            review_count: 0,
            version: 0,
        };

        self.store.insert_spot(&spot).await?;
        info!("✓ Spot {} listed by {}", spot.id, spot.owner_id);
        Ok(spot)
    }

    /// Fetch a spot by id.
    pub async fn get(&self, id: &str) -> Result<Option<ParkingSpot>> {
        self.store.fetch_spot(id).await
    }

    /// Apply an owner edit. The passed record must carry the version the
    /// owner read; a concurrent change surfaces as `Error::Conflict`.
    pub async fn update(&self, spot: &ParkingSpot) -> Result<ParkingSpot> {
        if spot.available_slots > spot.total_slots {
            return Err(Error::Validation(
                "Available slots cannot exceed total slots".to_string(),
            ));
        }
        if spot.price <= 0.0 {
            return Err(Error::Validation("Price must be positive".to_string()));
        }
        self.store.update_spot(spot).await
    }

    /// Move a spot into a new listing status.
    pub async fn set_status(&self, id: &str, status: SpotStatus) -> Result<ParkingSpot> {
        let mut spot = self
            .store
            .fetch_spot(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("spot {} not found", id)))?;
        spot.status = status;
        self.store.update_spot(&spot).await
    }

    /// Remove a spot record.
    pub async fn remove(&self, id: &str) -> Result<()> {
        self.store.delete_spot(id).await
    }

    /// All spots currently listable (Active status).
    pub async fn list_active(&self) -> Result<Vec<ParkingSpot>> {
        self.store.active_spots().await
    }

    /// Active spots narrowed by free-text query and filter criteria.
    pub async fn search(&self, query: &str, filters: &SpotFilters) -> Result<Vec<ParkingSpot>> {
        let spots = self.store.active_spots().await?;
        Ok(filter_spots(&spots, query, filters))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;

    fn new_spot(name: &str, price: f64, slots: u32) -> NewSpot {
        NewSpot {
            owner_id: "owner_1".to_string(),
            name: name.to_string(),
            address: "1 Main St".to_string(),
            description: String::new(),
            price,
            price_type: PriceType::Hour,
            total_slots: slots,
            amenities: vec!["EV Charging".to_string()],
            opening_hours: "24/7".to_string(),
            phone: None,
        }
    }

    #[tokio::test]
    async fn test_add_assigns_id_and_opens_slots() {
        let registry = SpotRegistry::new(InMemoryStore::new());
        let spot = registry
            .add(new_spot("Central Plaza Parking", 25.0, 10))
            .await
            .expect("Failed to add spot");

        assert!(!spot.id.is_empty());
        assert_eq!(spot.available_slots, 10);
        assert_eq!(spot.status, SpotStatus::Active);

        let fetched = registry
            .get(&spot.id)
            .await
            .expect("Failed to fetch")
            .expect("Spot not found");
        assert_eq!(fetched, spot);
    }

    #[tokio::test]
    async fn test_add_guards() {
        let registry = SpotRegistry::new(InMemoryStore::new());

        assert!(registry.add(new_spot("", 25.0, 10)).await.is_err());
        assert!(registry.add(new_spot("Lot", 0.0, 10)).await.is_err());
        assert!(registry.add(new_spot("Lot", 25.0, 0)).await.is_err());
    }

    #[tokio::test]
    async fn test_set_status_hides_from_listing() {
        let registry = SpotRegistry::new(InMemoryStore::new());
        let spot = registry
            .add(new_spot("Lot A", 25.0, 10))
            .await
            .expect("Failed to add spot");

        assert_eq!(
            registry.list_active().await.expect("Failed to list").len(),
            1
        );

        registry
            .set_status(&spot.id, SpotStatus::Maintenance)
            .await
            .expect("Failed to set status");
        assert!(registry
            .list_active()
            .await
            .expect("Failed to list")
            .is_empty());
    }

    #[tokio::test]
    async fn test_update_rejects_bad_slot_counts() {
        let registry = SpotRegistry::new(InMemoryStore::new());
        let mut spot = registry
            .add(new_spot("Lot A", 25.0, 10))
            .await
            .expect("Failed to add spot");

        spot.available_slots = 11;
        assert!(registry.update(&spot).await.is_err());
    }

    #[tokio::test]
    async fn test_search_applies_filter() {
        let registry = SpotRegistry::new(InMemoryStore::new());
        registry
            .add(new_spot("Central Plaza Parking", 25.0, 10))
            .await
            .expect("Failed to add spot");
        registry
            .add(new_spot("Harbor Garage", 35.0, 10))
            .await
            .expect("Failed to add spot");

        let filters = SpotFilters {
            max_price: 30.0,
            ..SpotFilters::default()
        };
        let found = registry
            .search("", &filters)
            .await
            .expect("Failed to search");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Central Plaza Parking");
    }
}
