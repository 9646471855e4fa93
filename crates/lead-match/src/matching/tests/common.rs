use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::matching::domain::{
    BedroomRange, CustomerId, CustomerIntent, CustomerProfile, CustomerRecord, CustomerStatus,
    CustomerSubmission, ListingType, PropertyId, PropertyListing, PropertyStatus, PropertyType,
};
use crate::matching::ranking::RankingOptions;
use crate::matching::repository::{
    CustomerDirectory, ListingFilter, MatchRecord, MatchStore, PropertyCatalog, RepositoryError,
};
use crate::matching::{match_router, MatchService};

pub(super) fn buyer() -> CustomerProfile {
    CustomerProfile {
        intent: CustomerIntent::Buy,
        monthly_income: 50_000.0,
        existing_monthly_debt: 0.0,
        bedroom_range: BedroomRange::new(3, 4),
        preferred_communities: vec!["Arabian Ranches".to_string()],
        must_have_amenities: vec!["Private Pool".to_string()],
        nice_to_have_amenities: vec!["Gym".to_string()],
    }
}

pub(super) fn renter() -> CustomerProfile {
    CustomerProfile {
        intent: CustomerIntent::Rent,
        ..buyer()
    }
}

/// Listing that satisfies every preference of `buyer()`.
pub(super) fn villa(id: &str) -> PropertyListing {
    PropertyListing {
        id: PropertyId(id.to_string()),
        title: "Four bedroom villa with pool".to_string(),
        community: "Arabian Ranches".to_string(),
        property_type: PropertyType::Villa,
        listing_type: ListingType::Sale,
        price: 2_500_000,
        price_per_sqft: Some(1_000.0),
        bedrooms: 4,
        bathrooms: 4,
        size_sqft: 2_500,
        amenities: vec!["Private Pool".to_string(), "Gym".to_string()],
        status: PropertyStatus::Available,
        days_on_market: 5,
        views: 250,
        inquiries: 12,
    }
}

/// Listing that misses on every dimension and scores exactly 30 for `buyer()`.
pub(super) fn stale_apartment(id: &str) -> PropertyListing {
    PropertyListing {
        id: PropertyId(id.to_string()),
        title: "One bedroom apartment".to_string(),
        community: "Palm Jumeirah".to_string(),
        property_type: PropertyType::Apartment,
        listing_type: ListingType::Sale,
        price: 4_000_000,
        price_per_sqft: Some(3_000.0),
        bedrooms: 1,
        bathrooms: 1,
        size_sqft: 1_300,
        amenities: Vec::new(),
        status: PropertyStatus::Available,
        days_on_market: 120,
        views: 20,
        inquiries: 0,
    }
}

pub(super) fn rental(id: &str, annual_rent: u64) -> PropertyListing {
    PropertyListing {
        listing_type: ListingType::Rent,
        price: annual_rent,
        ..villa(id)
    }
}

pub(super) fn catalog() -> Vec<PropertyListing> {
    let mut townhouse = villa("p-2");
    townhouse.property_type = PropertyType::Townhouse;
    townhouse.community = "Mudon".to_string();
    townhouse.price = 3_000_000;
    townhouse.days_on_market = 45;
    townhouse.views = 80;

    let mut sold = villa("p-4");
    sold.status = PropertyStatus::Sold;

    vec![
        villa("p-1"),
        townhouse,
        stale_apartment("p-3"),
        sold,
        rental("p-5", 150_000),
    ]
}

pub(super) fn submission() -> CustomerSubmission {
    CustomerSubmission {
        name: "Layla Haddad".to_string(),
        email: "layla@example.com".to_string(),
        phone: Some("+971500000000".to_string()),
        intent: CustomerIntent::Buy,
        monthly_income: 50_000.0,
        existing_monthly_debt: 0.0,
        bedrooms_min: 3,
        bedrooms_max: 4,
        preferred_communities: vec!["Arabian Ranches".to_string()],
        must_have_amenities: vec!["Private Pool".to_string()],
        nice_to_have_amenities: vec!["Gym".to_string()],
    }
}

pub(super) fn customer_record(id: &str) -> CustomerRecord {
    CustomerRecord {
        id: CustomerId(id.to_string()),
        name: "Omar Saleh".to_string(),
        email: "omar@example.com".to_string(),
        phone: None,
        status: CustomerStatus::Qualified,
        profile: buyer(),
        created_at: Utc
            .with_ymd_and_hms(2025, 3, 1, 9, 0, 0)
            .single()
            .expect("valid timestamp"),
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryCatalog {
    listings: Arc<Mutex<Vec<PropertyListing>>>,
}

impl MemoryCatalog {
    pub(super) fn with_listings(listings: Vec<PropertyListing>) -> Self {
        Self {
            listings: Arc::new(Mutex::new(listings)),
        }
    }
}

impl PropertyCatalog for MemoryCatalog {
    fn fetch_listings(
        &self,
        filter: &ListingFilter,
    ) -> Result<Vec<PropertyListing>, RepositoryError> {
        let guard = self.listings.lock().expect("catalog mutex poisoned");
        Ok(guard
            .iter()
            .filter(|listing| filter.matches(listing))
            .cloned()
            .collect())
    }

    fn fetch_listing(&self, id: &PropertyId) -> Result<Option<PropertyListing>, RepositoryError> {
        let guard = self.listings.lock().expect("catalog mutex poisoned");
        Ok(guard.iter().find(|listing| &listing.id == id).cloned())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    records: Arc<Mutex<HashMap<(CustomerId, PropertyId), MatchRecord>>>,
}

impl MemoryStore {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("store mutex poisoned").len()
    }
}

impl MatchStore for MemoryStore {
    fn persist_match(&self, record: MatchRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        guard.insert(
            (record.customer_id.clone(), record.property_id.clone()),
            record,
        );
        Ok(())
    }

    fn matches_for(&self, customer_id: &CustomerId) -> Result<Vec<MatchRecord>, RepositoryError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        let mut records: Vec<MatchRecord> = guard
            .values()
            .filter(|record| &record.customer_id == customer_id)
            .cloned()
            .collect();
        records.sort_by_key(|record| record.rank);
        Ok(records)
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryCustomers {
    records: Arc<Mutex<HashMap<CustomerId, CustomerRecord>>>,
}

impl MemoryCustomers {
    pub(super) fn with_customer(record: CustomerRecord) -> Self {
        let customers = Self::default();
        customers
            .records
            .lock()
            .expect("customer mutex poisoned")
            .insert(record.id.clone(), record);
        customers
    }
}

impl CustomerDirectory for MemoryCustomers {
    fn fetch_customer(&self, id: &CustomerId) -> Result<Option<CustomerRecord>, RepositoryError> {
        let guard = self.records.lock().expect("customer mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn insert_customer(&self, record: CustomerRecord) -> Result<CustomerRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("customer mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }
}

pub(super) struct UnavailableStore;

impl MatchStore for UnavailableStore {
    fn persist_match(&self, _record: MatchRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn matches_for(&self, _customer_id: &CustomerId) -> Result<Vec<MatchRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) type MemoryService = MatchService<MemoryCatalog, MemoryStore, MemoryCustomers>;

pub(super) fn build_service() -> (MemoryService, Arc<MemoryStore>, Arc<MemoryCustomers>) {
    let catalog = Arc::new(MemoryCatalog::with_listings(catalog()));
    let store = Arc::new(MemoryStore::default());
    let customers = Arc::new(MemoryCustomers::with_customer(customer_record("cust-omar")));
    let service = MatchService::new(
        catalog,
        store.clone(),
        customers.clone(),
        RankingOptions::default(),
    );
    (service, store, customers)
}

pub(super) fn match_router_with_service(service: MemoryService) -> axum::Router {
    match_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
