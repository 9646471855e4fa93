use lead_match::matching::{
    CustomerDirectory, CustomerId, CustomerIntent, CustomerRecord, ListingFilter, MatchRecord,
    MatchStore, PropertyCatalog, PropertyId, PropertyListing, RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryPropertyCatalog {
    listings: Arc<Mutex<Vec<PropertyListing>>>,
}

impl InMemoryPropertyCatalog {
    pub(crate) fn new(listings: Vec<PropertyListing>) -> Self {
        Self {
            listings: Arc::new(Mutex::new(listings)),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.listings.lock().expect("catalog mutex poisoned").len()
    }
}

impl PropertyCatalog for InMemoryPropertyCatalog {
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

/// Keeps the latest match per (customer, property) pair.
#[derive(Default, Clone)]
pub(crate) struct InMemoryMatchStore {
    records: Arc<Mutex<HashMap<(CustomerId, PropertyId), MatchRecord>>>,
}

impl MatchStore for InMemoryMatchStore {
    fn persist_match(&self, record: MatchRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("match store mutex poisoned");
        guard.insert(
            (record.customer_id.clone(), record.property_id.clone()),
            record,
        );
        Ok(())
    }

    fn matches_for(&self, customer_id: &CustomerId) -> Result<Vec<MatchRecord>, RepositoryError> {
        let guard = self.records.lock().expect("match store mutex poisoned");
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
pub(crate) struct InMemoryCustomerDirectory {
    records: Arc<Mutex<HashMap<CustomerId, CustomerRecord>>>,
}

impl CustomerDirectory for InMemoryCustomerDirectory {
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

pub(crate) fn parse_intent(raw: &str) -> Result<CustomerIntent, String> {
    raw.parse::<CustomerIntent>()
        .map_err(|err| format!("{err} (expected buy, rent or invest)"))
}
