use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::affordability::AffordabilityResult;
use super::domain::{
    CustomerId, CustomerRecord, CustomerStatus, CustomerSubmission, PropertyId, PropertyListing,
    PropertyStatus,
};
use super::intake::{IntakeGuard, IntakeViolation};
use super::market::{aggregate_by_community, summarize_market, CommunityStats, MarketSummary};
use super::ranking::{RankedMatch, RankingEngine, RankingOptions};
use super::repository::{
    CustomerDirectory, ListingFilter, MatchRecord, MatchStore, PropertyCatalog, RepositoryError,
};

/// Either an existing customer id or fresh form data to register first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchRequest {
    #[serde(default)]
    pub customer_id: Option<CustomerId>,
    #[serde(default)]
    pub customer_data: Option<CustomerSubmission>,
    #[serde(default)]
    pub options: Option<RankingOptions>,
}

/// Ranked matches plus the affordability baseline they were judged against.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResponse {
    pub success: bool,
    pub customer_id: CustomerId,
    pub matches: Vec<RankedMatch>,
    pub total_properties: usize,
    pub affordability: AffordabilityResult,
    pub generated_at: DateTime<Utc>,
}

/// Per-community statistics and catalog-wide headline figures.
#[derive(Debug, Clone, Serialize)]
pub struct MarketOverview {
    pub summary: MarketSummary,
    pub communities: BTreeMap<String, CommunityStats>,
}

/// Service composing the collaborators with the ranking engine.
pub struct MatchService<C, S, D> {
    catalog: Arc<C>,
    store: Arc<S>,
    customers: Arc<D>,
    guard: IntakeGuard,
    engine: RankingEngine,
    options: RankingOptions,
}

static CUSTOMER_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_customer_id() -> CustomerId {
    let id = CUSTOMER_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    CustomerId(format!("cust-{id:06}"))
}

impl<C, S, D> MatchService<C, S, D>
where
    C: PropertyCatalog + 'static,
    S: MatchStore + 'static,
    D: CustomerDirectory + 'static,
{
    pub fn new(catalog: Arc<C>, store: Arc<S>, customers: Arc<D>, options: RankingOptions) -> Self {
        Self::with_engine(catalog, store, customers, RankingEngine::default(), options)
    }

    pub fn with_engine(
        catalog: Arc<C>,
        store: Arc<S>,
        customers: Arc<D>,
        engine: RankingEngine,
        options: RankingOptions,
    ) -> Self {
        Self {
            catalog,
            store,
            customers,
            guard: IntakeGuard,
            engine,
            options,
        }
    }

    /// Resolve the customer, rank the live catalog and persist the ranking.
    pub fn generate(&self, request: MatchRequest) -> Result<MatchResponse, MatchServiceError> {
        let options = request.options.unwrap_or(self.options);
        let customer = match (request.customer_id, request.customer_data) {
            (Some(id), _) => self.lookup(&id)?,
            (None, Some(submission)) => self.register(submission)?,
            (None, None) => return Err(MatchServiceError::MissingCustomer),
        };

        let response = self.rank_for(&customer, options)?;

        let created_at = response.generated_at;
        for ranked in &response.matches {
            let record = MatchRecord::from_ranked(&customer.id, ranked, created_at);
            if let Err(err) = self.store.persist_match(record) {
                warn!(
                    customer_id = %customer.id,
                    property_id = %ranked.property.id,
                    error = %err,
                    "failed to persist match"
                );
                return Err(err.into());
            }
        }

        info!(
            customer_id = %customer.id,
            matches = response.matches.len(),
            total_properties = response.total_properties,
            "generated matches"
        );

        Ok(response)
    }

    /// Recompute matches for an existing customer without persisting them.
    pub fn refresh(&self, customer_id: &CustomerId) -> Result<MatchResponse, MatchServiceError> {
        let customer = self.lookup(customer_id)?;
        self.rank_for(&customer, self.options)
    }

    /// Previously persisted matches, ordered by rank.
    pub fn history(&self, customer_id: &CustomerId) -> Result<Vec<MatchRecord>, MatchServiceError> {
        self.lookup(customer_id)?;
        Ok(self.store.matches_for(customer_id)?)
    }

    pub fn listings(&self, filter: &ListingFilter) -> Result<Vec<PropertyListing>, MatchServiceError> {
        Ok(self.catalog.fetch_listings(filter)?)
    }

    pub fn listing(&self, id: &PropertyId) -> Result<PropertyListing, MatchServiceError> {
        self.catalog
            .fetch_listing(id)?
            .ok_or_else(|| MatchServiceError::PropertyNotFound(id.clone()))
    }

    pub fn market_overview(&self) -> Result<MarketOverview, MatchServiceError> {
        let filter = ListingFilter {
            status: Some(PropertyStatus::Available),
            ..ListingFilter::default()
        };
        let listings = self.catalog.fetch_listings(&filter)?;
        let communities = aggregate_by_community(&listings);
        let summary = summarize_market(&listings, &communities);
        Ok(MarketOverview {
            summary,
            communities,
        })
    }

    fn lookup(&self, id: &CustomerId) -> Result<CustomerRecord, MatchServiceError> {
        self.customers
            .fetch_customer(id)?
            .ok_or_else(|| MatchServiceError::CustomerNotFound(id.clone()))
    }

    fn register(&self, submission: CustomerSubmission) -> Result<CustomerRecord, MatchServiceError> {
        let profile = self.guard.profile_from_submission(&submission)?;
        let record = CustomerRecord {
            id: next_customer_id(),
            name: submission.name.trim().to_string(),
            email: submission.email.trim().to_string(),
            phone: submission.phone,
            status: CustomerStatus::New,
            profile,
            created_at: Utc::now(),
        };
        Ok(self.customers.insert_customer(record)?)
    }

    fn rank_for(
        &self,
        customer: &CustomerRecord,
        options: RankingOptions,
    ) -> Result<MatchResponse, MatchServiceError> {
        let filter = ListingFilter::available(customer.profile.intent.listing_type());
        let listings = self.catalog.fetch_listings(&filter)?;
        if listings.is_empty() {
            return Err(MatchServiceError::NoProperties);
        }

        let affordability = self.engine.affordability(&customer.profile);
        let matches = self
            .engine
            .rank_with(&customer.profile, &listings, &affordability, options);

        Ok(MatchResponse {
            success: true,
            customer_id: customer.id.clone(),
            matches,
            total_properties: listings.len(),
            affordability,
            generated_at: Utc::now(),
        })
    }
}

/// Error raised by the match service.
#[derive(Debug, thiserror::Error)]
pub enum MatchServiceError {
    #[error("either customer_id or customer_data is required")]
    MissingCustomer,
    #[error("customer {0} not found")]
    CustomerNotFound(CustomerId),
    #[error("property {0} not found")]
    PropertyNotFound(PropertyId),
    #[error("no properties available matching your criteria")]
    NoProperties,
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl MatchServiceError {
    /// Stable machine-readable code for API payloads.
    pub const fn code(&self) -> &'static str {
        match self {
            MatchServiceError::MissingCustomer | MatchServiceError::Intake(_) => "INVALID_REQUEST",
            MatchServiceError::CustomerNotFound(_) => "CUSTOMER_NOT_FOUND",
            MatchServiceError::PropertyNotFound(_) => "NOT_FOUND",
            MatchServiceError::NoProperties => "NO_PROPERTIES",
            MatchServiceError::Repository(_) => "INTERNAL_ERROR",
        }
    }
}
