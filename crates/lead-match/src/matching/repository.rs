use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{
    CustomerId, CustomerRecord, ListingType, MatchStatus, PropertyId, PropertyListing,
    PropertyStatus,
};
use super::ranking::RankedMatch;

/// Catalog query. Every populated field must hold for a listing to match and
/// numeric bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingFilter {
    #[serde(default)]
    pub status: Option<PropertyStatus>,
    #[serde(default)]
    pub listing_type: Option<ListingType>,
    #[serde(default)]
    pub community: Option<String>,
    #[serde(default)]
    pub min_price: Option<u64>,
    #[serde(default)]
    pub max_price: Option<u64>,
    #[serde(default)]
    pub min_bedrooms: Option<u8>,
    #[serde(default)]
    pub max_bedrooms: Option<u8>,
}

impl ListingFilter {
    /// Listings still on the market for the given listing type.
    pub fn available(listing_type: ListingType) -> Self {
        Self {
            status: Some(PropertyStatus::Available),
            listing_type: Some(listing_type),
            ..Self::default()
        }
    }

    pub fn matches(&self, listing: &PropertyListing) -> bool {
        self.status.map_or(true, |status| listing.status == status)
            && self
                .listing_type
                .map_or(true, |kind| listing.listing_type == kind)
            && self
                .community
                .as_deref()
                .map_or(true, |community| listing.community == community)
            && self.min_price.map_or(true, |min| listing.price >= min)
            && self.max_price.map_or(true, |max| listing.price <= max)
            && self
                .min_bedrooms
                .map_or(true, |min| listing.bedrooms >= min)
            && self
                .max_bedrooms
                .map_or(true, |max| listing.bedrooms <= max)
    }
}

/// Persisted audit form of a ranked match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub customer_id: CustomerId,
    pub property_id: PropertyId,
    pub overall: u8,
    pub affordability: u8,
    pub bedrooms: u8,
    pub community: u8,
    pub amenities: u8,
    pub market_fit: u8,
    pub rank: usize,
    pub summary: String,
    pub status: MatchStatus,
    pub created_at: DateTime<Utc>,
}

impl MatchRecord {
    pub fn from_ranked(
        customer_id: &CustomerId,
        ranked: &RankedMatch,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            customer_id: customer_id.clone(),
            property_id: ranked.property.id.clone(),
            overall: ranked.score.overall,
            affordability: ranked.score.affordability,
            bedrooms: ranked.score.bedrooms,
            community: ranked.score.community,
            amenities: ranked.score.amenities,
            market_fit: ranked.score.market_fit,
            rank: ranked.rank,
            summary: ranked.explanation.summary.clone(),
            status: MatchStatus::Pending,
            created_at,
        }
    }
}

/// Source of property listings (document store, CSV export, fixtures).
pub trait PropertyCatalog: Send + Sync {
    fn fetch_listings(&self, filter: &ListingFilter) -> Result<Vec<PropertyListing>, RepositoryError>;
    fn fetch_listing(&self, id: &PropertyId) -> Result<Option<PropertyListing>, RepositoryError>;
}

/// Sink for computed matches keyed by customer and property.
pub trait MatchStore: Send + Sync {
    fn persist_match(&self, record: MatchRecord) -> Result<(), RepositoryError>;
    /// Stored matches for a customer ordered by rank.
    fn matches_for(&self, customer_id: &CustomerId) -> Result<Vec<MatchRecord>, RepositoryError>;
}

/// Lookup and registration of leads.
pub trait CustomerDirectory: Send + Sync {
    fn fetch_customer(&self, id: &CustomerId) -> Result<Option<CustomerRecord>, RepositoryError>;
    fn insert_customer(&self, record: CustomerRecord) -> Result<CustomerRecord, RepositoryError>;
}

/// Error enumeration for collaborator failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
