//! Lead-to-listing matching: affordability assessment, multi-factor scoring,
//! ranking and community level market intelligence.
//!
//! The core (`affordability`, `scoring`, `ranking`, `market`) is pure and
//! synchronous. Storage is reached only through the traits in `repository`, so
//! the service and router can run against any catalog or match store.

pub mod affordability;
pub mod catalog;
pub mod domain;
pub mod intake;
pub mod market;
pub mod ranking;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use affordability::{
    calculate_affordability, AffordabilityPolicy, AffordabilityResult, Recommendation,
};
pub use catalog::{CatalogImportError, CatalogImporter};
pub use domain::{
    BedroomRange, CustomerId, CustomerIntent, CustomerProfile, CustomerRecord, CustomerStatus,
    CustomerSubmission, ListingType, MatchStatus, PropertyId, PropertyListing, PropertyStatus,
    PropertyType,
};
pub use intake::{IntakeGuard, IntakeViolation};
pub use market::{aggregate_by_community, summarize_market, CommunityStats, MarketSummary, MarketTrend};
pub use ranking::{rank_properties, RankedMatch, RankingEngine, RankingOptions};
pub use repository::{
    CustomerDirectory, ListingFilter, MatchRecord, MatchStore, PropertyCatalog, RepositoryError,
};
pub use router::match_router;
pub use scoring::{
    score_match, MatchExplanation, MatchQuality, MatchScore, MatchScorer, MatchWeights,
    ScoredProperty, DEFAULT_WEIGHTS,
};
pub use service::{MarketOverview, MatchRequest, MatchResponse, MatchService, MatchServiceError};
