use super::domain::PropertyListing;
use serde::Serialize;
use std::collections::BTreeMap;

const HOT_VIEW_THRESHOLD: u32 = 100;
const TOP_COMMUNITY_COUNT: usize = 5;

/// Direction a community's market is leaning, inferred from listing age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketTrend {
    Up,
    Stable,
    Down,
}

impl MarketTrend {
    fn from_days_on_market(avg_days: f64) -> Self {
        if avg_days < 30.0 {
            Self::Up
        } else if avg_days > 60.0 {
            Self::Down
        } else {
            Self::Stable
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Stable => "stable",
            Self::Down => "down",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommunityStats {
    pub community: String,
    pub avg_price_per_sqft: u64,
    pub avg_days_on_market: u32,
    pub total_listings: usize,
    pub hot_properties: usize,
    pub trend: MarketTrend,
}

/// Group listings by community and summarise each group.
pub fn aggregate_by_community(properties: &[PropertyListing]) -> BTreeMap<String, CommunityStats> {
    let mut grouped: BTreeMap<&str, Vec<&PropertyListing>> = BTreeMap::new();
    for property in properties {
        grouped
            .entry(property.community.as_str())
            .or_default()
            .push(property);
    }

    grouped
        .into_iter()
        .map(|(community, listings)| {
            let priced: Vec<f64> = listings
                .iter()
                .filter_map(|listing| listing.price_per_sqft)
                .filter(|value| value.is_finite() && *value > 0.0)
                .collect();
            let avg_price_per_sqft = if priced.is_empty() {
                0.0
            } else {
                priced.iter().sum::<f64>() / priced.len() as f64
            };

            let avg_days = listings
                .iter()
                .map(|listing| f64::from(listing.days_on_market))
                .sum::<f64>()
                / listings.len() as f64;

            let hot_properties = listings
                .iter()
                .filter(|listing| listing.views > HOT_VIEW_THRESHOLD)
                .count();

            let stats = CommunityStats {
                community: community.to_string(),
                avg_price_per_sqft: avg_price_per_sqft.round() as u64,
                avg_days_on_market: avg_days.round() as u32,
                total_listings: listings.len(),
                hot_properties,
                trend: MarketTrend::from_days_on_market(avg_days),
            };
            (community.to_string(), stats)
        })
        .collect()
}

/// Catalog-wide headline figures for dashboards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketSummary {
    pub total_listings: usize,
    pub avg_price: u64,
    pub top_communities: Vec<CommunityStats>,
}

pub fn summarize_market(
    properties: &[PropertyListing],
    communities: &BTreeMap<String, CommunityStats>,
) -> MarketSummary {
    let avg_price = if properties.is_empty() {
        0
    } else {
        let total: f64 = properties.iter().map(|listing| listing.price as f64).sum();
        (total / properties.len() as f64).round() as u64
    };

    let mut ranked: Vec<&CommunityStats> = communities.values().collect();
    ranked.sort_by(|a, b| b.total_listings.cmp(&a.total_listings));

    MarketSummary {
        total_listings: properties.len(),
        avg_price,
        top_communities: ranked
            .into_iter()
            .take(TOP_COMMUNITY_COUNT)
            .cloned()
            .collect(),
    }
}
