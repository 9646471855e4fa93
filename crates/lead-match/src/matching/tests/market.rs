use super::common::*;
use crate::matching::domain::PropertyListing;
use crate::matching::market::{aggregate_by_community, summarize_market, MarketTrend};

fn listing(
    id: &str,
    community: &str,
    per_sqft: Option<f64>,
    days: u32,
    views: u32,
) -> PropertyListing {
    let mut listing = villa(id);
    listing.community = community.to_string();
    listing.price_per_sqft = per_sqft;
    listing.days_on_market = days;
    listing.views = views;
    listing
}

#[test]
fn empty_catalog_has_no_communities() {
    let stats = aggregate_by_community(&[]);
    assert!(stats.is_empty());

    let summary = summarize_market(&[], &stats);
    assert_eq!(summary.total_listings, 0);
    assert_eq!(summary.avg_price, 0);
    assert!(summary.top_communities.is_empty());
}

#[test]
fn aggregates_per_community() {
    let listings = vec![
        listing("a-1", "Arabian Ranches", Some(1_000.0), 10, 150),
        listing("a-2", "Arabian Ranches", Some(1_200.0), 20, 50),
        listing("a-3", "Arabian Ranches", None, 30, 101),
        listing("m-1", "Mudon", Some(900.0), 75, 20),
    ];

    let stats = aggregate_by_community(&listings);
    assert_eq!(stats.len(), 2);

    let ranches = &stats["Arabian Ranches"];
    assert_eq!(ranches.total_listings, 3);
    assert_eq!(ranches.avg_price_per_sqft, 1_100);
    assert_eq!(ranches.avg_days_on_market, 20);
    assert_eq!(ranches.hot_properties, 2);
    assert_eq!(ranches.trend, MarketTrend::Up);

    let mudon = &stats["Mudon"];
    assert_eq!(mudon.total_listings, 1);
    assert_eq!(mudon.hot_properties, 0);
    assert_eq!(mudon.trend, MarketTrend::Down);
}

#[test]
fn trend_boundaries_are_stable() {
    let listings = vec![
        listing("s-1", "Al Furjan", Some(800.0), 30, 0),
        listing("s-2", "Damac Hills", Some(800.0), 60, 0),
    ];

    let stats = aggregate_by_community(&listings);
    assert_eq!(stats["Al Furjan"].trend, MarketTrend::Stable);
    assert_eq!(stats["Damac Hills"].trend, MarketTrend::Stable);
}

#[test]
fn exactly_one_hundred_views_is_not_hot() {
    let stats = aggregate_by_community(&[listing("h-1", "Mudon", None, 5, 100)]);
    assert_eq!(stats["Mudon"].hot_properties, 0);
    assert_eq!(stats["Mudon"].avg_price_per_sqft, 0);
}

#[test]
fn summary_orders_communities_by_listing_count() {
    let mut listings = vec![
        listing("m-1", "Mudon", Some(900.0), 10, 0),
        listing("a-1", "Arabian Ranches", Some(1_000.0), 10, 0),
        listing("a-2", "Arabian Ranches", Some(1_000.0), 10, 0),
    ];
    for (index, community) in ["Al Furjan", "Damac Hills", "MBR City", "Sobha Hartland"]
        .iter()
        .enumerate()
    {
        listings.push(listing(&format!("x-{index}"), community, None, 40, 0));
    }

    let stats = aggregate_by_community(&listings);
    let summary = summarize_market(&listings, &stats);

    assert_eq!(summary.total_listings, 7);
    assert_eq!(summary.avg_price, 2_500_000);
    assert_eq!(summary.top_communities.len(), 5);
    assert_eq!(summary.top_communities[0].community, "Arabian Ranches");
}

#[test]
fn trend_serializes_lowercase() {
    assert_eq!(
        serde_json::to_value(MarketTrend::Down).expect("serializes"),
        "down"
    );
    assert_eq!(MarketTrend::Up.label(), "up");
}
