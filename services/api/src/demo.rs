use crate::infra::parse_intent;
use clap::Args;
use lead_match::error::AppError;
use lead_match::matching::affordability::group_thousands;
use lead_match::matching::{
    aggregate_by_community, summarize_market, AffordabilityPolicy, AffordabilityResult,
    BedroomRange, CatalogImporter, CommunityStats, CustomerIntent, CustomerProfile, IntakeGuard,
    ListingFilter, ListingType, MarketSummary, MatchScorer, PropertyId, PropertyListing,
    PropertyStatus, PropertyType, RankedMatch, RankingEngine, RankingOptions,
};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// Gross monthly income
    #[arg(long)]
    pub(crate) income: f64,
    /// buy, rent or invest
    #[arg(long, value_parser = parse_intent)]
    pub(crate) intent: CustomerIntent,
    /// Existing monthly debt obligations
    #[arg(long, default_value_t = 0.0)]
    pub(crate) debt: f64,
    /// Smallest acceptable bedroom count
    #[arg(long)]
    pub(crate) bedrooms_min: Option<u8>,
    /// Largest acceptable bedroom count
    #[arg(long)]
    pub(crate) bedrooms_max: Option<u8>,
    /// Preferred community (repeatable)
    #[arg(long)]
    pub(crate) community: Vec<String>,
    /// Required amenity (repeatable)
    #[arg(long)]
    pub(crate) must_have: Vec<String>,
    /// Optional amenity (repeatable)
    #[arg(long)]
    pub(crate) nice_to_have: Vec<String>,
    /// Listing CSV export. Defaults to the built-in sample catalog.
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Maximum number of matches to print
    #[arg(long)]
    pub(crate) limit: Option<i64>,
    /// Minimum overall score for a listing to be shown
    #[arg(long)]
    pub(crate) min_score: Option<i64>,
}

#[derive(Args, Debug)]
pub(crate) struct AffordabilityArgs {
    /// Gross monthly income
    #[arg(long)]
    pub(crate) income: f64,
    /// buy, rent or invest
    #[arg(long, value_parser = parse_intent)]
    pub(crate) intent: CustomerIntent,
    /// Existing monthly debt obligations
    #[arg(long, default_value_t = 0.0)]
    pub(crate) debt: f64,
}

#[derive(Args, Debug, Default)]
pub(crate) struct MarketArgs {
    /// Listing CSV export. Defaults to the built-in sample catalog.
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Monthly income of the sample lead
    #[arg(long, default_value_t = 50_000.0)]
    pub(crate) income: f64,
    /// Number of matches to print
    #[arg(long, default_value_t = 5)]
    pub(crate) limit: i64,
}

impl Default for DemoArgs {
    fn default() -> Self {
        Self {
            income: 50_000.0,
            limit: 5,
        }
    }
}

/// Listings from a CSV export when a path is given, else the sample catalog.
/// The flag reports whether the listings were imported.
pub(crate) fn load_catalog(
    path: Option<PathBuf>,
) -> Result<(Vec<PropertyListing>, bool), AppError> {
    match path {
        Some(path) => CatalogImporter::from_path(path)
            .map(|listings| (listings, true))
            .map_err(AppError::from),
        None => Ok((sample_catalog(), false)),
    }
}

/// Build the lead described on the command line. Open bedroom bounds stay open
/// and reversed bounds are swapped before the profile goes through intake.
pub(crate) fn rank_profile(args: &RankArgs) -> Result<CustomerProfile, AppError> {
    let min = args.bedrooms_min.unwrap_or(0);
    let max = args.bedrooms_max.unwrap_or(u8::MAX);
    let profile = CustomerProfile {
        intent: args.intent,
        monthly_income: args.income,
        existing_monthly_debt: args.debt,
        bedroom_range: BedroomRange::new(min.min(max), min.max(max)),
        preferred_communities: args.community.clone(),
        must_have_amenities: args.must_have.clone(),
        nice_to_have_amenities: args.nice_to_have.clone(),
    };
    Ok(IntakeGuard.normalize_profile(profile)?)
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let defaults = RankingOptions::default();
    let options = RankingOptions::from_raw(
        args.limit.unwrap_or(defaults.limit as i64),
        args.min_score.unwrap_or(i64::from(defaults.min_score)),
    );
    let profile = rank_profile(&args)?;

    let (listings, imported) = load_catalog(args.catalog)?;
    print_source(imported, listings.len());
    rank_and_render(&profile, &listings, options);
    Ok(())
}

pub(crate) fn run_affordability(args: AffordabilityArgs) {
    let policy = AffordabilityPolicy::default();
    let result = policy.assess(args.income, args.intent, args.debt);
    render_affordability(&result, policy.currency);
}

pub(crate) fn run_market(args: MarketArgs) -> Result<(), AppError> {
    let (listings, imported) = load_catalog(args.catalog)?;
    print_source(imported, listings.len());

    let available: Vec<PropertyListing> = listings
        .into_iter()
        .filter(|listing| listing.status == PropertyStatus::Available)
        .collect();
    let communities = aggregate_by_community(&available);
    let summary = summarize_market(&available, &communities);
    render_market(&summary, &communities, AffordabilityPolicy::default().currency);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("Lead matching demo");
    let listings = sample_catalog();
    print_source(false, listings.len());

    let profile = demo_profile(args.income);
    println!(
        "\nSample lead: {} | {} to {} bedrooms | prefers {}",
        profile.intent.label(),
        profile.bedroom_range.min,
        profile.bedroom_range.max,
        profile.preferred_communities.join(", ")
    );
    let min_score = i64::from(RankingOptions::default().min_score);
    let options = RankingOptions::from_raw(args.limit, min_score);
    rank_and_render(&profile, &listings, options);

    println!();
    run_market(MarketArgs::default())
}

fn print_source(imported: bool, count: usize) {
    if imported {
        println!("Data source: listing CSV import ({count} listings)");
    } else {
        println!("Data source: built-in sample catalog ({count} listings)");
    }
}

fn rank_and_render(
    profile: &CustomerProfile,
    listings: &[PropertyListing],
    options: RankingOptions,
) {
    let filter = ListingFilter::available(profile.intent.listing_type());
    let candidates: Vec<PropertyListing> = listings
        .iter()
        .filter(|listing| filter.matches(listing))
        .cloned()
        .collect();

    let policy = AffordabilityPolicy::default();
    let currency = policy.currency;
    let engine = RankingEngine::new(policy, MatchScorer::default());
    let affordability = engine.affordability(profile);
    render_affordability(&affordability, currency);

    let matches = engine.rank_with(profile, &candidates, &affordability, options);
    render_matches(&matches, candidates.len(), options, currency);
}

pub(crate) fn render_affordability(result: &AffordabilityResult, currency: &str) {
    println!(
        "\nAffordability ({}, {} {currency}/month income)",
        result.intent.label(),
        group_thousands(result.monthly_income.max(0.0) as u64)
    );
    if result.intent.is_rental() {
        println!(
            "- Max monthly rent: {} {currency}",
            group_thousands(result.max_rent_price)
        );
    } else {
        println!(
            "- Max purchase price: {} {currency}",
            group_thousands(result.max_buy_price)
        );
        println!(
            "- Max monthly payment: {} {currency}",
            group_thousands(result.max_monthly_payment)
        );
    }
    println!(
        "- DTI ratio: {:.1}% ({})",
        result.dti_ratio,
        if result.is_affordable {
            "within threshold"
        } else {
            "over threshold"
        }
    );
    println!("- {}", result.recommendation);
}

pub(crate) fn render_matches(
    matches: &[RankedMatch],
    candidates: usize,
    options: RankingOptions,
    currency: &str,
) {
    if matches.is_empty() {
        println!(
            "\nNo listings scored {} or higher ({} candidates)",
            options.min_score, candidates
        );
        return;
    }

    println!(
        "\nTop matches ({} of {} candidates, min score {})",
        matches.len(),
        candidates,
        options.min_score
    );
    for entry in matches {
        println!("{}", match_headline(entry, currency));
        println!("   {}", entry.explanation.summary);
        println!(
            "   {} | {} | {} | {} | {}",
            entry.explanation.affordability_note,
            entry.explanation.bedrooms_note,
            entry.explanation.community_note,
            entry.explanation.amenities_note,
            entry.explanation.market_note
        );
    }
}

/// `1. [92 excellent] Corner villa - Arabian Ranches (4BR villa, 2,450,000 AED)`
fn match_headline(entry: &RankedMatch, currency: &str) -> String {
    let property = &entry.property;
    format!(
        "{}. [{} {}] {} - {} ({}BR {}, {} {currency})",
        entry.rank,
        entry.score.overall,
        entry.explanation.quality.label(),
        property.title,
        property.community,
        property.bedrooms,
        property.property_type.label(),
        group_thousands(property.price)
    )
}

fn community_line(stats: &CommunityStats, currency: &str) -> String {
    format!(
        "- {}: {} listings | {} {currency}/sqft | {} days on market | {} hot | trend {}",
        stats.community,
        stats.total_listings,
        group_thousands(stats.avg_price_per_sqft),
        stats.avg_days_on_market,
        stats.hot_properties,
        stats.trend.label()
    )
}

pub(crate) fn render_market(
    summary: &MarketSummary,
    communities: &BTreeMap<String, CommunityStats>,
    currency: &str,
) {
    println!(
        "Market overview: {} available listings, average price {} {currency}",
        summary.total_listings,
        group_thousands(summary.avg_price)
    );

    if communities.is_empty() {
        println!("No community data");
        return;
    }

    println!("\nCommunities");
    for stats in communities.values() {
        println!("{}", community_line(stats, currency));
    }

    let leaders: Vec<&str> = summary
        .top_communities
        .iter()
        .map(|stats| stats.community.as_str())
        .collect();
    println!("\nMost active: {}", leaders.join(", "));
}

fn demo_profile(income: f64) -> CustomerProfile {
    CustomerProfile {
        intent: CustomerIntent::Buy,
        monthly_income: income,
        existing_monthly_debt: 2_500.0,
        bedroom_range: BedroomRange::new(3, 4),
        preferred_communities: vec![
            "Arabian Ranches".to_string(),
            "Dubai Hills Estate".to_string(),
        ],
        must_have_amenities: vec!["Private Pool".to_string()],
        nice_to_have_amenities: vec!["Gym".to_string(), "Smart Home".to_string()],
    }
}

#[allow(clippy::too_many_arguments)]
fn sample_listing(
    id: &str,
    title: &str,
    community: &str,
    property_type: PropertyType,
    listing_type: ListingType,
    price: u64,
    bedrooms: u8,
    size_sqft: u32,
    amenities: &[&str],
    days_on_market: u32,
    views: u32,
) -> PropertyListing {
    let price_per_sqft = match listing_type {
        ListingType::Sale if size_sqft > 0 => Some((price as f64 / f64::from(size_sqft)).round()),
        _ => None,
    };

    PropertyListing {
        id: PropertyId(id.to_string()),
        title: title.to_string(),
        community: community.to_string(),
        property_type,
        listing_type,
        price,
        price_per_sqft,
        bedrooms,
        bathrooms: bedrooms.saturating_add(1),
        size_sqft,
        amenities: amenities.iter().map(|value| value.to_string()).collect(),
        status: PropertyStatus::Available,
        days_on_market,
        views,
        inquiries: views / 20,
    }
}

#[rustfmt::skip]
pub(crate) fn sample_catalog() -> Vec<PropertyListing> {
    use ListingType::{Rent, Sale};
    use PropertyType::{Apartment, Penthouse, Townhouse, Villa};

    let mut listings = vec![
        sample_listing("AR-101", "Corner villa on the park", "Arabian Ranches", Villa, Sale, 2_450_000, 4, 2_600, &["Private Pool", "Garden", "Gym"], 6, 240),
        sample_listing("AR-214", "Upgraded family villa", "Arabian Ranches 2", Villa, Sale, 3_150_000, 5, 3_400, &["Private Pool", "Maid Room"], 28, 130),
        sample_listing("MD-033", "End unit townhouse", "Mudon", Townhouse, Sale, 1_980_000, 3, 2_200, &["Garden", "Community Pool"], 45, 90),
        sample_listing("DH-510", "Golf view villa", "Damac Hills", Villa, Sale, 2_800_000, 4, 3_000, &["Private Pool", "Smart Home"], 72, 60),
        sample_listing("DHE-88", "Park-facing townhouse", "Dubai Hills Estate", Townhouse, Sale, 3_900_000, 4, 2_900, &["Private Pool", "Gym", "Smart Home"], 12, 310),
        sample_listing("PJ-7", "Signature penthouse", "Palm Jumeirah", Penthouse, Sale, 12_500_000, 4, 5_200, &["Private Pool", "Beach Access", "Concierge"], 95, 420),
        sample_listing("AF-12", "Semi-detached villa", "Al Furjan", Villa, Sale, 2_100_000, 3, 2_700, &["Garden"], 38, 75),
        sample_listing("SH-404", "Lagoon apartment", "Sobha Hartland", Apartment, Sale, 1_650_000, 2, 1_350, &["Gym", "Community Pool"], 19, 150),
        sample_listing("MD-R9", "Townhouse for rent", "Mudon", Townhouse, Rent, 165_000, 3, 2_200, &["Garden"], 9, 110),
        sample_listing("DH2-R4", "Four bed villa for rent", "Damac Hills 2", Villa, Rent, 140_000, 4, 2_800, &["Community Pool"], 52, 40),
    ];

    if let Some(listing) = listings.iter_mut().find(|listing| listing.id.0 == "AF-12") {
        listing.status = PropertyStatus::UnderOffer;
    }
    listings
}
