use super::super::affordability::AffordabilityResult;
use super::super::domain::{CustomerProfile, PropertyListing};
use super::areas::shares_area;
use super::{MatchDimension, ScoreComponent};

const AMENITY_BASELINE: i32 = 50;
const MUST_HAVE_PRESENT: i32 = 15;
const MUST_HAVE_MISSING: i32 = -15;
const NICE_TO_HAVE_PRESENT: i32 = 5;
const MARKET_BASELINE: i32 = 50;

fn clamp_score(raw: i32) -> u8 {
    raw.clamp(0, 100) as u8
}

pub(crate) fn score_dimensions(
    customer: &CustomerProfile,
    property: &PropertyListing,
    affordability: &AffordabilityResult,
) -> Vec<ScoreComponent> {
    vec![
        affordability_component(customer, property, affordability),
        bedrooms_component(customer, property),
        community_component(customer, property),
        amenities_component(customer, property),
        market_fit_component(property),
    ]
}

pub(crate) fn affordability_component(
    customer: &CustomerProfile,
    property: &PropertyListing,
    affordability: &AffordabilityResult,
) -> ScoreComponent {
    let ceiling = affordability.price_ceiling(customer.intent);
    if ceiling == 0 {
        return ScoreComponent {
            dimension: MatchDimension::Affordability,
            score: 0,
            notes: "Unable to calculate affordability".to_string(),
        };
    }

    let ratio = property.price as f64 / ceiling as f64;
    let (score, notes) = if ratio <= 1.0 {
        (
            100,
            format!(
                "Property price is within budget ({:.0}% under)",
                (1.0 - ratio) * 100.0
            ),
        )
    } else if ratio <= 1.05 {
        (
            85,
            "Property is up to 5% above budget (stretch possible)".to_string(),
        )
    } else if ratio <= 1.15 {
        (
            60,
            format!("Property is {:.0}% above budget", (ratio - 1.0) * 100.0),
        )
    } else if ratio <= 1.30 {
        (30, "Property is significantly above budget".to_string())
    } else {
        (10, "Property is well outside budget".to_string())
    };

    ScoreComponent {
        dimension: MatchDimension::Affordability,
        score,
        notes,
    }
}

pub(crate) fn bedrooms_component(
    customer: &CustomerProfile,
    property: &PropertyListing,
) -> ScoreComponent {
    let desired = customer.bedroom_range;
    let actual = property.bedrooms;

    let (score, notes) = if desired.contains(actual) {
        (100, format!("Perfect bedroom match: {actual} BR"))
    } else {
        match desired.distance(actual) {
            1 => (
                75,
                format!(
                    "One bedroom difference (wanted {}-{}, got {actual})",
                    desired.min, desired.max
                ),
            ),
            2 => (50, "Two bedrooms difference".to_string()),
            _ => (25, "Significant bedroom mismatch".to_string()),
        }
    };

    ScoreComponent {
        dimension: MatchDimension::Bedrooms,
        score,
        notes,
    }
}

pub(crate) fn community_component(
    customer: &CustomerProfile,
    property: &PropertyListing,
) -> ScoreComponent {
    let (score, notes) = if !customer.has_community_preference() {
        (50, "No community preference given".to_string())
    } else if customer
        .preferred_communities
        .iter()
        .any(|community| community == &property.community)
    {
        (
            100,
            format!("Property in preferred community: {}", property.community),
        )
    } else if shares_area(&property.community, &customer.preferred_communities) {
        (
            75,
            format!("Property in similar area: {}", property.community),
        )
    } else {
        (40, "Property outside preferred communities".to_string())
    };

    ScoreComponent {
        dimension: MatchDimension::Community,
        score,
        notes,
    }
}

pub(crate) fn amenities_component(
    customer: &CustomerProfile,
    property: &PropertyListing,
) -> ScoreComponent {
    let mut score = AMENITY_BASELINE;
    let mut matches: Vec<&str> = Vec::new();
    let mut misses: Vec<&str> = Vec::new();

    for amenity in &customer.must_have_amenities {
        if property.has_amenity(amenity) {
            score += MUST_HAVE_PRESENT;
            matches.push(amenity);
        } else {
            score += MUST_HAVE_MISSING;
            misses.push(amenity);
        }
    }

    for amenity in &customer.nice_to_have_amenities {
        if property.has_amenity(amenity) {
            score += NICE_TO_HAVE_PRESENT;
            matches.push(amenity);
        }
    }

    let mut notes = Vec::new();
    if !matches.is_empty() {
        let shown: Vec<&str> = matches.iter().take(3).copied().collect();
        notes.push(format!("Amenities match: {}", shown.join(", ")));
    }
    if !misses.is_empty() {
        notes.push(format!("Missing must-haves: {}", misses.join(", ")));
    }

    ScoreComponent {
        dimension: MatchDimension::Amenities,
        score: clamp_score(score),
        notes: notes.join("; "),
    }
}

pub(crate) fn market_fit_component(property: &PropertyListing) -> ScoreComponent {
    let mut score = MARKET_BASELINE;
    let mut notes = Vec::new();
    let days = property.days_on_market;

    if days < 7 {
        score += 30;
        notes.push(format!("Fresh listing ({days} days on market)"));
    } else if days < 30 {
        score += 15;
        notes.push(format!("Recent listing ({days} days on market)"));
    } else if days > 90 {
        score -= 10;
        notes.push(format!(
            "Long on market ({days} days) - consider negotiating"
        ));
    }

    if property.views > 200 {
        score += 15;
        notes.push(format!("Popular property ({} views)", property.views));
    } else if property.views > 100 {
        score += 5;
    }

    ScoreComponent {
        dimension: MatchDimension::MarketFit,
        score: clamp_score(score),
        notes: notes.join("; "),
    }
}
