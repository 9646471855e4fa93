mod areas;
mod explanation;
mod rules;
mod weights;

pub use explanation::{MatchExplanation, MatchQuality};
pub use weights::{MatchWeights, DEFAULT_WEIGHTS};

use super::affordability::AffordabilityResult;
use super::domain::{CustomerProfile, PropertyListing};
use serde::Serialize;

/// Dimensions the scorer rates a listing on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchDimension {
    Affordability,
    Bedrooms,
    Community,
    Amenities,
    MarketFit,
}

/// One rated dimension together with the reasoning behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreComponent {
    pub dimension: MatchDimension,
    pub score: u8,
    pub notes: String,
}

/// Five sub-scores and their weighted combination, all within [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchScore {
    pub overall: u8,
    pub affordability: u8,
    pub bedrooms: u8,
    pub community: u8,
    pub amenities: u8,
    pub market_fit: u8,
}

impl MatchScore {
    fn from_components(components: &[ScoreComponent], weights: &MatchWeights) -> Self {
        let mut score = MatchScore {
            overall: 0,
            affordability: 0,
            bedrooms: 0,
            community: 0,
            amenities: 0,
            market_fit: 0,
        };

        for component in components {
            match component.dimension {
                MatchDimension::Affordability => score.affordability = component.score,
                MatchDimension::Bedrooms => score.bedrooms = component.score,
                MatchDimension::Community => score.community = component.score,
                MatchDimension::Amenities => score.amenities = component.score,
                MatchDimension::MarketFit => score.market_fit = component.score,
            }
        }

        let weighted = f64::from(score.affordability) * weights.affordability
            + f64::from(score.bedrooms) * weights.bedrooms
            + f64::from(score.community) * weights.community
            + f64::from(score.amenities) * weights.amenities
            + f64::from(score.market_fit) * weights.market_fit;
        score.overall = weighted.round().clamp(0.0, 100.0) as u8;
        score
    }
}

/// Score and explanation for a single (customer, listing) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredProperty {
    pub score: MatchScore,
    pub explanation: MatchExplanation,
}

/// Stateless scorer applying a fixed weight set.
#[derive(Debug, Clone, Default)]
pub struct MatchScorer {
    weights: MatchWeights,
}

impl MatchScorer {
    pub fn new(weights: MatchWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &MatchWeights {
        &self.weights
    }

    pub fn score(
        &self,
        customer: &CustomerProfile,
        property: &PropertyListing,
        affordability: &AffordabilityResult,
    ) -> ScoredProperty {
        let components = rules::score_dimensions(customer, property, affordability);
        let score = MatchScore::from_components(&components, &self.weights);
        let explanation = explanation::explain(&score, property, &components);

        ScoredProperty { score, explanation }
    }
}

/// Score one listing with the default weights.
pub fn score_match(
    customer: &CustomerProfile,
    property: &PropertyListing,
    affordability: &AffordabilityResult,
) -> ScoredProperty {
    MatchScorer::default().score(customer, property, affordability)
}
