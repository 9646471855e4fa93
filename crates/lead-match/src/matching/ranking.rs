use super::affordability::{AffordabilityPolicy, AffordabilityResult};
use super::domain::{CustomerProfile, PropertyListing};
use super::scoring::{MatchExplanation, MatchScore, MatchScorer};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_LIMIT: usize = 20;
pub const DEFAULT_MIN_SCORE: u8 = 30;

/// Truncation and threshold applied after scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingOptions {
    pub limit: usize,
    pub min_score: u8,
}

impl Default for RankingOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            min_score: DEFAULT_MIN_SCORE,
        }
    }
}

impl RankingOptions {
    /// Builds options from caller-supplied integers. Non-positive limits yield an
    /// empty ranking; scores above 255 are unreachable and saturate.
    pub fn from_raw(limit: i64, min_score: i64) -> Self {
        Self {
            limit: usize::try_from(limit.max(0)).unwrap_or(usize::MAX),
            min_score: min_score.clamp(0, i64::from(u8::MAX)) as u8,
        }
    }
}

/// A listing that survived the threshold, with its 1-based position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedMatch {
    pub property: PropertyListing,
    pub score: MatchScore,
    pub explanation: MatchExplanation,
    pub rank: usize,
}

/// Scores every candidate against one affordability baseline and orders them.
#[derive(Debug, Clone, Default)]
pub struct RankingEngine {
    policy: AffordabilityPolicy,
    scorer: MatchScorer,
}

impl RankingEngine {
    pub fn new(policy: AffordabilityPolicy, scorer: MatchScorer) -> Self {
        Self { policy, scorer }
    }

    /// Baseline used for ranking. Judged on income and intent alone; existing
    /// debt only matters to an explicit affordability assessment.
    pub fn affordability(&self, customer: &CustomerProfile) -> AffordabilityResult {
        self.policy.assess(customer.monthly_income, customer.intent, 0.0)
    }

    pub fn rank(
        &self,
        customer: &CustomerProfile,
        properties: &[PropertyListing],
        options: RankingOptions,
    ) -> Vec<RankedMatch> {
        let affordability = self.affordability(customer);
        self.rank_with(customer, properties, &affordability, options)
    }

    /// Rank against a precomputed affordability result so callers that also
    /// report the assessment do not compute it twice.
    pub fn rank_with(
        &self,
        customer: &CustomerProfile,
        properties: &[PropertyListing],
        affordability: &AffordabilityResult,
        options: RankingOptions,
    ) -> Vec<RankedMatch> {
        if options.limit == 0 {
            return Vec::new();
        }

        let mut scored: Vec<RankedMatch> = properties
            .iter()
            .filter_map(|property| {
                let scored = self.scorer.score(customer, property, affordability);
                (scored.score.overall >= options.min_score).then(|| RankedMatch {
                    property: property.clone(),
                    score: scored.score,
                    explanation: scored.explanation,
                    rank: 0,
                })
            })
            .collect();

        // `sort_by` is stable, so equal scores keep their input order.
        scored.sort_by(|a, b| b.score.overall.cmp(&a.score.overall));
        scored.truncate(options.limit);

        for (index, entry) in scored.iter_mut().enumerate() {
            entry.rank = index + 1;
        }

        debug!(
            candidates = properties.len(),
            kept = scored.len(),
            min_score = options.min_score,
            "ranked listings"
        );

        scored
    }
}

/// Rank listings for a customer with the default policy and weights.
pub fn rank_properties(
    customer: &CustomerProfile,
    properties: &[PropertyListing],
    options: RankingOptions,
) -> Vec<RankedMatch> {
    RankingEngine::default().rank(customer, properties, options)
}
