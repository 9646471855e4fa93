use super::super::domain::PropertyListing;
use super::{MatchScore, ScoreComponent};
use serde::Serialize;

/// Coarse bracket of the overall score used to pick the summary template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl MatchQuality {
    pub const fn from_overall(overall: u8) -> Self {
        if overall >= 85 {
            Self::Excellent
        } else if overall >= 70 {
            Self::Good
        } else if overall >= 50 {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        }
    }
}

/// Advisory text accompanying a score. Never fed back into ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchExplanation {
    pub quality: MatchQuality,
    pub summary: String,
    pub affordability_note: &'static str,
    pub bedrooms_note: &'static str,
    pub community_note: &'static str,
    pub amenities_note: &'static str,
    pub market_note: &'static str,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<String>,
}

fn bracket(score: u8, high: u8, mid: u8, notes: [&'static str; 3]) -> &'static str {
    if score >= high {
        notes[0]
    } else if score >= mid {
        notes[1]
    } else {
        notes[2]
    }
}

pub(crate) fn explain(
    score: &MatchScore,
    property: &PropertyListing,
    components: &[ScoreComponent],
) -> MatchExplanation {
    let quality = MatchQuality::from_overall(score.overall);
    let summary = match quality {
        MatchQuality::Excellent => format!(
            "Excellent match! This {}BR {} in {} meets your key criteria. We strongly recommend viewing.",
            property.bedrooms,
            property.property_type.label(),
            property.community
        ),
        MatchQuality::Good => {
            "Good match. This property fits most of your requirements. Worth considering for viewing."
                .to_string()
        }
        MatchQuality::Fair => {
            "Fair match. This property has some positives but may require compromises.".to_string()
        }
        MatchQuality::Poor => {
            "This property doesn't align well with your preferences. Keep looking for better options."
                .to_string()
        }
    };

    let highlights = components
        .iter()
        .filter(|component| !component.notes.is_empty())
        .map(|component| component.notes.clone())
        .collect();

    MatchExplanation {
        quality,
        summary,
        affordability_note: bracket(
            score.affordability,
            85,
            60,
            ["Within your budget", "Slightly above budget", "Above budget"],
        ),
        bedrooms_note: bracket(
            score.bedrooms,
            85,
            60,
            [
                "Bedroom count matches",
                "Close to desired bedroom count",
                "Bedroom count outside your range",
            ],
        ),
        community_note: bracket(
            score.community,
            85,
            60,
            [
                "In preferred community",
                "In similar area",
                "Outside preferred areas",
            ],
        ),
        amenities_note: bracket(
            score.amenities,
            85,
            60,
            [
                "Has most desired amenities",
                "Has some desired amenities",
                "Limited amenity matches",
            ],
        ),
        market_note: bracket(
            score.market_fit,
            80,
            60,
            [
                "Fresh listing, act fast",
                "Good market timing",
                "Consider negotiating",
            ],
        ),
        highlights,
    }
}
