use serde::{Deserialize, Serialize};

/// Relative importance of each scoring dimension. The default set sums to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchWeights {
    pub affordability: f64,
    pub bedrooms: f64,
    pub community: f64,
    pub amenities: f64,
    pub market_fit: f64,
}

pub const DEFAULT_WEIGHTS: MatchWeights = MatchWeights {
    affordability: 0.35,
    bedrooms: 0.15,
    community: 0.20,
    amenities: 0.15,
    market_fit: 0.15,
};

impl MatchWeights {
    pub fn sum(&self) -> f64 {
        self.affordability + self.bedrooms + self.community + self.amenities + self.market_fit
    }
}

impl Default for MatchWeights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}
