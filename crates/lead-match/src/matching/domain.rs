use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier wrapper for catalog listings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyId(pub String);

/// Identifier wrapper for captured leads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(pub String);

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raised when a textual label does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub value: String,
}

fn normalize_label(raw: &str) -> String {
    raw.trim().to_ascii_lowercase().replace([' ', '-'], "_")
}

/// What the lead is looking to do. Investors are assessed like buyers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerIntent {
    Buy,
    Rent,
    Invest,
}

impl CustomerIntent {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Rent => "rent",
            Self::Invest => "invest",
        }
    }

    /// Listing type a catalog query should be restricted to for this intent.
    pub const fn listing_type(self) -> ListingType {
        match self {
            Self::Rent => ListingType::Rent,
            Self::Buy | Self::Invest => ListingType::Sale,
        }
    }

    pub const fn is_rental(self) -> bool {
        matches!(self, Self::Rent)
    }
}

impl FromStr for CustomerIntent {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "buy" | "buyer" => Ok(Self::Buy),
            "rent" | "renter" => Ok(Self::Rent),
            "invest" | "investor" => Ok(Self::Invest),
            _ => Err(UnknownLabel {
                kind: "customer intent",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Villa,
    Townhouse,
    Apartment,
    Penthouse,
}

impl PropertyType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Villa => "villa",
            Self::Townhouse => "townhouse",
            Self::Apartment => "apartment",
            Self::Penthouse => "penthouse",
        }
    }
}

impl FromStr for PropertyType {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "villa" => Ok(Self::Villa),
            "townhouse" => Ok(Self::Townhouse),
            "apartment" => Ok(Self::Apartment),
            "penthouse" => Ok(Self::Penthouse),
            _ => Err(UnknownLabel {
                kind: "property type",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingType {
    Sale,
    Rent,
}

impl ListingType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sale => "sale",
            Self::Rent => "rent",
        }
    }
}

impl FromStr for ListingType {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "sale" | "buy" => Ok(Self::Sale),
            "rent" | "rental" => Ok(Self::Rent),
            _ => Err(UnknownLabel {
                kind: "listing type",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyStatus {
    Available,
    UnderOffer,
    Sold,
    Rented,
    OffMarket,
}

impl PropertyStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::UnderOffer => "under_offer",
            Self::Sold => "sold",
            Self::Rented => "rented",
            Self::OffMarket => "off_market",
        }
    }
}

impl FromStr for PropertyStatus {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "available" => Ok(Self::Available),
            "under_offer" => Ok(Self::UnderOffer),
            "sold" => Ok(Self::Sold),
            "rented" => Ok(Self::Rented),
            "off_market" => Ok(Self::OffMarket),
            _ => Err(UnknownLabel {
                kind: "property status",
                value: s.to_string(),
            }),
        }
    }
}

/// Inclusive bedroom range requested by a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BedroomRange {
    pub min: u8,
    pub max: u8,
}

impl BedroomRange {
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    pub const fn exactly(count: u8) -> Self {
        Self::new(count, count)
    }

    pub fn contains(&self, bedrooms: u8) -> bool {
        (self.min..=self.max).contains(&bedrooms)
    }

    /// Smallest distance from `bedrooms` to either endpoint of the range.
    pub fn distance(&self, bedrooms: u8) -> u8 {
        self.min.abs_diff(bedrooms).min(self.max.abs_diff(bedrooms))
    }
}

/// Financial profile and housing preferences for a single ranking request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub intent: CustomerIntent,
    pub monthly_income: f64,
    #[serde(default)]
    pub existing_monthly_debt: f64,
    pub bedroom_range: BedroomRange,
    #[serde(default)]
    pub preferred_communities: Vec<String>,
    #[serde(default)]
    pub must_have_amenities: Vec<String>,
    #[serde(default)]
    pub nice_to_have_amenities: Vec<String>,
}

impl CustomerProfile {
    pub fn new(intent: CustomerIntent, monthly_income: f64, bedroom_range: BedroomRange) -> Self {
        Self {
            intent,
            monthly_income,
            existing_monthly_debt: 0.0,
            bedroom_range,
            preferred_communities: Vec::new(),
            must_have_amenities: Vec::new(),
            nice_to_have_amenities: Vec::new(),
        }
    }

    pub fn has_community_preference(&self) -> bool {
        !self.preferred_communities.is_empty()
    }
}

/// Read-only listing snapshot supplied by the catalog. Rental listings quote
/// annual rent in `price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyListing {
    pub id: PropertyId,
    #[serde(default)]
    pub title: String,
    pub community: String,
    pub property_type: PropertyType,
    pub listing_type: ListingType,
    pub price: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_sqft: Option<f64>,
    pub bedrooms: u8,
    pub bathrooms: u8,
    pub size_sqft: u32,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub status: PropertyStatus,
    pub days_on_market: u32,
    pub views: u32,
    #[serde(default)]
    pub inquiries: u32,
}

impl PropertyListing {
    pub fn has_amenity(&self, amenity: &str) -> bool {
        self.amenities.iter().any(|candidate| candidate == amenity)
    }
}

/// Lifecycle of a lead in the CRM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerStatus {
    New,
    Qualified,
    Matched,
    Closed,
    Inactive,
}

/// Stored lead: contact details plus the profile the engine consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub status: CustomerStatus,
    pub profile: CustomerProfile,
    pub created_at: DateTime<Utc>,
}

/// Form data submitted by a new lead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSubmission {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub intent: CustomerIntent,
    pub monthly_income: f64,
    #[serde(default)]
    pub existing_monthly_debt: f64,
    pub bedrooms_min: u8,
    pub bedrooms_max: u8,
    #[serde(default)]
    pub preferred_communities: Vec<String>,
    #[serde(default)]
    pub must_have_amenities: Vec<String>,
    #[serde(default)]
    pub nice_to_have_amenities: Vec<String>,
}

/// Follow-up state of a persisted match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Pending,
    Viewed,
    Interested,
    Rejected,
    Contacted,
    Touring,
    Negotiating,
    Closed,
}
