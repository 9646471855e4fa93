use super::domain::{PropertyId, PropertyListing, UnknownLabel};
use serde::{Deserialize, Deserializer};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const AMENITY_SEPARATOR: char = ';';

#[derive(Debug)]
pub enum CatalogImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidField { row: usize, source: UnknownLabel },
}

impl std::fmt::Display for CatalogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogImportError::Io(err) => write!(f, "failed to read listing export: {}", err),
            CatalogImportError::Csv(err) => write!(f, "invalid listing CSV data: {}", err),
            CatalogImportError::InvalidField { row, source } => {
                write!(f, "listing export row {}: {}", row, source)
            }
        }
    }
}

impl std::error::Error for CatalogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogImportError::Io(err) => Some(err),
            CatalogImportError::Csv(err) => Some(err),
            CatalogImportError::InvalidField { source, .. } => Some(source),
        }
    }
}

impl From<std::io::Error> for CatalogImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Loads property listings from a CSV catalog export.
pub struct CatalogImporter;

impl CatalogImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<PropertyListing>, CatalogImportError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<PropertyListing>, CatalogImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut listings = Vec::new();

        for (index, record) in csv_reader.deserialize::<ListingRow>().enumerate() {
            let row = record?;
            // Header is line 1, so data rows start at 2.
            let listing = row
                .into_listing()
                .map_err(|source| CatalogImportError::InvalidField {
                    row: index + 2,
                    source,
                })?;
            listings.push(listing);
        }

        Ok(listings)
    }
}

#[derive(Debug, Deserialize)]
struct ListingRow {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Community")]
    community: String,
    #[serde(rename = "Property Type")]
    property_type: String,
    #[serde(rename = "Listing Type")]
    listing_type: String,
    #[serde(rename = "Price")]
    price: u64,
    #[serde(
        rename = "Price Per Sqft",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    price_per_sqft: Option<String>,
    #[serde(rename = "Bedrooms")]
    bedrooms: u8,
    #[serde(rename = "Bathrooms", default)]
    bathrooms: u8,
    #[serde(rename = "Size Sqft", default)]
    size_sqft: u32,
    #[serde(rename = "Amenities", default)]
    amenities: String,
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "Days On Market", default)]
    days_on_market: u32,
    #[serde(rename = "Views", default)]
    views: u32,
    #[serde(rename = "Inquiries", default)]
    inquiries: u32,
}

impl ListingRow {
    fn into_listing(self) -> Result<PropertyListing, UnknownLabel> {
        let price_per_sqft = match self.price_per_sqft.as_deref() {
            Some(raw) => Some(raw.parse::<f64>().map_err(|_| UnknownLabel {
                kind: "price per sqft",
                value: raw.to_string(),
            })?),
            None => None,
        };

        Ok(PropertyListing {
            id: PropertyId(self.id),
            title: self.title,
            community: self.community,
            property_type: self.property_type.parse()?,
            listing_type: self.listing_type.parse()?,
            price: self.price,
            price_per_sqft,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            size_sqft: self.size_sqft,
            amenities: split_amenities(&self.amenities),
            status: self.status.parse()?,
            days_on_market: self.days_on_market,
            views: self.views,
            inquiries: self.inquiries,
        })
    }
}

fn split_amenities(raw: &str) -> Vec<String> {
    raw.split(AMENITY_SEPARATOR)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
