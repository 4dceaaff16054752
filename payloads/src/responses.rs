use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ProductId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    /// Empty when the listing does not report one.
    #[serde(default)]
    pub category: String,
    /// Serialized as a JSON number to stay compatible with public listing
    /// APIs that report prices as floats. Missing or null when unknown.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
}

/// One page of the products listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductList {
    #[serde(default)]
    pub products: Vec<Product>,
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
}

/// An undecoded page of an arbitrary listing endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPage {
    /// JSON body of the response
    pub body: serde_json::Value,
    /// Parsed total-count header, if present and valid
    pub total_count: Option<u64>,
}

/// Parse a total-count header value. Leading and trailing whitespace is
/// ignored; anything else that is not a non-negative integer yields `None`.
pub fn parse_total_count(value: Option<&str>) -> Option<u64> {
    value.and_then(|v| v.trim().parse::<u64>().ok())
}
