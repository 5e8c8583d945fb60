//! Storefront Core
//!
//! View-side logic for a headless storefront that renders against a hosted
//! commerce platform's GraphQL API.
//!
//! ## Features
//! - Badge and tech-spec derivation from product tags
//! - Optimistic cart and variant projections over the last confirmed snapshot
//! - Product gallery and drawer (aside) state
//! - Product card, pricing and metafield view models

pub mod api;
pub mod config;
pub mod domain;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use domain::value_objects::{Money, Quantity};

// =============================================================================
// Core Types
// =============================================================================

/// Product fields consumed from the commerce API.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    pub id: String,
    pub handle: String,
    pub title: String,
    pub vendor: Option<String>,
    pub available_for_sale: bool,
    pub tags: Vec<String>,
    pub featured_image: Option<ProductImage>,
    pub images: Vec<ProductImage>,
    pub variants: Vec<ProductVariant>,
    pub price_range: Option<PriceRange>,
    pub compare_at_price_range: Option<PriceRange>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductVariant {
    pub id: String,
    pub title: String,
    pub sku: Option<String>,
    pub available_for_sale: bool,
    pub price: Option<Money>,
    pub compare_at_price: Option<Money>,
    pub image: Option<ProductImage>,
    pub selected_options: Vec<SelectedOption>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductImage {
    pub id: String,
    pub url: String,
    pub alt_text: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedOption {
    pub name: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    pub min_variant_price: Money,
}

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StorefrontError {
    #[error("Image index {index} out of range for gallery of {len}")]
    ImageIndexOutOfRange { index: usize, len: usize },

    #[error("Unknown pending action {0}")]
    UnknownAction(String),
}

pub type Result<T> = std::result::Result<T, StorefrontError>;
