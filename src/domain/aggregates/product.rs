//! Product Aggregate

use serde::Serialize;
use crate::domain::actions::LineInput;
use crate::domain::services::tags::{self, Badge, SpecEntry, TagSummary};
use crate::domain::value_objects::Money;
use crate::{Product, ProductImage, ProductVariant};

/// Current price with the compare-at price and savings shown only when on sale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceDisplay {
    pub price: Money,
    pub compare_at_price: Option<Money>,
    pub savings_percent: Option<u32>,
}

impl PriceDisplay {
    pub fn new(price: &Money, compare_at: Option<&Money>) -> Self {
        let savings_percent = compare_at.and_then(|c| price.percent_below(c)).filter(|p| *p > 0);
        let on_sale = compare_at.is_some_and(|c| c.amount() > price.amount());
        Self {
            price: price.clone(),
            compare_at_price: compare_at.filter(|_| on_sale).cloned(),
            savings_percent,
        }
    }

    pub fn is_on_sale(&self) -> bool { self.compare_at_price.is_some() }
}

impl Product {
    pub fn tag_summary(&self) -> TagSummary { tags::parse_tags(&self.tags) }
    pub fn first_variant(&self) -> Option<&ProductVariant> { self.variants.first() }

    /// Sellable only when both the product and its first variant are.
    pub fn is_available(&self) -> bool {
        self.available_for_sale && self.first_variant().is_some_and(|v| v.available_for_sale)
    }

    pub fn price(&self) -> Option<PriceDisplay> {
        let price = &self.price_range.as_ref()?.min_variant_price;
        let compare_at = self.compare_at_price_range.as_ref().map(|r| &r.min_variant_price);
        Some(PriceDisplay::new(price, compare_at))
    }

    /// One unit of the first variant, if it can be added to the cart.
    pub fn quick_add_line(&self) -> Option<LineInput> {
        if !self.is_available() { return None; }
        self.first_variant().map(|v| LineInput { merchandise_id: v.id.clone(), quantity: 1, title: Some(self.title.clone()) })
    }

    pub fn card(&self, spec_preview_limit: usize) -> ProductCard {
        let summary = self.tag_summary();
        let available = self.is_available();
        // Unavailable products always read SOLD OUT, whatever the tags say.
        let badge = if available { summary.badge } else { Some(Badge::SoldOut) };
        ProductCard {
            handle: self.handle.clone(),
            title: self.title.clone(),
            image: self.featured_image.clone(),
            badge,
            badge_label: badge.map(|b| b.label()),
            specs: summary.specs.preview(spec_preview_limit),
            price: self.price(),
            available,
            quick_add: self.quick_add_line(),
        }
    }
}

impl ProductVariant {
    pub fn price_display(&self) -> Option<PriceDisplay> {
        self.price.as_ref().map(|p| PriceDisplay::new(p, self.compare_at_price.as_ref()))
    }

    pub fn sku_label(&self) -> &str {
        self.sku.as_deref().filter(|s| !s.is_empty()).unwrap_or("N/A")
    }

    pub fn availability_label(&self) -> &'static str {
        if self.available_for_sale { "IN STOCK" } else { "OUT OF STOCK" }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard {
    pub handle: String,
    pub title: String,
    pub image: Option<ProductImage>,
    pub badge: Option<Badge>,
    pub badge_label: Option<&'static str>,
    pub specs: Vec<SpecEntry>,
    pub price: Option<PriceDisplay>,
    pub available: bool,
    pub quick_add: Option<LineInput>,
}

/// The variant the product page shows, possibly ahead of the server.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayedVariant {
    #[serde(flatten)]
    pub variant: ProductVariant,
    pub is_optimistic: bool,
}
