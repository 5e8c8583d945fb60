//! Cart Aggregate
//!
//! `CartSnapshot` is the last cart the commerce API confirmed. `DisplayedCart`
//! is what the UI renders: the snapshot with pending actions laid over it (see
//! `services::reconciler`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::domain::actions::{join_key, LineInput};
use crate::domain::value_objects::{Money, Quantity};
use crate::{ProductImage, SelectedOption};

/// Prefix of line ids the reconciler invents for not-yet-confirmed additions.
pub const PENDING_LINE_PREFIX: &str = "pending-";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CartSnapshot {
    pub id: String,
    pub lines: Vec<CartLine>,
    pub cost: Option<CartCost>,
    pub discount_codes: Vec<DiscountCode>,
    pub checkout_url: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CartLine {
    pub id: String,
    pub quantity: Quantity,
    pub merchandise: Merchandise,
    pub cost: Option<LineCost>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Merchandise {
    pub id: String,
    pub title: String,
    pub product_title: Option<String>,
    pub product_handle: Option<String>,
    pub image: Option<ProductImage>,
    pub selected_options: Vec<SelectedOption>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineCost { pub total_amount: Money }

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CartCost {
    pub subtotal_amount: Option<Money>,
    pub total_amount: Option<Money>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountCode { pub code: String, pub applicable: bool }

impl CartSnapshot {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), updated_at: Some(Utc::now()), ..Default::default() }
    }

    pub fn with_line(mut self, line: CartLine) -> Self { self.lines.push(line); self }

    pub fn line(&self, id: &str) -> Option<&CartLine> { self.lines.iter().find(|l| l.id == id) }
}

impl CartLine {
    pub fn new(id: impl Into<String>, merchandise_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            id: id.into(),
            quantity: Quantity::new(quantity),
            merchandise: Merchandise { id: merchandise_id.into(), ..Default::default() },
            cost: None,
        }
    }

    /// Placeholder line for an addition the API has not confirmed yet.
    pub fn pending(id: String, input: &LineInput) -> Self {
        Self {
            id,
            quantity: Quantity::new(input.quantity),
            merchandise: Merchandise {
                id: input.merchandise_id.clone(),
                title: input.title.clone().unwrap_or_default(),
                ..Default::default()
            },
            cost: None,
        }
    }

    pub fn is_pending(&self) -> bool { self.id.starts_with(PENDING_LINE_PREFIX) }

    /// Selected option values, e.g. `Black / 64GB`.
    pub fn variant_label(&self) -> String {
        self.merchandise.selected_options.iter().map(|o| o.value.as_str()).collect::<Vec<_>>().join(" / ")
    }
}

// =============================================================================
// Displayed state
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayedLine {
    #[serde(flatten)]
    pub line: CartLine,
    pub is_optimistic: bool,
}

impl DisplayedLine {
    pub fn confirmed(line: CartLine) -> Self { Self { line, is_optimistic: false } }
    pub fn id(&self) -> &str { &self.line.id }
    pub fn quantity(&self) -> u32 { self.line.quantity.value() }
    pub fn controls(&self) -> LineControls { LineControls::for_line(self) }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayedCart {
    pub id: String,
    pub lines: Vec<DisplayedLine>,
    pub cost: Option<CartCost>,
    pub discount_codes: Vec<DiscountCode>,
    pub checkout_url: Option<String>,
    pub is_optimistic: bool,
}

impl DisplayedCart {
    pub fn line(&self, id: &str) -> Option<&DisplayedLine> { self.lines.iter().find(|l| l.id() == id) }
    pub fn line_count(&self) -> usize { self.lines.len() }
    pub fn is_empty(&self) -> bool { self.lines.is_empty() }

    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().fold(0u32, |acc, l| acc.saturating_add(l.quantity()))
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary {
            line_count: self.line_count(),
            total_quantity: self.total_quantity(),
            subtotal: self.cost.as_ref().and_then(|c| c.subtotal_amount.clone()).filter(|m| !m.is_zero()),
            total: self.cost.as_ref().and_then(|c| c.total_amount.clone()).filter(|m| !m.is_zero()),
            discount_codes: self.discount_codes.iter().filter(|d| d.applicable).map(|d| d.code.clone()).collect(),
            checkout_url: self.checkout_url.clone(),
        }
    }
}

/// Totals block under the line list. Amounts come from the last confirmed
/// cart; zero amounts are left out so the UI shows a placeholder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub line_count: usize,
    pub total_quantity: u32,
    pub subtotal: Option<Money>,
    pub total: Option<Money>,
    pub discount_codes: Vec<String>,
    pub checkout_url: Option<String>,
}

/// Quantity stepper and remove button state for one line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineControls {
    pub previous_quantity: u32,
    pub next_quantity: u32,
    pub decrease_disabled: bool,
    pub increase_disabled: bool,
    pub remove_disabled: bool,
    pub update_key: String,
}

impl LineControls {
    pub fn for_line(line: &DisplayedLine) -> Self {
        let quantity = line.line.quantity;
        Self {
            previous_quantity: quantity.decrement().value(),
            next_quantity: quantity.increment().value(),
            decrease_disabled: quantity.value() <= 1 || line.is_optimistic,
            increase_disabled: line.is_optimistic,
            remove_disabled: line.is_optimistic,
            update_key: join_key("LinesUpdate", &[line.id()]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn displayed(quantity: u32, is_optimistic: bool) -> DisplayedLine {
        DisplayedLine { line: CartLine::new("L1", "V1", quantity), is_optimistic }
    }

    #[test]
    fn test_controls_at_one() {
        let controls = displayed(1, false).controls();
        assert_eq!(controls.previous_quantity, 0);
        assert_eq!(controls.next_quantity, 2);
        assert!(controls.decrease_disabled);
        assert!(!controls.increase_disabled);
        assert_eq!(controls.update_key, "LinesUpdate-L1");
    }

    #[test]
    fn test_controls_locked_while_optimistic() {
        let controls = displayed(4, true).controls();
        assert!(controls.decrease_disabled && controls.increase_disabled && controls.remove_disabled);
    }

    #[test]
    fn test_controls_at_zero_never_negative() {
        assert_eq!(displayed(0, false).controls().previous_quantity, 0);
    }

    #[test]
    fn test_summary_filters_discounts() {
        let cart = DisplayedCart {
            id: "C".into(),
            lines: vec![displayed(2, false), DisplayedLine::confirmed(CartLine::new("L2", "V2", 3))],
            cost: Some(CartCost { subtotal_amount: Some(Money::usd(Decimal::new(50, 0))), total_amount: Some(Money::usd(Decimal::ZERO)) }),
            discount_codes: vec![
                DiscountCode { code: "HAUL10".into(), applicable: true },
                DiscountCode { code: "EXPIRED".into(), applicable: false },
            ],
            checkout_url: Some("https://shop.example/checkout".into()),
            is_optimistic: false,
        };
        let summary = cart.summary();
        assert_eq!(summary.line_count, 2);
        assert_eq!(summary.total_quantity, 5);
        assert_eq!(summary.discount_codes, vec!["HAUL10".to_string()]);
        assert_eq!(summary.subtotal.map(|m| m.amount()), Some(Decimal::new(50, 0)));
        assert!(summary.total.is_none());
    }

    #[test]
    fn test_variant_label() {
        let mut line = CartLine::new("L1", "V1", 1);
        line.merchandise.selected_options = vec![
            SelectedOption { name: "Color".into(), value: "Black".into() },
            SelectedOption { name: "Storage".into(), value: "64GB".into() },
        ];
        assert_eq!(line.variant_label(), "Black / 64GB");
    }

    #[test]
    fn test_snapshot_from_api_json() {
        let json = r#"{"id":"gid://Cart/1","lines":[{"id":"gid://Line/1","quantity":2,"merchandise":{"id":"gid://Variant/9","title":"Black"}}],"checkoutUrl":"https://shop.example/c/1"}"#;
        let cart: CartSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(cart.line("gid://Line/1").map(|l| l.quantity.value()), Some(2));
        assert!(cart.discount_codes.is_empty());
    }
}
