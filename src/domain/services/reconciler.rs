//! Optimistic projection of pending actions over the last confirmed state.
//!
//! Both entry points are pure: they read the confirmed snapshot and the pending
//! log and build a fresh projection, so callers invoke them on every render.
//! Actions apply oldest first and the last one to touch a field wins. An
//! action whose target no longer exists is skipped.

use crate::domain::actions::{ActionKind, LineInput, LineUpdate, PendingAction, PendingLog};
use crate::domain::aggregates::cart::{CartLine, CartSnapshot, DisplayedCart, DisplayedLine, PENDING_LINE_PREFIX};
use crate::domain::aggregates::product::DisplayedVariant;
use crate::domain::value_objects::Quantity;
use crate::ProductVariant;

pub fn reconcile_cart(confirmed: &CartSnapshot, pending: &PendingLog) -> DisplayedCart {
    let mut lines: Vec<DisplayedLine> = confirmed.lines.iter().cloned().map(DisplayedLine::confirmed).collect();
    let mut is_optimistic = false;
    for action in pending.iter() {
        is_optimistic |= apply_to_lines(&mut lines, action);
    }
    DisplayedCart {
        id: confirmed.id.clone(),
        lines,
        cost: confirmed.cost.clone(),
        discount_codes: confirmed.discount_codes.clone(),
        checkout_url: confirmed.checkout_url.clone(),
        is_optimistic,
    }
}

/// Returns whether the action changed anything.
fn apply_to_lines(lines: &mut Vec<DisplayedLine>, action: &PendingAction) -> bool {
    match &action.kind {
        ActionKind::LinesAdd { lines: inputs } => add_lines(lines, action, inputs),
        ActionKind::LinesRemove { line_ids } => {
            let before = lines.len();
            lines.retain(|l| !line_ids.iter().any(|id| id == l.id()));
            if lines.len() == before {
                tracing::debug!(action = %action.id, ?line_ids, "remove targets no displayed line");
            }
            lines.len() != before
        }
        ActionKind::LinesUpdate { lines: updates } => {
            let mut changed = false;
            for update in updates {
                changed |= set_quantity(lines, action, update);
            }
            changed
        }
        ActionKind::SelectVariant { .. } => false,
    }
}

fn add_lines(lines: &mut Vec<DisplayedLine>, action: &PendingAction, inputs: &[LineInput]) -> bool {
    for (i, input) in inputs.iter().enumerate() {
        let id = format!("{PENDING_LINE_PREFIX}{}-{i}", action.id);
        lines.push(DisplayedLine { line: CartLine::pending(id, input), is_optimistic: true });
    }
    !inputs.is_empty()
}

fn set_quantity(lines: &mut [DisplayedLine], action: &PendingAction, update: &LineUpdate) -> bool {
    match lines.iter_mut().find(|l| l.id() == update.id) {
        Some(line) => {
            line.line.quantity = Quantity::clamped(update.quantity);
            line.is_optimistic = true;
            true
        }
        None => {
            tracing::debug!(action = %action.id, line_id = %update.id, "quantity update targets unknown line");
            false
        }
    }
}

/// Active variant for the product page. `candidates` are the variants a
/// selection may switch to; selecting anything else is a no-op.
pub fn reconcile_variant(
    confirmed: Option<&ProductVariant>,
    candidates: &[ProductVariant],
    pending: &PendingLog,
) -> Option<DisplayedVariant> {
    let mut current = confirmed.map(|v| DisplayedVariant { variant: v.clone(), is_optimistic: false });
    for action in pending.iter() {
        let ActionKind::SelectVariant { variant_id } = &action.kind else { continue };
        match candidates.iter().find(|v| &v.id == variant_id) {
            Some(variant) => current = Some(DisplayedVariant { variant: variant.clone(), is_optimistic: true }),
            None => tracing::debug!(action = %action.id, %variant_id, "selection targets unknown variant"),
        }
    }
    current
}
