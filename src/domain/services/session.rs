//! Cart session: the single writer of the confirmed snapshot
//!
//! Submissions go into the pending log; settling an action either swaps in
//! the snapshot the API returned or, on rejection, just forgets the action so
//! the next projection reverts it. There is no retry and no cancellation: a
//! stale response settled after a newer one still replaces the snapshot until
//! the next one arrives.

use uuid::Uuid;
use crate::domain::actions::{ActionKind, PendingAction, PendingLog};
use crate::domain::aggregates::cart::{CartSnapshot, DisplayedCart};
use crate::domain::services::reconciler::reconcile_cart;
use crate::{Result, StorefrontError};

#[derive(Clone, Debug, PartialEq)]
pub enum MutationOutcome {
    Confirmed(CartSnapshot),
    Rejected(String),
}

#[derive(Clone, Debug)]
pub struct CartSession {
    confirmed: CartSnapshot,
    pending: PendingLog,
}

impl CartSession {
    pub fn new(confirmed: CartSnapshot) -> Self { Self { confirmed, pending: PendingLog::new() } }

    pub fn confirmed(&self) -> &CartSnapshot { &self.confirmed }
    pub fn pending(&self) -> &PendingLog { &self.pending }

    pub fn submit(&mut self, kind: ActionKind) -> Uuid {
        let action = PendingAction::submit(kind);
        tracing::debug!(action = %action.id, key = %action.key(), "cart action submitted");
        self.pending.push(action)
    }

    pub fn settle(&mut self, id: Uuid, outcome: MutationOutcome) -> Result<()> {
        let action = self.pending.take(id).ok_or_else(|| StorefrontError::UnknownAction(id.to_string()))?;
        match outcome {
            MutationOutcome::Confirmed(snapshot) => {
                tracing::debug!(action = %id, kind = action.kind.name(), lines = snapshot.lines.len(), "cart action confirmed");
                self.confirmed = snapshot;
            }
            MutationOutcome::Rejected(reason) => {
                tracing::warn!(action = %id, kind = action.kind.name(), %reason, "cart action rejected; reverting");
            }
        }
        Ok(())
    }

    /// Replaces the snapshot from a fresh load, leaving in-flight actions alone.
    pub fn refresh(&mut self, confirmed: CartSnapshot) { self.confirmed = confirmed; }

    pub fn projection(&self) -> DisplayedCart { reconcile_cart(&self.confirmed, &self.pending) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::actions::LineUpdate;
    use crate::domain::aggregates::cart::CartLine;

    fn session() -> CartSession {
        CartSession::new(CartSnapshot::new("C").with_line(CartLine::new("L1", "V1", 1)))
    }

    fn set(quantity: i64) -> ActionKind {
        ActionKind::LinesUpdate { lines: vec![LineUpdate { id: "L1".into(), quantity }] }
    }

    #[test]
    fn test_confirmed_mutation_replaces_snapshot() {
        let mut session = session();
        let id = session.submit(set(4));
        assert!(session.projection().line("L1").unwrap().is_optimistic);

        let confirmed = CartSnapshot::new("C").with_line(CartLine::new("L1", "V1", 4));
        session.settle(id, MutationOutcome::Confirmed(confirmed)).unwrap();
        let line = session.projection().line("L1").cloned().unwrap();
        assert_eq!(line.quantity(), 4);
        assert!(!line.is_optimistic);
        assert!(session.pending().is_empty());
    }

    #[test]
    fn test_rejected_mutation_reverts() {
        let mut session = session();
        let id = session.submit(set(9));
        assert_eq!(session.projection().line("L1").unwrap().quantity(), 9);
        session.settle(id, MutationOutcome::Rejected("out of stock".into())).unwrap();
        let line = session.projection().line("L1").cloned().unwrap();
        assert_eq!(line.quantity(), 1);
        assert!(!line.is_optimistic);
    }

    #[test]
    fn test_other_lines_unaffected_by_settle() {
        let mut session = CartSession::new(
            CartSnapshot::new("C").with_line(CartLine::new("L1", "V1", 1)).with_line(CartLine::new("L2", "V2", 1)),
        );
        let first = session.submit(set(2));
        session.submit(ActionKind::LinesUpdate { lines: vec![LineUpdate { id: "L2".into(), quantity: 6 }] });
        session.settle(first, MutationOutcome::Rejected("network".into())).unwrap();
        let cart = session.projection();
        assert_eq!(cart.line("L1").unwrap().quantity(), 1);
        assert_eq!(cart.line("L2").unwrap().quantity(), 6);
        assert!(cart.line("L2").unwrap().is_optimistic);
    }

    #[test]
    fn test_stale_confirmation_wins_until_refresh() {
        let mut session = session();
        let older = session.submit(set(2));
        let newer = session.submit(set(5));

        let at = |q| CartSnapshot::new("C").with_line(CartLine::new("L1", "V1", q));
        session.settle(newer, MutationOutcome::Confirmed(at(5))).unwrap();
        session.settle(older, MutationOutcome::Confirmed(at(2))).unwrap();
        let line = session.projection().line("L1").cloned().unwrap();
        assert_eq!(line.quantity(), 2);
        assert!(!line.is_optimistic);

        session.refresh(at(5));
        let cart = session.projection();
        assert_eq!(cart.line("L1").unwrap().quantity(), 5);
        assert!(!cart.is_optimistic);
    }

    #[test]
    fn test_settle_unknown_action() {
        let mut session = session();
        let err = session.settle(Uuid::now_v7(), MutationOutcome::Rejected("x".into())).unwrap_err();
        assert!(matches!(err, StorefrontError::UnknownAction(_)));
    }
}
