//! Drawer (aside) state, passed explicitly to whatever renders the drawers

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AsideKind { Cart, Search, Mobile }

/// At most one drawer is open at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsideState { open: Option<AsideKind> }

impl AsideState {
    pub fn closed() -> Self { Self::default() }
    pub fn open(self, kind: AsideKind) -> Self { Self { open: Some(kind) } }
    pub fn close(self) -> Self { Self { open: None } }
    pub fn current(&self) -> Option<AsideKind> { self.open }
    pub fn is_open(&self, kind: AsideKind) -> bool { self.open == Some(kind) }

    /// Adding to the cart reveals the cart drawer.
    pub fn after_add_to_cart(self) -> Self { self.open(AsideKind::Cart) }

    /// Following a link out of a drawer closes it.
    pub fn after_navigate(self) -> Self { self.close() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        let state = AsideState::closed().open(AsideKind::Search);
        assert!(state.is_open(AsideKind::Search));
        let state = state.after_add_to_cart();
        assert!(state.is_open(AsideKind::Cart));
        assert!(!state.is_open(AsideKind::Search));
        assert_eq!(state.after_navigate().current(), None);
    }
}
