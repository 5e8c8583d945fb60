//! Aggregates module
pub mod product;
pub mod cart;
pub mod gallery;
pub mod aside;

pub use product::{DisplayedVariant, PriceDisplay, ProductCard};
pub use cart::{CartLine, CartSnapshot, CartSummary, DisplayedCart, DisplayedLine, LineControls};
pub use gallery::Gallery;
pub use aside::{AsideKind, AsideState};
