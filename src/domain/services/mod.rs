//! Domain services: pure derivations over API data
pub mod tags;
pub mod reconciler;
pub mod session;
pub mod metafields;

pub use tags::{derive_badge, derive_specs, parse_tags, Badge, SpecEntry, SpecMap, TagSummary};
pub use reconciler::{reconcile_cart, reconcile_variant};
pub use session::{CartSession, MutationOutcome};
pub use metafields::{Metafield, ProductDetails};
