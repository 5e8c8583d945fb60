//! Domain layer
pub mod actions;
pub mod aggregates;
pub mod services;
pub mod value_objects;
