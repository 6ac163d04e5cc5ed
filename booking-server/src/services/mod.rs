//! External collaborators consumed by the engine

pub mod catalog;

pub use catalog::{CatalogService, PriceSource, PricedItem};
