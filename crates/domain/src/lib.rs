//! farm-assistant domain crate
//!
//! This crate contains the core domain logic following hexagonal architecture:
//! - `model`: Domain entities and value objects
//! - `intent`: Keyword classifier mapping questions to `(Category, Metric)`
//! - `dataset`: Immutable farm data table and its lookup
//! - `ports`: Trait definitions for external dependencies (adapters)
//! - `usecases`: Application use cases / business logic
//! - `policy`: Output constraints for generated answers

pub mod dataset;
pub mod intent;
pub mod model;
pub mod policy;
pub mod ports;
pub mod usecases;

pub use dataset::{DatasetEntry, FarmDataset, Lookup, LookupOrigin};
pub use intent::classify;
pub use model::*;
pub use ports::*;
