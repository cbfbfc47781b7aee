//! Domain layer for CrossingWatch
//!
//! Contains the precipitation timeline entity, rolling-window aggregation
//! logic, condition mapping, and shared value objects. This layer has no
//! I/O dependencies and defines the ubiquitous language.

pub mod condition;
pub mod entities;
pub mod errors;
pub mod value_objects;

pub use condition::canonical_condition;
pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
