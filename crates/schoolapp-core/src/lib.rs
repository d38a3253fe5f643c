//! # SchoolApp Core
//!
//! Core types, traits, and error definitions for SchoolApp.
//! This crate provides the domain model and the foundational abstractions
//! shared by the configuration, repository, and service layers.

pub mod domain;
pub mod error;
pub mod id;
pub mod pagination;
pub mod result;
pub mod telemetry;
pub mod traits;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use pagination::*;
pub use result::*;
pub use telemetry::*;
pub use traits::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
