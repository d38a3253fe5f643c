//! # Domain
//!
//! Domain entities for SchoolApp.

pub mod entities;

pub use entities::*;
