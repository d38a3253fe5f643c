//! Schemas and row mappings for the domain entities.

mod teacher;

pub use teacher::*;
