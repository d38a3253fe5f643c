//! Domain entities.

mod teacher;

pub use teacher::*;
