//! Entity-DTO mappers.

mod teacher_mapper;

pub use teacher_mapper::*;
