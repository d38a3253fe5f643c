//! Data Transfer Objects (DTOs).

mod teacher_dto;

pub use teacher_dto::*;
