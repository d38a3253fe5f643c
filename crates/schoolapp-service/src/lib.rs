//! # SchoolApp Service
//!
//! Teacher use cases on top of the generic DAO layer: validated DTOs,
//! entity/DTO mappers and the shaku module that wires everything together.

pub mod dto;
pub mod r#impl;
pub mod mappers;
pub mod module;
pub mod teacher_service;

pub use dto::*;
pub use mappers::*;
pub use module::*;
pub use r#impl::TeacherServiceImpl;
pub use teacher_service::*;
