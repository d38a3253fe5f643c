//! Service implementations.
//!
//! Trait definitions live in the parent module (e.g. `teacher_service.rs`).

pub mod teacher_service_impl;

pub use teacher_service_impl::TeacherServiceImpl;
