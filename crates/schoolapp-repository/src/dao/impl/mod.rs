//! DAO implementations.
//!
//! Trait definitions live in the parent `dao/` module.

mod sqlite_dao;
mod teacher_dao_impl;

pub use sqlite_dao::SqliteDao;
pub use teacher_dao_impl::SqliteTeacherDao;
