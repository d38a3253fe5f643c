//! DAO (Data Access Object) layer.
//!
//! Trait definitions live here; implementations live in `impl/`.
//!
//! ```text
//! Service → TeacherDao (interface) → SqliteTeacherDao → SqliteDao<Teacher> → SQLite
//! ```

pub mod generic_dao;
pub mod r#impl;
pub mod teacher_dao;

pub use generic_dao::GenericDao;
pub use r#impl::{SqliteDao, SqliteTeacherDao};
pub use teacher_dao::TeacherDao;
