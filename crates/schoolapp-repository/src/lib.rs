//! # SchoolApp Repository
//!
//! Generic, criteria-driven data access over SQLite.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn TeacherDao>      (DAO interface)
//! SqliteTeacherDao              (shaku component)
//!   ↓
//! SqliteDao<Teacher>            (generic DAO, criteria → SQL)
//!   ↓  Arc<dyn DatabasePoolInterface>
//! SQLite
//! ```
//!
//! Entities opt in by implementing [`PersistentEntity`] with a static
//! [`EntitySchema`]. Criteria keys are dotted field paths resolved against
//! that schema; relation segments become joins.

pub mod criteria;
pub mod dao;
pub mod entities;
pub mod entity;
pub mod pool;
pub mod schema;
pub mod value;

pub use criteria::{Criteria, MatchMode};
pub use dao::*;
pub use entities::*;
pub use entity::PersistentEntity;
pub use pool::*;
pub use schema::{EntitySchema, FieldDef, FieldKind};
pub use value::Value;
