//! Teacher table mapping.

use crate::schema::{EntitySchema, FieldDef};
use crate::{PersistentEntity, Value};
use schoolapp_core::{SchoolResult, Teacher, TeacherId};
use sqlx::FromRow;

/// Layout of the `teachers` table.
pub static TEACHER_SCHEMA: EntitySchema = EntitySchema {
    entity: "Teacher",
    table: "teachers",
    id_column: "id",
    id_field: "id",
    fields: &[
        FieldDef::text("vat", "vat"),
        FieldDef::text("firstname", "firstname"),
        FieldDef::text("lastname", "lastname"),
    ],
};

/// Database row representation of a teacher.
#[derive(Debug, FromRow)]
pub struct TeacherRow {
    id: i64,
    vat: String,
    firstname: String,
    lastname: String,
}

impl From<TeacherRow> for Teacher {
    fn from(row: TeacherRow) -> Self {
        Self {
            id: Some(TeacherId::new(row.id)),
            vat: row.vat,
            firstname: row.firstname,
            lastname: row.lastname,
        }
    }
}

impl PersistentEntity for Teacher {
    type Row = TeacherRow;

    fn schema() -> &'static EntitySchema {
        &TEACHER_SCHEMA
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::from(self.vat.as_str()),
            Value::from(self.firstname.as_str()),
            Value::from(self.lastname.as_str()),
        ]
    }

    fn from_row(row: TeacherRow) -> SchoolResult<Self> {
        Ok(row.into())
    }
}
