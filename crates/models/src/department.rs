use chrono::Utc;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::record::{Record, ResourceFields};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "departments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub version: i64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Domain fields of a department. Kept in the relational store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DepartmentFields {
    pub name: String,
    pub description: String,
}

impl ResourceFields for DepartmentFields {
    const RESOURCE: &'static str = "department";

    fn validate(&self) -> Result<(), ModelError> {
        if self.name.trim().is_empty() {
            return Err(ModelError::Validation("name required".into()));
        }
        Ok(())
    }
}

impl From<Model> for Record<DepartmentFields> {
    fn from(m: Model) -> Self {
        Record {
            id: m.id,
            fields: DepartmentFields { name: m.name, description: m.description },
            created_at: m.created_at.with_timezone(&Utc),
            updated_at: m.updated_at.with_timezone(&Utc),
            version: m.version,
        }
    }
}
