use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt::Debug;
use uuid::Uuid;

use crate::errors::ModelError;

/// Stored envelope around one resource's domain fields.
///
/// The store assigns `id`, both timestamps, and the version counter; callers
/// only ever hand over the domain fields. `version` starts at 0 and goes up
/// by exactly 1 per successful update.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record<F> {
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: F,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub version: i64,
}

/// Domain-field structs implement this so stores and services stay generic
/// over the resource type.
pub trait ResourceFields:
    Clone + Debug + PartialEq + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// Resource name used in error messages and log fields.
    const RESOURCE: &'static str;

    fn validate(&self) -> Result<(), ModelError>;
}
