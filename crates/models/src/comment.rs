use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::record::ResourceFields;

/// Domain fields of a chat comment. Kept in the document-backed store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommentFields {
    pub role: String,
    pub content: String,
}

impl ResourceFields for CommentFields {
    const RESOURCE: &'static str = "comment";

    fn validate(&self) -> Result<(), ModelError> {
        if self.role.trim().is_empty() {
            return Err(ModelError::Validation("role required".into()));
        }
        Ok(())
    }
}
