use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::key::{DisorderId, FieldKey};
use crate::registry::field::FieldSpec;

/// One entry of the question-1 disorder catalog, carrying its ordered detail
/// fields (timing, hospitalization, disability in the standard registry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DisorderDefinition {
    pub id: DisorderId,
    pub display_name: String,
    pub fields: Vec<FieldSpec>,
}

impl DisorderDefinition {
    pub fn field(&self, key: &FieldKey) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| &field.key == key)
    }
}
