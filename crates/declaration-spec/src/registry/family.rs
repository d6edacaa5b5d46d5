use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::key::{CategoryId, DiseaseId, FieldKey};
use crate::registry::field::FieldSpec;

/// One entry of the question-2 hereditary-disease checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FamilyDisease {
    pub id: DiseaseId,
    pub display_name: String,
    /// Whether selecting this disease forces the member's follow-up block
    /// open. Exactly 8 diseases carry this flag in the standard registry.
    #[serde(default)]
    pub followup_trigger: bool,
}

/// A family-history category: a gated option group whose affirmative answer
/// discloses a nested sub-question block (second disclosure level).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FamilyCategory {
    pub id: CategoryId,
    pub title: String,
    pub gate: FieldSpec,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_fields: Vec<FieldSpec>,
}

impl FamilyCategory {
    pub fn field(&self, key: &FieldKey) -> Option<&FieldSpec> {
        if &self.gate.key == key {
            return Some(&self.gate);
        }
        self.sub_fields.iter().find(|field| &field.key == key)
    }

    pub fn is_sub_field(&self, key: &FieldKey) -> bool {
        self.sub_fields.iter().any(|field| &field.key == key)
    }
}

/// A free-entry quantity/age question inside the follow-up block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FollowupField {
    pub key: FieldKey,
    pub title: String,
}

/// The follow-up block shown while at least one trigger disease is flagged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct FollowupSpec {
    pub fields: Vec<FollowupField>,
}

impl FollowupSpec {
    pub fn field(&self, key: &FieldKey) -> Option<&FollowupField> {
        self.fields.iter().find(|field| &field.key == key)
    }
}
