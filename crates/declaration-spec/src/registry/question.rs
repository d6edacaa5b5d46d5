use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::key::QuestionId;
use crate::registry::field::FieldSpec;

/// Shape of the per-member detail section a question discloses once a member
/// is selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetailKind {
    /// Disorder checklist, each selected disorder opening its field block.
    Disorders,
    /// Hereditary-disease checklist, category gates, and the conditional
    /// follow-up block.
    FamilyHistory,
    /// Minimal single-select sub-form.
    Simple { fields: Vec<FieldSpec> },
}

/// A top-level yes/no gate question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Question {
    pub id: QuestionId,
    pub title: String,
    pub prompt: String,
    /// Whether a "yes" answer discloses the member-selection panel.
    #[serde(default = "default_true")]
    pub members: bool,
    pub detail: DetailKind,
}

fn default_true() -> bool {
    true
}

impl Question {
    pub fn has_disorders(&self) -> bool {
        matches!(self.detail, DetailKind::Disorders)
    }
}
