use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::key::FieldKey;

/// A single-select option group: checkbox-style controls with radio-button
/// semantics, at most one option stored at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FieldSpec {
    pub key: FieldKey,
    pub title: String,
    pub options: Vec<String>,
    /// Option value that discloses the field's dependent section: the
    /// `<key>_text` companion input, or the nested sub-question block when
    /// this field is a category gate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reveals_on: Option<String>,
}

impl FieldSpec {
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|candidate| candidate == option)
    }

    /// Key of the companion free-text input.
    pub fn text_key(&self) -> FieldKey {
        FieldKey(format!("{}_text", self.key))
    }

    pub fn reveals(&self, option: &str) -> bool {
        self.reveals_on.as_deref() == Some(option)
    }
}
