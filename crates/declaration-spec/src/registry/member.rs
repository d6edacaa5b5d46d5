use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::key::MemberId;

/// One entry of the static family roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FamilyMember {
    pub id: MemberId,
    pub display_name: String,
    /// Relation to the insured, in the declaration's locale.
    pub relation: String,
}
