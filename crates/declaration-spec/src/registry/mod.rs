pub mod disorder;
pub mod family;
pub mod field;
pub mod member;
pub mod question;
mod standard;

pub use disorder::DisorderDefinition;
pub use family::{FamilyCategory, FamilyDisease, FollowupField, FollowupSpec};
pub use field::FieldSpec;
pub use member::FamilyMember;
pub use question::{DetailKind, Question};
pub use standard::{NO, YES};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::key::{CategoryId, DiseaseId, DisorderId, MemberId, QuestionId};

/// The static data the whole declaration is driven by: questions, family
/// roster, disorder catalog, disease checklist, category gates, and the
/// follow-up block. Immutable after construction; the engine never writes
/// into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Registry {
    pub id: String,
    pub title: String,
    pub version: String,
    pub questions: Vec<Question>,
    pub members: Vec<FamilyMember>,
    pub disorders: Vec<DisorderDefinition>,
    pub diseases: Vec<FamilyDisease>,
    pub categories: Vec<FamilyCategory>,
    #[serde(default)]
    pub followup: FollowupSpec,
}

impl Registry {
    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }

    pub fn member(&self, id: &MemberId) -> Option<&FamilyMember> {
        self.members.iter().find(|member| &member.id == id)
    }

    pub fn disorder(&self, id: &DisorderId) -> Option<&DisorderDefinition> {
        self.disorders.iter().find(|disorder| &disorder.id == id)
    }

    pub fn disease(&self, id: &DiseaseId) -> Option<&FamilyDisease> {
        self.diseases.iter().find(|disease| &disease.id == id)
    }

    pub fn category(&self, id: &CategoryId) -> Option<&FamilyCategory> {
        self.categories.iter().find(|category| &category.id == id)
    }

    /// The question whose member sections hold the disorder checklist.
    pub fn disorders_question(&self) -> Option<&Question> {
        self.questions
            .iter()
            .find(|question| matches!(question.detail, DetailKind::Disorders))
    }

    /// The question whose member sections hold the family-history checklist.
    pub fn family_question(&self) -> Option<&Question> {
        self.questions
            .iter()
            .find(|question| matches!(question.detail, DetailKind::FamilyHistory))
    }

    pub fn trigger_diseases(&self) -> impl Iterator<Item = &FamilyDisease> {
        self.diseases.iter().filter(|disease| disease.followup_trigger)
    }
}
