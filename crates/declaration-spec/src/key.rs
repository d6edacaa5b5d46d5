use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::{Deserialize, Serialize};

/// Identifier of a top-level gate question (1..=4 in the standard registry).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct QuestionId(pub u8);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Serialize,
            Deserialize,
            JsonSchema,
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

string_id!(
    /// Identifier of a family member in the roster.
    MemberId
);
string_id!(
    /// Identifier of a disorder in the question-1 checklist.
    DisorderId
);
string_id!(
    /// Identifier of a hereditary disease in the question-2 checklist.
    DiseaseId
);
string_id!(
    /// Identifier of a family-history category (second disclosure level).
    CategoryId
);
string_id!(
    /// Key of a single detail or follow-up field.
    FieldKey
);

/// Second-level key of the member-detail store: which part of the form a
/// member's detail fields belong to. Detail lookups are always keyed
/// member -> context -> field, whichever kind of section wrote them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum DetailContext {
    /// Detail block of a disorder from the question-1 checklist.
    Disorder(DisorderId),
    /// Detail block of a family-history category under question 2.
    Family(CategoryId),
    /// Minimal per-member sub-form of a plain question.
    Question(QuestionId),
}

impl fmt::Display for DetailContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetailContext::Disorder(id) => write!(f, "disorder/{}", id),
            DetailContext::Family(id) => write!(f, "family/{}", id),
            DetailContext::Question(id) => write!(f, "question/{}", id),
        }
    }
}

impl From<DetailContext> for String {
    fn from(ctx: DetailContext) -> Self {
        ctx.to_string()
    }
}

impl FromStr for DetailContext {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (kind, id) = raw
            .split_once('/')
            .ok_or_else(|| format!("detail context '{}' is missing a '/'", raw))?;
        match kind {
            "disorder" => Ok(DetailContext::Disorder(id.into())),
            "family" => Ok(DetailContext::Family(id.into())),
            "question" => {
                let number: u8 = id
                    .parse()
                    .map_err(|_| format!("question context '{}' is not a number", id))?;
                Ok(DetailContext::Question(QuestionId(number)))
            }
            other => Err(format!("unknown detail context kind '{}'", other)),
        }
    }
}

impl TryFrom<String> for DetailContext {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl JsonSchema for DetailContext {
    fn schema_name() -> Cow<'static, str> {
        "DetailContext".into()
    }

    fn json_schema(_: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "type": "string",
            "pattern": "^(disorder|family|question)/.+$"
        })
    }
}

/// Addressable section of the rendered declaration. Keys the visibility map
/// handed to the presentation adapter after every mutation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SectionKey {
    /// Member-selection panel of a gate question.
    MemberPanel { question: QuestionId },
    /// One member's detail section under a gate question.
    MemberSection { question: QuestionId, member: MemberId },
    /// Timing/hospitalization/disability block of a selected disorder.
    DisorderBlock { member: MemberId, disorder: DisorderId },
    /// Nested sub-question block of a family-history category gate.
    CategoryBlock { member: MemberId, category: CategoryId },
    /// Follow-up quantity/age block for a member with a trigger disease.
    FollowupBlock { member: MemberId },
    /// Free-text companion input of a single-select field.
    FieldText {
        member: MemberId,
        context: DetailContext,
        field: FieldKey,
    },
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionKey::MemberPanel { question } => write!(f, "q{}/members", question),
            SectionKey::MemberSection { question, member } => {
                write!(f, "q{}/{}", question, member)
            }
            SectionKey::DisorderBlock { member, disorder } => {
                write!(f, "{}/{}", member, disorder)
            }
            SectionKey::CategoryBlock { member, category } => {
                write!(f, "{}/{}", member, category)
            }
            SectionKey::FollowupBlock { member } => write!(f, "{}/followup", member),
            SectionKey::FieldText {
                member,
                context,
                field,
            } => write!(f, "{}/{}/{}_text", member, context, field),
        }
    }
}
