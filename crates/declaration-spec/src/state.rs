use std::collections::{BTreeMap, BTreeSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::key::{DetailContext, DiseaseId, DisorderId, FieldKey, MemberId, QuestionId};

/// Value of a top-level gate question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    pub fn is_yes(self) -> bool {
        matches!(self, Answer::Yes)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Answer::Yes => "yes",
            Answer::No => "no",
        }
    }
}

/// Everything the declaration has collected so far. Created empty, mutated
/// only through the engine operations, discarded at the end of the session.
///
/// Detail fields are keyed member -> context -> field throughout; disease
/// flags live in `family_history` and category answers under
/// `DetailContext::Family`, so clearing one question's scope never touches
/// another's.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FormState {
    pub answers: BTreeMap<QuestionId, Answer>,
    pub selected_members: BTreeMap<QuestionId, BTreeSet<MemberId>>,
    pub selected_disorders: BTreeMap<MemberId, BTreeSet<DisorderId>>,
    pub family_history: BTreeMap<MemberId, BTreeSet<DiseaseId>>,
    pub member_details: BTreeMap<MemberId, BTreeMap<DetailContext, BTreeMap<FieldKey, String>>>,
    pub followup_answers: BTreeMap<MemberId, BTreeMap<FieldKey, String>>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(&self, question: QuestionId) -> Option<Answer> {
        self.answers.get(&question).copied()
    }

    pub fn is_member_selected(&self, question: QuestionId, member: &MemberId) -> bool {
        self.selected_members
            .get(&question)
            .is_some_and(|members| members.contains(member))
    }

    pub fn is_disorder_selected(&self, member: &MemberId, disorder: &DisorderId) -> bool {
        self.selected_disorders
            .get(member)
            .is_some_and(|disorders| disorders.contains(disorder))
    }

    pub fn has_disease(&self, member: &MemberId, disease: &DiseaseId) -> bool {
        self.family_history
            .get(member)
            .is_some_and(|diseases| diseases.contains(disease))
    }

    pub fn detail(
        &self,
        member: &MemberId,
        context: &DetailContext,
        field: &FieldKey,
    ) -> Option<&str> {
        self.member_details
            .get(member)?
            .get(context)?
            .get(field)
            .map(String::as_str)
    }

    pub fn followup(&self, member: &MemberId, key: &FieldKey) -> Option<&str> {
        self.followup_answers
            .get(member)?
            .get(key)
            .map(String::as_str)
    }

    pub(crate) fn set_detail(
        &mut self,
        member: &MemberId,
        context: DetailContext,
        field: FieldKey,
        value: String,
    ) {
        self.member_details
            .entry(member.clone())
            .or_default()
            .entry(context)
            .or_default()
            .insert(field, value);
    }

    pub(crate) fn remove_detail(
        &mut self,
        member: &MemberId,
        context: &DetailContext,
        field: &FieldKey,
    ) {
        if let Some(contexts) = self.member_details.get_mut(member) {
            if let Some(fields) = contexts.get_mut(context) {
                fields.remove(field);
                if fields.is_empty() {
                    contexts.remove(context);
                }
            }
            if contexts.is_empty() {
                self.member_details.remove(member);
            }
        }
    }

    /// Drops every context of `member` the predicate matches, pruning empty
    /// maps so hidden sections leave no stale entries behind.
    pub(crate) fn remove_contexts(
        &mut self,
        member: &MemberId,
        mut matches: impl FnMut(&DetailContext) -> bool,
    ) {
        if let Some(contexts) = self.member_details.get_mut(member) {
            contexts.retain(|context, _| !matches(context));
            if contexts.is_empty() {
                self.member_details.remove(member);
            }
        }
    }

    /// Compact binary transport of the collected answers.
    pub fn to_cbor(&self) -> Result<Vec<u8>, serde_cbor::Error> {
        serde_cbor::to_vec(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_writes_and_removals_prune_empty_maps() {
        let mut state = FormState::new();
        let member: MemberId = "david".into();
        let context = DetailContext::Disorder("ocd".into());

        state.set_detail(&member, context.clone(), "timing".into(), "value".to_string());
        assert_eq!(state.detail(&member, &context, &"timing".into()), Some("value"));

        state.remove_detail(&member, &context, &"timing".into());
        assert!(state.member_details.is_empty());
    }

    #[test]
    fn state_round_trips_through_json_and_cbor() {
        let mut state = FormState::new();
        state.answers.insert(QuestionId(1), Answer::Yes);
        state
            .selected_members
            .entry(QuestionId(1))
            .or_default()
            .insert("david".into());
        state.set_detail(
            &"david".into(),
            DetailContext::Disorder("ocd".into()),
            "hospitalization".into(),
            "כן".to_string(),
        );

        let json = state.to_json_pretty().expect("serialize json");
        let from_json: FormState = serde_json::from_str(&json).expect("deserialize json");
        assert_eq!(from_json, state);

        let cbor = state.to_cbor().expect("serialize cbor");
        let from_cbor: FormState = serde_cbor::from_slice(&cbor).expect("deserialize cbor");
        assert_eq!(from_cbor, state);
    }
}
