use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::engine;
use crate::key::{CategoryId, DetailContext, DiseaseId, DisorderId, FieldKey, MemberId, QuestionId};
use crate::registry::Registry;
use crate::state::{Answer, FormState};

/// One inbound event from the presentation adapter, mirroring the engine
/// operations one-to-one. Serializable so recorded sessions can be replayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Event {
    AnswerTopQuestion {
        question: QuestionId,
        answer: Answer,
    },
    ToggleMember {
        question: QuestionId,
        member: MemberId,
        selected: bool,
    },
    ToggleDisorder {
        member: MemberId,
        disorder: DisorderId,
        selected: bool,
    },
    SelectDisorderOption {
        member: MemberId,
        disorder: DisorderId,
        field: FieldKey,
        option: String,
        checked: bool,
    },
    SelectMemberOption {
        question: QuestionId,
        member: MemberId,
        field: FieldKey,
        option: String,
        checked: bool,
    },
    SelectFamilyDisease {
        member: MemberId,
        disease: DiseaseId,
        selected: bool,
    },
    SelectFamilyDisorderOption {
        member: MemberId,
        category: CategoryId,
        field: FieldKey,
        option: String,
        checked: bool,
    },
    SaveDetailText {
        member: MemberId,
        context: DetailContext,
        field: FieldKey,
        value: String,
    },
    SaveFollowupAnswer {
        member: MemberId,
        key: FieldKey,
        value: String,
    },
    ResetAll,
    ClearMemberSelections,
}

/// Routes one event into the matching engine operation.
pub fn apply(registry: &Registry, state: &mut FormState, event: &Event) {
    match event {
        Event::AnswerTopQuestion { question, answer } => {
            engine::answer_top_question(registry, state, *question, *answer);
        }
        Event::ToggleMember {
            question,
            member,
            selected,
        } => engine::toggle_member(registry, state, *question, member, *selected),
        Event::ToggleDisorder {
            member,
            disorder,
            selected,
        } => engine::toggle_disorder(registry, state, member, disorder, *selected),
        Event::SelectDisorderOption {
            member,
            disorder,
            field,
            option,
            checked,
        } => engine::select_disorder_option(
            registry, state, member, disorder, field, option, *checked,
        ),
        Event::SelectMemberOption {
            question,
            member,
            field,
            option,
            checked,
        } => engine::select_member_option(
            registry, state, *question, member, field, option, *checked,
        ),
        Event::SelectFamilyDisease {
            member,
            disease,
            selected,
        } => engine::select_family_disease(registry, state, member, disease, *selected),
        Event::SelectFamilyDisorderOption {
            member,
            category,
            field,
            option,
            checked,
        } => engine::select_family_disorder_option(
            registry, state, member, category, field, option, *checked,
        ),
        Event::SaveDetailText {
            member,
            context,
            field,
            value,
        } => engine::save_detail_text(registry, state, member, context, field, value.clone()),
        Event::SaveFollowupAnswer { member, key, value } => {
            engine::save_followup_answer(registry, state, member, key, value.clone());
        }
        Event::ResetAll => engine::reset_all(registry, state),
        Event::ClearMemberSelections => engine::clear_member_selections(state),
    }
}
