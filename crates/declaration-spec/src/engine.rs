//! The disclosure operations. Every entry point is a total function over the
//! current state: unknown ids and events aimed at hidden sections are silent
//! no-ops, and hiding a section always deletes the answers stored under it.

use crate::key::{CategoryId, DetailContext, DiseaseId, DisorderId, FieldKey, MemberId, QuestionId};
use crate::registry::{DetailKind, FieldSpec, Question, Registry};
use crate::state::{Answer, FormState};
use crate::visibility::{
    category_block_visible, disorder_block_visible, followup_visible, gate_open,
    has_trigger_disease, member_panel_visible, member_section_visible,
};

/// Records a top-level answer. A "no" cascades: every piece of state scoped
/// under the question is cleared so no stale sub-answers survive the gate
/// closing. A "yes" only records and discloses the member panel; repeating it
/// is idempotent.
pub fn answer_top_question(
    registry: &Registry,
    state: &mut FormState,
    question: QuestionId,
    answer: Answer,
) {
    let Some(spec) = registry.question(question) else {
        return;
    };
    state.answers.insert(spec.id, answer);
    if !answer.is_yes() {
        clear_question_scope(registry, state, question);
    }
}

/// Selects or deselects a family member under a question. Deselecting deletes
/// the member's answers for that question's contexts only; state the same
/// member holds under other questions is untouched.
pub fn toggle_member(
    registry: &Registry,
    state: &mut FormState,
    question: QuestionId,
    member: &MemberId,
    selected: bool,
) {
    let Some(spec) = registry.question(question) else {
        return;
    };
    if registry.member(member).is_none() || !member_panel_visible(state, question) {
        return;
    }
    if selected {
        state
            .selected_members
            .entry(question)
            .or_default()
            .insert(member.clone());
    } else {
        if let Some(members) = state.selected_members.get_mut(&question) {
            members.remove(member);
            if members.is_empty() {
                state.selected_members.remove(&question);
            }
        }
        clear_member_scope(state, spec, member);
    }
}

/// Checks or unchecks a disorder on a member's question-1 checklist.
/// Unchecking purges the disorder's stored detail fields along with hiding
/// the block, matching the member-level cleanup.
pub fn toggle_disorder(
    registry: &Registry,
    state: &mut FormState,
    member: &MemberId,
    disorder: &DisorderId,
    selected: bool,
) {
    if registry.disorder(disorder).is_none() {
        return;
    }
    let Some(question) = registry.disorders_question() else {
        return;
    };
    if !member_section_visible(state, question.id, member) {
        return;
    }
    if selected {
        state
            .selected_disorders
            .entry(member.clone())
            .or_default()
            .insert(disorder.clone());
    } else {
        if let Some(disorders) = state.selected_disorders.get_mut(member) {
            disorders.remove(disorder);
            if disorders.is_empty() {
                state.selected_disorders.remove(member);
            }
        }
        let context = DetailContext::Disorder(disorder.clone());
        state.remove_contexts(member, |candidate| candidate == &context);
    }
}

/// Stores one option of a disorder detail field, radio-button style: at most
/// one option per group is kept. The affirmative hospitalization/disability
/// options disclose the companion text input; moving off them deletes it.
pub fn select_disorder_option(
    registry: &Registry,
    state: &mut FormState,
    member: &MemberId,
    disorder: &DisorderId,
    field: &FieldKey,
    option: &str,
    checked: bool,
) {
    let Some(definition) = registry.disorder(disorder) else {
        return;
    };
    let Some(field_spec) = definition.field(field) else {
        return;
    };
    if !field_spec.has_option(option) || !disorder_block_visible(registry, state, member, disorder)
    {
        return;
    }
    let context = DetailContext::Disorder(disorder.clone());
    write_option(state, member, &context, field_spec, option, checked);
}

/// Stores one option of the minimal per-member sub-form carried by the plain
/// questions (those with neither a disorder nor a family-history checklist).
pub fn select_member_option(
    registry: &Registry,
    state: &mut FormState,
    question: QuestionId,
    member: &MemberId,
    field: &FieldKey,
    option: &str,
    checked: bool,
) {
    let Some(spec) = registry.question(question) else {
        return;
    };
    let DetailKind::Simple { fields } = &spec.detail else {
        return;
    };
    let Some(field_spec) = fields.iter().find(|candidate| &candidate.key == field) else {
        return;
    };
    if !field_spec.has_option(option) || !member_section_visible(state, question, member) {
        return;
    }
    let context = DetailContext::Question(question);
    write_option(state, member, &context, field_spec, option, checked);
}

/// Flags a hereditary disease on a member's question-2 checklist and keeps
/// the follow-up block consistent: the moment the last trigger disease is
/// unchecked, the member's follow-up answers are deleted.
pub fn select_family_disease(
    registry: &Registry,
    state: &mut FormState,
    member: &MemberId,
    disease: &DiseaseId,
    selected: bool,
) {
    if registry.disease(disease).is_none() {
        return;
    }
    let Some(question) = registry.family_question() else {
        return;
    };
    if !member_section_visible(state, question.id, member) {
        return;
    }
    if selected {
        state
            .family_history
            .entry(member.clone())
            .or_default()
            .insert(disease.clone());
    } else if let Some(diseases) = state.family_history.get_mut(member) {
        diseases.remove(disease);
        if diseases.is_empty() {
            state.family_history.remove(member);
        }
    }
    if !has_trigger_disease(registry, state, member) {
        state.followup_answers.remove(member);
    }
}

/// Stores one option of a family-history category field. Category gates add a
/// second disclosure level: closing a gate deletes the nested sub-block's
/// answers, and sub-field writes are ignored while the gate is shut.
pub fn select_family_disorder_option(
    registry: &Registry,
    state: &mut FormState,
    member: &MemberId,
    category: &CategoryId,
    field: &FieldKey,
    option: &str,
    checked: bool,
) {
    let Some(category_spec) = registry.category(category) else {
        return;
    };
    let Some(field_spec) = category_spec.field(field) else {
        return;
    };
    let Some(question) = registry.family_question() else {
        return;
    };
    if !field_spec.has_option(option) || !member_section_visible(state, question.id, member) {
        return;
    }
    if category_spec.is_sub_field(field)
        && !category_block_visible(registry, state, member, category)
    {
        return;
    }
    let context = DetailContext::Family(category.clone());
    write_option(state, member, &context, field_spec, option, checked);

    if &category_spec.gate.key == field && !gate_open(state, member, &context, &category_spec.gate)
    {
        for sub_field in &category_spec.sub_fields {
            state.remove_detail(member, &context, &sub_field.key);
            state.remove_detail(member, &context, &sub_field.text_key());
        }
    }
}

/// Writes the free-text companion of a single-select field. A no-op while the
/// text input is not disclosed.
pub fn save_detail_text(
    registry: &Registry,
    state: &mut FormState,
    member: &MemberId,
    context: &DetailContext,
    field: &FieldKey,
    value: impl Into<String>,
) {
    let Some(field_spec) = resolve_text_field(registry, context, field) else {
        return;
    };
    let parent_visible = match context {
        DetailContext::Disorder(disorder) => {
            disorder_block_visible(registry, state, member, disorder)
        }
        DetailContext::Family(category) => {
            category_block_visible(registry, state, member, category)
        }
        DetailContext::Question(question) => member_section_visible(state, *question, member),
    };
    if !parent_visible || !gate_open(state, member, context, field_spec) {
        return;
    }
    state.set_detail(member, context.clone(), field_spec.text_key(), value.into());
}

/// Writes a follow-up quantity/age answer; no side effects. Ignored while
/// the member's follow-up block is hidden.
pub fn save_followup_answer(
    registry: &Registry,
    state: &mut FormState,
    member: &MemberId,
    key: &FieldKey,
    value: impl Into<String>,
) {
    if registry.followup.field(key).is_none() || !followup_visible(registry, state, member) {
        return;
    }
    state
        .followup_answers
        .entry(member.clone())
        .or_default()
        .insert(key.clone(), value.into());
}

/// The auto-answer-no convenience: every question answered "no", all nested
/// state cleared, all sections collapsed.
pub fn reset_all(registry: &Registry, state: &mut FormState) {
    *state = FormState::new();
    for question in &registry.questions {
        state.answers.insert(question.id, Answer::No);
    }
}

/// The manual clear action: drops all member, detail, and follow-up state
/// across every question without touching the top-level answers.
pub fn clear_member_selections(state: &mut FormState) {
    state.selected_members.clear();
    state.selected_disorders.clear();
    state.family_history.clear();
    state.member_details.clear();
    state.followup_answers.clear();
}

fn clear_question_scope(registry: &Registry, state: &mut FormState, question: QuestionId) {
    let members = state.selected_members.remove(&question).unwrap_or_default();
    if let Some(spec) = registry.question(question) {
        for member in &members {
            clear_member_scope(state, spec, member);
        }
    }
}

fn clear_member_scope(state: &mut FormState, question: &Question, member: &MemberId) {
    match &question.detail {
        DetailKind::Disorders => {
            state.selected_disorders.remove(member);
            state.remove_contexts(member, |context| {
                matches!(context, DetailContext::Disorder(_))
            });
        }
        DetailKind::FamilyHistory => {
            state.family_history.remove(member);
            state.followup_answers.remove(member);
            state.remove_contexts(member, |context| {
                matches!(context, DetailContext::Family(_))
            });
        }
        DetailKind::Simple { .. } => {
            let target = DetailContext::Question(question.id);
            state.remove_contexts(member, |context| context == &target);
        }
    }
}

fn write_option(
    state: &mut FormState,
    member: &MemberId,
    context: &DetailContext,
    field: &FieldSpec,
    option: &str,
    checked: bool,
) {
    if checked {
        state.set_detail(
            member,
            context.clone(),
            field.key.clone(),
            option.to_string(),
        );
        if !field.reveals(option) {
            state.remove_detail(member, context, &field.text_key());
        }
    } else if state.detail(member, context, &field.key) == Some(option) {
        state.remove_detail(member, context, &field.key);
        state.remove_detail(member, context, &field.text_key());
    }
}

fn resolve_text_field<'a>(
    registry: &'a Registry,
    context: &DetailContext,
    field: &FieldKey,
) -> Option<&'a FieldSpec> {
    let field_spec = match context {
        DetailContext::Disorder(disorder) => registry.disorder(disorder)?.field(field)?,
        DetailContext::Family(category) => {
            let category_spec = registry.category(category)?;
            // Gates disclose the sub-block, not a text input.
            if !category_spec.is_sub_field(field) {
                return None;
            }
            category_spec.field(field)?
        }
        DetailContext::Question(question) => match &registry.question(*question)?.detail {
            DetailKind::Simple { fields } => {
                fields.iter().find(|candidate| &candidate.key == field)?
            }
            _ => return None,
        },
    };
    field_spec.reveals_on.is_some().then_some(field_spec)
}
