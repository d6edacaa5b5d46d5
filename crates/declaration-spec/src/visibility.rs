use std::collections::BTreeMap;

use crate::key::{CategoryId, DetailContext, DisorderId, MemberId, QuestionId, SectionKey};
use crate::registry::{DetailKind, FieldSpec, Registry};
use crate::state::FormState;

pub type VisibilityMap = BTreeMap<SectionKey, bool>;

/// Computes the full visibility set for the presentation adapter: one entry
/// per section the registry can produce, derived purely from the current
/// state. Recomputed after every mutating operation.
pub fn resolve_visibility(registry: &Registry, state: &FormState) -> VisibilityMap {
    let mut map = VisibilityMap::new();

    for question in &registry.questions {
        if !question.members {
            continue;
        }
        map.insert(
            SectionKey::MemberPanel { question: question.id },
            member_panel_visible(state, question.id),
        );

        for member in &registry.members {
            let section_visible = member_section_visible(state, question.id, &member.id);
            map.insert(
                SectionKey::MemberSection {
                    question: question.id,
                    member: member.id.clone(),
                },
                section_visible,
            );

            match &question.detail {
                DetailKind::Disorders => {
                    for disorder in &registry.disorders {
                        let block_visible =
                            section_visible && state.is_disorder_selected(&member.id, &disorder.id);
                        map.insert(
                            SectionKey::DisorderBlock {
                                member: member.id.clone(),
                                disorder: disorder.id.clone(),
                            },
                            block_visible,
                        );
                        let context = DetailContext::Disorder(disorder.id.clone());
                        for field in &disorder.fields {
                            insert_text_visibility(
                                &mut map,
                                state,
                                &member.id,
                                &context,
                                field,
                                block_visible,
                            );
                        }
                    }
                }
                DetailKind::FamilyHistory => {
                    for category in &registry.categories {
                        let context = DetailContext::Family(category.id.clone());
                        let block_visible = section_visible
                            && gate_open(state, &member.id, &context, &category.gate);
                        map.insert(
                            SectionKey::CategoryBlock {
                                member: member.id.clone(),
                                category: category.id.clone(),
                            },
                            block_visible,
                        );
                        for field in &category.sub_fields {
                            insert_text_visibility(
                                &mut map,
                                state,
                                &member.id,
                                &context,
                                field,
                                block_visible,
                            );
                        }
                    }
                    map.insert(
                        SectionKey::FollowupBlock {
                            member: member.id.clone(),
                        },
                        section_visible && has_trigger_disease(registry, state, &member.id),
                    );
                }
                DetailKind::Simple { fields } => {
                    let context = DetailContext::Question(question.id);
                    for field in fields {
                        insert_text_visibility(
                            &mut map,
                            state,
                            &member.id,
                            &context,
                            field,
                            section_visible,
                        );
                    }
                }
            }
        }
    }

    map
}

fn insert_text_visibility(
    map: &mut VisibilityMap,
    state: &FormState,
    member: &MemberId,
    context: &DetailContext,
    field: &FieldSpec,
    parent_visible: bool,
) {
    if field.reveals_on.is_none() {
        return;
    }
    map.insert(
        SectionKey::FieldText {
            member: member.clone(),
            context: context.clone(),
            field: field.key.clone(),
        },
        parent_visible && gate_open(state, member, context, field),
    );
}

pub(crate) fn member_panel_visible(state: &FormState, question: QuestionId) -> bool {
    state.answer(question).is_some_and(|answer| answer.is_yes())
}

pub(crate) fn member_section_visible(
    state: &FormState,
    question: QuestionId,
    member: &MemberId,
) -> bool {
    member_panel_visible(state, question) && state.is_member_selected(question, member)
}

pub(crate) fn disorder_block_visible(
    registry: &Registry,
    state: &FormState,
    member: &MemberId,
    disorder: &DisorderId,
) -> bool {
    registry.disorders_question().is_some_and(|question| {
        member_section_visible(state, question.id, member)
            && state.is_disorder_selected(member, disorder)
    })
}

pub(crate) fn category_block_visible(
    registry: &Registry,
    state: &FormState,
    member: &MemberId,
    category: &CategoryId,
) -> bool {
    let Some(question) = registry.family_question() else {
        return false;
    };
    let Some(category) = registry.category(category) else {
        return false;
    };
    member_section_visible(state, question.id, member)
        && gate_open(
            state,
            member,
            &DetailContext::Family(category.id.clone()),
            &category.gate,
        )
}

pub(crate) fn followup_visible(registry: &Registry, state: &FormState, member: &MemberId) -> bool {
    registry.family_question().is_some_and(|question| {
        member_section_visible(state, question.id, member)
            && has_trigger_disease(registry, state, member)
    })
}

/// True when the stored option of `field` is the one that discloses its
/// dependent section.
pub(crate) fn gate_open(
    state: &FormState,
    member: &MemberId,
    context: &DetailContext,
    field: &FieldSpec,
) -> bool {
    state
        .detail(member, context, &field.key)
        .is_some_and(|stored| field.reveals(stored))
}

pub(crate) fn has_trigger_disease(
    registry: &Registry,
    state: &FormState,
    member: &MemberId,
) -> bool {
    registry
        .trigger_diseases()
        .any(|disease| state.has_disease(member, &disease.id))
}
