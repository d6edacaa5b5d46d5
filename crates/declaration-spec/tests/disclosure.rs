use declaration_spec::{
    Answer, DetailContext, FormState, MemberId, QuestionId, Registry, SectionKey, YES,
    answer_top_question,
    clear_member_selections, reset_all, resolve_visibility, save_detail_text,
    save_followup_answer, select_disorder_option, select_family_disease,
    select_family_disorder_option, select_member_option, toggle_disorder, toggle_member,
    try_submit,
};

fn q(n: u8) -> QuestionId {
    QuestionId(n)
}

/// Answers question 1 with yes, selects david, and checks ocd.
fn disclose_ocd(registry: &Registry, state: &mut FormState) {
    answer_top_question(registry, state, q(1), Answer::Yes);
    toggle_member(registry, state, q(1), &"david".into(), true);
    toggle_disorder(registry, state, &"david".into(), &"ocd".into(), true);
}

#[test]
fn answering_no_clears_all_descendant_state() {
    let registry = Registry::standard();
    let mut state = FormState::new();
    disclose_ocd(&registry, &mut state);
    select_disorder_option(
        &registry,
        &mut state,
        &"david".into(),
        &"ocd".into(),
        &"hospitalization".into(),
        YES,
        true,
    );

    answer_top_question(&registry, &mut state, q(1), Answer::No);

    assert_eq!(state.answer(q(1)), Some(Answer::No));
    assert!(!state.selected_members.contains_key(&q(1)));
    assert!(state.selected_disorders.is_empty());
    assert!(state.member_details.is_empty());

    let visibility = resolve_visibility(&registry, &state);
    assert!(visibility.values().all(|visible| !visible));
}

#[test]
fn answering_yes_twice_is_idempotent() {
    let registry = Registry::standard();
    let mut once = FormState::new();
    answer_top_question(&registry, &mut once, q(1), Answer::Yes);
    toggle_member(&registry, &mut once, q(1), &"david".into(), true);

    let mut twice = once.clone();
    answer_top_question(&registry, &mut twice, q(1), Answer::Yes);

    assert_eq!(twice, once);
    assert_eq!(
        resolve_visibility(&registry, &twice),
        resolve_visibility(&registry, &once)
    );
}

#[test]
fn disorder_hide_show_cycle_restores_default_fields() {
    let registry = Registry::standard();
    let mut state = FormState::new();
    disclose_ocd(&registry, &mut state);
    select_disorder_option(
        &registry,
        &mut state,
        &"david".into(),
        &"ocd".into(),
        &"timing".into(),
        "בחמש השנים האחרונות",
        true,
    );

    toggle_disorder(&registry, &mut state, &"david".into(), &"ocd".into(), false);
    toggle_disorder(&registry, &mut state, &"david".into(), &"ocd".into(), true);

    let context = DetailContext::Disorder("ocd".into());
    assert_eq!(state.detail(&"david".into(), &context, &"timing".into()), None);
    assert!(state.is_disorder_selected(&"david".into(), &"ocd".into()));
}

#[test]
fn option_groups_hold_at_most_one_value() {
    let registry = Registry::standard();
    let mut state = FormState::new();
    disclose_ocd(&registry, &mut state);

    for option in ["בחמש השנים האחרונות", "לפני למעלה מחמש שנים"] {
        select_disorder_option(
            &registry,
            &mut state,
            &"david".into(),
            &"ocd".into(),
            &"timing".into(),
            option,
            true,
        );
    }

    let david: MemberId = "david".into();
    let context = DetailContext::Disorder("ocd".into());
    assert_eq!(
        state.detail(&david, &context, &"timing".into()),
        Some("לפני למעלה מחמש שנים")
    );
    assert_eq!(state.member_details[&david][&context].len(), 1);
}

#[test]
fn hospitalization_yes_discloses_text_input_and_no_deletes_it() {
    let registry = Registry::standard();
    let mut state = FormState::new();
    disclose_ocd(&registry, &mut state);
    let david = "david".into();
    let ocd = "ocd".into();
    let context = DetailContext::Disorder("ocd".into());

    select_disorder_option(
        &registry,
        &mut state,
        &david,
        &ocd,
        &"hospitalization".into(),
        YES,
        true,
    );
    assert_eq!(
        state.detail(&david, &context, &"hospitalization".into()),
        Some(YES)
    );

    let text_section = SectionKey::FieldText {
        member: david.clone(),
        context: context.clone(),
        field: "hospitalization".into(),
    };
    let visibility = resolve_visibility(&registry, &state);
    assert_eq!(visibility.get(&text_section), Some(&true));

    save_detail_text(
        &registry,
        &mut state,
        &david,
        &context,
        &"hospitalization".into(),
        "בית חולים מרכזי",
    );
    assert_eq!(
        state.detail(&david, &context, &"hospitalization_text".into()),
        Some("בית חולים מרכזי")
    );

    select_disorder_option(
        &registry,
        &mut state,
        &david,
        &ocd,
        &"hospitalization".into(),
        "לא",
        true,
    );
    assert_eq!(
        state.detail(&david, &context, &"hospitalization_text".into()),
        None
    );
    let visibility = resolve_visibility(&registry, &state);
    assert_eq!(visibility.get(&text_section), Some(&false));
}

#[test]
fn followup_block_tracks_the_trigger_disease_set() {
    let registry = Registry::standard();
    let mut state = FormState::new();
    let rivka = "rivka".into();
    answer_top_question(&registry, &mut state, q(2), Answer::Yes);
    toggle_member(&registry, &mut state, q(2), &rivka, true);

    // A non-trigger disease alone does not open the follow-up block.
    select_family_disease(&registry, &mut state, &rivka, &"diabetes".into(), true);
    let followup = SectionKey::FollowupBlock {
        member: rivka.clone(),
    };
    assert_eq!(
        resolve_visibility(&registry, &state).get(&followup),
        Some(&false)
    );
    save_followup_answer(&registry, &mut state, &rivka, &"affected_count".into(), "2");
    assert!(state.followup_answers.is_empty());

    select_family_disease(&registry, &mut state, &rivka, &"tay-sachs".into(), true);
    assert_eq!(
        resolve_visibility(&registry, &state).get(&followup),
        Some(&true)
    );
    save_followup_answer(&registry, &mut state, &rivka, &"affected_count".into(), "2");
    assert_eq!(state.followup(&rivka, &"affected_count".into()), Some("2"));

    // Unchecking the last trigger hides the block and prunes the answers.
    select_family_disease(&registry, &mut state, &rivka, &"tay-sachs".into(), false);
    assert_eq!(
        resolve_visibility(&registry, &state).get(&followup),
        Some(&false)
    );
    assert!(state.followup_answers.is_empty());
    assert!(state.has_disease(&rivka, &"diabetes".into()));
}

#[test]
fn category_gate_opens_and_closes_the_nested_block() {
    let registry = Registry::standard();
    let mut state = FormState::new();
    let tamar = "tamar".into();
    let polyposis = "familial-polyposis".into();
    let context = DetailContext::Family("familial-polyposis".into());
    answer_top_question(&registry, &mut state, q(2), Answer::Yes);
    toggle_member(&registry, &mut state, q(2), &tamar, true);

    // Sub-field writes bounce while the gate is shut.
    select_family_disorder_option(
        &registry,
        &mut state,
        &tamar,
        &polyposis,
        &"colonoscopy".into(),
        YES,
        true,
    );
    assert_eq!(state.detail(&tamar, &context, &"colonoscopy".into()), None);

    select_family_disorder_option(
        &registry,
        &mut state,
        &tamar,
        &polyposis,
        &"polyposis".into(),
        YES,
        true,
    );
    let block = SectionKey::CategoryBlock {
        member: tamar.clone(),
        category: polyposis.clone(),
    };
    assert_eq!(resolve_visibility(&registry, &state).get(&block), Some(&true));

    select_family_disorder_option(
        &registry,
        &mut state,
        &tamar,
        &polyposis,
        &"colonoscopy".into(),
        YES,
        true,
    );
    save_detail_text(
        &registry,
        &mut state,
        &tamar,
        &context,
        &"colonoscopy".into(),
        "לפני שנתיים",
    );
    assert_eq!(
        state.detail(&tamar, &context, &"colonoscopy_text".into()),
        Some("לפני שנתיים")
    );

    // Closing the gate deletes the nested answers, not just their display.
    select_family_disorder_option(
        &registry,
        &mut state,
        &tamar,
        &polyposis,
        &"polyposis".into(),
        "לא",
        true,
    );
    assert_eq!(resolve_visibility(&registry, &state).get(&block), Some(&false));
    assert_eq!(state.detail(&tamar, &context, &"colonoscopy".into()), None);
    assert_eq!(state.detail(&tamar, &context, &"colonoscopy_text".into()), None);
    assert_eq!(state.detail(&tamar, &context, &"polyposis".into()), Some("לא"));
}

#[test]
fn deselecting_a_member_under_one_question_keeps_their_other_answers() {
    let registry = Registry::standard();
    let mut state = FormState::new();
    let david = "david".into();
    disclose_ocd(&registry, &mut state);

    answer_top_question(&registry, &mut state, q(2), Answer::Yes);
    toggle_member(&registry, &mut state, q(2), &david, true);
    select_family_disease(&registry, &mut state, &david, &"gaucher".into(), true);
    save_followup_answer(&registry, &mut state, &david, &"diagnosis_age".into(), "30");

    toggle_member(&registry, &mut state, q(2), &david, false);

    assert!(!state.is_member_selected(q(2), &david));
    assert!(state.family_history.is_empty());
    assert!(state.followup_answers.is_empty());
    // The question-1 selections survive untouched.
    assert!(state.is_member_selected(q(1), &david));
    assert!(state.is_disorder_selected(&david, &"ocd".into()));
}

#[test]
fn plain_questions_carry_a_minimal_sub_form_per_member() {
    let registry = Registry::standard();
    let mut state = FormState::new();
    let yosef: MemberId = "yosef".into();
    let context = DetailContext::Question(q(3));

    // Hidden section, the write bounces.
    select_member_option(
        &registry,
        &mut state,
        q(3),
        &yosef,
        &"in_treatment".into(),
        YES,
        true,
    );
    assert!(state.member_details.is_empty());

    answer_top_question(&registry, &mut state, q(3), Answer::Yes);
    toggle_member(&registry, &mut state, q(3), &yosef, true);
    select_member_option(
        &registry,
        &mut state,
        q(3),
        &yosef,
        &"in_treatment".into(),
        YES,
        true,
    );
    save_detail_text(
        &registry,
        &mut state,
        &yosef,
        &context,
        &"in_treatment".into(),
        "מעקב קרדיולוגי",
    );

    assert_eq!(state.detail(&yosef, &context, &"in_treatment".into()), Some(YES));
    assert_eq!(
        state.detail(&yosef, &context, &"in_treatment_text".into()),
        Some("מעקב קרדיולוגי")
    );

    toggle_member(&registry, &mut state, q(3), &yosef, false);
    assert_eq!(state.detail(&yosef, &context, &"in_treatment".into()), None);
}

#[test]
fn operations_with_unknown_ids_are_no_ops() {
    let registry = Registry::standard();
    let mut state = FormState::new();
    disclose_ocd(&registry, &mut state);
    let before = state.clone();

    answer_top_question(&registry, &mut state, q(9), Answer::Yes);
    toggle_member(&registry, &mut state, q(1), &"nobody".into(), true);
    toggle_disorder(&registry, &mut state, &"david".into(), &"vertigo".into(), true);
    select_disorder_option(
        &registry,
        &mut state,
        &"david".into(),
        &"ocd".into(),
        &"timing".into(),
        "maybe",
        true,
    );
    select_family_disease(&registry, &mut state, &"david".into(), &"flu".into(), true);

    assert_eq!(state, before);
}

#[test]
fn full_disclosure_path_from_gate_to_detail_field() {
    let registry = Registry::standard();
    let mut state = FormState::new();
    answer_top_question(&registry, &mut state, q(1), Answer::Yes);
    toggle_member(&registry, &mut state, q(1), &"david".into(), true);
    toggle_disorder(&registry, &mut state, &"david".into(), &"ocd".into(), true);
    select_disorder_option(
        &registry,
        &mut state,
        &"david".into(),
        &"ocd".into(),
        &"hospitalization".into(),
        "כן",
        true,
    );

    let context = DetailContext::Disorder("ocd".into());
    assert_eq!(
        state.detail(&"david".into(), &context, &"hospitalization".into()),
        Some("כן")
    );
    let visibility = resolve_visibility(&registry, &state);
    assert_eq!(
        visibility.get(&SectionKey::FieldText {
            member: "david".into(),
            context,
            field: "hospitalization".into(),
        }),
        Some(&true)
    );
}

#[test]
fn reset_all_answers_no_everywhere_and_enables_submit() {
    let registry = Registry::standard();
    let mut state = FormState::new();
    disclose_ocd(&registry, &mut state);

    reset_all(&registry, &mut state);

    for n in 1..=4 {
        assert_eq!(state.answer(q(n)), Some(Answer::No));
    }
    assert!(state.selected_members.is_empty());
    assert!(state.member_details.is_empty());
    assert!(state.followup_answers.is_empty());
    assert!(resolve_visibility(&registry, &state).values().all(|visible| !visible));
    assert!(try_submit(&registry, &state).is_ok());
}

#[test]
fn clear_member_selections_preserves_top_level_answers() {
    let registry = Registry::standard();
    let mut state = FormState::new();
    disclose_ocd(&registry, &mut state);
    answer_top_question(&registry, &mut state, q(3), Answer::No);

    clear_member_selections(&mut state);

    assert_eq!(state.answer(q(1)), Some(Answer::Yes));
    assert_eq!(state.answer(q(3)), Some(Answer::No));
    assert!(state.selected_members.is_empty());
    assert!(state.selected_disorders.is_empty());
    assert!(state.member_details.is_empty());
}
