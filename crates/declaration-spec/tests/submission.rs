use declaration_spec::{
    Answer, FormState, QuestionId, Registry, SubmitError, answer_top_question, completion,
    try_submit,
};

#[test]
fn submit_fails_while_any_question_is_unanswered() {
    let registry = Registry::standard();
    let mut state = FormState::new();
    for n in 1..=3 {
        answer_top_question(&registry, &mut state, QuestionId(n), Answer::No);
    }

    let error = try_submit(&registry, &state).expect_err("three answers of four");
    assert_eq!(
        error,
        SubmitError::Incomplete {
            missing: vec![QuestionId(4)],
        }
    );
    assert_eq!(error.to_string(), "answer all questions before continuing");

    let completion = completion(&registry, &state);
    assert_eq!(completion.answered, 3);
    assert_eq!(completion.total, 4);
    assert!(!completion.submit_enabled);
}

#[test]
fn submit_succeeds_once_all_questions_are_answered() {
    let registry = Registry::standard();
    let mut state = FormState::new();
    for n in 1..=4 {
        answer_top_question(&registry, &mut state, QuestionId(n), Answer::No);
    }

    assert!(try_submit(&registry, &state).is_ok());
    assert!(completion(&registry, &state).submit_enabled);
}

#[test]
fn a_yes_answer_counts_toward_completion_like_a_no() {
    let registry = Registry::standard();
    let mut state = FormState::new();
    answer_top_question(&registry, &mut state, QuestionId(1), Answer::Yes);
    for n in 2..=4 {
        answer_top_question(&registry, &mut state, QuestionId(n), Answer::No);
    }

    assert!(try_submit(&registry, &state).is_ok());
}
