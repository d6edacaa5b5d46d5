use crate::key::QuestionId;
use crate::registry::Registry;
use crate::state::FormState;

/// Completion counters derived after every mutation; the proceed action is
/// enabled iff every top-level question has an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub answered: usize,
    pub total: usize,
    pub missing: Vec<QuestionId>,
    pub submit_enabled: bool,
}

pub fn completion(registry: &Registry, state: &FormState) -> Completion {
    let missing: Vec<QuestionId> = registry
        .questions
        .iter()
        .filter(|question| state.answer(question.id).is_none())
        .map(|question| question.id)
        .collect();
    let total = registry.questions.len();
    Completion {
        answered: total - missing.len(),
        total,
        submit_enabled: missing.is_empty(),
        missing,
    }
}
