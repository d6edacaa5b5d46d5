use serde_json::{Map, Value, json};

use crate::progress::{Completion, completion};
use crate::registry::Registry;
use crate::state::FormState;
use crate::visibility::{VisibilityMap, resolve_visibility};

/// Status labels exposed to the presentation adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    /// At least one top-level question is unanswered.
    NeedInput,
    /// All top-level questions are answered; submit is enabled.
    Complete,
}

impl FormStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormStatus::NeedInput => "need_input",
            FormStatus::Complete => "complete",
        }
    }
}

/// The outbound contract: a read-only view of the collected state plus the
/// visibility of every section, rebuilt after each mutating operation. The
/// adapter renders from this and never reaches into the engine.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub title: String,
    pub status: FormStatus,
    pub completion: Completion,
    pub visibility: VisibilityMap,
    pub state: FormState,
}

pub fn build_snapshot(registry: &Registry, state: &FormState) -> Snapshot {
    let completion = completion(registry, state);
    let status = if completion.submit_enabled {
        FormStatus::Complete
    } else {
        FormStatus::NeedInput
    };
    Snapshot {
        title: registry.title.clone(),
        status,
        completion,
        visibility: resolve_visibility(registry, state),
        state: state.clone(),
    }
}

/// Renders the snapshot as a structured JSON-friendly value.
pub fn render_json(snapshot: &Snapshot) -> Value {
    let mut visibility = Map::new();
    for (section, visible) in &snapshot.visibility {
        visibility.insert(section.to_string(), Value::Bool(*visible));
    }

    let mut answers = Map::new();
    for (question, answer) in &snapshot.state.answers {
        answers.insert(question.to_string(), Value::String(answer.as_str().into()));
    }

    json!({
        "title": snapshot.title,
        "status": snapshot.status.as_str(),
        "progress": {
            "answered": snapshot.completion.answered,
            "total": snapshot.completion.total,
        },
        "submit_enabled": snapshot.completion.submit_enabled,
        "answers": answers,
        "visibility": visibility,
        "state": serde_json::to_value(&snapshot.state).unwrap_or(Value::Null),
    })
}

/// Renders the snapshot as human-friendly text.
pub fn render_text(snapshot: &Snapshot) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Declaration: {}", snapshot.title));
    lines.push(format!(
        "Status: {} ({}/{})",
        snapshot.status.as_str(),
        snapshot.completion.answered,
        snapshot.completion.total
    ));
    if !snapshot.completion.missing.is_empty() {
        let missing = snapshot
            .completion
            .missing
            .iter()
            .map(|question| question.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("Unanswered questions: {}", missing));
    }

    lines.push("Answers:".to_string());
    for (question, answer) in &snapshot.state.answers {
        lines.push(format!(" - question {} = {}", question, answer.as_str()));
    }

    let visible: Vec<String> = snapshot
        .visibility
        .iter()
        .filter(|(_, visible)| **visible)
        .map(|(section, _)| format!(" - {}", section))
        .collect();
    if visible.is_empty() {
        lines.push("No sections are disclosed.".to_string());
    } else {
        lines.push("Disclosed sections:".to_string());
        lines.extend(visible);
    }

    lines.join("\n")
}
