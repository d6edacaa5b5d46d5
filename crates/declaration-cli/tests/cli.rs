use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use serde_json::{Value, json};

fn bin() -> Command {
    Command::cargo_bin("health-declaration").expect("binary under test")
}

fn full_session_events() -> Value {
    json!([
        {"op": "answer_top_question", "question": 1, "answer": "yes"},
        {"op": "toggle_member", "question": 1, "member": "david", "selected": true},
        {"op": "toggle_disorder", "member": "david", "disorder": "ocd", "selected": true},
        {
            "op": "select_disorder_option",
            "member": "david",
            "disorder": "ocd",
            "field": "hospitalization",
            "option": "כן",
            "checked": true,
        },
        {"op": "answer_top_question", "question": 2, "answer": "no"},
        {"op": "answer_top_question", "question": 3, "answer": "no"},
        {"op": "answer_top_question", "question": 4, "answer": "no"},
    ])
}

#[test]
fn wizard_auto_no_completes_and_writes_the_state() {
    let dir = TempDir::new().expect("temp dir");
    let state_file = dir.child("state.json");

    let output = bin()
        .args(["wizard", "--auto-no", "--out"])
        .arg(state_file.path())
        .output()
        .expect("run wizard");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Done"));
    assert!(stdout.contains("Answers (CBOR hex):"));

    assert!(state_file.path().exists());
    let state: Value =
        serde_json::from_str(&std::fs::read_to_string(state_file.path()).expect("state file"))
            .expect("state json");
    for question in ["1", "2", "3", "4"] {
        assert_eq!(state["answers"][question], "no");
    }
}

#[test]
fn apply_then_validate_and_show_round_trip() {
    let dir = TempDir::new().expect("temp dir");
    let events_file = dir.child("events.json");
    events_file
        .write_str(&full_session_events().to_string())
        .expect("write events");
    let state_file = dir.child("state.json");

    let output = bin()
        .args(["apply", "--events"])
        .arg(events_file.path())
        .arg("--out")
        .arg(state_file.path())
        .output()
        .expect("run apply");
    assert!(output.status.success());

    let output = bin()
        .args(["validate", "--state"])
        .arg(state_file.path())
        .output()
        .expect("run validate");
    assert!(output.status.success());
    assert!(
        String::from_utf8_lossy(&output.stdout).contains("all 4 questions answered")
    );

    let output = bin()
        .args(["show", "--format", "json", "--state"])
        .arg(state_file.path())
        .output()
        .expect("run show");
    assert!(output.status.success());
    let payload: Value =
        serde_json::from_slice(&output.stdout).expect("snapshot json");
    assert_eq!(payload["status"], "complete");
    assert_eq!(payload["visibility"]["david/ocd"], true);
    assert_eq!(
        payload["state"]["member_details"]["david"]["disorder/ocd"]["hospitalization"],
        "כן"
    );
}

#[test]
fn validate_rejects_an_incomplete_declaration() {
    let dir = TempDir::new().expect("temp dir");
    let state_file = dir.child("state.json");
    state_file
        .write_str(&json!({"answers": {"1": "no", "2": "no", "3": "no"}}).to_string())
        .expect("write state");

    let output = bin()
        .args(["validate", "--state"])
        .arg(state_file.path())
        .output()
        .expect("run validate");
    assert!(!output.status.success());
    assert!(
        String::from_utf8_lossy(&output.stderr)
            .contains("answer all questions before continuing")
    );
}

#[test]
fn clear_drops_selections_but_keeps_answers() {
    let dir = TempDir::new().expect("temp dir");
    let events_file = dir.child("events.json");
    events_file
        .write_str(&full_session_events().to_string())
        .expect("write events");
    let state_file = dir.child("state.json");

    bin()
        .args(["apply", "--events"])
        .arg(events_file.path())
        .arg("--out")
        .arg(state_file.path())
        .output()
        .expect("run apply");

    let output = bin()
        .args(["clear", "--state"])
        .arg(state_file.path())
        .output()
        .expect("run clear");
    assert!(output.status.success());

    let state: Value =
        serde_json::from_str(&std::fs::read_to_string(state_file.path()).expect("state file"))
            .expect("state json");
    assert_eq!(state["answers"]["1"], "yes");
    assert_eq!(state["selected_members"], json!({}));
    assert_eq!(state["member_details"], json!({}));
}

#[test]
fn schema_prints_the_state_document_shape() {
    let output = bin().args(["schema"]).output().expect("run schema");
    assert!(output.status.success());
    let schema: Value = serde_json::from_slice(&output.stdout).expect("schema json");
    assert!(schema["properties"].get("answers").is_some());
    assert!(schema["properties"].get("member_details").is_some());
}
