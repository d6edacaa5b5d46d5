use serde_json::Value;

use crate::registry::Registry;
use crate::state::FormState;

/// JSON schema of the state file the CLI reads and writes.
pub fn state_schema() -> Value {
    serde_json::to_value(schemars::schema_for!(FormState)).unwrap_or(Value::Null)
}

/// JSON schema of a registry override file.
pub fn registry_schema() -> Value {
    serde_json::to_value(schemars::schema_for!(Registry)).unwrap_or(Value::Null)
}
