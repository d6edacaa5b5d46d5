use thiserror::Error;

use crate::key::QuestionId;
use crate::progress::completion;
use crate::registry::Registry;
use crate::state::FormState;

/// The only failure the submission boundary can surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("answer all questions before continuing")]
    Incomplete { missing: Vec<QuestionId> },
}

/// Succeeds iff every top-level question is answered. There is no network
/// call behind this; the caller owns whatever happens to the state next.
pub fn try_submit(registry: &Registry, state: &FormState) -> Result<(), SubmitError> {
    let completion = completion(registry, state);
    if completion.submit_enabled {
        Ok(())
    } else {
        Err(SubmitError::Incomplete {
            missing: completion.missing,
        })
    }
}
