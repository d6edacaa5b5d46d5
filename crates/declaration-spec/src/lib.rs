#![allow(missing_docs)]

pub mod engine;
pub mod event;
pub mod key;
pub mod progress;
pub mod registry;
pub mod schema;
pub mod snapshot;
pub mod state;
pub mod submit;
pub mod visibility;

pub use engine::{
    answer_top_question, clear_member_selections, reset_all, save_detail_text,
    save_followup_answer, select_disorder_option, select_family_disease,
    select_family_disorder_option, select_member_option, toggle_disorder, toggle_member,
};
pub use event::{Event, apply};
pub use key::{
    CategoryId, DetailContext, DiseaseId, DisorderId, FieldKey, MemberId, QuestionId, SectionKey,
};
pub use progress::{Completion, completion};
pub use registry::{
    DetailKind, DisorderDefinition, FamilyCategory, FamilyDisease, FamilyMember, FieldSpec,
    FollowupField, FollowupSpec, NO, Question, Registry, YES,
};
pub use schema::{registry_schema, state_schema};
pub use snapshot::{FormStatus, Snapshot, build_snapshot, render_json, render_text};
pub use state::{Answer, FormState};
pub use submit::{SubmitError, try_submit};
pub use visibility::{VisibilityMap, resolve_visibility};
