//! The record assembler.
//!
//! A `SessionRecord` is built exactly once, at the moment review validation
//! passes, and is immutable from then on. Assembly is a pure function of the
//! final machine state; persistence belongs to the caller.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::plan::{ActivityType, Plan};
use crate::session::fields::{SessionFields, GRATITUDE_COUNT};

/// Plan-specific payload plus the interruption tally.
///
/// Conditional keys are omitted from the JSON entirely when absent, so a
/// record's meta only ever carries the block relevant to its plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gratitudes: Option<[String; GRATITUDE_COUNT]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<ActivityType>,
    pub interruptions: u32,
}

/// Immutable summary of one completed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub id: String,
    /// Display date in local time, `YYYY-MM-DD`.
    pub date: String,
    pub plan: Plan,
    pub goal: String,
    pub why: String,
    pub reflection: String,
    pub refinement: String,
    pub completed_at: DateTime<Utc>,
    pub meta: SessionMeta,
}

/// Build the completion record from final session state.
///
/// The caller has already validated the fields; this only selects the
/// plan-relevant meta block and stamps identity and time.
pub fn assemble(plan: Plan, fields: &SessionFields, interruptions: u32) -> SessionRecord {
    let now = Utc::now();
    let meta = SessionMeta {
        gratitudes: (plan == Plan::Foundation).then(|| fields.gratitudes.clone()),
        // An unset link carries no information; omit it rather than store "".
        external_link: (plan == Plan::Builder && !fields.external_link.trim().is_empty())
            .then(|| fields.external_link.clone()),
        activity_type: (plan == Plan::Vitality).then_some(fields.activity_type),
        interruptions,
    };
    SessionRecord {
        id: Uuid::new_v4().to_string(),
        date: now.with_timezone(&Local).format("%Y-%m-%d").to_string(),
        plan,
        goal: fields.goal.clone(),
        why: fields.why.clone(),
        reflection: fields.reflection.clone(),
        refinement: fields.refinement.clone(),
        completed_at: now,
        meta,
    }
}
