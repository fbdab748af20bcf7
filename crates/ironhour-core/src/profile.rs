//! User profile and the store seam.
//!
//! The profile is one JSON document: name, active plan, pledge, and the
//! ordered session history (newest first). The session core never touches
//! the store directly; it hands a finished record to the caller, and the
//! caller appends it here.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::plan::Plan;
use crate::session::SessionRecord;

/// Fixed key the profile document is stored under.
pub const PROFILE_KEY: &str = "ironhour_user";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub active_plan: Option<Plan>,
    /// Completed sessions, newest first at the point of insertion.
    #[serde(default)]
    pub history: Vec<SessionRecord>,
    /// Commitment pledge in dollars. Display-only for now.
    #[serde(default)]
    pub pledge_amount: f64,
}

impl UserProfile {
    pub fn new(name: impl Into<String>, plan: Plan) -> Self {
        Self {
            name: name.into(),
            active_plan: Some(plan),
            history: Vec::new(),
            pledge_amount: 0.0,
        }
    }

    /// Append a completed session. The store owns ordering: newest first.
    pub fn push_record(&mut self, record: SessionRecord) {
        self.history.insert(0, record);
    }
}

/// Load/save contract for whatever holds the profile on this device.
///
/// Injected so the profile logic stays decoupled from the storage medium;
/// the SQLite kv store implements it in production, tests can use anything.
pub trait ProfileStore {
    fn load(&self) -> Result<Option<UserProfile>, StoreError>;
    fn save(&self, profile: &UserProfile) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{assemble, Field, SessionFields};

    fn record(goal: &str) -> SessionRecord {
        let mut fields = SessionFields::default();
        fields.set(Field::Goal, goal).unwrap();
        fields.set(Field::Why, "because").unwrap();
        fields.set(Field::Reflection, "done").unwrap();
        assemble(Plan::Builder, &fields, 0)
    }

    #[test]
    fn history_inserts_newest_first() {
        let mut profile = UserProfile::new("Marcus", Plan::Builder);
        profile.push_record(record("first"));
        profile.push_record(record("second"));
        assert_eq!(profile.history[0].goal, "second");
        assert_eq!(profile.history[1].goal, "first");
    }

    #[test]
    fn profile_round_trips_with_wire_names() {
        let mut profile = UserProfile::new("Ada", Plan::Foundation);
        profile.pledge_amount = 50.0;
        profile.push_record(record("read"));

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["activePlan"], "FOUNDATION");
        assert_eq!(json["pledgeAmount"], 50.0);

        let back: UserProfile = serde_json::from_value(json).unwrap();
        assert_eq!(back, profile);
    }
}
