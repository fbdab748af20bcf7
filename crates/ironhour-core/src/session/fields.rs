//! Per-session form state.
//!
//! Calibration collects a goal and a rationale for every plan, plus one
//! plan-specific block: three gratitudes (FOUNDATION), an optional workspace
//! link (BUILDER), or an activity selection (VITALITY). Review collects the
//! reflection and an optional refinement.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{CoreError, Result};
use crate::plan::ActivityType;

/// Number of gratitude entries required on the FOUNDATION plan.
pub const GRATITUDE_COUNT: usize = 3;

/// All form fields accumulated over one session.
///
/// Plan-irrelevant fields may be written freely; the record assembler is
/// what filters by plan at completion time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionFields {
    pub goal: String,
    pub why: String,
    pub gratitudes: [String; GRATITUDE_COUNT],
    pub external_link: String,
    pub activity_type: ActivityType,
    pub reflection: String,
    pub refinement: String,
}

/// Addressable field names, as accepted by `session set <field> <value>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Goal,
    Why,
    /// Zero-based gratitude slot; `set` rejects indexes past
    /// `GRATITUDE_COUNT`.
    Gratitude(usize),
    ExternalLink,
    ActivityType,
    Reflection,
    Refinement,
}

impl FromStr for Field {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "goal" => Ok(Field::Goal),
            "why" => Ok(Field::Why),
            "gratitude-1" => Ok(Field::Gratitude(0)),
            "gratitude-2" => Ok(Field::Gratitude(1)),
            "gratitude-3" => Ok(Field::Gratitude(2)),
            "link" | "external-link" => Ok(Field::ExternalLink),
            "activity" => Ok(Field::ActivityType),
            "reflection" => Ok(Field::Reflection),
            "refinement" => Ok(Field::Refinement),
            other => Err(CoreError::UnknownField(other.to_string())),
        }
    }
}

impl SessionFields {
    /// Write one field. Activity values must parse and the gratitude slot
    /// must exist; everything else is a plain assignment.
    pub fn set(&mut self, field: Field, value: &str) -> Result<()> {
        match field {
            Field::Goal => self.goal = value.to_string(),
            Field::Why => self.why = value.to_string(),
            Field::Gratitude(i) => {
                let slot = self.gratitudes.get_mut(i).ok_or_else(|| {
                    CoreError::InvalidFieldValue {
                        field: format!("gratitude-{}", i.saturating_add(1)),
                        message: format!("only {GRATITUDE_COUNT} gratitude slots exist"),
                    }
                })?;
                *slot = value.to_string();
            }
            Field::ExternalLink => self.external_link = value.to_string(),
            Field::ActivityType => {
                self.activity_type =
                    value
                        .parse::<ActivityType>()
                        .map_err(|message| CoreError::InvalidFieldValue {
                            field: "activity".to_string(),
                            message,
                        })?;
            }
            Field::Reflection => self.reflection = value.to_string(),
            Field::Refinement => self.refinement = value.to_string(),
        }
        Ok(())
    }

    pub fn all_gratitudes_filled(&self) -> bool {
        self.gratitudes.iter().all(|g| !g.trim().is_empty())
    }
}
