//! Session plans and their static copy.
//!
//! A plan is chosen once at onboarding and themes every session: it decides
//! which calibration fields are required and which review prompt is shown.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three fixed session plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Plan {
    /// Morning ritual: mindset, gratitude, planning.
    Foundation,
    /// Deep work: coding, writing, skill acquisition.
    Builder,
    /// Health and connection: exercise, meditation, conversation.
    Vitality,
}

impl Plan {
    /// Static display copy for this plan.
    pub fn details(&self) -> &'static PlanDetails {
        match self {
            Plan::Foundation => &PlanDetails {
                title: "Plan A: The Foundation",
                subtitle: "Take back the first hour.",
                description: "Focus on mindset, gratitude, reading, and planning. \
                              Guard the morning to win the day.",
                review_prompt: "What did you learn or visualize?",
            },
            Plan::Builder => &PlanDetails {
                title: "Plan B: The Builder",
                subtitle: "Practice beats theory.",
                description: "Deep work, coding, writing, or skill acquisition. \
                              Build your fortune in the quiet hour.",
                review_prompt: "What tangible progress did you make?",
            },
            Plan::Vitality => &PlanDetails {
                title: "Plan C: The Vitality",
                subtitle: "Health & Connection.",
                description: "Exercise, meditation, or deep conversation. \
                              Build the body or the bond.",
                review_prompt: "How does your body/mind feel?",
            },
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Plan::Foundation => "FOUNDATION",
            Plan::Builder => "BUILDER",
            Plan::Vitality => "VITALITY",
        };
        f.write_str(s)
    }
}

impl FromStr for Plan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "FOUNDATION" | "A" => Ok(Plan::Foundation),
            "BUILDER" | "B" => Ok(Plan::Builder),
            "VITALITY" | "C" => Ok(Plan::Vitality),
            other => Err(format!(
                "unknown plan '{other}' (expected FOUNDATION, BUILDER, or VITALITY)"
            )),
        }
    }
}

/// Static per-plan display copy.
#[derive(Debug, Clone)]
pub struct PlanDetails {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub description: &'static str,
    /// Reflection prompt shown during the review phase.
    pub review_prompt: &'static str,
}

/// VITALITY activity selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    #[default]
    Movement,
    Connection,
    Meditation,
}

impl ActivityType {
    /// One-line focus cue shown while the activity is selected.
    pub fn cue(&self) -> &'static str {
        match self {
            ActivityType::Movement => "Focus on form and breath.",
            ActivityType::Connection => "Deep listening. No phones.",
            ActivityType::Meditation => "Stillness leads to strength.",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActivityType::Movement => "MOVEMENT",
            ActivityType::Connection => "CONNECTION",
            ActivityType::Meditation => "MEDITATION",
        };
        f.write_str(s)
    }
}

impl FromStr for ActivityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "MOVEMENT" => Ok(ActivityType::Movement),
            "CONNECTION" => Ok(ActivityType::Connection),
            "MEDITATION" => Ok(ActivityType::Meditation),
            other => Err(format!(
                "unknown activity '{other}' (expected MOVEMENT, CONNECTION, or MEDITATION)"
            )),
        }
    }
}
