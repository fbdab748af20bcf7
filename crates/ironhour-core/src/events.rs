//! Session events.
//!
//! Every state change in the machine produces an `Event`. The CLI prints
//! them as JSON; a GUI would poll for them the same way.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::plan::Plan;
use crate::session::{SessionFields, SessionPhase, SessionRecord};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum Event {
    /// A new session entered CALIBRATION.
    SessionStarted {
        plan: Plan,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    /// The machine moved from one phase to the next.
    PhaseAdvanced {
        from: SessionPhase,
        to: SessionPhase,
        duration_secs: u32,
        /// True when FOCUS was ended by an explicit early-exit confirmation.
        early: bool,
        at: DateTime<Utc>,
    },
    /// FOCUS ticked down to zero and auto-advanced into REVIEW.
    FocusExpired {
        review_duration_secs: u32,
        at: DateTime<Utc>,
    },
    /// A phase without an automatic advance reached zero and now holds there.
    PhaseExpired {
        phase: SessionPhase,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerResumed {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// The interruption-confirmation prompt opened; the countdown is frozen.
    EmergencyRequested {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// The prompt closed, either by cancelling or by confirming the break.
    EmergencyResolved {
        broke_fence: bool,
        interruptions: u32,
        at: DateTime<Utc>,
    },
    /// The active phase's countdown was restored to its full duration.
    PhaseTimerReset {
        phase: SessionPhase,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    /// Review was submitted; the record is final. Fired exactly once.
    SessionCompleted {
        record: SessionRecord,
        at: DateTime<Utc>,
    },
    /// The session was abandoned; no record was produced.
    SessionExited {
        phase: SessionPhase,
        at: DateTime<Utc>,
    },
    /// Full read-only view of the machine for rendering.
    StateSnapshot {
        plan: Plan,
        phase: SessionPhase,
        remaining_secs: u32,
        total_secs: u32,
        paused: bool,
        overlay_open: bool,
        interruptions: u32,
        fields: SessionFields,
        at: DateTime<Utc>,
    },
}
