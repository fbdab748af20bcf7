//! Session state machine.
//!
//! The machine is clock-agnostic: the caller feeds it one `tick()` per
//! elapsed second and it never spawns threads of its own. All commands are
//! synchronous and return the event they produced, if any.
//!
//! ## Phase transitions
//!
//! ```text
//! CALIBRATION -> FOCUS -> REVIEW -> COMPLETED
//!                  |__________^  (early end, explicit confirmation)
//! ```
//!
//! Transitions are strictly forward. FOCUS is the only phase with an
//! automatic expiry advance; CALIBRATION and REVIEW hold at zero until the
//! user acts. FOCUS enters paused -- starting the hour is an intentional
//! gesture, not a side effect of finishing calibration.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Reject, Result};
use crate::events::Event;
use crate::plan::Plan;
use crate::session::fields::{Field, SessionFields};
use crate::session::record::{assemble, SessionRecord};

/// Calibration phase length in seconds (3 minutes).
pub const DURATION_CALIBRATION: u32 = 180;
/// Focus phase length in seconds (52 minutes).
pub const DURATION_FOCUS: u32 = 52 * 60;
/// Review phase length in seconds (5 minutes).
pub const DURATION_REVIEW: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionPhase {
    Calibration,
    Focus,
    Review,
    /// Terminal. The machine is discarded once the record is emitted.
    Completed,
}

/// Configured phase lengths. Policy defaults; the surrounding configuration
/// may override them per install.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseDurations {
    pub calibration_secs: u32,
    pub focus_secs: u32,
    pub review_secs: u32,
}

impl Default for PhaseDurations {
    fn default() -> Self {
        Self {
            calibration_secs: DURATION_CALIBRATION,
            focus_secs: DURATION_FOCUS,
            review_secs: DURATION_REVIEW,
        }
    }
}

impl PhaseDurations {
    fn for_phase(&self, phase: SessionPhase) -> u32 {
        match phase {
            SessionPhase::Calibration => self.calibration_secs,
            SessionPhase::Focus => self.focus_secs,
            SessionPhase::Review => self.review_secs,
            SessionPhase::Completed => 0,
        }
    }
}

/// One session's worth of state: phase, countdown, pause, emergency overlay,
/// interruption tally, and accumulated form fields.
///
/// Serializable so the CLI can park it in the kv store between invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMachine {
    plan: Plan,
    #[serde(default)]
    durations: PhaseDurations,
    phase: SessionPhase,
    remaining_secs: u32,
    paused: bool,
    overlay_open: bool,
    interruptions: u32,
    #[serde(default)]
    fields: SessionFields,
}

impl SessionMachine {
    /// Start a session at CALIBRATION with default durations.
    pub fn new(plan: Plan) -> Self {
        Self::with_durations(plan, PhaseDurations::default())
    }

    pub fn with_durations(plan: Plan, durations: PhaseDurations) -> Self {
        Self {
            plan,
            durations,
            phase: SessionPhase::Calibration,
            remaining_secs: durations.calibration_secs,
            paused: false,
            overlay_open: false,
            interruptions: 0,
            fields: SessionFields::default(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn plan(&self) -> Plan {
        self.plan
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Full configured duration of the active phase.
    pub fn total_secs(&self) -> u32 {
        self.durations.for_phase(self.phase)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn overlay_open(&self) -> bool {
        self.overlay_open
    }

    pub fn interruptions(&self) -> u32 {
        self.interruptions
    }

    pub fn fields(&self) -> &SessionFields {
        &self.fields
    }

    pub fn is_completed(&self) -> bool {
        self.phase == SessionPhase::Completed
    }

    /// Event announcing this session's start.
    pub fn started(&self) -> Event {
        Event::SessionStarted {
            plan: self.plan,
            duration_secs: self.durations.calibration_secs,
            at: Utc::now(),
        }
    }

    /// Build a full state snapshot event for rendering.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            plan: self.plan,
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs(),
            paused: self.paused,
            overlay_open: self.overlay_open,
            interruptions: self.interruptions,
            fields: self.fields.clone(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Process one elapsed clock second.
    ///
    /// Ignored while paused, while the emergency overlay is open, after
    /// completion, and while a phase holds at zero. The countdown never
    /// goes negative; the expiry event fires on the tick that reaches zero.
    pub fn tick(&mut self) -> Option<Event> {
        if self.paused || self.overlay_open || self.phase == SessionPhase::Completed {
            return None;
        }
        if self.remaining_secs == 0 {
            return None;
        }
        self.remaining_secs -= 1;
        if self.remaining_secs > 0 {
            return None;
        }
        match self.phase {
            SessionPhase::Focus => {
                self.enter_phase(SessionPhase::Review);
                Some(Event::FocusExpired {
                    review_duration_secs: self.durations.review_secs,
                    at: Utc::now(),
                })
            }
            phase => Some(Event::PhaseExpired {
                phase,
                at: Utc::now(),
            }),
        }
    }

    /// Write one form field. Fields stay editable in every active phase,
    /// including past a calibration countdown that has run out.
    pub fn set_field(&mut self, field: Field, value: &str) -> Result<()> {
        if self.phase == SessionPhase::Completed {
            return Err(CoreError::InvalidAction(
                "the session is already completed".to_string(),
            ));
        }
        self.fields.set(field, value)
    }

    /// Explicit advance: CALIBRATION validates and enters FOCUS; REVIEW
    /// validates, assembles the record, and completes the session.
    ///
    /// Ending FOCUS goes through [`end_early`](Self::end_early) instead,
    /// since it needs a confirmation the caller must supply.
    pub fn advance(&mut self) -> Result<Event> {
        match self.phase {
            SessionPhase::Calibration => {
                self.validate_calibration()?;
                self.enter_phase(SessionPhase::Focus);
                Ok(Event::PhaseAdvanced {
                    from: SessionPhase::Calibration,
                    to: SessionPhase::Focus,
                    duration_secs: self.durations.focus_secs,
                    early: false,
                    at: Utc::now(),
                })
            }
            SessionPhase::Review => {
                if self.fields.reflection.trim().is_empty() {
                    return Err(Reject::MissingReflection.into());
                }
                let record = self.complete();
                Ok(Event::SessionCompleted {
                    record,
                    at: Utc::now(),
                })
            }
            SessionPhase::Focus => Err(CoreError::InvalidAction(
                "ending focus early requires confirmation; use end_early".to_string(),
            )),
            SessionPhase::Completed => Err(CoreError::InvalidAction(
                "the session is already completed".to_string(),
            )),
        }
    }

    /// End FOCUS before its countdown runs out. `confirmed` is the
    /// caller-supplied confirmation result; without it nothing happens.
    pub fn end_early(&mut self, confirmed: bool) -> Option<Event> {
        if self.phase != SessionPhase::Focus || self.overlay_open || !confirmed {
            return None;
        }
        self.enter_phase(SessionPhase::Review);
        Some(Event::PhaseAdvanced {
            from: SessionPhase::Focus,
            to: SessionPhase::Review,
            duration_secs: self.durations.review_secs,
            early: true,
            at: Utc::now(),
        })
    }

    /// Toggle pause for the active phase. No effect while the emergency
    /// overlay is open.
    pub fn toggle_pause(&mut self) -> Option<Event> {
        if self.overlay_open || self.phase == SessionPhase::Completed {
            return None;
        }
        self.paused = !self.paused;
        let at = Utc::now();
        Some(if self.paused {
            Event::TimerPaused {
                remaining_secs: self.remaining_secs,
                at,
            }
        } else {
            Event::TimerResumed {
                remaining_secs: self.remaining_secs,
                at,
            }
        })
    }

    /// Open the interruption-confirmation prompt, freezing the countdown.
    pub fn request_emergency(&mut self) -> Option<Event> {
        if self.overlay_open || self.phase == SessionPhase::Completed {
            return None;
        }
        self.overlay_open = true;
        Some(Event::EmergencyRequested {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Close the prompt. Cancelling resumes under the prior pause state;
    /// confirming the break counts the interruption and forces a pause, so
    /// resuming stays an explicit act.
    pub fn resolve_emergency(&mut self, confirm_break: bool) -> Option<Event> {
        if !self.overlay_open {
            return None;
        }
        self.overlay_open = false;
        if confirm_break {
            self.interruptions += 1;
            self.paused = true;
        }
        Some(Event::EmergencyResolved {
            broke_fence: confirm_break,
            interruptions: self.interruptions,
            at: Utc::now(),
        })
    }

    /// Restore the active phase's full countdown. Only honored while paused
    /// and confirmed; phase and pause state are untouched.
    pub fn reset_phase_timer(&mut self, confirmed: bool) -> Option<Event> {
        if !confirmed
            || !self.paused
            || self.overlay_open
            || self.phase == SessionPhase::Completed
        {
            return None;
        }
        self.remaining_secs = self.total_secs();
        Some(Event::PhaseTimerReset {
            phase: self.phase,
            duration_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Event announcing abandonment. The caller drops the machine afterwards;
    /// no record is produced and the clock source must stop with it.
    pub fn exited(&self) -> Event {
        Event::SessionExited {
            phase: self.phase,
            at: Utc::now(),
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn validate_calibration(&self) -> Result<(), Reject> {
        if self.fields.goal.trim().is_empty() {
            return Err(Reject::MissingGoal);
        }
        if self.fields.why.trim().is_empty() {
            return Err(Reject::MissingWhy);
        }
        if self.plan == Plan::Foundation && !self.fields.all_gratitudes_filled() {
            return Err(Reject::MissingGratitudes);
        }
        Ok(())
    }

    /// Entry actions: full countdown, overlay cleared, pause per phase
    /// policy (FOCUS paused, everything else running).
    fn enter_phase(&mut self, phase: SessionPhase) {
        self.phase = phase;
        self.remaining_secs = self.durations.for_phase(phase);
        self.overlay_open = false;
        self.paused = phase == SessionPhase::Focus;
    }

    fn complete(&mut self) -> SessionRecord {
        let record = assemble(self.plan, &self.fields, self.interruptions);
        self.phase = SessionPhase::Completed;
        self.remaining_secs = 0;
        self.paused = false;
        self.overlay_open = false;
        record
    }
}
