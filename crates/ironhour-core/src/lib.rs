//! # IronHour Core Library
//!
//! Core business logic for IronHour, a personal focus-session tracker: pick
//! a plan, run a timed three-phase session (calibration, focus, review), and
//! stack the completed hours into a history wall. CLI-first: every operation
//! is available through the `ironhour` binary, and any GUI would be a thin
//! layer over this same library.
//!
//! ## Architecture
//!
//! - **Session machine**: a tick-driven state machine; the caller feeds it
//!   one `tick()` per elapsed second, the machine never owns a clock
//! - **Record assembler**: pure construction of the immutable
//!   [`SessionRecord`] when review validation passes
//! - **Storage**: a single SQLite key-value file for the profile document
//!   and the in-flight machine, plus TOML configuration
//! - **Stats**: pure dashboard derivations (streaks, the brick wall)
//!
//! ## Key components
//!
//! - [`SessionMachine`]: phase transitions, pause, emergency override
//! - [`UserProfile`] / [`ProfileStore`]: profile document and its store seam
//! - [`Database`]: on-device kv storage
//! - [`Config`]: duration overrides and display preferences

pub mod error;
pub mod events;
pub mod plan;
pub mod profile;
pub mod session;
pub mod stats;
pub mod storage;

pub use error::{ConfigError, CoreError, Reject, StoreError};
pub use events::Event;
pub use plan::{ActivityType, Plan, PlanDetails};
pub use profile::{ProfileStore, UserProfile, PROFILE_KEY};
pub use session::{
    Field, PhaseDurations, SessionFields, SessionMachine, SessionMeta, SessionPhase,
    SessionRecord,
};
pub use stats::DashboardStats;
pub use storage::{Config, Database, MACHINE_KEY};
