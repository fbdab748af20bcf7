//! The session core: state machine, form fields, and the record assembler.

mod fields;
mod machine;
mod record;

pub use fields::{Field, SessionFields, GRATITUDE_COUNT};
pub use machine::{
    PhaseDurations, SessionMachine, SessionPhase, DURATION_CALIBRATION, DURATION_FOCUS,
    DURATION_REVIEW,
};
pub use record::{assemble, SessionMeta, SessionRecord};
