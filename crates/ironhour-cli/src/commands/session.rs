use clap::Subcommand;
use ironhour_core::{
    Config, Database, Event, Field, ProfileStore, SessionMachine, MACHINE_KEY,
};

#[derive(Subcommand)]
pub enum SessionAction {
    /// Begin a new session at CALIBRATION using the profile's active plan
    Start,
    /// Print the current machine state as JSON
    Status,
    /// Feed elapsed clock seconds to the machine
    Tick {
        /// Number of seconds to process
        #[arg(long, default_value = "1")]
        count: u32,
    },
    /// Write a form field (goal, why, gratitude-1..3, link, activity,
    /// reflection, refinement)
    Set { field: String, value: String },
    /// Advance out of CALIBRATION, or submit REVIEW to complete the session
    Advance,
    /// End the focus phase before its countdown runs out
    EndEarly {
        /// Required confirmation; ending the fence early is discouraged
        #[arg(long)]
        confirm: bool,
    },
    /// Toggle pause for the active phase
    Pause,
    /// Open the emergency override prompt (freezes the countdown)
    Emergency,
    /// Resolve the emergency prompt
    Resolve {
        /// Confirm the break: counts an interruption and pauses the session
        #[arg(long = "break", conflicts_with = "resume")]
        break_fence: bool,
        /// Cancel and return to the session
        #[arg(long)]
        resume: bool,
    },
    /// Restore the active phase's full countdown (only while paused)
    ResetTimer {
        #[arg(long)]
        confirm: bool,
    },
    /// Abandon the session; no record is produced
    Exit,
}

fn load_machine(db: &Database) -> Result<SessionMachine, Box<dyn std::error::Error>> {
    match db.kv_get(MACHINE_KEY)? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Err("no session in progress (use `ironhour session start`)".into()),
    }
}

fn save_machine(db: &Database, machine: &SessionMachine) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(machine)?;
    db.kv_set(MACHINE_KEY, &json)?;
    Ok(())
}

fn print_event(event: &Event) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(event)?);
    Ok(())
}

pub fn run(action: SessionAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        SessionAction::Start => {
            let profile = ProfileStore::load(&db)?
                .ok_or("no profile yet (use `ironhour profile init`)")?;
            let plan = profile
                .active_plan
                .ok_or("the profile has no active plan; reset and onboard again")?;
            if db.kv_get(MACHINE_KEY)?.is_some() {
                return Err(
                    "a session is already in progress (finish it or `session exit`)".into(),
                );
            }
            let config = Config::load()?;
            let machine = SessionMachine::with_durations(plan, config.phase_durations());
            save_machine(&db, &machine)?;
            print_event(&machine.started())?;
        }
        SessionAction::Status => {
            let machine = load_machine(&db)?;
            print_event(&machine.snapshot())?;
        }
        SessionAction::Tick { count } => {
            let mut machine = load_machine(&db)?;
            for _ in 0..count {
                if let Some(event) = machine.tick() {
                    print_event(&event)?;
                }
            }
            save_machine(&db, &machine)?;
        }
        SessionAction::Set { field, value } => {
            let mut machine = load_machine(&db)?;
            let field: Field = field.parse()?;
            machine.set_field(field, &value)?;
            save_machine(&db, &machine)?;
            if field == Field::ActivityType {
                eprintln!("{}", machine.fields().activity_type.cue());
            }
            print_event(&machine.snapshot())?;
        }
        SessionAction::Advance => {
            let mut machine = load_machine(&db)?;
            let event = machine.advance()?;
            if let Event::SessionCompleted { ref record, .. } = event {
                let mut profile = ProfileStore::load(&db)?
                    .ok_or("profile disappeared mid-session")?;
                profile.push_record(record.clone());
                db.save(&profile)?;
                // The machine is spent; the clock stops with it.
                db.kv_delete(MACHINE_KEY)?;
            } else {
                save_machine(&db, &machine)?;
            }
            print_event(&event)?;
        }
        SessionAction::EndEarly { confirm } => {
            if !confirm {
                return Err("ending the Iron Fence early requires --confirm".into());
            }
            let mut machine = load_machine(&db)?;
            match machine.end_early(true) {
                Some(event) => {
                    save_machine(&db, &machine)?;
                    print_event(&event)?;
                }
                None => return Err("end-early only applies during FOCUS".into()),
            }
        }
        SessionAction::Pause => {
            let mut machine = load_machine(&db)?;
            match machine.toggle_pause() {
                Some(event) => {
                    save_machine(&db, &machine)?;
                    print_event(&event)?;
                }
                None => return Err("pause has no effect right now".into()),
            }
        }
        SessionAction::Emergency => {
            let mut machine = load_machine(&db)?;
            match machine.request_emergency() {
                Some(event) => {
                    save_machine(&db, &machine)?;
                    print_event(&event)?;
                }
                None => return Err("the emergency prompt is already open".into()),
            }
        }
        SessionAction::Resolve {
            break_fence,
            resume,
        } => {
            if break_fence == resume {
                return Err("resolve needs exactly one of --break or --resume".into());
            }
            let mut machine = load_machine(&db)?;
            match machine.resolve_emergency(break_fence) {
                Some(event) => {
                    save_machine(&db, &machine)?;
                    print_event(&event)?;
                }
                None => return Err("no emergency prompt is open".into()),
            }
        }
        SessionAction::ResetTimer { confirm } => {
            if !confirm {
                return Err("resetting the phase timer requires --confirm".into());
            }
            let mut machine = load_machine(&db)?;
            match machine.reset_phase_timer(true) {
                Some(event) => {
                    save_machine(&db, &machine)?;
                    print_event(&event)?;
                }
                None => return Err("the timer only resets while paused".into()),
            }
        }
        SessionAction::Exit => {
            let machine = load_machine(&db)?;
            db.kv_delete(MACHINE_KEY)?;
            print_event(&machine.exited())?;
        }
    }

    Ok(())
}
