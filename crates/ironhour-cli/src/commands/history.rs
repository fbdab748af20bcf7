use clap::Subcommand;
use ironhour_core::{stats, Config, Database, Plan, ProfileStore};

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List completed sessions, newest first
    List {
        #[arg(long)]
        json: bool,
        /// Show at most this many records
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Render the brick wall: one cell per stacked hour
    Wall,
}

const WALL_ROW_WIDTH: usize = 30;

fn brick(plan: Option<Plan>) -> char {
    match plan {
        Some(Plan::Foundation) => 'F',
        Some(Plan::Builder) => 'B',
        Some(Plan::Vitality) => 'V',
        None => '.',
    }
}

pub fn run(action: HistoryAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let profile = ProfileStore::load(&db)?.ok_or("no profile yet (use `ironhour profile init`)")?;

    match action {
        HistoryAction::List { json, limit } => {
            let count = limit.unwrap_or(profile.history.len());
            let records = &profile.history[..count.min(profile.history.len())];
            if json {
                println!("{}", serde_json::to_string_pretty(records)?);
            } else if records.is_empty() {
                println!("No bricks yet. Start building your legacy today.");
            } else {
                for record in records {
                    let marker = if record.meta.interruptions > 0 {
                        format!("  [{} interruption(s)]", record.meta.interruptions)
                    } else {
                        String::new()
                    };
                    println!("{}  {:<10}  {}{}", record.date, record.plan, record.goal, marker);
                }
            }
        }
        HistoryAction::Wall => {
            let config = Config::load()?;
            let grid = stats::wall(&profile.history, config.wall_slots as usize);
            for row in grid.chunks(WALL_ROW_WIDTH) {
                let line: String = row.iter().map(|cell| brick(*cell)).collect();
                println!("{line}");
            }
            println!();
            println!(
                "{} of {} hours stacked (F=Foundation B=Builder V=Vitality)",
                profile.history.len(),
                config.wall_slots
            );
        }
    }

    Ok(())
}
