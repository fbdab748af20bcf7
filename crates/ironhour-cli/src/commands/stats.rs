use clap::Subcommand;
use ironhour_core::{stats, Database, ProfileStore};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Print the dashboard numbers
    Show {
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let profile = ProfileStore::load(&db)?.ok_or("no profile yet (use `ironhour profile init`)")?;

    match action {
        StatsAction::Show { json } => {
            let dashboard = stats::compute(&profile.history);
            if json {
                println!("{}", serde_json::to_string_pretty(&dashboard)?);
            } else {
                println!("Total hours stacked:  {}", dashboard.total_hours);
                println!("Current streak:       {} day(s)", dashboard.current_streak_days);
                println!("Total interruptions:  {}", dashboard.total_interruptions);
            }
        }
    }

    Ok(())
}
