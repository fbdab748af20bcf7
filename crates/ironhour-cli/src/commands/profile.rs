use clap::Subcommand;
use ironhour_core::{Database, Plan, ProfileStore, UserProfile, MACHINE_KEY};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Create the profile: name and plan choice (onboarding)
    Init {
        name: String,
        /// FOUNDATION, BUILDER, or VITALITY (A/B/C also accepted)
        #[arg(long)]
        plan: Plan,
        /// Optional commitment pledge in dollars
        #[arg(long, default_value = "0")]
        pledge: f64,
    },
    /// Print the profile
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Update the commitment pledge
    Pledge { amount: f64 },
    /// Wipe the profile and all history
    Reset {
        /// Required confirmation; this is destructive
        #[arg(long)]
        confirm: bool,
    },
}

pub fn run(action: ProfileAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        ProfileAction::Init { name, plan, pledge } => {
            if ProfileStore::load(&db)?.is_some() {
                return Err("a profile already exists (use `profile reset --confirm` first)".into());
            }
            let mut profile = UserProfile::new(name, plan);
            profile.pledge_amount = pledge;
            db.save(&profile)?;
            let details = plan.details();
            println!("Welcome, {}.", profile.name);
            println!("{} -- {}", details.title, details.subtitle);
            println!("{}", details.description);
        }
        ProfileAction::Show { json } => {
            let profile =
                ProfileStore::load(&db)?.ok_or("no profile yet (use `ironhour profile init`)")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&profile)?);
            } else {
                println!("Name:    {}", profile.name);
                match profile.active_plan {
                    Some(plan) => println!("Plan:    {} ({})", plan, plan.details().title),
                    None => println!("Plan:    none"),
                }
                println!("Hours:   {}", profile.history.len());
                println!("Pledge:  ${:.2}", profile.pledge_amount);
            }
        }
        ProfileAction::Pledge { amount } => {
            let mut profile =
                ProfileStore::load(&db)?.ok_or("no profile yet (use `ironhour profile init`)")?;
            profile.pledge_amount = amount;
            db.save(&profile)?;
            println!("Pledge set to ${amount:.2}");
        }
        ProfileAction::Reset { confirm } => {
            if !confirm {
                return Err("this wipes your progress; pass --confirm to proceed".into());
            }
            db.kv_delete(ironhour_core::PROFILE_KEY)?;
            db.kv_delete(MACHINE_KEY)?;
            println!("Profile wiped.");
        }
    }

    Ok(())
}
