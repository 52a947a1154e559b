//! Classified birthday views for CLI.

use clap::Subcommand;

use bday_core::engine::local_today;
use bday_core::{classify, BirthdayDb, BirthdayRecord, BirthdayStore, Config};

use super::resolve_owner;

#[derive(Subcommand)]
pub enum ViewAction {
    /// Birthdays within the upcoming window, nearest first
    Upcoming {
        /// Window in days (defaults to configured window_days)
        #[arg(long)]
        window: Option<i64>,
        #[arg(long)]
        owner: Option<String>,
    },
    /// Broader dashboard view (configured dashboard_window_days)
    Dashboard {
        #[arg(long)]
        owner: Option<String>,
    },
    /// Birthdays occurring today
    Today {
        #[arg(long)]
        owner: Option<String>,
    },
    /// Every birthday, nearest first
    All {
        #[arg(long)]
        owner: Option<String>,
    },
}

pub fn run(action: ViewAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let db = BirthdayDb::open()?;
    let today = local_today();

    match action {
        ViewAction::Upcoming { window, owner } => {
            let owner = resolve_owner(owner, &config)?;
            let window = window.unwrap_or(config.window_days);
            let classified = classify(&db.fetch_all(&owner)?, today, window);
            println!("Upcoming in the next {window} days:");
            print_records(&classified.upcoming, today);
        }
        ViewAction::Dashboard { owner } => {
            let owner = resolve_owner(owner, &config)?;
            let window = config.dashboard_window_days;
            let classified = classify(&db.fetch_all(&owner)?, today, window);
            println!("Upcoming in the next {window} days:");
            print_records(&classified.upcoming, today);
        }
        ViewAction::Today { owner } => {
            let owner = resolve_owner(owner, &config)?;
            let classified = classify(&db.fetch_all(&owner)?, today, config.window_days);
            if classified.today.is_empty() {
                println!("No birthdays today");
            } else {
                for record in &classified.today {
                    println!("🎉 {}", record.name);
                }
            }
        }
        ViewAction::All { owner } => {
            let owner = resolve_owner(owner, &config)?;
            let classified = classify(&db.fetch_all(&owner)?, today, config.window_days);
            print_records(&classified.all, today);
        }
    }
    Ok(())
}

pub(crate) fn print_records(records: &[BirthdayRecord], today: chrono::NaiveDate) {
    if records.is_empty() {
        println!("(none)");
        return;
    }
    for record in records {
        let days = record.days_until(today);
        let when = if days == 0 {
            "today".to_string()
        } else {
            format!("in {days} days")
        };
        println!(
            "{}  {} ({}) [{}]",
            record.occurrence_label(today),
            record.name,
            when,
            record.id
        );
    }
}
