//! Reminder planning and dispatch commands for CLI.

use clap::Subcommand;

use bday_core::engine::local_today;
use bday_core::{
    classify, dispatch_replacing, plan, BirthdayDb, BirthdayStore, Config, DispatchError,
    NotificationDispatcher, ScheduledReminder,
};

use super::resolve_owner;

#[derive(Subcommand)]
pub enum NotifyAction {
    /// Show the reminders that would be scheduled
    Plan {
        /// Maximum reminders (defaults to configured max_notifications)
        #[arg(long)]
        max: Option<usize>,
        /// Window in days (defaults to configured window_days)
        #[arg(long)]
        window: Option<i64>,
        #[arg(long)]
        owner: Option<String>,
    },
    /// Replace the scheduled reminder set
    Send {
        #[arg(long)]
        max: Option<usize>,
        #[arg(long)]
        window: Option<i64>,
        #[arg(long)]
        owner: Option<String>,
    },
}

/// Stand-in dispatcher that prints what an OS dispatcher would schedule.
///
/// Real alert delivery is an external collaborator; wiring a platform
/// notification center means implementing [`NotificationDispatcher`]
/// against it and handing it to `dispatch_replacing`.
struct StdoutDispatcher;

impl NotificationDispatcher for StdoutDispatcher {
    fn cancel_all(&mut self) {
        println!("Cancelled all pending reminders");
    }

    fn schedule(&mut self, reminder: &ScheduledReminder) -> Result<(), DispatchError> {
        println!(
            "Scheduled {} at {}: {}",
            reminder.key, reminder.fires_at, reminder.message
        );
        Ok(())
    }
}

pub fn run(action: NotifyAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let db = BirthdayDb::open()?;

    match action {
        NotifyAction::Plan { max, window, owner } => {
            let reminders = build_plan(&db, &config, max, window, owner)?;
            println!("{}", serde_json::to_string_pretty(&reminders)?);
        }
        NotifyAction::Send { max, window, owner } => {
            let reminders = build_plan(&db, &config, max, window, owner)?;
            let failures = dispatch_replacing(&mut StdoutDispatcher, &reminders);
            for failure in &failures {
                eprintln!("failed to schedule {}: {}", failure.key, failure.error);
            }
            println!(
                "Scheduled {} of {} reminders",
                reminders.len() - failures.len(),
                reminders.len()
            );
        }
    }
    Ok(())
}

fn build_plan(
    db: &BirthdayDb,
    config: &Config,
    max: Option<usize>,
    window: Option<i64>,
    owner: Option<String>,
) -> Result<Vec<ScheduledReminder>, Box<dyn std::error::Error>> {
    let owner = resolve_owner(owner, config)?;
    let today = local_today();
    let window = window.unwrap_or(config.window_days);
    let max = max.unwrap_or(config.max_notifications);

    let classified = classify(&db.fetch_all(&owner)?, today, window);
    Ok(plan(&classified.upcoming, today, config.notify_at(), max))
}
