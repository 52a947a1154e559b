//! Live upcoming view for CLI.
//!
//! Subscribes to the store's snapshot stream and reprints the derived
//! view whenever the owner's records change. The store only pushes for
//! mutations made through the subscribing handle, so the loop also
//! drives `refresh` on an interval to pick up writes from other
//! processes; unchanged snapshots never wake the subscription.

use std::time::Duration;

use bday_core::engine::local_today;
use bday_core::{BirthdayDb, BirthdayStore, Config, UpcomingView, ViewSubscription};

use super::resolve_owner;
use super::view::print_records;

pub fn run(
    owner: Option<String>,
    window: Option<i64>,
    interval_secs: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let owner = resolve_owner(owner, &config)?;
    let db = BirthdayDb::open()?;

    let mut params = config.view_params(false);
    if let Some(window) = window {
        params.window_days = window;
    }

    let mut sub = ViewSubscription::new(db.subscribe(&owner)?, params);
    println!(
        "Watching birthdays for {owner} (window: {} days, Ctrl-C to stop)",
        params.window_days
    );
    print_view(&sub.current(local_today()));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(async {
        loop {
            tokio::select! {
                view = sub.next_view(local_today()) => {
                    match view {
                        Some(view) => print_view(&view),
                        // store side is gone, nothing more will arrive
                        None => break,
                    }
                }
                _ = tokio::time::sleep(Duration::from_secs(interval_secs)) => {
                    db.refresh(&owner)?;
                }
            }
        }
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

fn print_view(view: &UpcomingView) {
    let today = local_today();
    println!("--- {today} ---");
    for record in &view.classification.today {
        println!("🎉 {}", record.name);
    }
    print_records(&view.classification.upcoming, today);
}
