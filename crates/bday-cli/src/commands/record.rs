//! Birthday record management commands for CLI.

use clap::Subcommand;

use bday_core::{BirthdayDb, BirthdayRecord, BirthdayStore, Config};

use super::resolve_owner;

#[derive(Subcommand)]
pub enum RecordAction {
    /// Add a birthday
    Add {
        /// Display name
        name: String,
        /// Month, 1-12
        month: u32,
        /// Day of month, 1-31 (Feb 29 allowed)
        day: u32,
        /// Free-text notes
        #[arg(long)]
        notes: Option<String>,
        /// Owner id (defaults to configured default_owner)
        #[arg(long)]
        owner: Option<String>,
    },
    /// List all birthdays
    List {
        #[arg(long)]
        owner: Option<String>,
    },
    /// Get one birthday by id
    Get {
        /// Record id
        id: String,
        #[arg(long)]
        owner: Option<String>,
    },
    /// Update a birthday
    Update {
        /// Record id
        id: String,
        /// New display name
        #[arg(long)]
        name: Option<String>,
        /// New month
        #[arg(long)]
        month: Option<u32>,
        /// New day
        #[arg(long)]
        day: Option<u32>,
        /// New notes (replaces existing; omit to keep current notes)
        #[arg(long)]
        notes: Option<String>,
        /// Remove existing notes
        #[arg(long, conflicts_with = "notes")]
        clear_notes: bool,
        #[arg(long)]
        owner: Option<String>,
    },
    /// Delete a birthday
    Delete {
        /// Record id
        id: String,
        #[arg(long)]
        owner: Option<String>,
    },
}

pub fn run(action: RecordAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let db = BirthdayDb::open()?;

    match action {
        RecordAction::Add {
            name,
            month,
            day,
            notes,
            owner,
        } => {
            let owner = resolve_owner(owner, &config)?;
            let record = BirthdayRecord::new(&name, month, day, &owner, notes)?;
            db.create(&record)?;
            println!("Birthday created: {}", record.id);
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        RecordAction::List { owner } => {
            let owner = resolve_owner(owner, &config)?;
            let records = db.fetch_all(&owner)?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        RecordAction::Get { id, owner } => {
            let owner = resolve_owner(owner, &config)?;
            match db.get(&owner, &id)? {
                Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
                None => println!("Birthday not found: {id}"),
            }
        }
        RecordAction::Update {
            id,
            name,
            month,
            day,
            notes,
            clear_notes,
            owner,
        } => {
            let owner = resolve_owner(owner, &config)?;
            let mut record = db
                .get(&owner, &id)?
                .ok_or(format!("Birthday not found: {id}"))?;

            let name = name.unwrap_or_else(|| record.name.clone());
            let month = month.unwrap_or(record.month);
            let day = day.unwrap_or(record.day);
            let notes = if clear_notes {
                None
            } else {
                notes.map(Some).unwrap_or_else(|| record.notes.clone())
            };
            record.apply_update(&name, month, day, notes)?;

            db.update(&record)?;
            println!("Birthday updated:");
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        RecordAction::Delete { id, owner } => {
            let owner = resolve_owner(owner, &config)?;
            db.delete(&owner, &id)?;
            println!("Birthday deleted: {id}");
        }
    }
    Ok(())
}
