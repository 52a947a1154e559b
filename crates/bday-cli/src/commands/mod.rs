pub mod config;
pub mod notify;
pub mod record;
pub mod view;
pub mod watch;

use bday_core::Config;

/// The owner the command acts for: `--owner` first, then the configured
/// `default_owner`.
pub fn resolve_owner(
    flag: Option<String>,
    config: &Config,
) -> Result<String, Box<dyn std::error::Error>> {
    flag.or_else(|| config.default_owner.clone())
        .ok_or_else(|| "no owner: pass --owner or set default_owner in config".into())
}
