use crate::cli::{actions::Action, globals::GlobalArgs};
use anyhow::Result;
use secrecy::SecretString;
use std::time::Duration;

/// Build the action and global token configuration from parsed arguments.
///
/// # Errors
///
/// Returns an error when a required argument is missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<(Action, GlobalArgs)> {
    let secret = |name: &str| -> Result<SecretString> {
        matches
            .get_one::<String>(name)
            .map(|s| SecretString::from(s.clone()))
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --{name}"))
    };

    let globals = GlobalArgs::new(
        secret("access-token-secret")?,
        secret("refresh-token-secret")?,
        Duration::from_secs(
            matches
                .get_one::<u64>("access-token-ttl")
                .copied()
                .unwrap_or(3600),
        ),
        Duration::from_secs(
            matches
                .get_one::<u64>("refresh-token-ttl")
                .copied()
                .unwrap_or(86_400),
        ),
    );

    let action = Action::Server {
        port: matches.get_one::<u16>("port").copied().unwrap_or(8080),
        dsn: matches
            .get_one("dsn")
            .map(|s: &String| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --dsn"))?,
        database: matches
            .get_one("database")
            .map(|s: &String| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --database"))?,
    };

    Ok((action, globals))
}
