use crate::api;
use crate::cli::{actions::Action, globals::GlobalArgs};
use anyhow::{anyhow, Result};
use url::Url;

/// Handle the server action
///
/// # Errors
///
/// Returns an error for a malformed DSN or if the server fails to start.
pub async fn handle(action: Action, globals: &GlobalArgs) -> Result<()> {
    match action {
        Action::Server {
            port,
            dsn,
            database,
        } => {
            let parsed = Url::parse(&dsn)?;

            if parsed.scheme() != "mongodb" && parsed.scheme() != "mongodb+srv" {
                return Err(anyhow!("Unsupported DSN scheme: {}", parsed.scheme()));
            }

            api::new(port, dsn, database, globals).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;
    use std::time::Duration;

    #[tokio::test]
    async fn test_handle_rejects_non_mongodb_scheme() {
        let globals = GlobalArgs::new(
            SecretString::from("a".to_string()),
            SecretString::from("r".to_string()),
            Duration::from_secs(1),
            Duration::from_secs(2),
        );

        let result = handle(
            Action::Server {
                port: 8080,
                dsn: "postgres://localhost:5432/aula".to_string(),
                database: "aula".to_string(),
            },
            &globals,
        )
        .await;

        assert!(result.is_err());
    }
}
