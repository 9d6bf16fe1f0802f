use secrecy::SecretString;
use std::time::Duration;

/// Token-signing configuration shared across the server. Secrets are wrapped
/// so they never show up in Debug output or logs.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub access_token_secret: SecretString,
    pub refresh_token_secret: SecretString,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(
        access_token_secret: SecretString,
        refresh_token_secret: SecretString,
        access_token_ttl: Duration,
        refresh_token_ttl: Duration,
    ) -> Self {
        Self {
            access_token_secret,
            refresh_token_secret,
            access_token_ttl,
            refresh_token_ttl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_global_args() {
        let args = GlobalArgs::new(
            SecretString::from("access".to_string()),
            SecretString::from("refresh".to_string()),
            Duration::from_secs(3600),
            Duration::from_secs(86_400),
        );

        assert_eq!(args.access_token_secret.expose_secret(), "access");
        assert_eq!(args.refresh_token_secret.expose_secret(), "refresh");
        assert_eq!(args.access_token_ttl, Duration::from_secs(3600));
    }

    #[test]
    fn test_debug_does_not_leak_secrets() {
        let args = GlobalArgs::new(
            SecretString::from("hunter2".to_string()),
            SecretString::from("hunter3".to_string()),
            Duration::from_secs(1),
            Duration::from_secs(2),
        );

        let printed = format!("{args:?}");
        assert!(!printed.contains("hunter2"));
        assert!(!printed.contains("hunter3"));
    }
}
