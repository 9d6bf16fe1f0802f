use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ColorChoice, Command,
};

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("aula")
        .about("Learning platform backend")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("AULA_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("dsn")
                .short('d')
                .long("dsn")
                .help("MongoDB connection string")
                .default_value("mongodb://localhost:27017")
                .env("AULA_DSN"),
        )
        .arg(
            Arg::new("database")
                .long("database")
                .help("MongoDB database name")
                .default_value("aula")
                .env("AULA_DATABASE"),
        )
        .arg(
            Arg::new("access-token-secret")
                .long("access-token-secret")
                .help("Secret used for signing access tokens")
                .env("AULA_ACCESS_TOKEN_SECRET")
                .required(true),
        )
        .arg(
            Arg::new("refresh-token-secret")
                .long("refresh-token-secret")
                .help("Secret used for signing refresh tokens")
                .env("AULA_REFRESH_TOKEN_SECRET")
                .required(true),
        )
        .arg(
            Arg::new("access-token-ttl")
                .long("access-token-ttl")
                .help("Access token lifetime in seconds")
                .default_value("3600")
                .env("AULA_ACCESS_TOKEN_TTL")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("refresh-token-ttl")
                .long("refresh-token-ttl")
                .help("Refresh token lifetime in seconds")
                .default_value("86400")
                .env("AULA_REFRESH_TOKEN_TTL")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("AULA_LOG_LEVEL")
                .global(true)
                .action(clap::ArgAction::Count)
                .value_parser(validator_log_level()),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required_args() -> Vec<String> {
        vec![
            "aula".to_string(),
            "--access-token-secret".to_string(),
            "access-secret".to_string(),
            "--refresh-token-secret".to_string(),
            "refresh-secret".to_string(),
        ]
    }

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "aula");
        assert_eq!(
            command.get_about().unwrap().to_string(),
            "Learning platform backend"
        );
        assert_eq!(
            command.get_version().unwrap().to_string(),
            env!("CARGO_PKG_VERSION")
        );
    }

    #[test]
    fn test_check_defaults() {
        let command = new();
        let matches = command.get_matches_from(required_args());

        assert_eq!(matches.get_one::<u16>("port").copied(), Some(8080));
        assert_eq!(
            matches.get_one::<String>("dsn").map(String::to_string),
            Some("mongodb://localhost:27017".to_string())
        );
        assert_eq!(
            matches.get_one::<String>("database").map(String::to_string),
            Some("aula".to_string())
        );
        assert_eq!(
            matches.get_one::<u64>("access-token-ttl").copied(),
            Some(3600)
        );
        assert_eq!(
            matches.get_one::<u64>("refresh-token-ttl").copied(),
            Some(86_400)
        );
    }

    #[test]
    fn test_check_port_and_dsn() {
        let command = new();
        let mut args = required_args();
        args.extend([
            "--port".to_string(),
            "3000".to_string(),
            "--dsn".to_string(),
            "mongodb://mongo.internal:27017".to_string(),
        ]);
        let matches = command.get_matches_from(args);

        assert_eq!(matches.get_one::<u16>("port").copied(), Some(3000));
        assert_eq!(
            matches.get_one::<String>("dsn").map(String::to_string),
            Some("mongodb://mongo.internal:27017".to_string())
        );
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("AULA_PORT", Some("443")),
                ("AULA_DSN", Some("mongodb://mongo.tld:27017")),
                ("AULA_DATABASE", Some("campus")),
                ("AULA_ACCESS_TOKEN_SECRET", Some("access-secret")),
                ("AULA_REFRESH_TOKEN_SECRET", Some("refresh-secret")),
                ("AULA_ACCESS_TOKEN_TTL", Some("600")),
                ("AULA_LOG_LEVEL", Some("info")),
            ],
            || {
                let command = new();
                let matches = command.get_matches_from(vec!["aula"]);

                assert_eq!(matches.get_one::<u16>("port").copied(), Some(443));
                assert_eq!(
                    matches.get_one::<String>("dsn").map(String::to_string),
                    Some("mongodb://mongo.tld:27017".to_string())
                );
                assert_eq!(
                    matches.get_one::<String>("database").map(String::to_string),
                    Some("campus".to_string())
                );
                assert_eq!(
                    matches.get_one::<u64>("access-token-ttl").copied(),
                    Some(600)
                );
                assert_eq!(matches.get_one::<u8>("verbosity").copied(), Some(2));
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        // loop cover all possible value_parse
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars(
                [
                    ("AULA_LOG_LEVEL", Some(level)),
                    ("AULA_ACCESS_TOKEN_SECRET", Some("access-secret")),
                    ("AULA_REFRESH_TOKEN_SECRET", Some("refresh-secret")),
                ],
                || {
                    let command = new();
                    let matches = command.get_matches_from(vec!["aula"]);
                    assert_eq!(
                        matches.get_one::<u8>("verbosity").copied(),
                        Some(u8::try_from(index).unwrap())
                    );
                },
            );
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        // loop cover all possible value_parse
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, _) in levels.iter().enumerate() {
            temp_env::with_vars([("AULA_LOG_LEVEL", None::<String>)], || {
                let mut args = required_args();

                // Add the appropriate number of "-v" flags based on the index
                if index > 0 {
                    let v = format!("-{}", "v".repeat(index));
                    args.push(v);
                }

                let command = new();
                let matches = command.get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>("verbosity").copied(),
                    Some(u8::try_from(index).unwrap())
                );
            });
        }
    }
}
