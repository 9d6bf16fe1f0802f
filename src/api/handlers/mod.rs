pub mod accounts;
pub mod articles;
pub mod auth;
pub mod courses;
pub mod files;
pub mod health;
pub mod users;

// common functions for the handlers
use regex::Regex;

/// Telegram usernames: 5-32 chars of letters, digits and underscores.
#[must_use]
pub fn valid_telegram_username(username: &str) -> bool {
    Regex::new(r"^[A-Za-z0-9_]{5,32}$").map_or(false, |re| re.is_match(username))
}

/// Split a comma-separated query value into trimmed, non-empty tags.
#[must_use]
pub fn split_tags(tags: Option<String>) -> Vec<String> {
    tags.map_or_else(Vec::new, |tags| {
        tags.split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(ToString::to_string)
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_telegram_username() {
        assert!(valid_telegram_username("learner"));
        assert!(valid_telegram_username("a_1_b_2"));
        assert!(!valid_telegram_username("abcd")); // too short
        assert!(!valid_telegram_username("has space"));
        assert!(!valid_telegram_username("dash-ed"));
        assert!(!valid_telegram_username(&"x".repeat(33)));
    }

    #[test]
    fn test_split_tags() {
        assert_eq!(
            split_tags(Some("rust, intro,,async ".to_string())),
            vec!["rust", "intro", "async"]
        );
        assert!(split_tags(None).is_empty());
        assert!(split_tags(Some(" , ".to_string())).is_empty());
    }
}
