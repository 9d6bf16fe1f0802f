//! # Aula (Learning Platform Backend)
//!
//! `aula` is the backend for a course-based learning platform. It exposes a
//! REST API over MongoDB for users, courses, versioned articles, linked
//! accounts, and uploaded-file metadata, plus a Telegram-code login flow.
//!
//! ## Authentication (Telegram codes)
//!
//! Login starts by requesting a one-time numeric code for a Telegram
//! username. The code is delivered out of band (a bot), never through the
//! API. Verification is bounded: three wrong submissions discard the attempt
//! and a new code must be requested. A correct code yields an access/refresh
//! JWT pair signed with per-type symmetric secrets.
//!
//! - **Issuance dedup:** at most one valid (in-TTL, retries remaining)
//!   attempt exists per identifier; duplicate requests are rejected.
//! - **Soft deletes:** domain records are never removed on delete; a
//!   `deleted_at` timestamp hides them from every read path.
//! - **Versioned content:** published articles are immutable. Edits clone the
//!   article into a next-version draft.

pub mod accounts;
pub mod api;
pub mod articles;
pub mod auth;
pub mod cli;
pub mod courses;
pub mod error;
pub mod files;
pub mod store;
pub mod users;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        // Should be a hex string (full SHA-1 is 40 chars, but could be short)
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
