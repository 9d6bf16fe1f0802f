use mongodb::bson::{oid::ObjectId, DateTime};
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::store::{self, update::UpdateSet};

/// How long an issued code stays eligible for checking. Expiry is enforced at
/// lookup time only; stale documents are simply ignored.
pub const ATTEMPT_TTL: Duration = Duration::from_secs(5 * 60);

/// Wrong-code submissions allowed before the attempt is discarded.
pub const MAX_ATTEMPTS: i32 = 3;

/// Digits in a generated verification code.
pub const CODE_LENGTH: usize = 6;

/// Channel a verification code was sent through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthChannel {
    Telegram,
    Email,
}

/// A single code-based login attempt, `auth_attempts` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthAttempt {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub identifier_used: String,
    pub channel: AuthChannel,
    pub code: String,
    pub success: bool,
    pub attempts_left: i32,
    pub ttl_secs: i64,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// Decision for a submitted code; exactly one persistence effect follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeOutcome {
    /// Correct code: mark the attempt successful.
    Accepted,
    /// Wrong code with retries remaining: persist the decremented counter.
    Rejected { attempts_left: i32 },
    /// Wrong code and the last retry is gone: delete the attempt.
    Exhausted,
    /// The attempt was already spent before this check; no write.
    AlreadyExhausted,
}

impl AuthAttempt {
    /// Fresh attempt for a Telegram login request.
    #[must_use]
    pub fn new_telegram(telegram_username: String) -> Self {
        let now = DateTime::now();
        Self {
            id: ObjectId::new(),
            identifier_used: telegram_username,
            channel: AuthChannel::Telegram,
            code: random_digits(CODE_LENGTH),
            success: false,
            attempts_left: MAX_ATTEMPTS,
            ttl_secs: i64::try_from(ATTEMPT_TTL.as_secs()).unwrap_or(0),
            created_at: now,
            updated_at: now,
        }
    }

    /// Earliest instant a new code may be requested for this identifier.
    #[must_use]
    pub fn wait_until(&self) -> DateTime {
        DateTime::from_millis(self.created_at.timestamp_millis() + self.ttl_secs * 1000)
    }

    /// Public view returned after issuance. The code itself never leaves the
    /// store through this path.
    #[must_use]
    pub fn issued(&self) -> IssuedCode {
        IssuedCode {
            id: self.id.to_hex(),
            telegram_username: self.identifier_used.clone(),
            wait_until: store::rfc3339(self.wait_until()),
        }
    }

    /// Decide what a submitted code means for this attempt. Pure: the caller
    /// performs the single corresponding write or delete.
    #[must_use]
    pub fn check_code(&self, submitted: &str) -> CodeOutcome {
        if self.attempts_left <= 0 {
            return CodeOutcome::AlreadyExhausted;
        }

        if self.code == submitted {
            return CodeOutcome::Accepted;
        }

        let attempts_left = self.attempts_left - 1;
        if attempts_left == 0 {
            CodeOutcome::Exhausted
        } else {
            CodeOutcome::Rejected { attempts_left }
        }
    }
}

/// Incoming request to start the Telegram login flow.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestTelegramCode {
    pub telegram_username: String,
}

/// Returned after a code was issued; `wait_until` tells the client when a
/// re-request becomes possible.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedCode {
    pub id: String,
    pub telegram_username: String,
    pub wait_until: String,
}

/// Submitted by the client to verify the received code.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyTelegramCode {
    pub id: String,
    pub telegram_username: String,
    pub code: String,
}

/// Fields verification may change on an attempt.
#[derive(Debug, Clone, Default)]
pub struct AttemptUpdate {
    pub success: bool,
    pub attempts_left: Option<i32>,
}

impl AttemptUpdate {
    #[must_use]
    pub fn into_update_set(self) -> UpdateSet {
        let mut set = UpdateSet::new();
        set.field("success", self.success.then_some(true))
            .field("attempts_left", self.attempts_left);
        set
    }
}

/// Cryptographically random digit string of the given length.
#[must_use]
pub fn random_digits(length: usize) -> String {
    let mut rng = OsRng;
    (0..length)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(code: &str, attempts_left: i32) -> AuthAttempt {
        let mut attempt = AuthAttempt::new_telegram("learner".to_string());
        attempt.code = code.to_string();
        attempt.attempts_left = attempts_left;
        attempt
    }

    #[test]
    fn test_new_telegram_defaults() {
        let attempt = AuthAttempt::new_telegram("learner".to_string());
        assert_eq!(attempt.identifier_used, "learner");
        assert_eq!(attempt.channel, AuthChannel::Telegram);
        assert_eq!(attempt.attempts_left, MAX_ATTEMPTS);
        assert_eq!(attempt.code.len(), CODE_LENGTH);
        assert!(!attempt.success);
    }

    #[test]
    fn test_wait_until_is_created_at_plus_ttl() {
        let attempt = AuthAttempt::new_telegram("learner".to_string());
        let delta = attempt.wait_until().timestamp_millis() - attempt.created_at.timestamp_millis();
        assert_eq!(delta, 5 * 60 * 1000);
    }

    #[test]
    fn test_issued_view_hides_code() {
        let attempt = AuthAttempt::new_telegram("learner".to_string());
        let issued = attempt.issued();
        assert_eq!(issued.id, attempt.id.to_hex());
        assert_eq!(issued.telegram_username, "learner");
        assert!(!issued.wait_until.is_empty());
    }

    #[test]
    fn test_check_code_accepts_exact_match() {
        assert_eq!(attempt("123456", 3).check_code("123456"), CodeOutcome::Accepted);
        // A correct code never decrements, even on the last attempt.
        assert_eq!(attempt("123456", 1).check_code("123456"), CodeOutcome::Accepted);
    }

    #[test]
    fn test_check_code_decrements_on_mismatch() {
        assert_eq!(
            attempt("123456", 3).check_code("000000"),
            CodeOutcome::Rejected { attempts_left: 2 }
        );
    }

    #[test]
    fn test_check_code_exhausts_on_last_mismatch() {
        assert_eq!(attempt("123456", 1).check_code("000000"), CodeOutcome::Exhausted);
    }

    #[test]
    fn test_check_code_spent_attempt_never_matches() {
        assert_eq!(
            attempt("123456", 0).check_code("123456"),
            CodeOutcome::AlreadyExhausted
        );
    }

    #[test]
    fn test_attempt_update_success_only() {
        let set = AttemptUpdate {
            success: true,
            attempts_left: None,
        }
        .into_update_set();
        let update = set.into_update();
        let set = update.get_document("$set").unwrap();
        assert!(set.get_bool("success").unwrap());
        assert!(!set.contains_key("attempts_left"));
    }

    #[test]
    fn test_attempt_update_decrement_only() {
        let set = AttemptUpdate {
            success: false,
            attempts_left: Some(2),
        }
        .into_update_set();
        let update = set.into_update();
        let set = update.get_document("$set").unwrap();
        assert_eq!(set.get_i32("attempts_left").unwrap(), 2);
        assert!(!set.contains_key("success"));
    }

    #[test]
    fn test_random_digits() {
        let code = random_digits(CODE_LENGTH);
        assert_eq!(code.len(), CODE_LENGTH);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
        assert!(random_digits(0).is_empty());
    }
}
