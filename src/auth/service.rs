use tracing::{info, warn};

use crate::auth::models::{
    AttemptUpdate, AuthAttempt, CodeOutcome, IssuedCode, RequestTelegramCode, VerifyTelegramCode,
};
use crate::auth::repo::AuthAttemptRepo;
use crate::auth::token::{TokenIssuer, TokenPair};
use crate::error::{Error, Result};
use crate::users::service::UserService;

/// Telegram-code login flow: issuance with duplicate rejection, bounded-retry
/// verification, and token issuance for the matched platform user.
#[derive(Clone)]
pub struct AuthService {
    attempts: AuthAttemptRepo,
    users: UserService,
    tokens: TokenIssuer,
}

impl AuthService {
    #[must_use]
    pub fn new(attempts: AuthAttemptRepo, users: UserService, tokens: TokenIssuer) -> Self {
        Self {
            attempts,
            users,
            tokens,
        }
    }

    /// Start a new login attempt for a Telegram username.
    ///
    /// The existence check and the insert are separate operations; a colliding
    /// request in between just leaves one extra short-lived attempt behind.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` while a valid attempt is in flight for the
    /// identifier, or the underlying store error.
    pub async fn request_telegram_code(&self, dto: RequestTelegramCode) -> Result<IssuedCode> {
        if self
            .attempts
            .get_active_by_telegram_username(&dto.telegram_username)
            .await?
            .is_some()
        {
            info!(
                "Code request while attempt still active: {}",
                dto.telegram_username
            );
            return Err(Error::AlreadyExists("auth attempt"));
        }

        let attempt = self
            .attempts
            .create(AuthAttempt::new_telegram(dto.telegram_username))
            .await?;

        Ok(attempt.issued())
    }

    /// Verify a submitted code and, on success, issue the token pair for the
    /// user bound to the Telegram username.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown attempt id, `IdentifierMismatch` when
    /// the username does not match the attempt, `InvalidCode` for a wrong code
    /// or spent attempt, or the underlying store/signing error.
    pub async fn verify_telegram_code(&self, dto: VerifyTelegramCode) -> Result<TokenPair> {
        let attempt = self.attempts.get_by_id(&dto.id).await?;

        if attempt.identifier_used != dto.telegram_username {
            warn!(
                "Identifier mismatch for auth attempt {}: {}",
                attempt.id.to_hex(),
                dto.telegram_username
            );
            return Err(Error::IdentifierMismatch);
        }

        self.apply_code_check(&attempt, &dto.code).await?;

        let user = self
            .users
            .get_by_telegram_username(&dto.telegram_username)
            .await?;

        let pair = self.tokens.issue_pair(&user.id)?;

        info!(
            "Verified code for auth attempt {}: user={}",
            attempt.id.to_hex(),
            user.id
        );
        Ok(pair)
    }

    /// Persist the single effect of a code check: mark success, store the
    /// decremented counter, or delete the exhausted attempt.
    async fn apply_code_check(&self, attempt: &AuthAttempt, code: &str) -> Result<()> {
        match attempt.check_code(code) {
            CodeOutcome::Accepted => {
                self.attempts
                    .update(
                        &attempt.id,
                        AttemptUpdate {
                            success: true,
                            attempts_left: None,
                        },
                    )
                    .await?;
                Ok(())
            }
            CodeOutcome::Rejected { attempts_left } => {
                warn!(
                    "Invalid code for auth attempt {}: {} -> {} attempts",
                    attempt.id.to_hex(),
                    attempt.attempts_left,
                    attempts_left
                );
                self.attempts
                    .update(
                        &attempt.id,
                        AttemptUpdate {
                            success: false,
                            attempts_left: Some(attempts_left),
                        },
                    )
                    .await?;
                Err(Error::InvalidCode)
            }
            CodeOutcome::Exhausted => {
                warn!(
                    "No attempts left, deleting auth attempt {}",
                    attempt.id.to_hex()
                );
                self.attempts.delete(&attempt.id).await?;
                Err(Error::InvalidCode)
            }
            CodeOutcome::AlreadyExhausted => {
                warn!("Spent auth attempt checked: {}", attempt.id.to_hex());
                Err(Error::InvalidCode)
            }
        }
    }
}
