//! Telegram-code login endpoints.

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Json},
};

use crate::api::handlers::valid_telegram_username;
use crate::auth::models::{RequestTelegramCode, VerifyTelegramCode};
use crate::auth::service::AuthService;
use crate::error::Error;

/// Request a one-time login code for a Telegram username. The code travels
/// through the bot, not through this response.
pub async fn request_code(
    Extension(auth): Extension<AuthService>,
    Json(payload): Json<RequestTelegramCode>,
) -> Result<impl IntoResponse, Error> {
    if !valid_telegram_username(&payload.telegram_username) {
        return Err(Error::InvalidIdFormat);
    }

    let issued = auth.request_telegram_code(payload).await?;
    Ok((StatusCode::CREATED, Json(issued)))
}

/// Verify a submitted code; a correct code yields the token pair.
pub async fn verify_code(
    Extension(auth): Extension<AuthService>,
    Json(payload): Json<VerifyTelegramCode>,
) -> Result<impl IntoResponse, Error> {
    if !valid_telegram_username(&payload.telegram_username) {
        return Err(Error::InvalidIdFormat);
    }

    let pair = auth.verify_telegram_code(payload).await?;
    Ok(Json(pair))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repo::AuthAttemptRepo;
    use crate::auth::token::TokenIssuer;
    use crate::users::{repo::UserRepo, service::UserService};
    use mongodb::Client;
    use secrecy::SecretString;
    use std::time::Duration;

    // The driver connects lazily, so handler branches that fail before any
    // query can be exercised without a running MongoDB.
    async fn auth_service() -> AuthService {
        let db = Client::with_uri_str("mongodb://localhost:27017")
            .await
            .unwrap()
            .database("aula_test");
        let tokens = TokenIssuer::new(
            &SecretString::from("access".to_string()),
            Duration::from_secs(60),
            &SecretString::from("refresh".to_string()),
            Duration::from_secs(3600),
        );
        AuthService::new(
            AuthAttemptRepo::new(&db),
            UserService::new(UserRepo::new(&db)),
            tokens,
        )
    }

    #[tokio::test]
    async fn test_request_code_rejects_bad_username() {
        let response = request_code(
            Extension(auth_service().await),
            Json(RequestTelegramCode {
                telegram_username: "no spaces allowed".to_string(),
            }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_verify_code_rejects_malformed_attempt_id() {
        let response = verify_code(
            Extension(auth_service().await),
            Json(VerifyTelegramCode {
                id: "not-hex".to_string(),
                telegram_username: "learner".to_string(),
                code: "123456".to_string(),
            }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
