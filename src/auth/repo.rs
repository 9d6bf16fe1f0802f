use mongodb::{
    bson::{doc, oid::ObjectId, DateTime},
    Collection, Database,
};
use tracing::{debug, info};

use crate::auth::models::{AttemptUpdate, AuthAttempt, ATTEMPT_TTL};
use crate::error::{Error, Result};
use crate::store;

const COLLECTION: &str = "auth_attempts";

/// MongoDB-backed store for login attempts. Attempts are short-lived and hard
/// deleted; there is no soft-delete state here.
#[derive(Debug, Clone)]
pub struct AuthAttemptRepo {
    collection: Collection<AuthAttempt>,
}

impl AuthAttemptRepo {
    #[must_use]
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION),
        }
    }

    /// Insert a freshly generated attempt.
    ///
    /// # Errors
    ///
    /// Returns the underlying store error.
    pub async fn create(&self, attempt: AuthAttempt) -> Result<AuthAttempt> {
        self.collection.insert_one(&attempt).await?;
        info!(
            "Created auth attempt: id={} identifier={}",
            attempt.id.to_hex(),
            attempt.identifier_used
        );
        Ok(attempt)
    }

    /// Fetch an attempt by its hex id.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIdFormat` for a malformed id, `NotFound` when absent.
    pub async fn get_by_id(&self, id: &str) -> Result<AuthAttempt> {
        let object_id = store::parse_object_id(id)?;

        let attempt = self
            .collection
            .find_one(doc! {"_id": object_id})
            .await?
            .ok_or(Error::NotFound("auth attempt"))?;

        debug!("Retrieved auth attempt: id={id}");
        Ok(attempt)
    }

    /// Most recent attempt for a Telegram username that is still valid:
    /// retries remain and the TTL window has not passed. Validity is enforced
    /// here, at lookup time; expired documents are left in place.
    ///
    /// # Errors
    ///
    /// Returns the underlying store error.
    pub async fn get_active_by_telegram_username(
        &self,
        telegram_username: &str,
    ) -> Result<Option<AuthAttempt>> {
        let ttl_millis = i64::try_from(ATTEMPT_TTL.as_millis()).unwrap_or(i64::MAX);
        let window_start = DateTime::from_millis(DateTime::now().timestamp_millis() - ttl_millis);

        let filter = doc! {
            "identifier_used": telegram_username,
            "channel": "telegram",
            "attempts_left": {"$gt": 0},
            "created_at": {"$gte": window_start},
        };

        let attempt = self
            .collection
            .find_one(filter)
            .sort(doc! {"created_at": -1})
            .await?;

        Ok(attempt)
    }

    /// Apply a verification outcome (`success` or a decremented counter).
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the attempt vanished, or the store error.
    pub async fn update(&self, id: &ObjectId, update: AttemptUpdate) -> Result<()> {
        let set = update.into_update_set();
        if set.is_empty() {
            debug!("No fields to update for auth attempt id={}", id.to_hex());
            return Ok(());
        }

        let result = self
            .collection
            .update_one(doc! {"_id": *id}, set.into_update())
            .await?;

        if result.matched_count == 0 {
            return Err(Error::NotFound("auth attempt"));
        }

        info!("Updated auth attempt: id={}", id.to_hex());
        Ok(())
    }

    /// Remove an attempt permanently (exhausted retries).
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when nothing was deleted, or the store error.
    pub async fn delete(&self, id: &ObjectId) -> Result<()> {
        let result = self.collection.delete_one(doc! {"_id": *id}).await?;

        if result.deleted_count == 0 {
            return Err(Error::NotFound("auth attempt"));
        }

        info!("Deleted auth attempt: id={}", id.to_hex());
        Ok(())
    }
}
