use futures::TryStreamExt;
use mongodb::{
    bson::{doc, DateTime},
    Collection, Database,
};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::store::{self, soft_delete::active_filter};
use crate::users::models::{CreateUser, UpdateUser, User, UserFilter, UserView};

const COLLECTION: &str = "users";

/// MongoDB-backed user store. Reads exclude soft-deleted documents; deletion
/// sets `deleted_at` instead of removing the row.
#[derive(Debug, Clone)]
pub struct UserRepo {
    collection: Collection<User>,
}

impl UserRepo {
    #[must_use]
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION),
        }
    }

    /// Insert a new user unless the Telegram username is already taken.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` for a duplicate Telegram username, or the
    /// underlying store error.
    pub async fn create(&self, dto: CreateUser) -> Result<UserView> {
        let count = self
            .collection
            .count_documents(doc! {"telegram_username": &dto.telegram_username})
            .await?;
        if count > 0 {
            warn!(
                "User already exists: telegram_username={}",
                dto.telegram_username
            );
            return Err(Error::AlreadyExists("user"));
        }

        let user = dto.into_user();
        self.collection.insert_one(&user).await?;

        info!("Created user: id={}", user.id.to_hex());
        Ok(user.view())
    }

    /// Fetch an active user by hex id.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIdFormat` or `NotFound`.
    pub async fn get_by_id(&self, id: &str) -> Result<UserView> {
        let object_id = store::parse_object_id(id)?;

        let mut filter = active_filter();
        filter.insert("_id", object_id);

        let user = self
            .collection
            .find_one(filter)
            .await?
            .ok_or(Error::NotFound("user"))?;

        Ok(user.view())
    }

    /// Fetch an active user by Telegram username (the auth flow's lookup).
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no active user carries the username.
    pub async fn get_by_telegram_username(&self, telegram_username: &str) -> Result<UserView> {
        let mut filter = active_filter();
        filter.insert("telegram_username", telegram_username);

        let user = self
            .collection
            .find_one(filter)
            .await?
            .ok_or(Error::NotFound("user"))?;

        Ok(user.view())
    }

    /// Apply a partial update to an active user.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIdFormat` or `NotFound`; an empty update is a no-op.
    pub async fn update_by_id(&self, id: &str, dto: UpdateUser) -> Result<()> {
        let object_id = store::parse_object_id(id)?;

        let set = dto.into_update_set();
        if set.is_empty() {
            debug!("No fields to update for user id={id}");
            return Ok(());
        }

        let mut filter = active_filter();
        filter.insert("_id", object_id);

        let result = self
            .collection
            .update_one(filter, set.into_update())
            .await?;
        if result.matched_count == 0 {
            return Err(Error::NotFound("user"));
        }

        info!("Updated user: id={id}");
        Ok(())
    }

    /// Soft-delete an active user.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIdFormat`, or `NotFound` when no active user matches.
    pub async fn delete_by_id(&self, id: &str) -> Result<()> {
        let object_id = store::parse_object_id(id)?;

        let mut filter = active_filter();
        filter.insert("_id", object_id);

        let result = self
            .collection
            .update_one(filter, doc! {"$set": {"deleted_at": DateTime::now()}})
            .await?;
        if result.matched_count == 0 {
            return Err(Error::NotFound("user"));
        }

        info!("Soft-deleted user: id={id}");
        Ok(())
    }

    /// List active users matching the optional filters.
    ///
    /// # Errors
    ///
    /// Returns the underlying store error.
    pub async fn find(&self, filter: UserFilter) -> Result<Vec<UserView>> {
        let mut query = active_filter();

        if let Some(username) = filter.username {
            if !username.is_empty() {
                query.insert("username", doc! {"$regex": username, "$options": "i"});
            }
        }
        if let Some(role) = filter.role {
            query.insert("role", role);
        }

        let mut cursor = self.collection.find(query).await?;

        let mut users = Vec::new();
        while let Some(user) = cursor.try_next().await? {
            users.push(user.view());
        }

        debug!("Found {} user(s)", users.len());
        Ok(users)
    }
}
