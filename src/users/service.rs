use tracing::{info, warn};

use crate::error::Result;
use crate::users::models::{CreateUser, UpdateUser, UserFilter, UserView};
use crate::users::repo::UserRepo;

/// User business logic; a thin layer over the repository that owns logging
/// and leaves room for rules beyond storage.
#[derive(Debug, Clone)]
pub struct UserService {
    repo: UserRepo,
}

impl UserService {
    #[must_use]
    pub fn new(repo: UserRepo) -> Self {
        Self { repo }
    }

    /// # Errors
    /// Returns `AlreadyExists` for a duplicate Telegram username.
    pub async fn create(&self, dto: CreateUser) -> Result<UserView> {
        info!(
            "Creating user: telegram_username={} username={}",
            dto.telegram_username, dto.username
        );
        let user = self.repo.create(dto).await?;
        info!("User created: id={}", user.id);
        Ok(user)
    }

    /// # Errors
    /// Returns `InvalidIdFormat` or `NotFound`.
    pub async fn get_by_id(&self, id: &str) -> Result<UserView> {
        self.repo.get_by_id(id).await.map_err(|err| {
            warn!("Failed to fetch user {id}: {err}");
            err
        })
    }

    /// # Errors
    /// Returns `NotFound` when no active user carries the username.
    pub async fn get_by_telegram_username(&self, telegram_username: &str) -> Result<UserView> {
        self.repo
            .get_by_telegram_username(telegram_username)
            .await
            .map_err(|err| {
                warn!("Failed to fetch user by telegram_username={telegram_username}: {err}");
                err
            })
    }

    /// # Errors
    /// Returns `InvalidIdFormat` or `NotFound`; an empty update is a no-op.
    pub async fn update(&self, id: &str, dto: UpdateUser) -> Result<()> {
        self.repo.update_by_id(id, dto).await?;
        info!("User updated: id={id}");
        Ok(())
    }

    /// # Errors
    /// Returns `InvalidIdFormat` or `NotFound`.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.repo.delete_by_id(id).await?;
        info!("User deleted: id={id}");
        Ok(())
    }

    /// # Errors
    /// Returns the underlying store error.
    pub async fn find(&self, filter: UserFilter) -> Result<Vec<UserView>> {
        self.repo.find(filter).await
    }
}
