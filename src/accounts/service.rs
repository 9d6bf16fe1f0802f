use tracing::info;

use crate::accounts::models::{AccountFilter, AccountView, CreateAccount, UpdateAccount};
use crate::accounts::repo::AccountRepo;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct AccountService {
    repo: AccountRepo,
}

impl AccountService {
    #[must_use]
    pub fn new(repo: AccountRepo) -> Self {
        Self { repo }
    }

    /// # Errors
    /// Returns `InvalidIdFormat` for a malformed user id, or the store error.
    pub async fn create(&self, dto: CreateAccount) -> Result<AccountView> {
        info!("Linking {} account for user {}", dto.provider, dto.user_id);
        let account = self.repo.create(dto).await?;
        info!("Account created: id={}", account.id);
        Ok(account)
    }

    /// # Errors
    /// Returns `InvalidIdFormat` or `NotFound`.
    pub async fn get_by_id(&self, id: &str) -> Result<AccountView> {
        self.repo.get_by_id(id).await
    }

    /// # Errors
    /// Returns `InvalidIdFormat` or `NotFound`; an empty update is a no-op.
    pub async fn update(&self, id: &str, dto: UpdateAccount) -> Result<()> {
        self.repo.update_by_id(id, dto).await?;
        info!("Account updated: id={id}");
        Ok(())
    }

    /// # Errors
    /// Returns `InvalidIdFormat` or `NotFound`.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.repo.delete_by_id(id).await?;
        info!("Account deleted: id={id}");
        Ok(())
    }

    /// # Errors
    /// Returns `InvalidIdFormat` for a malformed user filter, or the store
    /// error.
    pub async fn find(&self, filter: AccountFilter) -> Result<Vec<AccountView>> {
        self.repo.find(filter).await
    }
}
