use futures::TryStreamExt;
use mongodb::{
    bson::{doc, DateTime},
    Collection, Database,
};
use tracing::{debug, info};

use crate::accounts::models::{
    Account, AccountFilter, AccountView, CreateAccount, UpdateAccount,
};
use crate::error::{Error, Result};
use crate::store::{self, soft_delete::active_filter};

const COLLECTION: &str = "accounts";

#[derive(Debug, Clone)]
pub struct AccountRepo {
    collection: Collection<Account>,
}

impl AccountRepo {
    #[must_use]
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION),
        }
    }

    /// # Errors
    /// Returns `InvalidIdFormat` for a malformed user id, or the store error.
    pub async fn create(&self, dto: CreateAccount) -> Result<AccountView> {
        let account = dto.into_account()?;
        self.collection.insert_one(&account).await?;

        info!("Created account: id={}", account.id.to_hex());
        Ok(account.view())
    }

    /// # Errors
    /// Returns `InvalidIdFormat` or `NotFound`.
    pub async fn get_by_id(&self, id: &str) -> Result<AccountView> {
        let object_id = store::parse_object_id(id)?;

        let mut filter = active_filter();
        filter.insert("_id", object_id);

        let account = self
            .collection
            .find_one(filter)
            .await?
            .ok_or(Error::NotFound("account"))?;

        Ok(account.view())
    }

    /// # Errors
    /// Returns `InvalidIdFormat` or `NotFound`; an empty update is a no-op.
    pub async fn update_by_id(&self, id: &str, dto: UpdateAccount) -> Result<()> {
        let object_id = store::parse_object_id(id)?;

        let set = dto.into_update_set();
        if set.is_empty() {
            debug!("No fields to update for account id={id}");
            return Ok(());
        }

        let mut filter = active_filter();
        filter.insert("_id", object_id);

        let result = self
            .collection
            .update_one(filter, set.into_update())
            .await?;
        if result.matched_count == 0 {
            return Err(Error::NotFound("account"));
        }

        info!("Updated account: id={id}");
        Ok(())
    }

    /// # Errors
    /// Returns `InvalidIdFormat`, or `NotFound` when no active account matches.
    pub async fn delete_by_id(&self, id: &str) -> Result<()> {
        let object_id = store::parse_object_id(id)?;

        let mut filter = active_filter();
        filter.insert("_id", object_id);

        let result = self
            .collection
            .update_one(filter, doc! {"$set": {"deleted_at": DateTime::now()}})
            .await?;
        if result.matched_count == 0 {
            return Err(Error::NotFound("account"));
        }

        info!("Soft-deleted account: id={id}");
        Ok(())
    }

    /// # Errors
    /// Returns `InvalidIdFormat` for a malformed user filter, or the store
    /// error.
    pub async fn find(&self, filter: AccountFilter) -> Result<Vec<AccountView>> {
        let mut query = active_filter();

        if let Some(display_name) = filter.display_name {
            if !display_name.is_empty() {
                query.insert("display_name", doc! {"$regex": display_name, "$options": "i"});
            }
        }
        if let Some(provider) = filter.provider {
            query.insert("provider", provider);
        }
        if let Some(external_id) = filter.external_id {
            query.insert("external_id", external_id);
        }
        if let Some(user_id) = filter.user_id {
            query.insert("user_id", store::parse_object_id(&user_id)?);
        }

        let mut cursor = self.collection.find(query).await?;

        let mut accounts = Vec::new();
        while let Some(account) = cursor.try_next().await? {
            accounts.push(account.view());
        }

        debug!("Found {} account(s)", accounts.len());
        Ok(accounts)
    }
}
