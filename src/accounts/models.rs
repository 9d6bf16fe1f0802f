use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::store::{self, soft_delete::Deletion, update::UpdateSet};

/// External identity linked to a user (Telegram handle, email address),
/// `accounts` collection. A user may hold several.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user_id: ObjectId,
    /// Identity provider, e.g. "telegram" or "email".
    pub provider: String,
    /// Identity within the provider's namespace.
    pub external_id: String,
    pub display_name: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    #[serde(
        rename = "deleted_at",
        default,
        skip_serializing_if = "Deletion::is_active"
    )]
    pub deleted: Deletion,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAccount {
    pub user_id: String,
    pub provider: String,
    pub external_id: String,
    pub display_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAccount {
    pub external_id: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AccountFilter {
    /// Partial, case-insensitive display-name match.
    pub display_name: Option<String>,
    pub provider: Option<String>,
    pub external_id: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountView {
    pub id: String,
    pub user_id: String,
    pub provider: String,
    pub external_id: String,
    pub display_name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Account {
    #[must_use]
    pub fn view(&self) -> AccountView {
        AccountView {
            id: self.id.to_hex(),
            user_id: self.user_id.to_hex(),
            provider: self.provider.clone(),
            external_id: self.external_id.clone(),
            display_name: self.display_name.clone(),
            created_at: store::rfc3339(self.created_at),
            updated_at: store::rfc3339(self.updated_at),
        }
    }
}

impl CreateAccount {
    /// # Errors
    /// Returns `InvalidIdFormat` for a malformed user id.
    pub fn into_account(self) -> Result<Account, Error> {
        let user_id = store::parse_object_id(&self.user_id)?;
        let now = DateTime::now();
        Ok(Account {
            id: ObjectId::new(),
            user_id,
            provider: self.provider,
            external_id: self.external_id,
            display_name: self.display_name,
            created_at: now,
            updated_at: now,
            deleted: Deletion::Active,
        })
    }
}

impl UpdateAccount {
    #[must_use]
    pub fn into_update_set(self) -> UpdateSet {
        let mut set = UpdateSet::new();
        set.field("external_id", self.external_id)
            .field("display_name", self.display_name);
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_account_assigns_id_and_timestamps() {
        let account = CreateAccount {
            user_id: ObjectId::new().to_hex(),
            provider: "telegram".to_string(),
            external_id: "learner".to_string(),
            display_name: "Lea".to_string(),
        }
        .into_account()
        .unwrap();

        assert!(account.deleted.is_active());
        assert_eq!(account.created_at, account.updated_at);
    }

    #[test]
    fn test_into_account_rejects_bad_user_id() {
        let result = CreateAccount {
            user_id: "bogus".to_string(),
            provider: "telegram".to_string(),
            external_id: "learner".to_string(),
            display_name: "Lea".to_string(),
        }
        .into_account();

        assert!(matches!(result, Err(Error::InvalidIdFormat)));
    }

    #[test]
    fn test_empty_update_is_empty() {
        assert!(UpdateAccount::default().into_update_set().is_empty());
    }
}
