use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::store::{self, soft_delete::Deletion, update::UpdateSet};

/// Platform user, `users` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// External identity the Telegram login flow binds to.
    pub telegram_username: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    /// "admin" or "student".
    pub role: String,
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
pub struct CreateUser {
    pub telegram_username: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

/// Partial update; only set fields are written.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Optional criteria for listing users.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Partial, case-insensitive username match.
    pub username: Option<String>,
    pub role: Option<String>,
}

/// Presentation-layer view of a user.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: String,
    pub telegram_username: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub created_at: String,
    pub updated_at: String,
}

impl User {
    #[must_use]
    pub fn view(&self) -> UserView {
        UserView {
            id: self.id.to_hex(),
            telegram_username: self.telegram_username.clone(),
            username: self.username.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            role: self.role.clone(),
            created_at: store::rfc3339(self.created_at),
            updated_at: store::rfc3339(self.updated_at),
        }
    }
}

impl CreateUser {
    #[must_use]
    pub fn into_user(self) -> User {
        let now = DateTime::now();
        User {
            id: ObjectId::new(),
            telegram_username: self.telegram_username,
            username: self.username,
            first_name: self.first_name,
            last_name: self.last_name,
            role: self.role,
            created_at: now,
            updated_at: now,
            deleted: Deletion::Active,
        }
    }
}

impl UpdateUser {
    #[must_use]
    pub fn into_update_set(self) -> UpdateSet {
        let mut set = UpdateSet::new();
        set.field("username", self.username)
            .field("first_name", self.first_name)
            .field("last_name", self.last_name);
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_dto() -> CreateUser {
        CreateUser {
            telegram_username: "learner".to_string(),
            username: "learner".to_string(),
            first_name: "Lea".to_string(),
            last_name: "Arner".to_string(),
            role: "student".to_string(),
        }
    }

    #[test]
    fn test_into_user_sets_defaults() {
        let user = create_dto().into_user();
        assert_eq!(user.telegram_username, "learner");
        assert_eq!(user.role, "student");
        assert!(user.deleted.is_active());
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_view_renders_hex_id_and_timestamps() {
        let user = create_dto().into_user();
        let view = user.view();
        assert_eq!(view.id, user.id.to_hex());
        assert!(!view.created_at.is_empty());
    }

    #[test]
    fn test_empty_update_is_empty() {
        assert!(UpdateUser::default().into_update_set().is_empty());
    }

    #[test]
    fn test_update_collects_only_set_fields() {
        let set = UpdateUser {
            username: Some("new_name".to_string()),
            ..UpdateUser::default()
        }
        .into_update_set();
        let update = set.into_update();
        let set = update.get_document("$set").unwrap();
        assert_eq!(set.get_str("username").unwrap(), "new_name");
        assert!(!set.contains_key("first_name"));
    }
}
