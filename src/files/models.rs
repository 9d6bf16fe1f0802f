use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::store::{self, soft_delete::Deletion, update::UpdateSet};

/// Metadata for an uploaded file, `files` collection. The bytes themselves
/// live in object storage under `storage_key`; streaming them is handled
/// elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredFile {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub owner_id: ObjectId,
    pub name: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub storage_key: String,
    #[serde(default)]
    pub tags: Vec<String>,
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
pub struct CreateFile {
    pub owner_id: String,
    pub name: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub storage_key: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFile {
    pub name: Option<String>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct FileFilter {
    /// Partial, case-insensitive name match.
    pub name: Option<String>,
    pub content_type: Option<String>,
    pub tags: Vec<String>,
    pub owner_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileView {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub storage_key: String,
    pub tags: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl StoredFile {
    #[must_use]
    pub fn view(&self) -> FileView {
        FileView {
            id: self.id.to_hex(),
            owner_id: self.owner_id.to_hex(),
            name: self.name.clone(),
            content_type: self.content_type.clone(),
            size_bytes: self.size_bytes,
            storage_key: self.storage_key.clone(),
            tags: self.tags.clone(),
            created_at: store::rfc3339(self.created_at),
            updated_at: store::rfc3339(self.updated_at),
        }
    }
}

impl CreateFile {
    /// # Errors
    /// Returns `InvalidIdFormat` for a malformed owner id.
    pub fn into_file(self) -> Result<StoredFile, Error> {
        let owner_id = store::parse_object_id(&self.owner_id)?;
        let now = DateTime::now();
        Ok(StoredFile {
            id: ObjectId::new(),
            owner_id,
            name: self.name,
            content_type: self.content_type,
            size_bytes: self.size_bytes,
            storage_key: self.storage_key,
            tags: self.tags,
            created_at: now,
            updated_at: now,
            deleted: Deletion::Active,
        })
    }
}

impl UpdateFile {
    #[must_use]
    pub fn into_update_set(self) -> UpdateSet {
        let mut set = UpdateSet::new();
        set.field("name", self.name).field("tags", self.tags);
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_file_assigns_id_and_timestamps() {
        let file = CreateFile {
            owner_id: ObjectId::new().to_hex(),
            name: "syllabus.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            size_bytes: 4096,
            storage_key: "uploads/syllabus.pdf".to_string(),
            tags: Vec::new(),
        }
        .into_file()
        .unwrap();

        assert!(file.deleted.is_active());
        assert_eq!(file.size_bytes, 4096);
    }

    #[test]
    fn test_into_file_rejects_bad_owner_id() {
        let result = CreateFile {
            owner_id: "bogus".to_string(),
            name: String::new(),
            content_type: String::new(),
            size_bytes: 0,
            storage_key: String::new(),
            tags: Vec::new(),
        }
        .into_file();

        assert!(matches!(result, Err(Error::InvalidIdFormat)));
    }

    #[test]
    fn test_empty_update_is_empty() {
        assert!(UpdateFile::default().into_update_set().is_empty());
    }
}
