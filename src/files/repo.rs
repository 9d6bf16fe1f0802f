use futures::TryStreamExt;
use mongodb::{
    bson::{doc, DateTime},
    Collection, Database,
};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::files::models::{CreateFile, FileFilter, FileView, StoredFile, UpdateFile};
use crate::store::{self, soft_delete::active_filter};

const COLLECTION: &str = "files";

#[derive(Debug, Clone)]
pub struct FileRepo {
    collection: Collection<StoredFile>,
}

impl FileRepo {
    #[must_use]
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION),
        }
    }

    /// # Errors
    /// Returns `InvalidIdFormat` for a malformed owner id, or the store error.
    pub async fn create(&self, dto: CreateFile) -> Result<FileView> {
        let file = dto.into_file()?;
        self.collection.insert_one(&file).await?;

        info!("Created file record: id={}", file.id.to_hex());
        Ok(file.view())
    }

    /// # Errors
    /// Returns `InvalidIdFormat` or `NotFound`.
    pub async fn get_by_id(&self, id: &str) -> Result<FileView> {
        let object_id = store::parse_object_id(id)?;

        let mut filter = active_filter();
        filter.insert("_id", object_id);

        let file = self
            .collection
            .find_one(filter)
            .await?
            .ok_or(Error::NotFound("file"))?;

        Ok(file.view())
    }

    /// # Errors
    /// Returns `InvalidIdFormat` or `NotFound`; an empty update is a no-op.
    pub async fn update_by_id(&self, id: &str, dto: UpdateFile) -> Result<()> {
        let object_id = store::parse_object_id(id)?;

        let set = dto.into_update_set();
        if set.is_empty() {
            debug!("No fields to update for file id={id}");
            return Ok(());
        }

        let mut filter = active_filter();
        filter.insert("_id", object_id);

        let result = self
            .collection
            .update_one(filter, set.into_update())
            .await?;
        if result.matched_count == 0 {
            return Err(Error::NotFound("file"));
        }

        info!("Updated file record: id={id}");
        Ok(())
    }

    /// # Errors
    /// Returns `InvalidIdFormat`, or `NotFound` when no active record matches.
    pub async fn delete_by_id(&self, id: &str) -> Result<()> {
        let object_id = store::parse_object_id(id)?;

        let mut filter = active_filter();
        filter.insert("_id", object_id);

        let result = self
            .collection
            .update_one(filter, doc! {"$set": {"deleted_at": DateTime::now()}})
            .await?;
        if result.matched_count == 0 {
            return Err(Error::NotFound("file"));
        }

        info!("Soft-deleted file record: id={id}");
        Ok(())
    }

    /// # Errors
    /// Returns `InvalidIdFormat` for a malformed owner filter, or the store
    /// error.
    pub async fn find(&self, filter: FileFilter) -> Result<Vec<FileView>> {
        let mut query = active_filter();

        if let Some(name) = filter.name {
            if !name.is_empty() {
                query.insert("name", doc! {"$regex": name, "$options": "i"});
            }
        }
        if let Some(content_type) = filter.content_type {
            query.insert("content_type", content_type);
        }
        if !filter.tags.is_empty() {
            query.insert("tags", doc! {"$in": filter.tags});
        }
        if let Some(owner_id) = filter.owner_id {
            query.insert("owner_id", store::parse_object_id(&owner_id)?);
        }

        let mut cursor = self.collection.find(query).await?;

        let mut files = Vec::new();
        while let Some(file) = cursor.try_next().await? {
            files.push(file.view());
        }

        debug!("Found {} file record(s)", files.len());
        Ok(files)
    }
}
