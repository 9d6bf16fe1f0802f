use tracing::info;

use crate::error::Result;
use crate::files::models::{CreateFile, FileFilter, FileView, UpdateFile};
use crate::files::repo::FileRepo;

#[derive(Debug, Clone)]
pub struct FileService {
    repo: FileRepo,
}

impl FileService {
    #[must_use]
    pub fn new(repo: FileRepo) -> Self {
        Self { repo }
    }

    /// # Errors
    /// Returns `InvalidIdFormat` for a malformed owner id, or the store error.
    pub async fn create(&self, dto: CreateFile) -> Result<FileView> {
        info!("Registering file for owner {}: {}", dto.owner_id, dto.name);
        let file = self.repo.create(dto).await?;
        info!("File record created: id={}", file.id);
        Ok(file)
    }

    /// # Errors
    /// Returns `InvalidIdFormat` or `NotFound`.
    pub async fn get_by_id(&self, id: &str) -> Result<FileView> {
        self.repo.get_by_id(id).await
    }

    /// # Errors
    /// Returns `InvalidIdFormat` or `NotFound`; an empty update is a no-op.
    pub async fn update(&self, id: &str, dto: UpdateFile) -> Result<()> {
        self.repo.update_by_id(id, dto).await?;
        info!("File record updated: id={id}");
        Ok(())
    }

    /// # Errors
    /// Returns `InvalidIdFormat` or `NotFound`.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.repo.delete_by_id(id).await?;
        info!("File record deleted: id={id}");
        Ok(())
    }

    /// # Errors
    /// Returns `InvalidIdFormat` for a malformed owner filter, or the store
    /// error.
    pub async fn find(&self, filter: FileFilter) -> Result<Vec<FileView>> {
        self.repo.find(filter).await
    }
}
