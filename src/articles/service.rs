use tracing::info;

use crate::articles::models::{ArticleFilter, ArticleView, CreateArticle, UpdateArticle};
use crate::articles::repo::ArticleRepo;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct ArticleService {
    repo: ArticleRepo,
}

impl ArticleService {
    #[must_use]
    pub fn new(repo: ArticleRepo) -> Self {
        Self { repo }
    }

    /// # Errors
    /// Returns `InvalidIdFormat` for a malformed course id, or the store error.
    pub async fn create(&self, dto: CreateArticle) -> Result<ArticleView> {
        info!("Creating article for course {}: {}", dto.course_id, dto.title);
        let article = self.repo.create(dto).await?;
        info!("Article created: id={}", article.id);
        Ok(article)
    }

    /// # Errors
    /// Returns `InvalidIdFormat` or `NotFound`.
    pub async fn get_by_id(&self, id: &str) -> Result<ArticleView> {
        self.repo.get_by_id(id).await
    }

    /// # Errors
    /// Returns `InvalidIdFormat` or `NotFound`; an empty update is a no-op.
    pub async fn update(&self, id: &str, dto: UpdateArticle) -> Result<()> {
        self.repo.update_by_id(id, dto).await?;
        info!("Article updated: id={id}");
        Ok(())
    }

    /// # Errors
    /// Returns `InvalidIdFormat` or `NotFound`.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.repo.delete_by_id(id).await?;
        info!("Article deleted: id={id}");
        Ok(())
    }

    /// # Errors
    /// Returns `InvalidIdFormat` for a malformed course filter, or the store
    /// error.
    pub async fn find(&self, filter: ArticleFilter) -> Result<Vec<ArticleView>> {
        self.repo.find(filter).await
    }

    /// Clone the article as a next-version draft, then apply the update to
    /// the clone. The published original is never mutated.
    ///
    /// # Errors
    /// Returns `InvalidIdFormat` or `NotFound`, or the store error.
    pub async fn update_with_versioning(
        &self,
        id: &str,
        dto: UpdateArticle,
    ) -> Result<ArticleView> {
        let clone = self.repo.clone_with_incremented_version(id).await?;
        info!("Cloned article {id} as {} (v{})", clone.id, clone.version);

        self.repo.update_by_id(&clone.id, dto).await?;

        self.repo.get_by_id(&clone.id).await
    }

    /// # Errors
    /// Returns `InvalidIdFormat` for a malformed course id, or the store error.
    pub async fn find_all_versions(
        &self,
        course_id: &str,
        title: &str,
    ) -> Result<Vec<ArticleView>> {
        self.repo.find_all_versions(course_id, title).await
    }
}
