use futures::TryStreamExt;
use mongodb::{
    bson::{doc, DateTime},
    Collection, Database,
};
use tracing::{debug, info};

use crate::articles::models::{
    Article, ArticleFilter, ArticleView, CreateArticle, UpdateArticle,
};
use crate::error::{Error, Result};
use crate::store::{self, soft_delete::active_filter};

const COLLECTION: &str = "articles";

#[derive(Debug, Clone)]
pub struct ArticleRepo {
    collection: Collection<Article>,
}

impl ArticleRepo {
    #[must_use]
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION),
        }
    }

    /// # Errors
    /// Returns `InvalidIdFormat` for a malformed course id, or the store error.
    pub async fn create(&self, dto: CreateArticle) -> Result<ArticleView> {
        let article = dto.into_article()?;
        self.collection.insert_one(&article).await?;

        info!("Created article: id={}", article.id.to_hex());
        Ok(article.view())
    }

    /// # Errors
    /// Returns `InvalidIdFormat` or `NotFound`.
    pub async fn get_by_id(&self, id: &str) -> Result<ArticleView> {
        Ok(self.get_active(id).await?.view())
    }

    /// # Errors
    /// Returns `InvalidIdFormat` or `NotFound`; an empty update is a no-op.
    pub async fn update_by_id(&self, id: &str, dto: UpdateArticle) -> Result<()> {
        let object_id = store::parse_object_id(id)?;

        let set = dto.into_update_set();
        if set.is_empty() {
            debug!("No fields to update for article id={id}");
            return Ok(());
        }

        let mut filter = active_filter();
        filter.insert("_id", object_id);

        let result = self
            .collection
            .update_one(filter, set.into_update())
            .await?;
        if result.matched_count == 0 {
            return Err(Error::NotFound("article"));
        }

        info!("Updated article: id={id}");
        Ok(())
    }

    /// # Errors
    /// Returns `InvalidIdFormat`, or `NotFound` when no active article matches.
    pub async fn delete_by_id(&self, id: &str) -> Result<()> {
        let object_id = store::parse_object_id(id)?;

        let mut filter = active_filter();
        filter.insert("_id", object_id);

        let result = self
            .collection
            .update_one(filter, doc! {"$set": {"deleted_at": DateTime::now()}})
            .await?;
        if result.matched_count == 0 {
            return Err(Error::NotFound("article"));
        }

        info!("Soft-deleted article: id={id}");
        Ok(())
    }

    /// List active articles by optional course/title/tags/draft/version
    /// filters.
    ///
    /// # Errors
    /// Returns `InvalidIdFormat` for a malformed course filter, or the store
    /// error.
    pub async fn find(&self, filter: ArticleFilter) -> Result<Vec<ArticleView>> {
        let mut query = active_filter();

        if let Some(course_id) = filter.course_id {
            query.insert("course_id", store::parse_object_id(&course_id)?);
        }
        if let Some(title) = filter.title {
            if !title.is_empty() {
                query.insert("title", doc! {"$regex": title, "$options": "i"});
            }
        }
        if !filter.tags.is_empty() {
            query.insert("tags", doc! {"$in": filter.tags});
        }
        if let Some(is_draft) = filter.is_draft {
            query.insert("is_draft", is_draft);
        }
        if let Some(version) = filter.version {
            query.insert("version", version);
        }

        let mut cursor = self.collection.find(query).await?;

        let mut articles = Vec::new();
        while let Some(article) = cursor.try_next().await? {
            articles.push(article.view());
        }

        debug!("Found {} article(s)", articles.len());
        Ok(articles)
    }

    /// Copy an active article into a fresh editable draft with the next
    /// version number: `max(source version, latest active sibling with the
    /// same course and title) + 1`. The source stays untouched.
    ///
    /// # Errors
    /// Returns `InvalidIdFormat` or `NotFound`, or the store error.
    pub async fn clone_with_incremented_version(&self, id: &str) -> Result<ArticleView> {
        let original = self.get_active(id).await?;

        let mut sibling_filter = active_filter();
        sibling_filter.insert("course_id", original.course_id);
        sibling_filter.insert("title", original.title.clone());

        let latest_version = self
            .collection
            .find_one(sibling_filter)
            .sort(doc! {"version": -1})
            .await?
            .map_or(0, |latest| latest.version);

        let clone = original.as_new_version(original.version.max(latest_version) + 1);
        self.collection.insert_one(&clone).await?;

        info!(
            "Cloned article {id} -> {} (v{})",
            clone.id.to_hex(),
            clone.version
        );
        Ok(clone.view())
    }

    /// All active versions of an article (same course and title), ascending.
    ///
    /// # Errors
    /// Returns `InvalidIdFormat` for a malformed course id, or the store error.
    pub async fn find_all_versions(
        &self,
        course_id: &str,
        title: &str,
    ) -> Result<Vec<ArticleView>> {
        let mut filter = active_filter();
        filter.insert("course_id", store::parse_object_id(course_id)?);
        filter.insert("title", title);

        let mut cursor = self
            .collection
            .find(filter)
            .sort(doc! {"version": 1})
            .await?;

        let mut versions = Vec::new();
        while let Some(article) = cursor.try_next().await? {
            versions.push(article.view());
        }

        debug!("Found {} version(s) of {title}", versions.len());
        Ok(versions)
    }

    async fn get_active(&self, id: &str) -> Result<Article> {
        let object_id = store::parse_object_id(id)?;

        let mut filter = active_filter();
        filter.insert("_id", object_id);

        self.collection
            .find_one(filter)
            .await?
            .ok_or(Error::NotFound("article"))
    }
}
