use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::store::{self, soft_delete::Deletion, update::UpdateSet};

/// A piece of course content (lecture, chapter, lesson), `articles`
/// collection. Articles are versioned: editing a published article goes
/// through a cloned draft rather than mutating the original.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub course_id: ObjectId,
    pub title: String,
    /// Markdown source.
    pub content_md: String,
    /// Plaintext rendering used for search indexing.
    pub content_txt: String,
    /// Position within the course structure.
    pub order: i32,
    pub version: i32,
    #[serde(default)]
    pub tags: Vec<String>,
    pub is_draft: bool,
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
pub struct CreateArticle {
    /// Course id as a hex string.
    pub course_id: String,
    pub title: String,
    pub content_md: String,
    pub content_txt: String,
    pub order: i32,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateArticle {
    pub title: Option<String>,
    pub content_md: Option<String>,
    pub content_txt: Option<String>,
    pub order: Option<i32>,
    pub tags: Option<Vec<String>>,
    pub is_draft: Option<bool>,
}

/// Optional criteria for listing articles.
#[derive(Debug, Clone, Default)]
pub struct ArticleFilter {
    pub course_id: Option<String>,
    /// Partial, case-insensitive title match.
    pub title: Option<String>,
    pub tags: Vec<String>,
    pub is_draft: Option<bool>,
    pub version: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArticleView {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub content_md: String,
    pub content_txt: String,
    pub order: i32,
    pub version: i32,
    pub tags: Vec<String>,
    pub is_draft: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl Article {
    #[must_use]
    pub fn view(&self) -> ArticleView {
        ArticleView {
            id: self.id.to_hex(),
            course_id: self.course_id.to_hex(),
            title: self.title.clone(),
            content_md: self.content_md.clone(),
            content_txt: self.content_txt.clone(),
            order: self.order,
            version: self.version,
            tags: self.tags.clone(),
            is_draft: self.is_draft,
            created_at: store::rfc3339(self.created_at),
            updated_at: store::rfc3339(self.updated_at),
        }
    }

    /// Copy of this article as a fresh editable draft: new id, the given
    /// version, reset timestamps, draft flag back on. The original is left
    /// untouched.
    #[must_use]
    pub fn as_new_version(&self, version: i32) -> Self {
        let now = DateTime::now();
        Self {
            id: ObjectId::new(),
            version,
            is_draft: true,
            created_at: now,
            updated_at: now,
            deleted: Deletion::Active,
            ..self.clone()
        }
    }
}

impl CreateArticle {
    /// # Errors
    /// Returns `InvalidIdFormat` for a malformed course id.
    pub fn into_article(self) -> Result<Article, Error> {
        let course_id = store::parse_object_id(&self.course_id)?;
        let now = DateTime::now();
        Ok(Article {
            id: ObjectId::new(),
            course_id,
            title: self.title,
            content_md: self.content_md,
            content_txt: self.content_txt,
            order: self.order,
            version: 1,
            tags: self.tags,
            is_draft: true,
            created_at: now,
            updated_at: now,
            deleted: Deletion::Active,
        })
    }
}

impl UpdateArticle {
    #[must_use]
    pub fn into_update_set(self) -> UpdateSet {
        let mut set = UpdateSet::new();
        set.field("title", self.title)
            .field("content_md", self.content_md)
            .field("content_txt", self.content_txt)
            .field("order", self.order)
            .field("tags", self.tags)
            .field("is_draft", self.is_draft);
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article() -> Article {
        CreateArticle {
            course_id: ObjectId::new().to_hex(),
            title: "Ownership".to_string(),
            content_md: "# Ownership".to_string(),
            content_txt: "Ownership".to_string(),
            order: 1,
            tags: vec!["rust".to_string()],
        }
        .into_article()
        .unwrap()
    }

    #[test]
    fn test_into_article_starts_as_draft_v1() {
        let article = article();
        assert_eq!(article.version, 1);
        assert!(article.is_draft);
        assert!(article.deleted.is_active());
    }

    #[test]
    fn test_into_article_rejects_bad_course_id() {
        let result = CreateArticle {
            course_id: "bogus".to_string(),
            title: String::new(),
            content_md: String::new(),
            content_txt: String::new(),
            order: 0,
            tags: Vec::new(),
        }
        .into_article();

        assert!(matches!(result, Err(Error::InvalidIdFormat)));
    }

    #[test]
    fn test_as_new_version_preserves_content_resets_state() {
        let mut original = article();
        original.is_draft = false;
        original.deleted = Deletion::Deleted(DateTime::now());

        let clone = original.as_new_version(3);

        assert_ne!(clone.id, original.id);
        assert_eq!(clone.version, 3);
        assert_eq!(clone.course_id, original.course_id);
        assert_eq!(clone.title, original.title);
        assert_eq!(clone.content_md, original.content_md);
        assert!(clone.is_draft);
        assert!(clone.deleted.is_active());
    }

    #[test]
    fn test_empty_update_is_empty() {
        assert!(UpdateArticle::default().into_update_set().is_empty());
    }
}
