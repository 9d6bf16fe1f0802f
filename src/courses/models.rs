use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::store::{self, soft_delete::Deletion, update::UpdateSet};

/// Learning course, `courses` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub description: String,
    pub author_id: ObjectId,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Whether the course is visible to learners. New courses start hidden.
    pub is_published: bool,
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
pub struct CreateCourse {
    pub title: String,
    pub description: String,
    /// Author's id as a hex string.
    pub author_id: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCourse {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_published: Option<bool>,
}

/// Optional criteria for listing courses.
#[derive(Debug, Clone, Default)]
pub struct CourseFilter {
    /// Partial, case-insensitive title match.
    pub title: Option<String>,
    /// Course must carry at least one of these.
    pub tags: Vec<String>,
    pub is_published: Option<bool>,
    pub author_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub author_id: String,
    pub tags: Vec<String>,
    pub is_published: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl Course {
    #[must_use]
    pub fn view(&self) -> CourseView {
        CourseView {
            id: self.id.to_hex(),
            title: self.title.clone(),
            description: self.description.clone(),
            author_id: self.author_id.to_hex(),
            tags: self.tags.clone(),
            is_published: self.is_published,
            created_at: store::rfc3339(self.created_at),
            updated_at: store::rfc3339(self.updated_at),
        }
    }
}

impl CreateCourse {
    /// # Errors
    /// Returns `InvalidIdFormat` for a malformed author id.
    pub fn into_course(self) -> Result<Course, Error> {
        let author_id = store::parse_object_id(&self.author_id)?;
        let now = DateTime::now();
        Ok(Course {
            id: ObjectId::new(),
            title: self.title,
            description: self.description,
            author_id,
            tags: self.tags,
            is_published: false,
            created_at: now,
            updated_at: now,
            deleted: Deletion::Active,
        })
    }
}

impl UpdateCourse {
    #[must_use]
    pub fn into_update_set(self) -> UpdateSet {
        let mut set = UpdateSet::new();
        set.field("title", self.title)
            .field("description", self.description)
            .field("tags", self.tags)
            .field("is_published", self.is_published);
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_course_starts_unpublished() {
        let course = CreateCourse {
            title: "Rust 101".to_string(),
            description: "Intro".to_string(),
            author_id: ObjectId::new().to_hex(),
            tags: vec!["rust".to_string()],
        }
        .into_course()
        .unwrap();

        assert!(!course.is_published);
        assert!(course.deleted.is_active());
    }

    #[test]
    fn test_into_course_rejects_bad_author_id() {
        let result = CreateCourse {
            title: "Rust 101".to_string(),
            description: "Intro".to_string(),
            author_id: "not-an-id".to_string(),
            tags: Vec::new(),
        }
        .into_course();

        assert!(matches!(result, Err(Error::InvalidIdFormat)));
    }

    #[test]
    fn test_empty_update_is_empty() {
        assert!(UpdateCourse::default().into_update_set().is_empty());
    }

    #[test]
    fn test_publish_toggle_update() {
        let set = UpdateCourse {
            is_published: Some(true),
            ..UpdateCourse::default()
        }
        .into_update_set();
        let update = set.into_update();
        assert!(update
            .get_document("$set")
            .unwrap()
            .get_bool("is_published")
            .unwrap());
    }
}
