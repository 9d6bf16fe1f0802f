use futures::TryStreamExt;
use mongodb::{
    bson::{doc, DateTime},
    Collection, Database,
};
use tracing::{debug, info};

use crate::courses::models::{Course, CourseFilter, CourseView, CreateCourse, UpdateCourse};
use crate::error::{Error, Result};
use crate::store::{self, soft_delete::active_filter};

const COLLECTION: &str = "courses";

#[derive(Debug, Clone)]
pub struct CourseRepo {
    collection: Collection<Course>,
}

impl CourseRepo {
    #[must_use]
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION),
        }
    }

    /// # Errors
    /// Returns `InvalidIdFormat` for a malformed author id, or the store error.
    pub async fn create(&self, dto: CreateCourse) -> Result<CourseView> {
        let course = dto.into_course()?;
        self.collection.insert_one(&course).await?;

        info!("Created course: id={}", course.id.to_hex());
        Ok(course.view())
    }

    /// # Errors
    /// Returns `InvalidIdFormat` or `NotFound`.
    pub async fn get_by_id(&self, id: &str) -> Result<CourseView> {
        let object_id = store::parse_object_id(id)?;

        let mut filter = active_filter();
        filter.insert("_id", object_id);

        let course = self
            .collection
            .find_one(filter)
            .await?
            .ok_or(Error::NotFound("course"))?;

        Ok(course.view())
    }

    /// # Errors
    /// Returns `InvalidIdFormat` or `NotFound`; an empty update is a no-op.
    pub async fn update_by_id(&self, id: &str, dto: UpdateCourse) -> Result<()> {
        let object_id = store::parse_object_id(id)?;

        let set = dto.into_update_set();
        if set.is_empty() {
            debug!("No fields to update for course id={id}");
            return Ok(());
        }

        let mut filter = active_filter();
        filter.insert("_id", object_id);

        let result = self
            .collection
            .update_one(filter, set.into_update())
            .await?;
        if result.matched_count == 0 {
            return Err(Error::NotFound("course"));
        }

        info!("Updated course: id={id}");
        Ok(())
    }

    /// # Errors
    /// Returns `InvalidIdFormat`, or `NotFound` when no active course matches.
    pub async fn delete_by_id(&self, id: &str) -> Result<()> {
        let object_id = store::parse_object_id(id)?;

        let mut filter = active_filter();
        filter.insert("_id", object_id);

        let result = self
            .collection
            .update_one(filter, doc! {"$set": {"deleted_at": DateTime::now()}})
            .await?;
        if result.matched_count == 0 {
            return Err(Error::NotFound("course"));
        }

        info!("Soft-deleted course: id={id}");
        Ok(())
    }

    /// List active courses by optional title/tags/publication/author filters.
    ///
    /// # Errors
    /// Returns `InvalidIdFormat` for a malformed author filter, or the store
    /// error.
    pub async fn find(&self, filter: CourseFilter) -> Result<Vec<CourseView>> {
        let mut query = active_filter();

        if let Some(title) = filter.title {
            if !title.is_empty() {
                query.insert("title", doc! {"$regex": title, "$options": "i"});
            }
        }
        if !filter.tags.is_empty() {
            query.insert("tags", doc! {"$in": filter.tags});
        }
        if let Some(is_published) = filter.is_published {
            query.insert("is_published", is_published);
        }
        if let Some(author_id) = filter.author_id {
            query.insert("author_id", store::parse_object_id(&author_id)?);
        }

        let mut cursor = self.collection.find(query).await?;

        let mut courses = Vec::new();
        while let Some(course) = cursor.try_next().await? {
            courses.push(course.view());
        }

        debug!("Found {} course(s)", courses.len());
        Ok(courses)
    }
}
