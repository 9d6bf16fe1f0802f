use tracing::info;

use crate::courses::models::{CourseFilter, CourseView, CreateCourse, UpdateCourse};
use crate::courses::repo::CourseRepo;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct CourseService {
    repo: CourseRepo,
}

impl CourseService {
    #[must_use]
    pub fn new(repo: CourseRepo) -> Self {
        Self { repo }
    }

    /// # Errors
    /// Returns `InvalidIdFormat` for a malformed author id, or the store error.
    pub async fn create(&self, dto: CreateCourse) -> Result<CourseView> {
        info!("Creating course: {}", dto.title);
        let course = self.repo.create(dto).await?;
        info!("Course created: id={}", course.id);
        Ok(course)
    }

    /// # Errors
    /// Returns `InvalidIdFormat` or `NotFound`.
    pub async fn get_by_id(&self, id: &str) -> Result<CourseView> {
        self.repo.get_by_id(id).await
    }

    /// # Errors
    /// Returns `InvalidIdFormat` or `NotFound`; an empty update is a no-op.
    pub async fn update(&self, id: &str, dto: UpdateCourse) -> Result<()> {
        self.repo.update_by_id(id, dto).await?;
        info!("Course updated: id={id}");
        Ok(())
    }

    /// # Errors
    /// Returns `InvalidIdFormat` or `NotFound`.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.repo.delete_by_id(id).await?;
        info!("Course deleted: id={id}");
        Ok(())
    }

    /// # Errors
    /// Returns `InvalidIdFormat` for a malformed author filter, or the store
    /// error.
    pub async fn find(&self, filter: CourseFilter) -> Result<Vec<CourseView>> {
        self.repo.find(filter).await
    }
}
