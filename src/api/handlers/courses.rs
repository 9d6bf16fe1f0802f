use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;

use crate::api::handlers::split_tags;
use crate::courses::models::{CourseFilter, CourseView, CreateCourse, UpdateCourse};
use crate::courses::service::CourseService;
use crate::error::Error;

#[derive(Debug, Default, Deserialize)]
pub struct CourseQuery {
    pub title: Option<String>,
    /// Comma-separated list.
    pub tags: Option<String>,
    pub is_published: Option<bool>,
    pub author_id: Option<String>,
}

impl From<CourseQuery> for CourseFilter {
    fn from(query: CourseQuery) -> Self {
        Self {
            title: query.title,
            tags: split_tags(query.tags),
            is_published: query.is_published,
            author_id: query.author_id,
        }
    }
}

pub async fn create(
    Extension(courses): Extension<CourseService>,
    Json(payload): Json<CreateCourse>,
) -> Result<impl IntoResponse, Error> {
    let course = courses.create(payload).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

pub async fn get_by_id(
    Extension(courses): Extension<CourseService>,
    Path(id): Path<String>,
) -> Result<Json<CourseView>, Error> {
    Ok(Json(courses.get_by_id(&id).await?))
}

pub async fn update(
    Extension(courses): Extension<CourseService>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateCourse>,
) -> Result<StatusCode, Error> {
    courses.update(&id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    Extension(courses): Extension<CourseService>,
    Path(id): Path<String>,
) -> Result<StatusCode, Error> {
    courses.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn find(
    Extension(courses): Extension<CourseService>,
    Query(query): Query<CourseQuery>,
) -> Result<Json<Vec<CourseView>>, Error> {
    Ok(Json(courses.find(query.into()).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_into_filter_splits_tags() {
        let filter: CourseFilter = CourseQuery {
            title: Some("rust".to_string()),
            tags: Some("intro,async".to_string()),
            is_published: Some(true),
            author_id: None,
        }
        .into();

        assert_eq!(filter.tags, vec!["intro", "async"]);
        assert_eq!(filter.is_published, Some(true));
    }
}
