use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;

use crate::api::handlers::split_tags;
use crate::articles::models::{ArticleFilter, ArticleView, CreateArticle, UpdateArticle};
use crate::articles::service::ArticleService;
use crate::error::Error;

#[derive(Debug, Default, Deserialize)]
pub struct ArticleQuery {
    pub course_id: Option<String>,
    pub title: Option<String>,
    /// Comma-separated list.
    pub tags: Option<String>,
    pub is_draft: Option<bool>,
    pub version: Option<i32>,
}

impl From<ArticleQuery> for ArticleFilter {
    fn from(query: ArticleQuery) -> Self {
        Self {
            course_id: query.course_id,
            title: query.title,
            tags: split_tags(query.tags),
            is_draft: query.is_draft,
            version: query.version,
        }
    }
}

pub async fn create(
    Extension(articles): Extension<ArticleService>,
    Json(payload): Json<CreateArticle>,
) -> Result<impl IntoResponse, Error> {
    let article = articles.create(payload).await?;
    Ok((StatusCode::CREATED, Json(article)))
}

pub async fn get_by_id(
    Extension(articles): Extension<ArticleService>,
    Path(id): Path<String>,
) -> Result<Json<ArticleView>, Error> {
    Ok(Json(articles.get_by_id(&id).await?))
}

pub async fn update(
    Extension(articles): Extension<ArticleService>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateArticle>,
) -> Result<StatusCode, Error> {
    articles.update(&id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    Extension(articles): Extension<ArticleService>,
    Path(id): Path<String>,
) -> Result<StatusCode, Error> {
    articles.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn find(
    Extension(articles): Extension<ArticleService>,
    Query(query): Query<ArticleQuery>,
) -> Result<Json<Vec<ArticleView>>, Error> {
    Ok(Json(articles.find(query.into()).await?))
}

/// All active versions of the article (same course and title), ascending.
pub async fn list_versions(
    Extension(articles): Extension<ArticleService>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ArticleView>>, Error> {
    let article = articles.get_by_id(&id).await?;
    let versions = articles
        .find_all_versions(&article.course_id, &article.title)
        .await?;
    Ok(Json(versions))
}

/// Clone an article into a next-version draft, applying the submitted partial
/// update to the clone. The source version stays as published.
pub async fn create_version(
    Extension(articles): Extension<ArticleService>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateArticle>,
) -> Result<impl IntoResponse, Error> {
    let draft = articles.update_with_versioning(&id, payload).await?;
    Ok((StatusCode::CREATED, Json(draft)))
}
