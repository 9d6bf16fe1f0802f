use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;

use crate::api::handlers::split_tags;
use crate::error::Error;
use crate::files::models::{CreateFile, FileFilter, FileView, UpdateFile};
use crate::files::service::FileService;

#[derive(Debug, Default, Deserialize)]
pub struct FileQuery {
    pub name: Option<String>,
    pub content_type: Option<String>,
    /// Comma-separated list.
    pub tags: Option<String>,
    pub owner_id: Option<String>,
}

impl From<FileQuery> for FileFilter {
    fn from(query: FileQuery) -> Self {
        Self {
            name: query.name,
            content_type: query.content_type,
            tags: split_tags(query.tags),
            owner_id: query.owner_id,
        }
    }
}

pub async fn create(
    Extension(files): Extension<FileService>,
    Json(payload): Json<CreateFile>,
) -> Result<impl IntoResponse, Error> {
    let file = files.create(payload).await?;
    Ok((StatusCode::CREATED, Json(file)))
}

pub async fn get_by_id(
    Extension(files): Extension<FileService>,
    Path(id): Path<String>,
) -> Result<Json<FileView>, Error> {
    Ok(Json(files.get_by_id(&id).await?))
}

pub async fn update(
    Extension(files): Extension<FileService>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateFile>,
) -> Result<StatusCode, Error> {
    files.update(&id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    Extension(files): Extension<FileService>,
    Path(id): Path<String>,
) -> Result<StatusCode, Error> {
    files.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn find(
    Extension(files): Extension<FileService>,
    Query(query): Query<FileQuery>,
) -> Result<Json<Vec<FileView>>, Error> {
    Ok(Json(files.find(query.into()).await?))
}
