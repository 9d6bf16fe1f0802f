use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;

use crate::error::Error;
use crate::users::models::{CreateUser, UpdateUser, UserFilter, UserView};
use crate::users::service::UserService;

#[derive(Debug, Default, Deserialize)]
pub struct UserQuery {
    pub username: Option<String>,
    pub role: Option<String>,
}

impl From<UserQuery> for UserFilter {
    fn from(query: UserQuery) -> Self {
        Self {
            username: query.username,
            role: query.role,
        }
    }
}

pub async fn create(
    Extension(users): Extension<UserService>,
    Json(payload): Json<CreateUser>,
) -> Result<impl IntoResponse, Error> {
    let user = users.create(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn get_by_id(
    Extension(users): Extension<UserService>,
    Path(id): Path<String>,
) -> Result<Json<UserView>, Error> {
    Ok(Json(users.get_by_id(&id).await?))
}

pub async fn update(
    Extension(users): Extension<UserService>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUser>,
) -> Result<StatusCode, Error> {
    users.update(&id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    Extension(users): Extension<UserService>,
    Path(id): Path<String>,
) -> Result<StatusCode, Error> {
    users.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn find(
    Extension(users): Extension<UserService>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Vec<UserView>>, Error> {
    Ok(Json(users.find(query.into()).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::repo::UserRepo;
    use mongodb::Client;

    async fn service() -> UserService {
        let db = Client::with_uri_str("mongodb://localhost:27017")
            .await
            .unwrap()
            .database("aula_test");
        UserService::new(UserRepo::new(&db))
    }

    #[tokio::test]
    async fn test_get_by_id_rejects_malformed_id() {
        let response = get_by_id(Extension(service().await), Path("nope".to_string()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_with_no_fields_is_a_noop() {
        let id = mongodb::bson::oid::ObjectId::new().to_hex();
        let status = update(
            Extension(service().await),
            Path(id),
            Json(UpdateUser::default()),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);
    }
}
