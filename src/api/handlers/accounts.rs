use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;

use crate::accounts::models::{AccountFilter, AccountView, CreateAccount, UpdateAccount};
use crate::accounts::service::AccountService;
use crate::error::Error;

#[derive(Debug, Default, Deserialize)]
pub struct AccountQuery {
    pub display_name: Option<String>,
    pub provider: Option<String>,
    pub external_id: Option<String>,
    pub user_id: Option<String>,
}

impl From<AccountQuery> for AccountFilter {
    fn from(query: AccountQuery) -> Self {
        Self {
            display_name: query.display_name,
            provider: query.provider,
            external_id: query.external_id,
            user_id: query.user_id,
        }
    }
}

pub async fn create(
    Extension(accounts): Extension<AccountService>,
    Json(payload): Json<CreateAccount>,
) -> Result<impl IntoResponse, Error> {
    let account = accounts.create(payload).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

pub async fn get_by_id(
    Extension(accounts): Extension<AccountService>,
    Path(id): Path<String>,
) -> Result<Json<AccountView>, Error> {
    Ok(Json(accounts.get_by_id(&id).await?))
}

pub async fn update(
    Extension(accounts): Extension<AccountService>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateAccount>,
) -> Result<StatusCode, Error> {
    accounts.update(&id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    Extension(accounts): Extension<AccountService>,
    Path(id): Path<String>,
) -> Result<StatusCode, Error> {
    accounts.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn find(
    Extension(accounts): Extension<AccountService>,
    Query(query): Query<AccountQuery>,
) -> Result<Json<Vec<AccountView>>, Error> {
    Ok(Json(accounts.find(query.into()).await?))
}
