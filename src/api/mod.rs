use anyhow::Result;
use axum::{
    body::Body,
    extract::{Extension, MatchedPath},
    http::{HeaderName, HeaderValue, Request},
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{info, info_span, Span};
use ulid::Ulid;

use crate::accounts::{repo::AccountRepo, service::AccountService};
use crate::articles::{repo::ArticleRepo, service::ArticleService};
use crate::auth::{repo::AuthAttemptRepo, service::AuthService, token::TokenIssuer};
use crate::cli::globals::GlobalArgs;
use crate::courses::{repo::CourseRepo, service::CourseService};
use crate::files::{repo::FileRepo, service::FileService};
use crate::store;
use crate::users::{repo::UserRepo, service::UserService};

pub mod handlers;

/// Build the API router with all routes registered.
#[must_use]
pub fn router() -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/v1/auth/telegram/code", post(handlers::auth::request_code))
        .route("/v1/auth/telegram/verify", post(handlers::auth::verify_code))
        .route(
            "/v1/users",
            post(handlers::users::create).get(handlers::users::find),
        )
        .route(
            "/v1/users/:id",
            get(handlers::users::get_by_id)
                .patch(handlers::users::update)
                .delete(handlers::users::delete),
        )
        .route(
            "/v1/courses",
            post(handlers::courses::create).get(handlers::courses::find),
        )
        .route(
            "/v1/courses/:id",
            get(handlers::courses::get_by_id)
                .patch(handlers::courses::update)
                .delete(handlers::courses::delete),
        )
        .route(
            "/v1/articles",
            post(handlers::articles::create).get(handlers::articles::find),
        )
        .route(
            "/v1/articles/:id",
            get(handlers::articles::get_by_id)
                .patch(handlers::articles::update)
                .delete(handlers::articles::delete),
        )
        .route(
            "/v1/articles/:id/versions",
            post(handlers::articles::create_version).get(handlers::articles::list_versions),
        )
        .route(
            "/v1/accounts",
            post(handlers::accounts::create).get(handlers::accounts::find),
        )
        .route(
            "/v1/accounts/:id",
            get(handlers::accounts::get_by_id)
                .patch(handlers::accounts::update)
                .delete(handlers::accounts::delete),
        )
        .route(
            "/v1/files",
            post(handlers::files::create).get(handlers::files::find),
        )
        .route(
            "/v1/files/:id",
            get(handlers::files::get_by_id)
                .patch(handlers::files::update)
                .delete(handlers::files::delete),
        )
}

/// Start the server
/// # Errors
/// Return error if failed to start the server
pub async fn new(port: u16, dsn: String, database: String, globals: &GlobalArgs) -> Result<()> {
    let db = store::connect(&dsn, &database).await?;

    let users = UserService::new(UserRepo::new(&db));
    let courses = CourseService::new(CourseRepo::new(&db));
    let articles = ArticleService::new(ArticleRepo::new(&db));
    let accounts = AccountService::new(AccountRepo::new(&db));
    let files = FileService::new(FileRepo::new(&db));

    let tokens = TokenIssuer::new(
        &globals.access_token_secret,
        globals.access_token_ttl,
        &globals.refresh_token_secret,
        globals.refresh_token_ttl,
    );
    let auth = AuthService::new(AuthAttemptRepo::new(&db), users.clone(), tokens);

    let app = router().layer(
        ServiceBuilder::new()
            .layer(SetRequestHeaderLayer::if_not_present(
                HeaderName::from_static("x-request-id"),
                |_req: &Request<Body>| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
            ))
            .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                "x-request-id",
            )))
            .layer(TraceLayer::new_for_http().make_span_with(make_span))
            .layer(Extension(auth))
            .layer(Extension(users))
            .layer(Extension(courses))
            .layer(Extension(articles))
            .layer(Extension(accounts))
            .layer(Extension(files)),
    );

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
