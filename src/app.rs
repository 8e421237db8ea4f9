use axum::{response::IntoResponse, routing::get, Extension, Json, Router};
use rand::Rng;
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::{config, db::DB, errors, notes, state::AppState, users};

pub async fn create_app(db: DB) -> errors::Result<Router> {
    create_app_with(db, |state| {
        Router::new()
            .merge(users::router(state.clone()))
            .merge(notes::router(state))
    })
    .await
}

pub async fn create_app_with<R>(db: DB, router: R) -> errors::Result<Router>
where
    R: FnOnce(AppState) -> Router,
{
    let state = AppState { conn: db.clone() };

    let app = Router::new()
        .route("/", get(root))
        .route("/__version__", get(version))
        .route("/__heartbeat__", get(heartbeat))
        .route("/__lbheartbeat__", get(lbheartbeat))
        .merge(router(state))
        .layer(
            ServiceBuilder::new()
                .layer(Extension(db))
                .layer(CorsLayer::permissive()),
        );

    Ok(app)
}

async fn root() -> impl IntoResponse {
    Json(json!({ "data": "hello" }))
}

async fn version() -> impl IntoResponse {
    let config = &config();
    Json(json!({
        "source" : config.source,
        "version": config.version,
        "commit" : config.git_commit,
        "build"  : config.pipeline_id
    }))
}

async fn heartbeat() -> impl IntoResponse {
    let mut rng = rand::thread_rng();
    let random: u32 = rng.gen_range(0..=10000);

    Json(json!({
        "status" : "ok",
        "random": random,
    }))
}

async fn lbheartbeat() -> impl IntoResponse {
    ""
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use crate::db::init_test_db;

    #[tokio::test]
    async fn root_returns_static_payload() -> crate::Result<()> {
        let db = init_test_db().await?;
        let server = crate::tests::test_server(db, |state| {
            crate::users::router(state.clone()).merge(crate::notes::router(state))
        })
        .await?;

        let response = server.get("/").await;

        assert_eq!(response.status_code(), 200);
        assert_eq!(response.json::<Value>(), serde_json::json!({ "data": "hello" }));
        Ok(())
    }
}
