use axum::{
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use drinks_api::config;
use drinks_api::database::manager::DatabaseManager;
use drinks_api::error::ApiError;
use drinks_api::handlers::drinks;
use drinks_api::middleware::auth::authorize;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, AUTH0_DOMAIN, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("starting drinks API in {:?} mode", config.environment);

    // Connect eagerly so a bad DATABASE_URL shows up at startup. Handlers
    // retry lazily, so a database that comes up later is not fatal.
    if let Err(err) = DatabaseManager::connect().await {
        tracing::warn!("database not reachable at startup: {}", err);
    }

    let app = app();

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    DatabaseManager::close().await;
    Ok(())
}

fn app() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(drink_routes())
        .fallback(fallback_not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Each protected route group pairs its handler with the permission string
/// the authorize middleware checks before dispatch.
fn drink_routes() -> Router {
    let public = Router::new().route("/drinks", get(drinks::drinks_get));

    let detail = Router::new()
        .route("/drinks-detail", get(drinks::drinks_detail_get))
        .route_layer(from_fn_with_state("get:drinks-detail", authorize));

    let create = Router::new()
        .route("/drinks", post(drinks::drinks_post))
        .route_layer(from_fn_with_state("post:drinks", authorize));

    let update = Router::new()
        .route("/drinks/:id", patch(drinks::drinks_patch))
        .route_layer(from_fn_with_state("patch:drinks", authorize));

    let remove = Router::new()
        .route("/drinks/:id", delete(drinks::drinks_delete))
        .route_layer(from_fn_with_state("delete:drinks", authorize));

    public.merge(detail).merge(create).merge(update).merge(remove)
}

async fn root() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "name": "Drinks API",
            "version": env!("CARGO_PKG_VERSION"),
            "endpoints": {
                "drinks": "GET /drinks (public)",
                "drinks_detail": "GET /drinks-detail (requires get:drinks-detail)",
                "create": "POST /drinks (requires post:drinks)",
                "update": "PATCH /drinks/:id (requires patch:drinks)",
                "delete": "DELETE /drinks/:id (requires delete:drinks)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(err) => {
            tracing::warn!("health check failed: {}", err);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "database unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
        }
    }
}

async fn fallback_not_found() -> ApiError {
    ApiError::NotFound
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", err);
        return;
    }
    tracing::info!("shutdown signal received");
}
