// handlers/public/service.rs - GET / and GET /health

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::DatabaseManager;
use crate::state::AppState;

pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "EasyShop API",
        "version": version,
        "endpoints": {
            "categories": "/categories[/:id[/products]] (public read, admin write)",
            "products": "/products/:id (public)",
            "profile": "/profile (protected)",
            "cart": "/cart, /cart/products/:product_id (protected)",
            "health": "/health (public)",
        }
    }))
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    let result = match &state.pool {
        Some(pool) => DatabaseManager::health_check(pool).await.map_err(|e| e.to_string()),
        None => Err("database not configured".to_string()),
    };

    match result {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}
