use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::handlers::{elevated, protected, public};
use crate::middleware::{jwt_auth_middleware, require_admin_middleware, validate_user_middleware};
use crate::state::AppState;

/// Build the full HTTP surface over the given state
pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    let mut router = Router::new()
        .merge(public_routes())
        .merge(protected_routes(state.clone()))
        .merge(elevated_routes(state.clone()))
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(public::service::root))
        .route("/health", get(public::service::health))
        .route("/categories", get(public::categories::list))
        .route("/categories/:id", get(public::categories::get))
        .route("/categories/:id/products", get(public::categories::products))
        .route("/products/:id", get(public::products::get))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/profile", get(protected::profile::get).put(protected::profile::put))
        .route("/cart", get(protected::cart::get).delete(protected::cart::clear))
        .route(
            "/cart/products/:product_id",
            post(protected::cart::add_product).put(protected::cart::update_quantity),
        )
        // Last added runs first: jwt → validate_user → handler
        .route_layer(middleware::from_fn_with_state(state.clone(), validate_user_middleware))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

fn elevated_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/categories", post(elevated::categories::create))
        .route(
            "/categories/:id",
            axum::routing::put(elevated::categories::update).delete(elevated::categories::delete),
        )
        .route_layer(middleware::from_fn(require_admin_middleware))
        .route_layer(middleware::from_fn_with_state(state.clone(), validate_user_middleware))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
