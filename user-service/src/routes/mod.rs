use axum::{
    extract::Request,
    http::StatusCode,
    middleware,
    routing::get,
    Router,
};
use log::{info, warn};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::handlers::user_handlers::{
    create_user, delete_user_by_object_id, delete_user_by_phone_number, get_all_users,
    get_user_by_object_id, get_user_by_phone_number, update_user,
};
use user_directory_shared::store::{dynamo::DynamoUserStore, UserStore};

/// Creates a router with the default store
pub async fn create_router() -> Router {
    info!("Creating router with DynamoDB store");

    // Create the DynamoDB store
    let dynamo_store = Arc::new(DynamoUserStore::new().await);

    // Optional prefix, e.g. an API Gateway stage such as /Prod
    let prefix = std::env::var("API_BASE_PATH").unwrap_or_default();
    info!("Using API route prefix: '{}'", prefix);

    create_router_with_store(dynamo_store, &prefix)
}

/// Creates a router with a given store implementation
pub fn create_router_with_store<S>(store: Arc<S>, prefix: &str) -> Router
where
    S: UserStore + 'static,
{
    info!("Setting up API routes with prefix: '{}'", prefix);

    // Any origin, method and header, with credentials. Wildcards cannot be
    // combined with credentials, so the request's own values are mirrored.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    info!("CORS configured for all origins, methods and headers with credentials");

    // Logging middleware to trace all requests
    async fn logging_middleware(
        req: Request,
        next: axum::middleware::Next,
    ) -> impl axum::response::IntoResponse {
        info!(
            "Router received request: method={}, uri={}",
            req.method(),
            req.uri()
        );
        next.run(req).await
    }

    // Create the API routes
    let api_routes = Router::new()
        .route("/users", get(get_all_users).post(create_user))
        .route(
            "/users/phone_number/:phone_number",
            get(get_user_by_phone_number).delete(delete_user_by_phone_number),
        )
        .route(
            "/users/:id",
            get(get_user_by_object_id)
                .put(update_user)
                .delete(delete_user_by_object_id),
        )
        .with_state(store);

    // Only nest when a prefix is configured
    let router = if prefix.is_empty() {
        api_routes
    } else {
        Router::new().nest(prefix, api_routes)
    };

    info!(
        "Router configured with all routes and middleware under prefix: '{}'",
        prefix
    );

    // Add a fallback handler for 404s
    router
        .fallback(|req: Request| async move {
            warn!("No route matched for: {} {}", req.method(), req.uri());
            (
                StatusCode::NOT_FOUND,
                "The requested resource was not found".to_string(),
            )
        })
        .layer(cors)
        .layer(middleware::from_fn(logging_middleware))
}
