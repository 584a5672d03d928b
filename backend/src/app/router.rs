use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::core;
use crate::routes;

/// Back end server built from one router per resource, the health check and the 404 fallback
pub fn create_router(context: core::ArcContext) -> Router {
    let resource_routes = Router::new()
        .merge(routes::beers::router())
        .merge(routes::manufacturers::router())
        .merge(routes::reviews::router())
        .merge(routes::photos::router())
        .merge(routes::users::router());

    let public_routes = Router::new().route("/health", get(routes::health::health_check)); // Health check endpoint

    // Combine all routes
    Router::new()
        .merge(resource_routes)
        .merge(public_routes)
        .fallback(routes::fallback::handler)
        .method_not_allowed_fallback(routes::fallback::handler)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(context)
}
