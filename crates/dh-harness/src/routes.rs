use dh_ws::EventServer;

use axum::{Router, routing::get};

/// Body of `GET /`
pub const DEFAULT_ROUTE_BODY: &str = "This is the default route!";

/// Router served by every host: the placeholder route plus the real-time
/// endpoint of `events`
pub fn build_router(events: &EventServer) -> Router {
    events.attach(Router::new().route("/", get(default_route)))
}

async fn default_route() -> &'static str {
    DEFAULT_ROUTE_BODY
}
