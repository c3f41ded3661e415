//! Demo chat page, compiled into the gateway binary.
//!
//! Each asset is baked in with `include_str!` so `capstan serve` ships
//! as a single binary with no asset directory to deploy. The page is a
//! thin client over the `/mcp` endpoints; the gateway itself never
//! depends on it.

use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

/// Embedded asset: served name, content type, body.
const ASSETS: &[(&str, &str, &str)] = &[
    (
        "index.html",
        "text/html; charset=utf-8",
        include_str!("../../../frontend/index.html"),
    ),
    (
        "style.css",
        "text/css; charset=utf-8",
        include_str!("../../../frontend/style.css"),
    ),
    (
        "app.js",
        "application/javascript; charset=utf-8",
        include_str!("../../../frontend/app.js"),
    ),
];

/// Build a router that serves the embedded demo page.
///
/// `/` serves the page itself; everything it links lives under
/// `/static/` so the asset paths never collide with `/mcp` routes.
pub fn frontend_router() -> Router {
    Router::new()
        .route("/", get(|| async { serve_asset("index.html") }))
        .route("/static/{name}", get(static_handler))
}

async fn static_handler(Path(name): Path<String>) -> Response {
    serve_asset(&name)
}

fn serve_asset(name: &str) -> Response {
    match ASSETS.iter().find(|(asset, _, _)| *asset == name) {
        Some((_, content_type, body)) => {
            (StatusCode::OK, [(header::CONTENT_TYPE, *content_type)], *body).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
