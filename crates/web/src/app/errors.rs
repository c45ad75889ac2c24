use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::render::PageRenderer;

/// HTML error page; falls back to plain text if the page itself cannot render.
pub fn page_error(renderer: &PageRenderer, status: StatusCode, message: impl Into<String>) -> Response {
    let message = message.into();
    match renderer.error_page(status.as_u16(), &message) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to render error page");
            (status, message).into_response()
        }
    }
}
