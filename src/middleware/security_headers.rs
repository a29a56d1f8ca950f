use axum::extract::Request;
use axum::http::{HeaderValue, header};
use axum::middleware::Next;
use axum::response::Response;

/// Sources the front-end pages are allowed to pull scripts, styles and fonts from.
pub const CONTENT_SECURITY_POLICY: &str = concat!(
    "default-src 'self'; ",
    "script-src 'self' 'unsafe-inline' https://cdn.jsdelivr.net; ",
    "style-src 'self' 'unsafe-inline' https://cdn.jsdelivr.net https://fonts.googleapis.com https://cdnjs.cloudflare.com; ",
    "font-src 'self' https://fonts.gstatic.com; ",
    "img-src 'self' data: https://ui-avatars.com; ",
    "connect-src 'self' https://cdn.jsdelivr.net;"
);

pub async fn content_security_policy(req: Request, next: Next) -> Response {
    let mut resp = next.run(req).await;
    resp.headers_mut().insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(CONTENT_SECURITY_POLICY),
    );
    resp
}
