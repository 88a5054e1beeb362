use axum::http::StatusCode;

/// Swallows error beacons fired by embedded third-party pages.
pub async fn jserror() -> StatusCode {
    StatusCode::NO_CONTENT
}
