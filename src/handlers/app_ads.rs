use axum::{
    extract::State,
    http::{
        StatusCode,
        header::{CACHE_CONTROL, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::{app_state::AppState, cache::FetchRequest};

pub const APP_ADS_CACHE_KEY: &str = "app-ads";

const FAILURE_BODY: &str = "Failed to fetch app-ads.txt content";

pub async fn app_ads(State(state): State<AppState>) -> Response {
    let url = match state.config.app_ads_url() {
        Ok(url) => url,
        Err(err) => {
            error!(error = %err, "app-ads.txt requested without a configured source");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(CONTENT_TYPE, "text/plain")],
                err.to_string(),
            )
                .into_response();
        }
    };

    let policy = state.config.cache_policy();
    let req = FetchRequest::new(APP_ADS_CACHE_KEY, url).skip_cache(policy.skip_cache());

    match state.data_cache.fetch_data(&req).await {
        Ok(data) => (
            StatusCode::OK,
            [
                (CONTENT_TYPE, "text/plain".to_string()),
                (CACHE_CONTROL, policy.cache_control()),
            ],
            data,
        )
            .into_response(),
        Err(err) => {
            error!(error = %err, url, "Error fetching app-ads.txt");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(CONTENT_TYPE, "text/plain")],
                FAILURE_BODY,
            )
                .into_response()
        }
    }
}
