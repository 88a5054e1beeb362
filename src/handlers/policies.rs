use axum::{
    extract::State,
    http::{
        StatusCode,
        header::{
            CACHE_CONTROL, CONTENT_SECURITY_POLICY, CONTENT_TYPE, REFERRER_POLICY,
            X_CONTENT_TYPE_OPTIONS,
        },
    },
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::{
    app_state::AppState,
    cache::FetchRequest,
    config::{CachePolicy, PoliciesMode},
    error::ProxyError,
    extractor::sanitize_and_rewrite,
};

pub const POLICIES_CACHE_KEY: &str = "policies-clean";

pub const TEXT_MODE_CSP: &str = "default-src 'self'; img-src * data: blob:; style-src 'self' 'unsafe-inline'; object-src 'none'; script-src 'none'; form-action 'none'";

pub const EMBED_MODE_CSP: &str = "default-src 'self'; img-src * data: blob:; style-src * 'unsafe-inline'; font-src * data:; connect-src 'none'; frame-ancestors *; object-src 'none'; script-src 'none'; form-action 'none'";

const FAILURE_BODY: &str =
    "<html><body><h1>Error</h1><p>Failed to load policy content.</p></body></html>";

pub async fn policies(State(state): State<AppState>) -> Response {
    let url = match state.config.policies_url() {
        Ok(url) => url,
        Err(err) => {
            error!(error = %err, "policies requested without a configured source");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(CONTENT_TYPE, "text/html")],
                err.to_string(),
            )
                .into_response();
        }
    };

    let policy = state.config.cache_policy();
    let mode = state.config.policies_mode();
    let rendered = match mode {
        PoliciesMode::Text => render_text(&state, url, policy)
            .await
            .map(|html| (html, TEXT_MODE_CSP)),
        PoliciesMode::Embed => render_embed(&state, url)
            .await
            .map(|html| (html, EMBED_MODE_CSP)),
    };

    match rendered {
        Ok((html, csp)) => (
            StatusCode::OK,
            [
                (CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
                (CACHE_CONTROL, policy.cache_control()),
                (CONTENT_SECURITY_POLICY, csp.to_string()),
                (REFERRER_POLICY, "no-referrer".to_string()),
                (X_CONTENT_TYPE_OPTIONS, "nosniff".to_string()),
            ],
            html,
        )
            .into_response(),
        Err(err) => {
            error!(error = %err, url, ?mode, "Error embedding policies");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(CONTENT_TYPE, "text/html; charset=utf-8")],
                FAILURE_BODY,
            )
                .into_response()
        }
    }
}

async fn render_text(
    state: &AppState,
    url: &str,
    policy: CachePolicy,
) -> Result<String, ProxyError> {
    let req = FetchRequest::new(POLICIES_CACHE_KEY, url)
        .html()
        .skip_cache(policy.skip_cache());
    state.data_cache.fetch_data(&req).await
}

// Embed mode needs the source URL for relinking, so it skips the cache.
async fn render_embed(state: &AppState, url: &str) -> Result<String, ProxyError> {
    let raw = state.upstream.fetch(url).await?;
    sanitize_and_rewrite(&raw, url)
}
