use thiserror::Error;

use crate::fetcher::FetchError;

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("{0} environment variable is not configured")]
    ConfigMissing(&'static str),

    #[error("upstream fetch failed: {0}")]
    Upstream(#[from] FetchError),

    #[error("transform failed: {0}")]
    Transform(String),

    #[error("request cancelled")]
    Cancelled,
}
