use crate::{cache::DataCache, config::Config, fetcher::Upstream};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub data_cache: Arc<DataCache>,
    /// Direct upstream access for routes that bypass the cache.
    pub upstream: Arc<dyn Upstream>,
}

impl AppState {
    pub fn new(config: Config, upstream: Arc<dyn Upstream>) -> Self {
        Self {
            config: Arc::new(config),
            data_cache: Arc::new(DataCache::new(upstream.clone())),
            upstream,
        }
    }
}
