use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, instrument, warn};

use crate::cache::{Clock, SystemClock, TtlCache};
use crate::error::ProxyError;
use crate::extractor::{DEFAULT_TITLE, to_clean_document};
use crate::fetcher::Upstream;

/// One call into [`DataCache`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub key: String,
    pub url: String,
    /// Run the body through text extraction and the clean-HTML shell.
    pub is_html: bool,
    /// Neither read nor write the shared cache.
    pub skip_cache: bool,
}

impl FetchRequest {
    pub fn new(key: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            url: url.into(),
            is_html: false,
            skip_cache: false,
        }
    }

    pub fn html(mut self) -> Self {
        self.is_html = true;
        self
    }

    pub fn skip_cache(mut self, skip: bool) -> Self {
        self.skip_cache = skip;
        self
    }
}

/// Cache-fronted upstream fetch.
///
/// Concurrent misses on the same key each go to the upstream; the last
/// writer wins.
pub struct DataCache {
    store: TtlCache,
    upstream: Arc<dyn Upstream>,
    clock: Arc<dyn Clock>,
}

impl DataCache {
    pub fn new(upstream: Arc<dyn Upstream>) -> Self {
        Self::with_clock(upstream, Arc::new(SystemClock))
    }

    pub fn with_clock(upstream: Arc<dyn Upstream>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: TtlCache::new(),
            upstream,
            clock,
        }
    }

    pub fn store(&self) -> &TtlCache {
        &self.store
    }

    pub async fn fetch_data(&self, req: &FetchRequest) -> Result<String, ProxyError> {
        self.fetch_data_cancellable(req, &CancellationToken::new())
            .await
    }

    /// Like [`fetch_data`](Self::fetch_data), but gives up as soon as `cancel`
    /// fires. A cancelled call never writes to the cache.
    #[instrument(skip_all, fields(key = %req.key, url = %req.url, skip_cache = req.skip_cache))]
    pub async fn fetch_data_cancellable(
        &self,
        req: &FetchRequest,
        cancel: &CancellationToken,
    ) -> Result<String, ProxyError> {
        let cached = if req.skip_cache {
            None
        } else {
            self.store.get(&req.key)
        };
        let now = self.clock.now();

        if let Some(entry) = &cached
            && self.store.is_fresh(entry, now)
        {
            debug!("cache hit");
            return Ok(entry.data.clone());
        }

        let fetched = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("fetch cancelled");
                return Err(ProxyError::Cancelled);
            }
            result = self.upstream.fetch(&req.url) => result,
        };

        match fetched {
            Ok(raw) => {
                let data = if req.is_html {
                    to_clean_document(&raw, DEFAULT_TITLE)
                } else {
                    raw
                };
                if !req.skip_cache {
                    self.store.put(&req.key, data.clone(), now);
                }
                Ok(data)
            }
            Err(err) => match cached {
                Some(entry) => {
                    warn!(error = %err, cached_at = %entry.timestamp, "upstream failed, serving cached copy");
                    Ok(entry.data)
                }
                None => {
                    error!(error = %err, "upstream failed with nothing cached");
                    Err(ProxyError::Upstream(err))
                }
            },
        }
    }
}
