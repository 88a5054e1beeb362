pub mod client;
pub mod errors;
pub mod pipeline;
pub mod types;

#[cfg(test)]
pub use client::MockUpstream;
pub use client::{HttpFetcher, USER_AGENT, Upstream};
pub use errors::FetchError;
pub use types::{Charset, PageResponse};
