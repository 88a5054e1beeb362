pub mod app_state;
pub mod cache;
pub mod config;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod handlers;
pub mod health;
pub mod routes;

pub use app_state::AppState;
pub use error::ProxyError;
pub use routes::create_router;
