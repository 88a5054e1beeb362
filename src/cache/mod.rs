pub mod clock;
pub mod orchestrator;
pub mod store;

pub use clock::{Clock, SystemClock};
pub use orchestrator::{DataCache, FetchRequest};
pub use store::{CacheEntry, TtlCache};
