pub mod app_ads;
pub mod beacon;
pub mod home;
pub mod policies;

pub use app_ads::app_ads;
pub use beacon::jserror;
pub use home::landing_page;
pub use policies::policies;
