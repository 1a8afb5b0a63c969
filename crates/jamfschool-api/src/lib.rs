// jamfschool-api: Async Rust client for the Jamf School (Zuludesk) API

pub mod client;
pub mod error;
pub mod options;
pub mod transport;

pub use client::{BASE_URL, JamfSchoolClient};
pub use error::Error;
pub use options::{Auth, RequestOptions};
pub use transport::TransportConfig;
