pub mod client;
pub mod error;
pub mod query;
pub mod types;

pub use client::{ExamSource, UkeClient};
pub use error::FetchError;
pub use query::build_request_url;
pub use types::{ExamRecord, ExamResponse};
