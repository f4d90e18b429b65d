pub mod client;
pub mod error;
pub mod source;

pub use client::{ApiConfig, CricApiClient};
pub use error::{GatewayError, Result};
pub use source::CricketDataSource;
