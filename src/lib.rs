pub mod client;
pub mod config;
pub mod error;
pub mod report;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use report::{Report, ReportGenerator};
