pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod pricing;
pub mod processor;
pub mod report;
pub mod scanner;
pub mod yahoo_client;

// Re-exports for convenience
pub use error::ScanError;
pub use models::{Contract, EvaluatedContract, OptionClass, ScanOutcome, ScanSpec};
pub use scanner::scan;
pub use yahoo_client::YahooClient;
