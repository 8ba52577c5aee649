pub mod client;
pub mod config;
pub mod error;
pub mod report;
pub mod runner;
pub mod suites;

// Re-export common items
pub use config::Config;
pub use report::generate_report;
pub use runner::run_harness;
