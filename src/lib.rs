pub mod analyzers;
pub mod config;
pub mod driver;
pub mod filters;
pub mod loader;
pub mod output;
pub mod prompt;
pub mod trips;
