pub mod config;

pub use config::ChunkerSettings;
