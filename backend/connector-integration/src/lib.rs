pub mod connectors;
pub mod types;
