pub mod connector_types;
pub mod errors;
