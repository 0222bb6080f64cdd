pub mod api;
pub mod connector_types;
pub mod decode;
pub mod verification;
