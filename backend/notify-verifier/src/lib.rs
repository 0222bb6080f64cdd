pub mod app;
pub mod configs;
pub mod consts;
pub mod error;
pub mod logger;
