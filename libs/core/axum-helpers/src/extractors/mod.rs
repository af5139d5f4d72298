//! Custom extractors for Axum handlers.

pub mod id_path;
pub mod request_args;

pub use id_path::IdPath;
pub use request_args::RequestArgs;
