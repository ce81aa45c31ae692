//! HTTP host server: handler registration, request translation, and
//! outcome-to-response mapping.

pub mod request;
pub mod response;
pub mod server;

pub use server::HttpServer;
