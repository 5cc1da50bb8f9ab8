//! Reports

pub mod errors;
pub mod models;
mod service;
mod store;

pub use errors::ReportError;
pub use service::*;
pub use store::ReportsStore;
