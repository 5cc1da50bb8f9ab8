//! Categories

pub mod models;
mod service;
mod store;

pub use service::*;
pub use store::CategoriesStore;
