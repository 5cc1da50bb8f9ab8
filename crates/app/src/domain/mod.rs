//! Revenge Domain Concerns

pub mod categories;
pub mod dates;
pub mod products;
pub mod purchases;
pub mod reports;
pub mod result;
pub mod sales;
pub mod status;
pub mod store;
pub mod suppliers;
pub mod users;

pub(crate) mod rest;
