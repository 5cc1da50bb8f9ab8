//! View-models for the front end: what each screen shows and how it reacts.

pub mod checkout;
pub mod dashboard;
pub mod filters;
pub mod format;
pub mod notifications;
pub mod pagination;
pub mod reports;
pub mod tables;
