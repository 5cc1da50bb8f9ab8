//! Revenge point-of-sale admin client: session, API gateway, domain stores and views.

pub mod auth;
pub mod config;
pub mod context;
pub mod domain;
pub mod gateway;
pub mod observability;
pub mod shutdown;
pub mod views;

#[cfg(test)]
mod test;
