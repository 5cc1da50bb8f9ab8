//! Session and Auth

pub mod errors;
pub mod models;
pub mod roles;
mod service;
mod session;
pub mod storage;

pub use errors::{AccessDenied, AuthError, SessionStorageError};
pub use models::{Credentials, Session, User, UserId};
pub use roles::{Role, Screen};
pub use service::*;
pub use session::{SessionManager, SessionState};
pub use storage::{FileSessionStorage, MemorySessionStorage, SessionStorage};
