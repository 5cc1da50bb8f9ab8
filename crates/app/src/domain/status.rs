//! Record status.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Backend `estado_id`: whether a record is in use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum Status {
    /// `1`
    #[default]
    Active,
    /// `2`
    Inactive,
    /// Any other id, shown as is.
    Other(u8),
}

impl Status {
    /// Whether the record may be used, e.g. sold.
    pub fn is_active(self) -> bool {
        self == Self::Active
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => f.write_str("Activo"),
            Self::Inactive => f.write_str("Inactivo"),
            Self::Other(id) => write!(f, "estado {id}"),
        }
    }
}

impl From<u8> for Status {
    fn from(id: u8) -> Self {
        match id {
            1 => Self::Active,
            2 => Self::Inactive,
            other => Self::Other(other),
        }
    }
}

impl From<Status> for u8 {
    fn from(status: Status) -> Self {
        match status {
            Status::Active => 1,
            Status::Inactive => 2,
            Status::Other(id) => id,
        }
    }
}

impl From<bool> for Status {
    fn from(active: bool) -> Self {
        if active { Self::Active } else { Self::Inactive }
    }
}
