use clap::ValueEnum;
use revenge_app::domain::status::Status;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum StatusArg {
    Active,
    Inactive,
}

impl From<StatusArg> for Status {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Active => Self::Active,
            StatusArg::Inactive => Self::Inactive,
        }
    }
}

/// Overwrite `field` when a new value was given.
pub(crate) fn set<T>(field: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *field = value;
    }
}

/// Like [`set`], for fields the backend stores as optional text.
pub(crate) fn set_text(field: &mut Option<String>, value: Option<String>) {
    if let Some(value) = value {
        *field = (!value.trim().is_empty()).then_some(value);
    }
}
