//! Session Config

use std::{env, path::PathBuf};

use clap::Args;

const DEFAULT_FILE_NAME: &str = "revenge-pos-session.json";

/// Session persistence settings.
#[derive(Debug, Args)]
pub struct SessionConfig {
    /// File the logged-in session is kept in between commands
    #[arg(long, env = "POS_SESSION_FILE")]
    pub session_file: Option<PathBuf>,
}

impl SessionConfig {
    /// Session file path, defaulting to the runtime or temp directory.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.session_file.clone().unwrap_or_else(|| {
            env::var_os("XDG_RUNTIME_DIR")
                .map_or_else(env::temp_dir, PathBuf::from)
                .join(DEFAULT_FILE_NAME)
        })
    }
}
