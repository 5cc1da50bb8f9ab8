//! Session persistence.

use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
    sync::{Mutex, PoisonError},
};

use mockall::automock;

use crate::auth::{errors::SessionStorageError, models::Session};

/// Where the session survives between commands.
#[automock]
pub trait SessionStorage: Send + Sync {
    /// The persisted session, if there is one.
    ///
    /// # Errors
    ///
    /// Returns an error if the session exists but cannot be read or parsed.
    fn load(&self) -> Result<Option<Session>, SessionStorageError>;

    /// Persist the session, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be written.
    fn save(&self, session: &Session) -> Result<(), SessionStorageError>;

    /// Forget the persisted session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be removed.
    fn clear(&self) -> Result<(), SessionStorageError>;
}

/// JSON file readable only by the current user, removed on logout.
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    /// Storage in the file at `path`. The file is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> Result<Option<Session>, SessionStorageError> {
        let contents = match fs::read(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };

        Ok(Some(serde_json::from_slice(&contents)?))
    }

    fn save(&self, session: &Session) -> Result<(), SessionStorageError> {
        let contents = serde_json::to_vec(session)?;

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&self.path)?;
        file.write_all(&contents)?;

        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStorageError> {
        match fs::remove_file(&self.path) {
            Err(error) if error.kind() != io::ErrorKind::NotFound => Err(error.into()),
            _ => Ok(()),
        }
    }
}

/// In-process storage, for tests and one-shot runs.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    session: Mutex<Option<Session>>,
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> Result<Option<Session>, SessionStorageError> {
        Ok(self
            .session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, session: &Session) -> Result<(), SessionStorageError> {
        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());

        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStorageError> {
        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = None;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::test::helpers::admin_session;

    #[test]
    fn file_storage_round_trips_and_clears() -> TestResult {
        let dir = tempfile::tempdir()?;
        let storage = FileSessionStorage::new(dir.path().join("session.json"));

        assert_eq!(storage.load()?, None);

        storage.save(&admin_session("tok"))?;

        assert_eq!(storage.load()?, Some(admin_session("tok")));

        storage.clear()?;
        storage.clear()?;

        assert_eq!(storage.load()?, None);

        Ok(())
    }

    #[test]
    fn corrupt_file_is_reported() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json")?;

        let result = FileSessionStorage::new(path).load();

        assert!(matches!(result, Err(SessionStorageError::Corrupt(_))));

        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn file_is_private_to_user() -> TestResult {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir()?;
        let path = dir.path().join("session.json");

        FileSessionStorage::new(&path).save(&admin_session("tok"))?;

        assert_eq!(fs::metadata(&path)?.permissions().mode() & 0o777, 0o600);

        Ok(())
    }
}
