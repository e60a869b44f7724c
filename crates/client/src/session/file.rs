use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use std::io::Write;

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use super::{CredentialPair, SessionStore, StoredSlots};
use crate::error::ClientError;

/// Session store persisted as a small JSON file
///
/// The file holds the `access_token` and `refresh_token` keys. Reads are
/// served from memory; every mutation writes a sibling temp file and renames
/// it over the old one. On Unix the file is created with mode 0600.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    slots: RwLock<StoredSlots>,
}

impl FileSessionStore {
    /// Open the store at `path`, loading any credentials already there
    ///
    /// A file that does not parse is treated as an empty store and replaced on
    /// the next write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ClientError> {
        let path = path.into();
        let slots = match std::fs::read_to_string(&path) {
            Ok(data) if data.trim().is_empty() => StoredSlots::default(),
            Ok(data) => serde_json::from_str(&data).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "Ignoring unreadable session file");
                StoredSlots::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StoredSlots::default(),
            Err(e) => {
                return Err(ClientError::Storage(format!(
                    "failed to read {}: {e}",
                    path.display()
                )));
            }
        };
        debug!(path = %path.display(), has_credentials = !slots.is_empty(), "Opened session store");

        Ok(Self {
            path,
            slots: RwLock::new(slots),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, slots: &StoredSlots) -> Result<(), ClientError> {
        if slots.is_empty() {
            return match std::fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(self.storage_error("remove", &e)),
            };
        }

        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent).map_err(|e| self.storage_error("create", &e))?;

        let data = serde_json::to_string_pretty(slots)?;
        let mut temp =
            NamedTempFile::new_in(parent).map_err(|e| self.storage_error("create", &e))?;
        temp.write_all(data.as_bytes())
            .and_then(|()| temp.as_file().sync_all())
            .map_err(|e| self.storage_error("write", &e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            temp.as_file()
                .set_permissions(std::fs::Permissions::from_mode(0o600))
                .map_err(|e| self.storage_error("chmod", &e))?;
        }

        temp.persist(&self.path)
            .map_err(|e| self.storage_error("replace", &e.error))?;
        Ok(())
    }

    fn update(&self, f: impl FnOnce(&mut StoredSlots)) -> Result<(), ClientError> {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = slots.clone();
        f(&mut next);
        self.persist(&next)?;
        *slots = next;
        Ok(())
    }

    fn storage_error(&self, action: &str, err: &std::io::Error) -> ClientError {
        ClientError::Storage(format!("failed to {action} {}: {err}", self.path.display()))
    }
}

impl SessionStore for FileSessionStore {
    fn access_token(&self) -> Option<String> {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .access_token
            .clone()
    }

    fn refresh_token(&self) -> Option<String> {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .refresh_token
            .clone()
    }

    fn store(&self, credentials: &CredentialPair) -> Result<(), ClientError> {
        self.update(|slots| *slots = StoredSlots::from(credentials))
    }

    fn set_access_token(&self, access_token: &str) -> Result<(), ClientError> {
        self.update(|slots| slots.access_token = Some(access_token.to_string()))
    }

    fn clear(&self) -> Result<(), ClientError> {
        self.update(|slots| *slots = StoredSlots::default())
    }
}
