use super::Backend;
use crate::error::{CestaError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// File-based backend: each key lives in its own `<key>.json` file under a
/// single data directory.
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Backend rooted at the per-user data directory
    /// (`~/.local/share/cesta` on Linux).
    pub fn user_default() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "cesta")
            .ok_or_else(|| CestaError::Store("No home directory available".to_string()))?;
        Ok(Self::new(dirs.data_dir().to_path_buf()))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(CestaError::Io)?;
        }
        Ok(())
    }
}

impl Backend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let value = fs::read_to_string(path).map_err(CestaError::Io)?;
        Ok(Some(value))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_dir()?;
        let path = self.key_path(key);
        // Write to a sibling tmp file then rename, so a crash mid-write
        // leaves the previous value intact.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(CestaError::Io)?;
        fs::rename(&tmp, &path).map_err(CestaError::Io)?;
        Ok(())
    }
}
