use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Small persistent key-value store: one file per key under a directory.
///
/// Values are opaque strings (callers store JSON). Keys are restricted to
/// characters that are safe as file names.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at `<data_dir>/store`.
    pub fn open_default() -> Result<Self> {
        let dir = super::paths::get_data_dir()?.join("store");
        Ok(Self::new(dir))
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || "-_.".contains(c)) || key.starts_with('.') {
            return Err(anyhow::anyhow!("Invalid store key: {:?}", key));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }

    /// `Ok(None)` when nothing has been stored under `key`.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create store directory: {}", self.dir.display()))?;

        // Write-then-rename so a crash never leaves a half-written value.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &path).with_context(|| format!("Failed to replace {}", path.display()))?;
        Ok(())
    }
}
