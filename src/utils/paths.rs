use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = ".timer-dashboard";

pub fn get_data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;

    let app_dir = data_dir.join(APP_DIR);
    create_secure_directory(&app_dir).context("Failed to create timer-dashboard data directory")?;

    Ok(app_dir)
}

pub fn get_log_dir() -> Result<PathBuf> {
    let log_dir = get_data_dir()?.join("logs");
    create_secure_directory(&log_dir).context("Failed to create log directory")?;
    Ok(log_dir)
}

/// Create a directory with secure permissions
fn create_secure_directory(path: &Path) -> Result<()> {
    if path.exists() {
        validate_directory_permissions(path)?;
        return Ok(());
    }

    fs::create_dir_all(path)
        .with_context(|| format!("Failed to create directory: {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path)?.permissions();
        perms.set_mode(0o700);
        fs::set_permissions(path, perms)?;
    }

    Ok(())
}

fn validate_directory_permissions(path: &Path) -> Result<()> {
    let metadata = fs::metadata(path)
        .with_context(|| format!("Failed to read metadata for: {}", path.display()))?;

    if !metadata.is_dir() {
        return Err(anyhow::anyhow!("Path is not a directory: {}", path.display()));
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = metadata.permissions().mode();
        if mode & 0o002 != 0 {
            return Err(anyhow::anyhow!(
                "Directory is world-writable (insecure): {}",
                path.display()
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_secure_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("logs");
        create_secure_directory(&target).unwrap();
        assert!(target.is_dir());

        // Second call validates instead of creating.
        create_secure_directory(&target).unwrap();
    }

    #[test]
    fn test_rejects_file_as_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain");
        std::fs::write(&file, "x").unwrap();
        assert!(validate_directory_permissions(&file).is_err());
    }
}
