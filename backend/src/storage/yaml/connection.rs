use anyhow::{Context, Result};
use log::info;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// YamlConnection manages the data directory and the paths of stored documents
#[derive(Debug, Clone)]
pub struct YamlConnection {
    base_directory: PathBuf,
}

impl YamlConnection {
    /// Create a connection rooted at `base_directory`, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).with_context(|| {
                format!("Failed to create data directory {}", base_path.display())
            })?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn profiles_directory(&self) -> PathBuf {
        self.base_directory.join("profiles")
    }

    /// Path of the YAML document for a profile ID
    pub fn profile_file_path(&self, profile_id: &str) -> PathBuf {
        self.profiles_directory()
            .join(format!("{}.yaml", Self::safe_file_name(profile_id)))
    }

    /// Map an ID onto a filesystem-safe name: "profile::123" -> "profile__123"
    pub fn safe_file_name(id: &str) -> String {
        id.chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect()
    }

    /// Write `contents` to `path` through a temporary file so readers never
    /// observe a partially written document
    pub fn write_atomically(&self, path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, contents)
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to move {} into place", path.display()))?;
        Ok(())
    }

    /// Create `path` with `contents` unless it already exists. Returns
    /// `false` without touching the file when another writer got there first.
    pub fn write_new(&self, path: &Path, contents: &str) -> Result<bool> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to create {}", path.display()))
            }
        };
        file.write_all(contents.as_bytes())
            .and_then(|_| file.sync_all())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(true)
    }
}
