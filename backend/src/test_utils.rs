//! Test environment with automatic cleanup.
//!
//! The temporary data directory lives as long as the [`TestEnvironment`], so
//! test data is removed even when a test panics.

use anyhow::Result;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::config::AppConfig;
use crate::{initialize_backend, AppState};

pub struct TestEnvironment {
    /// Kept alive to delay cleanup until drop
    _temp_dir: TempDir,
    pub app_state: AppState,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().to_path_buf();
        let config = AppConfig {
            data_directory: base_path.clone(),
            ..AppConfig::default()
        };
        let app_state = initialize_backend(&config)?;

        Ok(Self {
            _temp_dir: temp_dir,
            app_state,
            base_path,
        })
    }
}
