//! Infrastructure implementation of the `ConfigStore` port.
//!
//! `EnvFileStore` keeps one `.env` file per stack. Reads and writes run on
//! the blocking pool; every write goes through its own temp file in the
//! stack directory and a rename, so a concurrent reader never sees a
//! half-written file and overlapping writers never share a temp file.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use nlq_common::Stack;
use tempfile::NamedTempFile;

use crate::application::ports::ConfigStore;
use crate::domain::config::{EnvConfig, parse_env, render_env};

const ENV_FILE: &str = ".env";

/// `.env` file store rooted at a container path with a local fallback.
#[derive(Debug, Clone)]
pub struct EnvFileStore {
    container_root: PathBuf,
    local_root: PathBuf,
}

impl EnvFileStore {
    #[must_use]
    pub fn new(container_root: impl Into<PathBuf>, local_root: impl Into<PathBuf>) -> Self {
        Self {
            container_root: container_root.into(),
            local_root: local_root.into(),
        }
    }

    /// Path of the stack's `.env` file.
    ///
    /// Uses `<container_root>/<stack dir>` when that directory exists,
    /// otherwise `<local_root>/<stack dir>`.
    #[must_use]
    pub fn env_path(&self, stack: Stack) -> PathBuf {
        let preferred = self.container_root.join(stack.directory());
        let dir = if preferred.is_dir() {
            preferred
        } else {
            self.local_root.join(stack.directory())
        };
        dir.join(ENV_FILE)
    }

    fn load_sync(path: &Path) -> Result<EnvConfig> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Ok(parse_env(&content))
    }

    fn save_sync(path: &Path, config: &EnvConfig) -> Result<()> {
        let parent = path
            .parent()
            .with_context(|| format!("{} has no parent directory", path.display()))?;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;

        let mut temp = NamedTempFile::new_in(parent)
            .with_context(|| format!("creating temp file in {}", parent.display()))?;
        temp.write_all(render_env(config).as_bytes())
            .with_context(|| format!("writing temp file {}", temp.path().display()))?;
        temp.as_file()
            .sync_all()
            .with_context(|| format!("syncing temp file {}", temp.path().display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(temp.path(), std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("setting permissions on {}", temp.path().display()))?;
        }

        temp.persist(path)
            .with_context(|| format!("finalizing {}", path.display()))?;
        Ok(())
    }
}

impl ConfigStore for EnvFileStore {
    async fn load(&self, stack: Stack) -> EnvConfig {
        let store = self.clone();
        let loaded = tokio::task::spawn_blocking(move || {
            let path = store.env_path(stack);
            Self::load_sync(&path)
        })
        .await
        .context("config load task panicked");

        match loaded {
            Ok(Ok(config)) => config,
            Ok(Err(e)) | Err(e) => {
                tracing::debug!(%stack, error = ?e, "no configuration loaded");
                EnvConfig::new()
            }
        }
    }

    async fn save(&self, stack: Stack, config: &EnvConfig) -> bool {
        let store = self.clone();
        let config = config.clone();
        let saved = tokio::task::spawn_blocking(move || {
            let path = store.env_path(stack);
            Self::save_sync(&path, &config).map(|()| path)
        })
        .await
        .context("config save task panicked");

        match saved {
            Ok(Ok(path)) => {
                tracing::info!(%stack, path = %path.display(), "configuration saved");
                true
            }
            Ok(Err(e)) | Err(e) => {
                tracing::error!(%stack, error = ?e, "failed to save configuration");
                false
            }
        }
    }
}
