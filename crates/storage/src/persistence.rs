//! Settings persistence
//!
//! The host owns one opaque JSON blob per plugin. [`SettingsStorage`] is the
//! boundary to that blob; [`JsonFileStorage`] keeps it on disk inside a
//! versioned, checksummed envelope and [`MemoryStorage`] keeps it in memory.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

/// Persistence error types
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Corruption detected
    #[error("Corruption detected: {0}")]
    Corruption(String),

    /// Version mismatch
    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch {
        /// Expected version
        expected: u32,
        /// Found version
        found: u32,
    },

    /// Failure reported by a host storage backend
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Result type for persistence operations
pub type Result<T> = std::result::Result<T, PersistenceError>;

/// Host key-value storage for the settings blob
#[async_trait]
pub trait SettingsStorage: Send + Sync {
    /// Load the saved blob, `None` if nothing was ever saved
    async fn load(&self) -> Result<Option<Value>>;

    /// Replace the saved blob
    async fn save(&self, data: &Value) -> Result<()>;
}

// =============================================================================
// File storage
// =============================================================================

/// Versioned blob container written to disk
#[derive(Debug, Clone, Serialize, Deserialize)]
struct VersionedState {
    /// Version number
    version: u32,
    /// Checksum for corruption detection
    checksum: String,
    /// The settings blob
    data: Value,
}

impl VersionedState {
    fn new(version: u32, data: Value) -> Result<Self> {
        let checksum = checksum(&data)?;
        Ok(Self { version, checksum, data })
    }

    fn verify_checksum(&self) -> Result<()> {
        let computed = checksum(&self.data)?;

        if computed != self.checksum {
            return Err(PersistenceError::Corruption(format!(
                "Checksum mismatch: expected {}, got {}",
                self.checksum, computed
            )));
        }

        Ok(())
    }
}

fn checksum(data: &Value) -> Result<String> {
    let data_json = serde_json::to_string(data)?;
    Ok(format!("{:x}", md5::compute(&data_json)))
}

/// Persistence configuration
#[derive(Debug, Clone)]
pub struct PersistenceConfig {
    /// Path to the settings file
    pub path: PathBuf,
    /// Current envelope version
    pub version: u32,
    /// Enable atomic writes with temp files
    pub atomic_writes: bool,
    /// Enable automatic backups
    pub auto_backup: bool,
    /// Number of backups to keep
    pub backup_count: usize,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data.json"),
            version: 1,
            atomic_writes: true,
            auto_backup: true,
            backup_count: 3,
        }
    }
}

impl PersistenceConfig {
    /// Create a new configuration
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), ..Default::default() }
    }

    /// Set envelope version
    pub fn version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Enable or disable atomic writes
    pub fn atomic_writes(mut self, enabled: bool) -> Self {
        self.atomic_writes = enabled;
        self
    }

    /// Configure backups
    pub fn backups(mut self, enabled: bool, count: usize) -> Self {
        self.auto_backup = enabled;
        self.backup_count = count;
        self
    }
}

/// Settings blob stored in a JSON file
pub struct JsonFileStorage {
    config: PersistenceConfig,
}

impl JsonFileStorage {
    /// Create a file storage
    pub fn new(config: PersistenceConfig) -> Self {
        Self { config }
    }

    /// The storage configuration
    pub fn config(&self) -> &PersistenceConfig {
        &self.config
    }

    /// Delete the settings file
    pub async fn clear(&self) -> Result<()> {
        if self.config.path.exists() {
            fs::remove_file(&self.config.path).await?;
        }
        Ok(())
    }

    /// Replace the settings file with a backup
    ///
    /// Backup 1 holds the contents replaced by the most recent save.
    pub async fn restore_from_backup(&self, backup_number: usize) -> Result<()> {
        let backup_path = self.backup_path(backup_number);

        if !backup_path.exists() {
            return Err(PersistenceError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Backup not found",
            )));
        }

        fs::copy(&backup_path, &self.config.path).await?;
        tracing::info!("Restored settings from {}", backup_path.display());
        Ok(())
    }

    /// Get backup file path
    pub fn backup_path(&self, n: usize) -> PathBuf {
        let mut path = self.config.path.clone();
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "data.json".to_string());
        path.set_file_name(format!("{}.backup.{}", filename, n));
        path
    }

    /// Write atomically using temp file + rename
    async fn write_atomic(&self, contents: &str) -> Result<()> {
        let temp_path = self.config.path.with_extension("tmp");

        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(contents.as_bytes()).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&temp_path, &self.config.path).await?;

        Ok(())
    }

    /// Copy the file about to be replaced into the backup rotation
    async fn create_backup(&self) -> Result<()> {
        if !self.config.path.exists() || self.config.backup_count == 0 {
            return Ok(());
        }

        for i in (1..self.config.backup_count).rev() {
            let from = self.backup_path(i);
            let to = self.backup_path(i + 1);

            if from.exists() {
                fs::rename(&from, &to).await?;
            }
        }

        fs::copy(&self.config.path, self.backup_path(1)).await?;
        Ok(())
    }
}

#[async_trait]
impl SettingsStorage for JsonFileStorage {
    async fn load(&self) -> Result<Option<Value>> {
        let contents = match fs::read_to_string(&self.config.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No settings file at {}", self.config.path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let versioned: VersionedState = serde_json::from_str(&contents)?;
        versioned.verify_checksum()?;

        if versioned.version != self.config.version {
            return Err(PersistenceError::VersionMismatch {
                expected: self.config.version,
                found: versioned.version,
            });
        }

        Ok(Some(versioned.data))
    }

    async fn save(&self, data: &Value) -> Result<()> {
        let versioned = VersionedState::new(self.config.version, data.clone())?;
        let json = serde_json::to_string_pretty(&versioned)?;

        if self.config.auto_backup {
            if let Err(e) = self.create_backup().await {
                tracing::warn!("Failed to rotate settings backups: {}", e);
            }
        }

        if self.config.atomic_writes {
            self.write_atomic(&json).await?;
        } else {
            fs::write(&self.config.path, json).await?;
        }

        tracing::debug!("Saved settings to {}", self.config.path.display());
        Ok(())
    }
}

// =============================================================================
// Memory storage
// =============================================================================

/// Settings blob kept in memory
#[derive(Default)]
pub struct MemoryStorage {
    data: RwLock<Option<Value>>,
    saves: AtomicUsize,
}

impl MemoryStorage {
    /// Create an empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage holding a previously saved blob
    pub fn with_data(data: Value) -> Self {
        Self { data: RwLock::new(Some(data)), saves: AtomicUsize::new(0) }
    }

    /// The blob as last saved
    pub async fn snapshot(&self) -> Option<Value> {
        self.data.read().await.clone()
    }

    /// Number of completed saves
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SettingsStorage for MemoryStorage {
    async fn load(&self) -> Result<Option<Value>> {
        Ok(self.data.read().await.clone())
    }

    async fn save(&self, data: &Value) -> Result<()> {
        *self.data.write().await = Some(data.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn storage(dir: &TempDir) -> JsonFileStorage {
        JsonFileStorage::new(PersistenceConfig::new(dir.path().join("data.json")))
    }

    #[tokio::test]
    async fn test_missing_file_loads_none() {
        let dir = TempDir::new().unwrap();
        let storage = storage(&dir);
        assert!(storage.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let data = json!({"themeId": "ink", "fontSize": 18});

        storage(&dir).save(&data).await.unwrap();

        let loaded = storage(&dir).load().await.unwrap();
        assert_eq!(loaded, Some(data));
    }

    #[tokio::test]
    async fn test_corruption_detection() {
        let dir = TempDir::new().unwrap();
        let storage = storage(&dir);
        storage.save(&json!({"fontSize": 42})).await.unwrap();

        let path = &storage.config().path;
        let contents = fs::read_to_string(path).await.unwrap().replace("42", "99");
        fs::write(path, contents).await.unwrap();

        let result = storage.load().await;
        assert!(matches!(result, Err(PersistenceError::Corruption(_))));
    }

    #[tokio::test]
    async fn test_version_mismatch() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");

        JsonFileStorage::new(PersistenceConfig::new(&path).version(2))
            .save(&json!({}))
            .await
            .unwrap();

        let result = JsonFileStorage::new(PersistenceConfig::new(&path)).load().await;
        assert!(matches!(
            result,
            Err(PersistenceError::VersionMismatch { expected: 1, found: 2 })
        ));
    }

    #[tokio::test]
    async fn test_backup_rotation() {
        let dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(
            PersistenceConfig::new(dir.path().join("data.json")).backups(true, 2),
        );

        storage.save(&json!({"fontSize": 1})).await.unwrap();
        assert!(!storage.backup_path(1).exists());

        for i in 2..=4 {
            storage.save(&json!({"fontSize": i})).await.unwrap();
        }
        assert!(!storage.backup_path(3).exists());

        storage.restore_from_backup(1).await.unwrap();
        assert_eq!(storage.load().await.unwrap(), Some(json!({"fontSize": 3})));

        storage.restore_from_backup(2).await.unwrap();
        assert_eq!(storage.load().await.unwrap(), Some(json!({"fontSize": 2})));
    }

    #[tokio::test]
    async fn test_atomic_write_cleans_temp_file() {
        let dir = TempDir::new().unwrap();
        let storage = storage(&dir);
        storage.save(&json!({"a": 1})).await.unwrap();

        assert!(!storage.config().path.with_extension("tmp").exists());
        storage.clear().await.unwrap();
        assert!(storage.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_storage() {
        let storage = MemoryStorage::new();
        assert!(storage.load().await.unwrap().is_none());

        storage.save(&json!({"a": 1})).await.unwrap();
        assert_eq!(storage.snapshot().await, Some(json!({"a": 1})));
        assert_eq!(storage.save_count(), 1);
    }
}
