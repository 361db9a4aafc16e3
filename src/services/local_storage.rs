//! 本地存储
//!
//! 每个键对应数据目录下的一个 JSON 文件，用来代替浏览器的 localStorage

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{AppResult, StorageError};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    dir: PathBuf,
}

impl LocalStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 键对应的文件路径
    pub fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '@') { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", file_name))
    }

    /// 读取键对应的值，文件不存在时返回默认值
    pub fn load<T: DeserializeOwned + Default>(&self, key: &str) -> AppResult<T> {
        let path = self.path_for(key);
        if !path.exists() {
            debug!("存储文件不存在，使用默认值: {}", path.display());
            return Ok(T::default());
        }

        let content = fs::read_to_string(&path).map_err(|source| StorageError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        let value = serde_json::from_str(&content).map_err(|source| StorageError::Corrupted {
            path: path.display().to_string(),
            source,
        })?;
        Ok(value)
    }

    /// 写入键对应的值（整体覆盖）
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()> {
        let path = self.path_for(key);
        let write_failed = |source| StorageError::WriteFailed {
            path: path.display().to_string(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(write_failed)?;
        let content = serde_json::to_string_pretty(value).map_err(|source| StorageError::Corrupted {
            path: path.display().to_string(),
            source,
        })?;
        fs::write(&path, content).map_err(write_failed)?;

        debug!("已写入: {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_storage(name: &str) -> LocalStorage {
        let dir = std::env::temp_dir().join(format!("yds_storage_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        LocalStorage::new(dir)
    }

    #[test]
    fn test_missing_key_returns_default() {
        let storage = temp_storage("missing");
        let value: Vec<String> = storage.load("nothing-here").unwrap();
        assert!(value.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let storage = temp_storage("save");
        storage.save("words", &vec!["apple".to_string()]).unwrap();
        let value: Vec<String> = storage.load("words").unwrap();
        assert_eq!(value, vec!["apple".to_string()]);
        let _ = fs::remove_dir_all(storage.dir());
    }

    #[test]
    fn test_key_is_sanitised() {
        let storage = LocalStorage::new("/tmp/x");
        let path = storage.path_for("yds-history-a/b@c.com");
        assert_eq!(path.file_name().unwrap(), "yds-history-a_b@c.com.json");
    }

    #[test]
    fn test_corrupted_file_is_error() {
        let storage = temp_storage("corrupt");
        fs::create_dir_all(storage.dir()).unwrap();
        fs::write(storage.path_for("bad"), "{not json").unwrap();
        assert!(storage.load::<Vec<String>>("bad").is_err());
        let _ = fs::remove_dir_all(storage.dir());
    }
}
