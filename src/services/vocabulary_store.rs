//! 生词本 - 业务能力层
//!
//! 以单词（去空白、忽略大小写）为键，重复添加或删除不会出错

use std::sync::{Mutex, PoisonError};

use tracing::{debug, info};

use crate::error::AppResult;
use crate::models::{storage_key, AppUser, VocabularyItem};
use crate::services::local_storage::LocalStorage;

pub const VOCABULARY_KEY_PREFIX: &str = "yds-vocabulary";

fn normalize(word: &str) -> String {
    word.trim().to_lowercase()
}

/// 生词本
///
/// `storage` 为 `None` 时只保存在内存中
pub struct VocabularyStore {
    storage: Option<(LocalStorage, String)>,
    words: Mutex<Vec<VocabularyItem>>,
}

impl VocabularyStore {
    pub fn in_memory() -> Self {
        Self {
            storage: None,
            words: Mutex::new(Vec::new()),
        }
    }

    pub fn open(storage: LocalStorage, user: Option<&AppUser>) -> AppResult<Self> {
        let key = storage_key(VOCABULARY_KEY_PREFIX, user);
        let words: Vec<VocabularyItem> = storage.load(&key)?;
        debug!("已加载 {} 个生词 ({})", words.len(), key);

        Ok(Self {
            storage: Some((storage, key)),
            words: Mutex::new(words),
        })
    }

    pub fn is_word_saved(&self, word: &str) -> bool {
        let key = normalize(word);
        self.words
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|w| normalize(&w.word) == key)
    }

    /// 添加生词，已存在时不做任何事
    pub fn add_word(&self, word: &str, meaning: &str) -> AppResult<()> {
        let word = word.trim();
        if word.is_empty() {
            return Ok(());
        }

        let key = normalize(word);
        let mut words = self.words.lock().unwrap_or_else(PoisonError::into_inner);
        if words.iter().any(|w| normalize(&w.word) == key) {
            return Ok(());
        }
        words.insert(
            0,
            VocabularyItem {
                word: word.to_string(),
                meaning: meaning.trim().to_string(),
                added_at: chrono::Local::now().to_rfc3339(),
            },
        );
        info!("🔖 已保存生词: {}", word);
        self.persist(&words)
    }

    /// 删除生词，不存在时不做任何事
    pub fn remove_word(&self, word: &str) -> AppResult<()> {
        let key = normalize(word);
        let mut words = self.words.lock().unwrap_or_else(PoisonError::into_inner);
        let before = words.len();
        words.retain(|w| normalize(&w.word) != key);
        if words.len() == before {
            return Ok(());
        }
        debug!("已删除生词: {}", word.trim());
        self.persist(&words)
    }

    /// 已保存则删除，否则添加；返回切换后是否已保存
    pub fn toggle_word(&self, word: &str, meaning: &str) -> AppResult<bool> {
        if self.is_word_saved(word) {
            self.remove_word(word)?;
            Ok(false)
        } else {
            self.add_word(word, meaning)?;
            Ok(self.is_word_saved(word))
        }
    }

    pub fn words(&self) -> Vec<VocabularyItem> {
        self.words.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn persist(&self, words: &[VocabularyItem]) -> AppResult<()> {
        match &self.storage {
            Some((storage, key)) => storage.save(key, &words),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_is_idempotent_and_case_insensitive() {
        let store = VocabularyStore::in_memory();
        store.add_word("Ubiquitous", "her yerde bulunan").unwrap();
        store.add_word("  ubiquitous ", "başka").unwrap();

        assert!(store.is_word_saved("UBIQUITOUS"));
        let words = store.words();
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].meaning, "her yerde bulunan");
    }

    #[test]
    fn test_toggle_and_remove() {
        let store = VocabularyStore::in_memory();
        assert!(store.toggle_word("scarce", "kıt").unwrap());
        assert!(!store.toggle_word("scarce", "kıt").unwrap());
        assert!(!store.is_word_saved("scarce"));

        // 删除不存在的词不报错
        store.remove_word("never-added").unwrap();
        // 空白单词被忽略
        assert!(!store.toggle_word("   ", "x").unwrap());
    }

    #[test]
    fn test_persisted_between_opens() {
        let dir = std::env::temp_dir().join(format!("yds_vocab_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let store = VocabularyStore::open(LocalStorage::new(&dir), None).unwrap();
        store.add_word("benevolent", "iyiliksever").unwrap();

        let reopened = VocabularyStore::open(LocalStorage::new(&dir), None).unwrap();
        assert!(reopened.is_word_saved("benevolent"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
