//! 分析历史记录 - 业务能力层
//!
//! 最新的记录在最前面，超过上限的旧记录被丢弃

use std::sync::{Mutex, PoisonError};

use tracing::debug;

use crate::error::AppResult;
use crate::models::{storage_key, AnalysisResult, AppUser, HistoryItem};
use crate::services::local_storage::LocalStorage;

pub const HISTORY_KEY_PREFIX: &str = "yds-analysis-history";
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// 历史记录存储
pub trait HistoryStore: Send + Sync {
    /// 追加一条记录
    fn add_history_item(&self, question: &str, analysis: &AnalysisResult) -> AppResult<()>;

    /// 所有记录，最新的在前
    fn history(&self) -> Vec<HistoryItem>;

    fn clear_history(&self) -> AppResult<()>;
}

fn push_front_capped(items: &mut Vec<HistoryItem>, item: HistoryItem, limit: usize) {
    items.insert(0, item);
    items.truncate(limit);
}

/// 内存中的历史记录
pub struct MemoryHistoryStore {
    items: Mutex<Vec<HistoryItem>>,
    limit: usize,
}

impl MemoryHistoryStore {
    pub fn new(limit: usize) -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            limit,
        }
    }
}

impl Default for MemoryHistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn add_history_item(&self, question: &str, analysis: &AnalysisResult) -> AppResult<()> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        push_front_capped(&mut items, HistoryItem::new(question, analysis), self.limit);
        Ok(())
    }

    fn history(&self) -> Vec<HistoryItem> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn clear_history(&self) -> AppResult<()> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner).clear();
        Ok(())
    }
}

/// 按用户写入 JSON 文件的历史记录
pub struct JsonHistoryStore {
    storage: LocalStorage,
    key: String,
    items: Mutex<Vec<HistoryItem>>,
    limit: usize,
}

impl JsonHistoryStore {
    /// 打开（或新建）某个用户的历史记录
    pub fn open(storage: LocalStorage, user: Option<&AppUser>, limit: usize) -> AppResult<Self> {
        let key = storage_key(HISTORY_KEY_PREFIX, user);
        let items: Vec<HistoryItem> = storage.load(&key)?;
        debug!("已加载 {} 条历史记录 ({})", items.len(), key);

        Ok(Self {
            storage,
            key,
            items: Mutex::new(items),
            limit,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl HistoryStore for JsonHistoryStore {
    fn add_history_item(&self, question: &str, analysis: &AnalysisResult) -> AppResult<()> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        // 先写盘，成功后再替换内存中的列表
        let mut updated = items.clone();
        push_front_capped(&mut updated, HistoryItem::new(question, analysis), self.limit);
        self.storage.save(&self.key, &updated)?;
        *items = updated;
        Ok(())
    }

    fn history(&self) -> Vec<HistoryItem> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn clear_history(&self) -> AppResult<()> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        self.storage.save(&self.key, &Vec::<HistoryItem>::new())?;
        items.clear();
        Ok(())
    }
}
