//! 词典查询 - 流程层
//!
//! 词条和配图并发获取；配图失败只记日志，不影响查词结果

use std::sync::{Arc, LazyLock};

use futures::future::join;
use regex::Regex;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::models::DictionaryEntry;
use crate::parser::parse_response;
use crate::services::{ActionKind, ChallengeTracker, ImageSearch, PracticeBackend, VocabularyStore};

static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("标点正则无效"));

/// 一次查词的结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryLookup {
    pub word: String,
    pub entry: DictionaryEntry,
    pub image_url: Option<String>,
}

/// 点击文章里的单词时去掉附带的标点
pub fn clean_clicked_word(word: &str) -> String {
    PUNCTUATION.replace_all(word, "").trim().to_string()
}

pub struct DictionaryPractice<B, I> {
    backend: Arc<B>,
    images: Arc<I>,
    challenge: Arc<dyn ChallengeTracker>,
    vocabulary: Arc<VocabularyStore>,
    lookup: Option<DictionaryLookup>,
    error: Option<String>,
}

impl<B: PracticeBackend, I: ImageSearch> DictionaryPractice<B, I> {
    pub fn new(
        backend: Arc<B>,
        images: Arc<I>,
        challenge: Arc<dyn ChallengeTracker>,
        vocabulary: Arc<VocabularyStore>,
    ) -> Self {
        Self {
            backend,
            images,
            challenge,
            vocabulary,
            lookup: None,
            error: None,
        }
    }

    pub async fn search(&mut self, term: &str) -> AppResult<&DictionaryLookup> {
        let word = term.trim();
        self.lookup = None;
        self.error = None;
        if word.is_empty() {
            let e = AppError::invalid_input("请输入要查询的单词");
            self.error = Some(e.to_string());
            return Err(e);
        }

        info!("📚 查询单词: {}", word);
        let (entry, image) = join(
            self.backend.get_dictionary_entry(word),
            self.images.search_image(word),
        )
        .await;

        let image_url = image.unwrap_or_else(|e| {
            warn!("⚠️ 配图搜索失败，忽略: {}", e);
            None
        });

        match entry.and_then(|raw| parse_response::<DictionaryEntry>(&raw)) {
            Ok(entry) => {
                self.challenge.track_action(ActionKind::Dictionary);
                Ok(&*self.lookup.insert(DictionaryLookup {
                    word: word.to_string(),
                    entry,
                    image_url,
                }))
            }
            Err(e) => {
                warn!("⚠️ 查询 {} 失败: {}", word, e);
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// 查询文章中被点击的单词
    pub async fn search_clicked(&mut self, word: &str) -> AppResult<&DictionaryLookup> {
        let cleaned = clean_clicked_word(word);
        self.search(&cleaned).await
    }

    /// 收藏或取消收藏当前单词，返回操作后是否已收藏
    pub fn toggle_save_word(&self) -> AppResult<bool> {
        let lookup = self
            .lookup
            .as_ref()
            .ok_or_else(|| AppError::invalid_input("还没有查询任何单词"))?;
        self.vocabulary
            .toggle_word(&lookup.word, &lookup.entry.turkish_meaning)
    }

    pub fn is_current_word_saved(&self) -> bool {
        self.lookup
            .as_ref()
            .is_some_and(|l| self.vocabulary.is_word_saved(&l.word))
    }

    pub fn lookup(&self) -> Option<&DictionaryLookup> {
        self.lookup.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
