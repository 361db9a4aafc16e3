//! 分析结果列表
//!
//! 编排循环、测验流程和调用方共享同一个句柄。创建之后的每次修改都按 ID
//! 找到那一条再整体替换，锁只在同步代码里持有，不跨 await。

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::models::AnalysisWithQuestion;

#[derive(Debug, Clone, Default)]
pub struct ResultList {
    inner: Arc<RwLock<Vec<AnalysisWithQuestion>>>,
}

impl ResultList {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<AnalysisWithQuestion>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<AnalysisWithQuestion>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// 当前列表的拷贝，按追加顺序
    pub fn snapshot(&self) -> Vec<AnalysisWithQuestion> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn get(&self, id: &str) -> Option<AnalysisWithQuestion> {
        self.read().iter().find(|item| item.id == id).cloned()
    }

    pub(crate) fn push(&self, item: AnalysisWithQuestion) {
        self.write().push(item);
    }

    pub(crate) fn clear(&self) {
        self.write().clear();
    }

    /// 就地修改某一条，ID 不存在时返回 `None`
    pub(crate) fn update<R>(
        &self,
        id: &str,
        f: impl FnOnce(&mut AnalysisWithQuestion) -> R,
    ) -> Option<R> {
        let mut items = self.write();
        items.iter_mut().find(|item| item.id == id).map(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnalysisResult, QuizState};

    fn item(question: &str) -> AnalysisWithQuestion {
        AnalysisWithQuestion::new(question, AnalysisResult::default())
    }

    #[test]
    fn test_clones_share_state() {
        let list = ResultList::new();
        let other = list.clone();
        list.push(item("q1"));
        assert_eq!(other.len(), 1);
        other.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn test_update_touches_only_target() {
        let list = ResultList::new();
        let first = item("q1");
        let second = item("q2");
        let (first_id, second_id) = (first.id.clone(), second.id.clone());
        list.push(first);
        list.push(second);

        let touched = list.update(&second_id, |it| it.quiz = Some(QuizState::loading()));
        assert!(touched.is_some());
        assert!(list.get(&first_id).and_then(|it| it.quiz).is_none());
        assert!(list.get(&second_id).and_then(|it| it.quiz).is_some());
        assert!(list.update("missing", |_| ()).is_none());
    }
}
