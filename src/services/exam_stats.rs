//! 按题型统计答题正确率

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryStats {
    pub correct: u32,
    pub total: u32,
}

impl CategoryStats {
    /// 正确率（0.0 - 1.0），没有记录时为 0
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.correct) / f64::from(self.total)
        }
    }
}

#[derive(Debug, Default)]
pub struct ExamStats {
    categories: Mutex<BTreeMap<String, CategoryStats>>,
}

impl ExamStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track_single_question_result(&self, category: &str, correct: bool) {
        let mut categories = self.categories.lock().unwrap_or_else(PoisonError::into_inner);
        let stats = categories.entry(category.to_string()).or_default();
        stats.total += 1;
        if correct {
            stats.correct += 1;
        }
    }

    pub fn category(&self, category: &str) -> CategoryStats {
        self.categories
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(category)
            .copied()
            .unwrap_or_default()
    }

    pub fn snapshot(&self) -> BTreeMap<String, CategoryStats> {
        self.categories.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_results() {
        let stats = ExamStats::new();
        stats.track_single_question_result("Dinleme Pratiği", true);
        stats.track_single_question_result("Dinleme Pratiği", false);
        stats.track_single_question_result("Okuma Anlama Analizi", true);

        assert_eq!(stats.category("Dinleme Pratiği"), CategoryStats { correct: 1, total: 2 });
        assert!((stats.category("Dinleme Pratiği").accuracy() - 0.5).abs() < f64::EPSILON);
        assert_eq!(stats.category("Unknown").accuracy(), 0.0);
        assert_eq!(stats.snapshot().len(), 2);
    }
}
