//! 每日挑战 - 业务能力层
//!
//! 统计当天每类练习完成的次数，和每日目标比较。换日后计数清零。

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use chrono::NaiveDate;
use phf::phf_map;
use serde::Serialize;
use tracing::{debug, info};

/// 练习类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Analyze,
    Reading,
    Dictionary,
    Writing,
    Listening,
}

impl ActionKind {
    pub const ALL: [ActionKind; 5] = [
        ActionKind::Analyze,
        ActionKind::Reading,
        ActionKind::Dictionary,
        ActionKind::Writing,
        ActionKind::Listening,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Analyze => "analyze",
            ActionKind::Reading => "reading",
            ActionKind::Dictionary => "dictionary",
            ActionKind::Writing => "writing",
            ActionKind::Listening => "listening",
        }
    }

    /// 每日目标次数
    pub fn daily_goal(self) -> u32 {
        DAILY_GOALS.get(self.as_str()).copied().unwrap_or(1)
    }
}

static DAILY_GOALS: phf::Map<&'static str, u32> = phf_map! {
    "analyze" => 5,
    "reading" => 1,
    "dictionary" => 5,
    "writing" => 1,
    "listening" => 1,
};

/// 练习完成信号（只管发，不等结果）
pub trait ChallengeTracker: Send + Sync {
    fn track_action(&self, kind: ActionKind);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChallengeProgress {
    pub kind: ActionKind,
    pub done: u32,
    pub goal: u32,
}

impl ChallengeProgress {
    pub fn is_complete(&self) -> bool {
        self.done >= self.goal
    }
}

#[derive(Debug)]
struct DayCounts {
    day: NaiveDate,
    counts: HashMap<ActionKind, u32>,
}

/// 按本地日期统计的每日挑战
#[derive(Debug)]
pub struct DailyChallenge {
    state: Mutex<DayCounts>,
}

impl DailyChallenge {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(DayCounts {
                day: today(),
                counts: HashMap::new(),
            }),
        }
    }

    /// 在指定日期记录一次练习
    pub fn track_on(&self, day: NaiveDate, kind: ActionKind) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.day != day {
            debug!("日期变更 {} → {}，挑战计数清零", state.day, day);
            state.day = day;
            state.counts.clear();
        }

        let count = state.counts.entry(kind).or_insert(0);
        *count += 1;
        if *count == kind.daily_goal() {
            info!("🏆 今日 {} 目标已完成 ({} 次)", kind.as_str(), count);
        }
    }

    /// 指定日期的次数，存储的计数不是这一天的按 0 计
    pub fn count_on(&self, day: NaiveDate, kind: ActionKind) -> u32 {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.day != day {
            return 0;
        }
        state.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn progress_on(&self, day: NaiveDate) -> Vec<ChallengeProgress> {
        ActionKind::ALL
            .iter()
            .map(|&kind| ChallengeProgress {
                kind,
                done: self.count_on(day, kind),
                goal: kind.daily_goal(),
            })
            .collect()
    }

    pub fn is_complete_on(&self, day: NaiveDate) -> bool {
        self.progress_on(day).iter().all(ChallengeProgress::is_complete)
    }

    pub fn count(&self, kind: ActionKind) -> u32 {
        self.count_on(today(), kind)
    }

    pub fn progress(&self) -> Vec<ChallengeProgress> {
        self.progress_on(today())
    }

    /// 今天所有类型都达到每日目标
    pub fn is_complete(&self) -> bool {
        self.is_complete_on(today())
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

impl Default for DailyChallenge {
    fn default() -> Self {
        Self::new()
    }
}

impl ChallengeTracker for DailyChallenge {
    fn track_action(&self, kind: ActionKind) {
        self.track_on(today(), kind);
    }
}
