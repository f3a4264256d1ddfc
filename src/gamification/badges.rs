use std::collections::BTreeSet;

use crate::models::UsageStats;

/// A static achievement. `condition` is re-evaluated against the current
/// stats on every call; badges are not sticky here, so callers persist the
/// unlocked ids themselves (see `UsageStats::unlocked_badge_ids`).
#[derive(Debug)]
pub struct Badge {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub condition: fn(&UsageStats) -> bool,
}

/// Fixed catalog. No condition holds on freshly-zeroed stats, and all
/// conditions are jointly satisfiable.
pub const BADGES: &[Badge] = &[
    Badge {
        id: "first-focus",
        name: "初次专注",
        description: "累计专注满 1 分钟",
        icon: "🌱",
        condition: |stats| stats.total_focus_seconds >= 60,
    },
    Badge {
        id: "focus-30min",
        name: "渐入佳境",
        description: "累计专注满 30 分钟",
        icon: "📚",
        condition: |stats| stats.total_focus_seconds >= 1_800,
    },
    Badge {
        id: "focus-2h",
        name: "学习达人",
        description: "累计专注满 2 小时",
        icon: "🏆",
        condition: |stats| stats.total_focus_seconds >= 7_200,
    },
    Badge {
        id: "streak-10min",
        name: "心流初现",
        description: "连续专注 10 分钟不分心",
        icon: "🔥",
        condition: |stats| stats.longest_streak_seconds >= 600,
    },
    Badge {
        id: "streak-30min",
        name: "深度专注",
        description: "连续专注 30 分钟不分心",
        icon: "🧘",
        condition: |stats| stats.longest_streak_seconds >= 1_800,
    },
    Badge {
        id: "steady-hand",
        name: "稳如泰山",
        description: "专注满 30 分钟且分心不超过 3 次",
        icon: "🗿",
        condition: |stats| stats.total_focus_seconds >= 1_800 && stats.distraction_count <= 3,
    },
    Badge {
        id: "quick-recovery",
        name: "快速回神",
        description: "分心后重新连续专注 5 分钟",
        icon: "⚡",
        condition: |stats| stats.distraction_count >= 1 && stats.current_streak_seconds >= 300,
    },
];

/// Every catalog entry whose condition currently holds. Order-independent;
/// evaluated from scratch each call.
pub fn unlocked_badges(stats: &UsageStats) -> Vec<&'static Badge> {
    BADGES
        .iter()
        .filter(|badge| (badge.condition)(stats))
        .collect()
}

/// Ids of the currently-held badges, for merging into persisted stats.
pub fn unlocked_badge_ids(stats: &UsageStats) -> BTreeSet<String> {
    unlocked_badges(stats)
        .iter()
        .map(|badge| badge.id.to_string())
        .collect()
}
