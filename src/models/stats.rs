use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::FocusStatus;

/// Running per-session tallies the gamification layer scores against.
///
/// Invariant: `longest_streak_seconds >= current_streak_seconds`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStats {
    pub total_focus_seconds: u64,
    pub current_streak_seconds: u64,
    pub longest_streak_seconds: u64,
    pub distraction_count: u32,
    pub unlocked_badge_ids: BTreeSet<String>,
}

impl UsageStats {
    /// Fold one analysis outcome into the tallies. `elapsed_seconds` is the
    /// wall time covered by this tick.
    pub fn apply(&mut self, status: FocusStatus, elapsed_seconds: u64) {
        match status {
            FocusStatus::Focused => {
                self.total_focus_seconds += elapsed_seconds;
                self.current_streak_seconds += elapsed_seconds;
                if self.current_streak_seconds > self.longest_streak_seconds {
                    self.longest_streak_seconds = self.current_streak_seconds;
                }
            }
            FocusStatus::Distracted => {
                self.distraction_count += 1;
                self.current_streak_seconds = 0;
            }
            FocusStatus::Absent => {
                self.current_streak_seconds = 0;
            }
            // Transient failures and the pre-analysis state leave the tallies alone.
            FocusStatus::Error | FocusStatus::Idle => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focused_ticks_accumulate_and_track_longest() {
        let mut stats = UsageStats::default();
        stats.apply(FocusStatus::Focused, 15);
        stats.apply(FocusStatus::Focused, 15);

        assert_eq!(stats.total_focus_seconds, 30);
        assert_eq!(stats.current_streak_seconds, 30);
        assert_eq!(stats.longest_streak_seconds, 30);
    }

    #[test]
    fn distraction_resets_streak_but_keeps_longest() {
        let mut stats = UsageStats::default();
        stats.apply(FocusStatus::Focused, 60);
        stats.apply(FocusStatus::Distracted, 15);
        stats.apply(FocusStatus::Focused, 15);

        assert_eq!(stats.distraction_count, 1);
        assert_eq!(stats.current_streak_seconds, 15);
        assert_eq!(stats.longest_streak_seconds, 60);
        assert_eq!(stats.total_focus_seconds, 75);
    }

    #[test]
    fn absence_resets_streak_without_counting_a_distraction() {
        let mut stats = UsageStats::default();
        stats.apply(FocusStatus::Focused, 45);
        stats.apply(FocusStatus::Absent, 15);

        assert_eq!(stats.distraction_count, 0);
        assert_eq!(stats.current_streak_seconds, 0);
        assert_eq!(stats.longest_streak_seconds, 45);
    }

    #[test]
    fn errors_and_idle_leave_stats_untouched() {
        let mut stats = UsageStats::default();
        stats.apply(FocusStatus::Focused, 30);
        let before = stats.clone();

        stats.apply(FocusStatus::Error, 15);
        stats.apply(FocusStatus::Idle, 15);

        assert_eq!(stats.total_focus_seconds, before.total_focus_seconds);
        assert_eq!(stats.current_streak_seconds, before.current_streak_seconds);
        assert_eq!(stats.distraction_count, before.distraction_count);
    }

    #[test]
    fn longest_streak_never_below_current() {
        let mut stats = UsageStats::default();
        for _ in 0..10 {
            stats.apply(FocusStatus::Focused, 7);
            assert!(stats.longest_streak_seconds >= stats.current_streak_seconds);
        }
        stats.apply(FocusStatus::Distracted, 7);
        assert!(stats.longest_streak_seconds >= stats.current_streak_seconds);
    }
}
