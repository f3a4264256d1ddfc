use crate::models::UsageStats;

const MAX_SCORE: f64 = 100.0;

/// Caps keep either component from dominating the score on its own.
const FOCUS_POINTS_PER_MIN: f64 = 2.0;
const FOCUS_POINTS_CAP: f64 = 70.0;
const STREAK_POINTS_PER_MIN: f64 = 3.0;
const STREAK_POINTS_CAP: f64 = 30.0;
const DISTRACTION_PENALTY: f64 = 2.0;

/// Daily focus score in [0, 100].
///
/// Total focus time and the longest streak earn points; every distraction
/// costs a flat penalty. Monotone in each input.
pub fn daily_score(stats: &UsageStats) -> u32 {
    let focus_points =
        (stats.total_focus_seconds as f64 / 60.0 * FOCUS_POINTS_PER_MIN).min(FOCUS_POINTS_CAP);
    let streak_points =
        (stats.longest_streak_seconds as f64 / 60.0 * STREAK_POINTS_PER_MIN).min(STREAK_POINTS_CAP);
    let penalty = stats.distraction_count as f64 * DISTRACTION_PENALTY;

    (focus_points + streak_points - penalty)
        .clamp(0.0, MAX_SCORE)
        .round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(focus: u64, longest: u64, distractions: u32) -> UsageStats {
        UsageStats {
            total_focus_seconds: focus,
            current_streak_seconds: 0,
            longest_streak_seconds: longest,
            distraction_count: distractions,
            unlocked_badge_ids: Default::default(),
        }
    }

    #[test]
    fn zero_stats_score_zero() {
        assert_eq!(daily_score(&stats(0, 0, 0)), 0);
    }

    #[test]
    fn more_focus_never_lowers_the_score() {
        let mut previous = 0;
        for focus in (0..=14_400).step_by(300) {
            let score = daily_score(&stats(focus, 600, 3));
            assert!(score >= previous, "score dropped at {focus}s focus");
            previous = score;
        }
    }

    #[test]
    fn longer_streak_never_lowers_the_score() {
        let mut previous = 0;
        for streak in (0..=7_200).step_by(300) {
            let score = daily_score(&stats(3_600, streak, 3));
            assert!(score >= previous, "score dropped at {streak}s streak");
            previous = score;
        }
    }

    #[test]
    fn more_distractions_never_raise_the_score() {
        let mut previous = u32::MAX;
        for distractions in 0..60 {
            let score = daily_score(&stats(3_600, 1_200, distractions));
            assert!(score <= previous, "score rose at {distractions} distractions");
            previous = score;
        }
    }

    #[test]
    fn score_is_always_within_bounds() {
        assert_eq!(daily_score(&stats(0, 0, 200)), 0);
        assert!(daily_score(&stats(u64::from(u32::MAX), u64::from(u32::MAX), 0)) <= 100);
    }
}
