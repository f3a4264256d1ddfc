pub mod badges;
pub mod leaderboard;
pub mod score;

pub use badges::{unlocked_badge_ids, unlocked_badges, Badge, BADGES};
pub use leaderboard::{leaderboard, leaderboard_with_rng, LeaderboardEntry};
pub use score::daily_score;
