use rand::Rng;
use serde::Serialize;

/// One row of the synthesized weekly board. Regenerated on every call,
/// never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: String,
    pub name: String,
    pub score: u32,
    pub avatar: String,
    pub is_current_user: bool,
}

/// Simulated peers: display name, avatar, and a fixed offset from the
/// current user's score. Offsets straddle zero so the board shows someone
/// ahead and someone behind.
const PEERS: &[(&str, &str, i32)] = &[
    ("学霸小明", "🦊", 9),
    ("夜猫子阿豪", "🦉", 4),
    ("元气小樱", "🐱", -3),
    ("贪玩大壮", "🐻", -8),
    ("安静的小鹿", "🦌", -14),
    ("卷王小琪", "🐼", 13),
];

const PEER_JITTER: i32 = 3;

/// Synthesize the board around `current_score` using the supplied
/// generator, so tests can pin a seed.
///
/// Peer scores are the user's score plus a fixed offset and a little
/// jitter, clamped to [0, 100]. The sort is stable, so ties keep roster
/// order.
pub fn leaderboard_with_rng(current_score: u32, rng: &mut impl Rng) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = Vec::with_capacity(PEERS.len() + 1);

    for (index, (name, avatar, offset)) in PEERS.iter().enumerate() {
        let jitter = rng.gen_range(-PEER_JITTER..=PEER_JITTER);
        let score = (current_score as i32 + offset + jitter).clamp(0, 100) as u32;

        entries.push(LeaderboardEntry {
            id: format!("peer-{}", index + 1),
            name: (*name).to_string(),
            score,
            avatar: (*avatar).to_string(),
            is_current_user: false,
        });
    }

    entries.push(LeaderboardEntry {
        id: "me".to_string(),
        name: "我".to_string(),
        score: current_score.min(100),
        avatar: "⭐".to_string(),
        is_current_user: true,
    });

    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries
}

/// Board with OS randomness; see [`leaderboard_with_rng`] for tests.
pub fn leaderboard(current_score: u32) -> Vec<LeaderboardEntry> {
    leaderboard_with_rng(current_score, &mut rand::thread_rng())
}
