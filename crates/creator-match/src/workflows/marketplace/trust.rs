//! Authenticity scoring over raw engagement statistics.
//!
//! The scorer is a pure banded heuristic: it starts from a neutral baseline
//! and adds or subtracts fixed weights per signal. Band boundaries are
//! inclusive on both ends and checked in order; a value lands in the first
//! band it satisfies.

use super::domain::{EngagementStats, TrustScore};

const BASELINE: f64 = 50.0;

/// Convert engagement statistics into the stored trust signal.
///
/// Total over every non-negative input combination. An account with no
/// followers carries no signal and scores exactly (50.0, 50.0).
pub fn score(stats: &EngagementStats) -> TrustScore {
    if stats.follower_count == 0 {
        return TrustScore {
            authenticity_score: 50.0,
            fake_follower_pct: 50.0,
        };
    }

    let mut score = BASELINE;

    // Healthy engagement sits between 1% and 6% of the audience; rates above
    // 15% look bought.
    let engagement = stats.engagement_rate;
    if (0.01..=0.06).contains(&engagement) {
        score += 15.0;
    } else if (0.005..=0.10).contains(&engagement) {
        score += 8.0;
    } else if engagement > 0.15 {
        score -= 10.0;
    } else {
        score -= 5.0;
    }

    let like_ratio = stats.avg_likes as f64 / stats.follower_count as f64;
    if (0.01..=0.05).contains(&like_ratio) {
        score += 15.0;
    } else if (0.005..=0.08).contains(&like_ratio) {
        score += 8.0;
    } else {
        score -= 5.0;
    }

    // Comment-to-like ratios above 20% match a bot-comment pattern.
    if stats.avg_likes > 0 {
        let comment_ratio = stats.avg_comments as f64 / stats.avg_likes as f64;
        if (0.01..=0.05).contains(&comment_ratio) {
            score += 10.0;
        } else if (0.005..=0.10).contains(&comment_ratio) {
            score += 5.0;
        } else if comment_ratio > 0.20 {
            score -= 10.0;
        } else {
            score -= 3.0;
        }
    }

    // Established accounts are presumed vetted; tiny ones carry too little
    // signal to trust.
    if stats.follower_count > 1_000_000 {
        score += 5.0;
    } else if stats.follower_count < 1_000 {
        score -= 5.0;
    }

    let score = score.clamp(0.0, 100.0);
    let fake_pct = (100.0 - score).clamp(0.0, 100.0);

    TrustScore {
        authenticity_score: round_tenth(score),
        fake_follower_pct: round_tenth(fake_pct),
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
