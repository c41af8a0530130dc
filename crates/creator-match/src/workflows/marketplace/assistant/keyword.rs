//! Deterministic keyword interpreter, the fallback when no language model is
//! configured or the remote path fails.

use async_trait::async_trait;

use crate::workflows::marketplace::domain::{FilterSet, Platform};

use super::{AssistantError, QueryInterpreter};

/// Category vocabulary, scanned in order; first hit wins.
const CATEGORIES: [&str; 10] = [
    "fashion",
    "beauty",
    "fitness",
    "food",
    "travel",
    "tech",
    "gaming",
    "lifestyle",
    "music",
    "sports",
];

/// Follower magnitudes that directional words can bind to. Every matching
/// keyword applies; there is no first-match-wins here.
const FOLLOWER_MAGNITUDES: [(&str, u64); 6] = [
    ("10k", 10_000),
    ("50k", 50_000),
    ("100k", 100_000),
    ("500k", 500_000),
    ("1m", 1_000_000),
    ("1 million", 1_000_000),
];

const MIN_WORDS: [&str; 4] = ["over", "above", "more than", "at least"];
const MAX_WORDS: [&str; 3] = ["under", "below", "less than"];

/// Location keywords mapped to their canonical form; scanned in order.
const LOCATIONS: [(&str, &str); 10] = [
    ("us", "US"),
    ("usa", "US"),
    ("united states", "US"),
    ("uk", "UK"),
    ("india", "IN"),
    ("brazil", "BR"),
    ("los angeles", "Los Angeles"),
    ("new york", "New York"),
    ("london", "London"),
    ("mumbai", "Mumbai"),
];

const HIGH_ENGAGEMENT_FLOOR: f64 = 0.03;
const AUTHENTICITY_FLOOR: f64 = 80.0;

/// Rule-based interpretation over the lower-cased query. Groups of mutually
/// exclusive keywords (categories, audience tiers, platforms, locations)
/// stop at their first match; the remaining rules apply independently on the
/// same string.
pub struct KeywordInterpreter;

impl KeywordInterpreter {
    pub fn interpret_query(query: &str) -> FilterSet {
        let query = query.to_lowercase();
        let mut filters = FilterSet::default();

        filters.category = CATEGORIES
            .iter()
            .find(|category| query.contains(*category))
            .map(|category| category.to_string());

        if query.contains("micro") {
            filters.min_followers = Some(10_000);
            filters.max_followers = Some(100_000);
        } else if query.contains("macro") || query.contains("big") {
            filters.min_followers = Some(500_000);
        } else if query.contains("nano") {
            filters.min_followers = Some(1_000);
            filters.max_followers = Some(10_000);
        }

        for (keyword, value) in FOLLOWER_MAGNITUDES {
            if query.contains(keyword) {
                if MIN_WORDS.iter().any(|word| query.contains(word)) {
                    filters.min_followers = Some(value);
                } else if MAX_WORDS.iter().any(|word| query.contains(word)) {
                    filters.max_followers = Some(value);
                }
            }
        }

        if query.contains("high engagement") || query.contains("engaged") {
            filters.min_engagement = Some(HIGH_ENGAGEMENT_FLOOR);
        }

        if query.contains("authentic") || query.contains("real") || query.contains("genuine") {
            filters.min_authenticity = Some(AUTHENTICITY_FLOOR);
        }

        filters.platform = Platform::ALL
            .into_iter()
            .find(|platform| query.contains(platform.label()));

        filters.location = LOCATIONS
            .iter()
            .find(|(keyword, _)| query.contains(keyword))
            .map(|(_, canonical)| canonical.to_string());

        filters
    }
}

#[async_trait]
impl QueryInterpreter for KeywordInterpreter {
    async fn interpret(&self, query: &str) -> Result<FilterSet, AssistantError> {
        Ok(Self::interpret_query(query))
    }
}
