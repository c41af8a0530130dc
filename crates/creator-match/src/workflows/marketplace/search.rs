//! Structured candidate filtering and ranked selection.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::assistant::QueryInterpreter;
use super::domain::{FilterSet, InfluencerProfile, SortKey};
use super::repository::{InfluencerRepository, RepositoryError};

/// Result bound applied when the caller does not specify one.
pub const DEFAULT_SEARCH_LIMIT: usize = 20;

/// Ranked subset of the influencer collection plus the full match count.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub results: Vec<InfluencerProfile>,
    pub total: usize,
}

/// Natural-language search result carrying the interpreted constraints so
/// clients can show the user what the query was understood to mean.
#[derive(Debug, Clone, Serialize)]
pub struct NaturalSearchOutcome {
    pub query: String,
    pub interpreted_filters: FilterSet,
    pub results: Vec<InfluencerProfile>,
    pub total: usize,
}

/// True when the profile satisfies every present constraint. Numeric bounds
/// are inclusive; location matches on a case-insensitive substring; platform
/// requires a non-empty handle.
pub fn matches(profile: &InfluencerProfile, filters: &FilterSet) -> bool {
    if let Some(category) = &filters.category {
        if !profile.categories.iter().any(|c| c == category) {
            return false;
        }
    }
    if let Some(min) = filters.min_followers {
        if profile.follower_count < min {
            return false;
        }
    }
    if let Some(max) = filters.max_followers {
        if profile.follower_count > max {
            return false;
        }
    }
    if let Some(min) = filters.min_engagement {
        if profile.engagement_rate < min {
            return false;
        }
    }
    if let Some(location) = &filters.location {
        let Some(profile_location) = &profile.location else {
            return false;
        };
        if !profile_location
            .to_lowercase()
            .contains(&location.to_lowercase())
        {
            return false;
        }
    }
    if let Some(platform) = filters.platform {
        match profile.handle_for(platform) {
            Some(handle) if !handle.is_empty() => {}
            _ => return false,
        }
    }
    if let Some(min) = filters.min_authenticity {
        if profile.authenticity_score < min {
            return false;
        }
    }
    true
}

/// Filter, rank descending by the sort key, and bound the collection. The
/// total is counted over the full filtered set before the limit applies; the
/// sort is stable so equal keys keep the repository order.
pub fn select(
    profiles: Vec<InfluencerProfile>,
    filters: &FilterSet,
    sort: SortKey,
    limit: usize,
) -> SearchOutcome {
    let mut matched: Vec<InfluencerProfile> = profiles
        .into_iter()
        .filter(|profile| matches(profile, filters))
        .collect();
    let total = matched.len();

    matched.sort_by(|a, b| match sort {
        SortKey::FollowerCount => b.follower_count.cmp(&a.follower_count),
        SortKey::EngagementRate => b.engagement_rate.total_cmp(&a.engagement_rate),
        SortKey::AuthenticityScore => b.authenticity_score.total_cmp(&a.authenticity_score),
    });
    matched.truncate(limit);

    SearchOutcome {
        results: matched,
        total,
    }
}

/// Service composing the query interpreter with the influencer collection.
pub struct SearchService<R> {
    influencers: Arc<R>,
    interpreter: Arc<dyn QueryInterpreter>,
}

impl<R> SearchService<R>
where
    R: InfluencerRepository + 'static,
{
    pub fn new(influencers: Arc<R>, interpreter: Arc<dyn QueryInterpreter>) -> Self {
        Self {
            influencers,
            interpreter,
        }
    }

    /// Structured listing with explicit constraints.
    pub fn list(
        &self,
        filters: &FilterSet,
        sort: SortKey,
        limit: usize,
    ) -> Result<SearchOutcome, RepositoryError> {
        Ok(select(self.influencers.list()?, filters, sort, limit))
    }

    /// Interpret a natural-language query and run the structured search.
    ///
    /// Interpretation cannot fail the request: the production composition
    /// falls back internally, and an interpreter that still errors out is
    /// treated as having found no constraints.
    pub async fn natural_search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<NaturalSearchOutcome, RepositoryError> {
        let filters = match self.interpreter.interpret(query).await {
            Ok(filters) => filters,
            Err(err) => {
                tracing::warn!(error = %err, "interpreter failed without fallback; searching unconstrained");
                FilterSet::default()
            }
        };
        debug!(?filters, query, "interpreted search query");

        let outcome = self.list(&filters, SortKey::FollowerCount, limit)?;
        Ok(NaturalSearchOutcome {
            query: query.to_string(),
            interpreted_filters: filters,
            results: outcome.results,
            total: outcome.total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::marketplace::domain::InfluencerId;
    use uuid::Uuid;

    fn profile(name: &str, followers: u64, engagement: f64, authenticity: f64) -> InfluencerProfile {
        InfluencerProfile {
            id: InfluencerId(Uuid::new_v4()),
            display_name: name.to_string(),
            bio: None,
            avatar_url: None,
            categories: vec!["fitness".to_string(), "lifestyle".to_string()],
            instagram_handle: Some(format!("{name}.ig")),
            tiktok_handle: None,
            youtube_handle: None,
            follower_count: followers,
            engagement_rate: engagement,
            avg_likes: 0,
            avg_comments: 0,
            authenticity_score: authenticity,
            fake_follower_pct: 100.0 - authenticity,
            location: Some("Los Angeles, US".to_string()),
            is_verified: false,
        }
    }

    #[test]
    fn empty_filter_set_matches_everything() {
        let candidate = profile("ana", 12_000, 0.04, 85.0);
        assert!(matches(&candidate, &FilterSet::default()));
    }

    #[test]
    fn numeric_bounds_are_inclusive() {
        let candidate = profile("ana", 10_000, 0.03, 80.0);
        let filters = FilterSet {
            min_followers: Some(10_000),
            max_followers: Some(10_000),
            min_engagement: Some(0.03),
            min_authenticity: Some(80.0),
            ..FilterSet::default()
        };
        assert!(matches(&candidate, &filters));

        let filters = FilterSet {
            min_followers: Some(10_001),
            ..FilterSet::default()
        };
        assert!(!matches(&candidate, &filters));
    }

    #[test]
    fn category_requires_membership() {
        let candidate = profile("ana", 12_000, 0.04, 85.0);
        let filters = FilterSet {
            category: Some("fitness".to_string()),
            ..FilterSet::default()
        };
        assert!(matches(&candidate, &filters));

        let filters = FilterSet {
            category: Some("beauty".to_string()),
            ..FilterSet::default()
        };
        assert!(!matches(&candidate, &filters));
    }

    #[test]
    fn location_matches_case_insensitive_substring() {
        let candidate = profile("ana", 12_000, 0.04, 85.0);
        let filters = FilterSet {
            location: Some("los angeles".to_string()),
            ..FilterSet::default()
        };
        assert!(matches(&candidate, &filters));

        let filters = FilterSet {
            location: Some("London".to_string()),
            ..FilterSet::default()
        };
        assert!(!matches(&candidate, &filters));
    }

    #[test]
    fn platform_requires_a_non_empty_handle() {
        let mut candidate = profile("ana", 12_000, 0.04, 85.0);
        let instagram = FilterSet {
            platform: Some(crate::workflows::marketplace::Platform::Instagram),
            ..FilterSet::default()
        };
        let tiktok = FilterSet {
            platform: Some(crate::workflows::marketplace::Platform::Tiktok),
            ..FilterSet::default()
        };

        assert!(matches(&candidate, &instagram));
        assert!(!matches(&candidate, &tiktok));

        candidate.instagram_handle = Some(String::new());
        assert!(!matches(&candidate, &instagram));
    }

    #[test]
    fn select_counts_before_the_limit_and_ranks_descending() {
        let profiles = vec![
            profile("ana", 5_000, 0.08, 90.0),
            profile("bo", 50_000, 0.02, 70.0),
            profile("cam", 20_000, 0.05, 80.0),
        ];

        let outcome = select(profiles.clone(), &FilterSet::default(), SortKey::FollowerCount, 2);
        assert_eq!(outcome.total, 3);
        assert_eq!(outcome.results.len(), 2);
        assert_eq!(outcome.results[0].display_name, "bo");
        assert_eq!(outcome.results[1].display_name, "cam");

        let outcome = select(profiles, &FilterSet::default(), SortKey::EngagementRate, 10);
        assert_eq!(outcome.results[0].display_name, "ana");
        assert_eq!(outcome.results[2].display_name, "bo");
    }

    #[test]
    fn select_is_idempotent_over_unchanged_input() {
        let profiles = vec![
            profile("ana", 5_000, 0.08, 90.0),
            profile("bo", 50_000, 0.02, 70.0),
            profile("cam", 20_000, 0.05, 80.0),
        ];
        let filters = FilterSet {
            min_followers: Some(10_000),
            ..FilterSet::default()
        };

        let first = select(profiles.clone(), &filters, SortKey::FollowerCount, 10);
        let second = select(profiles, &filters, SortKey::FollowerCount, 10);
        assert_eq!(first.total, second.total);
        let names = |outcome: &SearchOutcome| {
            outcome
                .results
                .iter()
                .map(|p| p.display_name.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(names(&first), names(&second));
    }
}
