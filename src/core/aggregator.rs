use std::collections::HashSet;

use crate::core::{
    exclusion::{build_exclusion_set, pending_counterparts},
    filters::is_eligible,
    graph::SocialGraph,
    scoring::{calculate_match_score, rank_matches},
    suggestions::{SuggestionEngine, SuggestionLimits},
    text::same_text,
};
use crate::models::{
    ApplicationStatus, GraphSnapshot, MatchResult, ProfileId, ReasonTag, ScoringWeights,
    SuggestionResult,
};

/// UI-facing caps and floors, one set per widget
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregatorSettings {
    pub min_people: usize,
    pub max_people: usize,
    pub max_roles: usize,
    pub max_candidates: usize,
    /// Role matches under this score are dropped
    pub min_role_score: u8,
    pub rank_by_weight: bool,
}

impl Default for AggregatorSettings {
    fn default() -> Self {
        Self {
            min_people: 3,
            max_people: 5,
            max_roles: 10,
            max_candidates: 20,
            min_role_score: 20,
            rank_by_weight: false,
        }
    }
}

/// Per-screen orchestration of exclusion, suggestion and scoring
///
/// The only component that applies caps and minimum scores. Everything it
/// reads comes from a single snapshot.
#[derive(Debug, Clone)]
pub struct SuggestionAggregator {
    settings: AggregatorSettings,
    weights: ScoringWeights,
}

impl SuggestionAggregator {
    pub fn new(settings: AggregatorSettings, weights: ScoringWeights) -> Self {
        Self { settings, weights }
    }

    pub fn settings(&self) -> &AggregatorSettings {
        &self.settings
    }

    /// "People you may know" for `profile_id`
    ///
    /// On top of the exclusion set, anyone with a pending request in either
    /// direction is left out. Fallback candidates are relabelled `same_city`
    /// or `same_role` when their profile shares that with the caller.
    pub fn people_you_may_know(
        &self,
        snapshot: &GraphSnapshot,
        profile_id: &ProfileId,
        limit: Option<usize>,
    ) -> Vec<SuggestionResult> {
        let max = limit.map_or(self.settings.max_people, |l| l.min(self.settings.max_people));

        let mut exclusion = build_exclusion_set(profile_id, &snapshot.connections, &snapshot.blocks);
        exclusion.extend(pending_counterparts(profile_id, &snapshot.connections));

        let graph = SocialGraph::from_snapshot(snapshot);
        let engine = SuggestionEngine::new(SuggestionLimits::new(self.settings.min_people, max))
            .with_weight_ranking(self.settings.rank_by_weight);

        let mut suggestions = engine.compute(profile_id, &exclusion, &graph);
        self.merge_reasons(snapshot, profile_id, &mut suggestions);
        suggestions.truncate(max);

        tracing::info!(
            profile_id = %profile_id,
            excluded = exclusion.len(),
            returned = suggestions.len(),
            "People suggestions ready"
        );

        suggestions
    }

    /// Open roles ranked for `profile_id`
    pub fn roles_for_you(
        &self,
        snapshot: &GraphSnapshot,
        profile_id: &ProfileId,
        limit: Option<usize>,
    ) -> Vec<MatchResult> {
        let Some(profile) = snapshot.profile(profile_id) else {
            tracing::warn!(profile_id = %profile_id, "Caller missing from snapshot, no role matches");
            return Vec::new();
        };
        let max = limit.map_or(self.settings.max_roles, |l| l.min(self.settings.max_roles));

        let applied: HashSet<&str> = snapshot
            .applications
            .iter()
            .filter(|a| &a.profile_id == profile_id)
            .map(|a| a.role_id.as_str())
            .collect();
        let blocked = build_exclusion_set(profile_id, &[], &snapshot.blocks);

        let mut matches: Vec<MatchResult> = snapshot
            .roles
            .iter()
            .filter(|role| !applied.contains(role.id.as_str()))
            .filter(|role| is_eligible(profile, role))
            .filter_map(|role| {
                let project = snapshot.project(&role.project_id);
                let owner = project.and_then(|p| p.owner_id.as_ref());
                // own projects, and projects run by someone on either side of a block
                if owner.is_some_and(|o| blocked.contains(o)) {
                    return None;
                }
                let result = calculate_match_score(profile, role, project, &self.weights);
                (result.score >= self.settings.min_role_score).then_some(result)
            })
            .collect();

        matches.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.role_id.cmp(&b.role_id)));
        matches.truncate(max);

        tracing::info!(profile_id = %profile_id, returned = matches.len(), "Role matches ready");
        matches
    }

    /// Profiles ranked for one role
    ///
    /// Unknown role ids and closed roles yield nothing.
    pub fn candidates_for_role(
        &self,
        snapshot: &GraphSnapshot,
        role_id: &str,
        limit: Option<usize>,
    ) -> Vec<MatchResult> {
        let Some(role) = snapshot.role(role_id) else {
            tracing::debug!(role_id, "Role missing from snapshot");
            return Vec::new();
        };
        let max = limit.map_or(self.settings.max_candidates, |l| l.min(self.settings.max_candidates));

        let project = snapshot.project(&role.project_id);
        let owner = project.and_then(|p| p.owner_id.as_ref());
        let owner_blocks = owner
            .map(|o| build_exclusion_set(o, &[], &snapshot.blocks))
            .unwrap_or_default();

        let rejected: HashSet<&ProfileId> = snapshot
            .applications
            .iter()
            .filter(|a| a.role_id == role.id && a.status == ApplicationStatus::Rejected)
            .map(|a| &a.profile_id)
            .collect();

        let mut matches: Vec<MatchResult> = snapshot
            .profiles
            .iter()
            .filter(|p| !owner_blocks.contains(&p.id))
            .filter(|p| role.assignee_id.as_ref() != Some(&p.id))
            .filter(|p| !rejected.contains(&p.id))
            .filter(|p| is_eligible(p, role))
            .map(|p| calculate_match_score(p, role, project, &self.weights))
            .filter(|m| m.score >= self.settings.min_role_score)
            .collect();

        rank_matches(&mut matches);
        matches.truncate(max);

        tracing::info!(role_id, returned = matches.len(), "Role candidates ready");
        matches
    }

    fn merge_reasons(&self, snapshot: &GraphSnapshot, profile_id: &ProfileId, suggestions: &mut [SuggestionResult]) {
        let Some(caller) = snapshot.profile(profile_id) else {
            return;
        };

        for suggestion in suggestions.iter_mut().filter(|s| s.reason == ReasonTag::None) {
            let Some(candidate) = snapshot.profile(&suggestion.profile_id) else {
                continue;
            };

            let same_city = match (&caller.city, &candidate.city) {
                (Some(a), Some(b)) => same_text(a, b),
                _ => false,
            };
            let same_role = caller.primary_category.is_some()
                && caller.primary_category == candidate.primary_category;

            if same_city {
                suggestion.reason = ReasonTag::SameCity;
            } else if same_role {
                suggestion.reason = ReasonTag::SameRole;
            }
        }
    }
}

impl Default for SuggestionAggregator {
    fn default() -> Self {
        Self::new(AggregatorSettings::default(), ScoringWeights::default())
    }
}
