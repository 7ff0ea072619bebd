use std::collections::HashMap;

use crate::core::exclusion::ExclusionSet;
use crate::core::graph::SocialGraph;
use crate::core::ordered::OrderedIdSet;
use crate::models::{ProfileId, ReasonTag, SuggestionResult};

/// Bounds on the number of suggestions produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionLimits {
    /// Below this many tiered results, the fallback tier tops the list up
    pub min: usize,
    pub max: usize,
}

impl SuggestionLimits {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min: min.min(max), max }
    }
}

impl Default for SuggestionLimits {
    fn default() -> Self {
        Self { min: 3, max: 5 }
    }
}

/// One priority bucket while it is being discovered
struct Tier {
    reason: ReasonTag,
    entries: Vec<SuggestionResult>,
    index: HashMap<ProfileId, usize>,
}

impl Tier {
    fn new(reason: ReasonTag) -> Self {
        Self {
            reason,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Record one more path to `id`
    fn bump(&mut self, id: &ProfileId) {
        match self.index.get(id) {
            Some(&i) => self.entries[i].weight += 1,
            None => {
                self.index.insert(id.clone(), self.entries.len());
                self.entries.push(SuggestionResult {
                    profile_id: id.clone(),
                    reason: self.reason,
                    weight: 1,
                });
            }
        }
    }

    fn into_entries(mut self, rank_by_weight: bool) -> Vec<SuggestionResult> {
        if rank_by_weight {
            // stable: equal weights keep discovery order
            self.entries.sort_by(|a, b| b.weight.cmp(&a.weight));
        }
        self.entries
    }
}

/// "People you may know" engine
///
/// # Tiers
/// 1. Mutual connection: people who worked on a project with one of the
///    caller's accepted connections
/// 2. Former colleague: people who worked on a project with the caller
/// 3. Fallback: any other profile, only to reach the minimum count
#[derive(Debug, Clone, Copy, Default)]
pub struct SuggestionEngine {
    limits: SuggestionLimits,
    rank_by_weight: bool,
}

impl SuggestionEngine {
    pub fn new(limits: SuggestionLimits) -> Self {
        Self {
            limits,
            rank_by_weight: false,
        }
    }

    /// Order tiers A and B by the number of distinct paths to each candidate
    pub fn with_weight_ranking(mut self, enabled: bool) -> Self {
        self.rank_by_weight = enabled;
        self
    }

    /// Compute ranked, deduplicated suggestions for `profile_id`
    ///
    /// Never returns an id from `exclusion` or one absent from the graph's
    /// directory.
    pub fn compute(
        &self,
        profile_id: &ProfileId,
        exclusion: &ExclusionSet,
        graph: &SocialGraph,
    ) -> Vec<SuggestionResult> {
        let SuggestionLimits { min, max } = SuggestionLimits::new(self.limits.min, self.limits.max);
        if max == 0 {
            return Vec::new();
        }

        let eligible = |id: &ProfileId| {
            id != profile_id && !exclusion.contains(id) && graph.contains_profile(id)
        };

        let mut selected = OrderedIdSet::new();

        // Tier A: weight counts distinct connections leading to the candidate
        let mut mutual = Tier::new(ReasonTag::MutualConnection);
        for connection in graph.connections_of(profile_id) {
            let mut reached = OrderedIdSet::new();
            for project in graph.projects_of(connection) {
                for member in graph.members_of(project) {
                    if eligible(member) {
                        reached.insert(member.clone());
                    }
                }
            }
            for id in &reached {
                mutual.bump(id);
            }
        }
        let mutual = mutual.into_entries(self.rank_by_weight);
        selected.extend(mutual.iter().map(|s| s.profile_id.clone()));

        // Tier B: weight counts shared projects
        let mut colleagues = Tier::new(ReasonTag::FormerColleague);
        for project in graph.projects_of(profile_id) {
            for member in graph.members_of(project) {
                if eligible(member) && !selected.contains(member) {
                    colleagues.bump(member);
                }
            }
        }
        let colleagues = colleagues.into_entries(self.rank_by_weight);
        selected.extend(colleagues.iter().map(|s| s.profile_id.clone()));

        let mut results = mutual;
        results.extend(colleagues);

        // Tier C
        if results.len() < min {
            for id in graph.directory() {
                if results.len() >= min {
                    break;
                }
                if eligible(id) && selected.insert(id.clone()) {
                    results.push(SuggestionResult {
                        profile_id: id.clone(),
                        reason: ReasonTag::None,
                        weight: 0,
                    });
                }
            }
        }

        tracing::debug!(
            profile_id = %profile_id,
            candidates = selected.len(),
            returned = results.len().min(max),
            "Computed suggestions"
        );

        results.truncate(max);
        results
    }
}

/// Compute suggestions with the default (unweighted) tier ordering
pub fn compute_suggestions(
    profile_id: &ProfileId,
    exclusion: &ExclusionSet,
    graph: &SocialGraph,
    limits: SuggestionLimits,
) -> Vec<SuggestionResult> {
    SuggestionEngine::new(limits).compute(profile_id, exclusion, graph)
}
