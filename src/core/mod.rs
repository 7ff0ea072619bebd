// Core algorithm exports
pub mod aggregator;
pub mod exclusion;
pub mod filters;
pub mod graph;
pub mod ordered;
pub mod scoring;
pub mod search;
pub mod suggestions;
pub mod text;

pub use aggregator::{AggregatorSettings, SuggestionAggregator};
pub use exclusion::{build_exclusion_set, pending_counterparts, ExclusionSet};
pub use filters::is_eligible;
pub use graph::SocialGraph;
pub use ordered::OrderedIdSet;
pub use scoring::{calculate_match_score, rank_matches, score_role_match};
pub use search::{fuzzy_ranked_search, search_with_scores, Searchable, WeightedField, DEFAULT_THRESHOLD};
pub use suggestions::{compute_suggestions, SuggestionEngine, SuggestionLimits};
