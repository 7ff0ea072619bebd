//! Crew Match - suggestion, role matching and search core for a film-crew network
//!
//! This library decides which people to suggest as new contacts, how well a
//! profile fits an open production role, and how to rank free-text search
//! results. Every computation is a pure function of a point-in-time
//! [`GraphSnapshot`] supplied by the caller.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{
    build_exclusion_set, compute_suggestions, fuzzy_ranked_search, score_role_match, SocialGraph,
    SuggestionAggregator, SuggestionLimits, WeightedField,
};
pub use models::{GraphSnapshot, MatchResult, Profile, ProfileId, ReasonTag, Role, SuggestionResult};
