// Model exports
pub mod domain;
pub mod error;
pub mod requests;
pub mod responses;
pub mod snapshot;

pub use domain::{
    ApplicationEdge, ApplicationStatus, AssignmentState, BlockEdge, ConnectionEdge, ConnectionStatus,
    ExperienceLevel, Location, MatchFactor, MatchResult, Message, ParticipationEdge, Profile, ProfileId,
    Project, ProjectId, ProjectStatus, ReasonTag, Role, RoleCategory, RoleId, RoleRequirements,
    ScoringWeights, SuggestionResult,
};
pub use error::MatchError;
pub use snapshot::GraphSnapshot;
pub use requests::{CandidatesRequest, SearchField, SearchRequest, SuggestionsRequest};
pub use responses::{
    CandidatesResponse, ErrorResponse, HealthResponse, PeopleResponse, RolesResponse, SearchHit,
    SearchResponse,
};
