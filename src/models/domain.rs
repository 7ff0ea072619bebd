use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::models::MatchError;

/// Unique profile identifier
///
/// Blank ids are rejected at construction: they can only come from a caller
/// bug, never from a data-quality issue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProfileId(String);

impl ProfileId {
    pub fn new(id: impl Into<String>) -> Result<Self, MatchError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(MatchError::InvalidArgument("profile id must not be blank".into()));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProfileId {
    type Error = MatchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProfileId> for String {
    fn from(id: ProfileId) -> Self {
        id.0
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Role and project ids come straight from the store and are only compared
pub type RoleId = String;
pub type ProjectId = String;

/// Primary crew department of a profile or a role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleCategory {
    Direction,
    Production,
    Image,
    Son,
    Lumiere,
    Machinerie,
    Decor,
    Costume,
    Maquillage,
    Montage,
    PostProduction,
    Acting,
    #[serde(other)]
    Other,
}

/// Crew member profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "profileId")]
    pub id: ProfileId,
    #[serde(rename = "displayName", default)]
    pub display_name: String,
    #[serde(rename = "primaryCategory", default)]
    pub primary_category: Option<RoleCategory>,
    #[serde(rename = "jobTitles", default)]
    pub job_titles: BTreeSet<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub skills: BTreeSet<String>,
    #[serde(rename = "equipmentTags", default)]
    pub equipment_tags: BTreeSet<String>,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(rename = "participationCount", default)]
    pub participation_count: Option<u32>,
    #[serde(rename = "activeProjectCount", default)]
    pub active_project_count: u32,
    #[serde(rename = "isCurrentlyShooting", default)]
    pub is_currently_shooting: bool,
}

impl Profile {
    /// Minimal profile with every optional attribute empty
    pub fn new(id: ProfileId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            primary_category: None,
            job_titles: BTreeSet::new(),
            city: None,
            skills: BTreeSet::new(),
            equipment_tags: BTreeSet::new(),
            age: None,
            gender: None,
            participation_count: None,
            active_project_count: 0,
            is_currently_shooting: false,
        }
    }

    /// Experience bucket derived from the participation count, if known
    pub fn experience_level(&self) -> Option<ExperienceLevel> {
        self.participation_count.map(ExperienceLevel::from_participations)
    }
}

/// Lifecycle of a connection request
///
/// Historical data spells the rejected state both `rejected` and `refused`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Pending,
    Accepted,
    #[serde(alias = "refused")]
    Rejected,
}

/// Connection between two profiles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionEdge {
    #[serde(rename = "requesterId")]
    pub requester_id: ProfileId,
    #[serde(rename = "receiverId")]
    pub receiver_id: ProfileId,
    pub status: ConnectionStatus,
}

impl ConnectionEdge {
    pub fn new(requester_id: ProfileId, receiver_id: ProfileId, status: ConnectionStatus) -> Self {
        Self { requester_id, receiver_id, status }
    }

    /// The endpoint opposite `id`, or `None` when the edge does not touch `id`
    pub fn other_side(&self, id: &ProfileId) -> Option<&ProfileId> {
        if &self.requester_id == id {
            Some(&self.receiver_id)
        } else if &self.receiver_id == id {
            Some(&self.requester_id)
        } else {
            None
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.status == ConnectionStatus::Accepted
    }
}

/// Directional block, mutually exclusionary in effect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockEdge {
    #[serde(rename = "blockerId")]
    pub blocker_id: ProfileId,
    #[serde(rename = "blockedId")]
    pub blocked_id: ProfileId,
}

impl BlockEdge {
    pub fn new(blocker_id: ProfileId, blocked_id: ProfileId) -> Self {
        Self { blocker_id, blocked_id }
    }

    pub fn other_side(&self, id: &ProfileId) -> Option<&ProfileId> {
        if &self.blocker_id == id {
            Some(&self.blocked_id)
        } else if &self.blocked_id == id {
            Some(&self.blocker_id)
        } else {
            None
        }
    }
}

/// A profile held a role on a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipationEdge {
    #[serde(rename = "profileId")]
    pub profile_id: ProfileId,
    #[serde(rename = "projectId")]
    pub project_id: ProjectId,
}

impl ParticipationEdge {
    pub fn new(profile_id: ProfileId, project_id: impl Into<ProjectId>) -> Self {
        Self { profile_id, project_id: project_id.into() }
    }
}

/// Experience bucket based on how many projects a profile worked on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Senior,
}

impl ExperienceLevel {
    pub fn from_participations(count: u32) -> Self {
        match count {
            0..=2 => ExperienceLevel::Beginner,
            3..=9 => ExperienceLevel::Intermediate,
            _ => ExperienceLevel::Senior,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Development,
    PreProduction,
    Shooting,
    PostProduction,
    Released,
}

impl ProjectStatus {
    /// Cameras are rolling or have already rolled
    pub fn is_in_production(self) -> bool {
        matches!(
            self,
            ProjectStatus::Shooting | ProjectStatus::PostProduction | ProjectStatus::Released
        )
    }
}

/// Production a role belongs to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "projectId")]
    pub id: ProjectId,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "ownerId", default)]
    pub owner_id: Option<ProfileId>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub status: Option<ProjectStatus>,
}

/// Requested attributes for a role; every field is optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleRequirements {
    #[serde(rename = "minAge", default)]
    pub min_age: Option<u8>,
    #[serde(rename = "maxAge", default)]
    pub max_age: Option<u8>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(rename = "experienceLevel", default)]
    pub experience_level: Option<ExperienceLevel>,
    #[serde(rename = "requiredSkills", default)]
    pub required_skills: BTreeSet<String>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentState {
    Open,
    Assigned,
    Closed,
}

/// Open or filled position on a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    #[serde(rename = "roleId")]
    pub id: RoleId,
    #[serde(rename = "projectId")]
    pub project_id: ProjectId,
    #[serde(default)]
    pub title: String,
    pub category: RoleCategory,
    #[serde(default)]
    pub requirements: RoleRequirements,
    #[serde(rename = "assignmentState")]
    pub assignment: AssignmentState,
    #[serde(rename = "assigneeId", default)]
    pub assignee_id: Option<ProfileId>,
}

impl Role {
    pub fn is_open(&self) -> bool {
        self.assignment == AssignmentState::Open
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    #[serde(alias = "refused")]
    Rejected,
}

/// A profile applied to a role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationEdge {
    #[serde(rename = "profileId")]
    pub profile_id: ProfileId,
    #[serde(rename = "roleId")]
    pub role_id: RoleId,
    pub status: ApplicationStatus,
}

/// Why a profile is being suggested
///
/// Variant order is priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonTag {
    MutualConnection,
    FormerColleague,
    SameCity,
    SameRole,
    None,
}

/// "People you may know" entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionResult {
    #[serde(rename = "profileId")]
    pub profile_id: ProfileId,
    pub reason: ReasonTag,
    /// Distinct co-participation paths that surfaced the candidate
    pub weight: u32,
}

/// Contributing reason of a role match, for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "factor", rename_all = "snake_case")]
pub enum MatchFactor {
    Category,
    Skills { matched: usize, required: usize },
    Location,
    Experience,
    Availability,
}

/// Compatibility between a profile and a role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "roleId")]
    pub role_id: RoleId,
    #[serde(rename = "profileId")]
    pub profile_id: ProfileId,
    pub score: u8,
    #[serde(rename = "matchedFactors")]
    pub matched_factors: Vec<MatchFactor>,
}

/// Scoring weights, in score points; the defaults sum to 100
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub category: f64,
    pub skills: f64,
    pub location: f64,
    pub experience: f64,
    pub availability: f64,
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.category + self.skills + self.location + self.experience + self.availability
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            category: 40.0,
            skills: 25.0,
            location: 20.0,
            experience: 10.0,
            availability: 5.0,
        }
    }
}

/// Chat message, searchable by body and sender name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "messageId")]
    pub id: String,
    #[serde(rename = "senderName", default)]
    pub sender_name: String,
    #[serde(default)]
    pub body: String,
}

/// Location entry offered by the city picker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}
