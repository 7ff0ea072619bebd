use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::domain::{
    ApplicationEdge, BlockEdge, ConnectionEdge, ParticipationEdge, Profile, ProfileId, Project,
    ProjectId, Role,
};

/// Point-in-time view of everything the matching core reads
///
/// Snapshots are assembled by the data layer for a single request and
/// discarded afterwards. Nothing in the core mutates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSnapshot {
    #[serde(rename = "takenAt")]
    pub taken_at: DateTime<Utc>,
    #[serde(default)]
    pub profiles: Vec<Profile>,
    #[serde(default)]
    pub connections: Vec<ConnectionEdge>,
    #[serde(default)]
    pub blocks: Vec<BlockEdge>,
    #[serde(default)]
    pub participations: Vec<ParticipationEdge>,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub applications: Vec<ApplicationEdge>,
}

impl Default for GraphSnapshot {
    fn default() -> Self {
        Self {
            taken_at: Utc::now(),
            profiles: Vec::new(),
            connections: Vec::new(),
            blocks: Vec::new(),
            participations: Vec::new(),
            roles: Vec::new(),
            projects: Vec::new(),
            applications: Vec::new(),
        }
    }
}

impl GraphSnapshot {
    pub fn profile(&self, id: &ProfileId) -> Option<&Profile> {
        self.profiles.iter().find(|p| &p.id == id)
    }

    pub fn project(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == id)
    }

    pub fn role(&self, id: &str) -> Option<&Role> {
        self.roles.iter().find(|r| r.id == id)
    }

    /// Fill in `participation_count` from the participation edges
    ///
    /// Counts distinct projects per profile. Profiles that already carry a
    /// count from the store keep it.
    pub fn with_derived_counts(mut self) -> Self {
        let mut counts: HashMap<&ProfileId, Vec<&ProjectId>> = HashMap::new();
        for edge in &self.participations {
            let projects = counts.entry(&edge.profile_id).or_default();
            if !projects.contains(&&edge.project_id) {
                projects.push(&edge.project_id);
            }
        }

        let derived: HashMap<ProfileId, u32> = counts
            .into_iter()
            .map(|(id, projects)| (id.clone(), projects.len() as u32))
            .collect();

        for profile in &mut self.profiles {
            if profile.participation_count.is_none() {
                profile.participation_count = Some(derived.get(&profile.id).copied().unwrap_or(0));
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(s: &str) -> ProfileId {
        ProfileId::new(s).unwrap()
    }

    #[test]
    fn test_derived_counts_distinct_projects() {
        let mut veteran = Profile::new(pid("v"), "Veteran");
        veteran.participation_count = Some(42);

        let snapshot = GraphSnapshot {
            profiles: vec![Profile::new(pid("a"), "A"), Profile::new(pid("b"), "B"), veteran],
            participations: vec![
                ParticipationEdge::new(pid("a"), "p1"),
                ParticipationEdge::new(pid("a"), "p1"),
                ParticipationEdge::new(pid("a"), "p2"),
                ParticipationEdge::new(pid("v"), "p2"),
            ],
            ..GraphSnapshot::default()
        }
        .with_derived_counts();

        assert_eq!(snapshot.profile(&pid("a")).unwrap().participation_count, Some(2));
        assert_eq!(snapshot.profile(&pid("b")).unwrap().participation_count, Some(0));
        assert_eq!(snapshot.profile(&pid("v")).unwrap().participation_count, Some(42));
    }
}
