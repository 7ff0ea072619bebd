use std::collections::{HashMap, HashSet};

use crate::models::{ConnectionEdge, GraphSnapshot, ParticipationEdge, ProfileId, ProjectId};

/// Adjacency view of the social and co-participation graphs
///
/// Built once per snapshot. Every list keeps first-seen order and holds no
/// duplicates, so traversals over it are deterministic.
#[derive(Debug, Clone, Default)]
pub struct SocialGraph {
    directory: Vec<ProfileId>,
    known: HashSet<ProfileId>,
    connections: HashMap<ProfileId, Vec<ProfileId>>,
    projects_by_profile: HashMap<ProfileId, Vec<ProjectId>>,
    members_by_project: HashMap<ProjectId, Vec<ProfileId>>,
}

impl SocialGraph {
    /// Build the graph from a profile directory and raw edges
    ///
    /// Only accepted connections become adjacency. Self-loops are dropped.
    pub fn new<I>(directory: I, connections: &[ConnectionEdge], participations: &[ParticipationEdge]) -> Self
    where
        I: IntoIterator<Item = ProfileId>,
    {
        let mut graph = SocialGraph::default();

        for id in directory {
            if graph.known.insert(id.clone()) {
                graph.directory.push(id);
            }
        }

        for edge in connections.iter().filter(|e| e.is_accepted()) {
            if edge.requester_id == edge.receiver_id {
                continue;
            }
            push_unique(
                graph.connections.entry(edge.requester_id.clone()).or_default(),
                &edge.receiver_id,
            );
            push_unique(
                graph.connections.entry(edge.receiver_id.clone()).or_default(),
                &edge.requester_id,
            );
        }

        for edge in participations {
            push_unique(
                graph.projects_by_profile.entry(edge.profile_id.clone()).or_default(),
                &edge.project_id,
            );
            push_unique(
                graph.members_by_project.entry(edge.project_id.clone()).or_default(),
                &edge.profile_id,
            );
        }

        tracing::trace!(
            profiles = graph.directory.len(),
            projects = graph.members_by_project.len(),
            "Built social graph"
        );

        graph
    }

    pub fn from_snapshot(snapshot: &GraphSnapshot) -> Self {
        Self::new(
            snapshot.profiles.iter().map(|p| p.id.clone()),
            &snapshot.connections,
            &snapshot.participations,
        )
    }

    /// Accepted connections of `id`, in edge order
    pub fn connections_of(&self, id: &ProfileId) -> &[ProfileId] {
        self.connections.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Projects `id` participated in, in first-seen order
    pub fn projects_of(&self, id: &ProfileId) -> &[ProjectId] {
        self.projects_by_profile.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Participants of `project`, in first-seen order
    pub fn members_of(&self, project: &ProjectId) -> &[ProfileId] {
        self.members_by_project.get(project).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `id` is a profile present in the snapshot
    #[inline]
    pub fn contains_profile(&self, id: &ProfileId) -> bool {
        self.known.contains(id)
    }

    pub fn directory(&self) -> &[ProfileId] {
        &self.directory
    }
}

fn push_unique<T: PartialEq + Clone>(list: &mut Vec<T>, value: &T) {
    if !list.contains(value) {
        list.push(value.clone());
    }
}
