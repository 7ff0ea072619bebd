use crate::core::ordered::OrderedIdSet;
use crate::models::{BlockEdge, ConnectionEdge, ConnectionStatus, ProfileId};

/// Profile ids that must never be suggested to a given user
pub type ExclusionSet = OrderedIdSet;

/// Build the exclusion set for `profile_id`
///
/// Contains the caller, everyone blocked by or blocking the caller, and every
/// accepted connection in either direction. Pending requests are not part of
/// it; see [`pending_counterparts`].
pub fn build_exclusion_set(
    profile_id: &ProfileId,
    connections: &[ConnectionEdge],
    blocks: &[BlockEdge],
) -> ExclusionSet {
    let mut excluded = ExclusionSet::new();
    excluded.insert(profile_id.clone());

    for block in blocks {
        if let Some(other) = block.other_side(profile_id) {
            excluded.insert(other.clone());
        }
    }

    for edge in connections.iter().filter(|e| e.is_accepted()) {
        if let Some(other) = edge.other_side(profile_id) {
            excluded.insert(other.clone());
        }
    }

    tracing::trace!(profile_id = %profile_id, excluded = excluded.len(), "Built exclusion set");
    excluded
}

/// Counterparts of every pending connection request touching `profile_id`
pub fn pending_counterparts(profile_id: &ProfileId, connections: &[ConnectionEdge]) -> Vec<ProfileId> {
    connections
        .iter()
        .filter(|e| e.status == ConnectionStatus::Pending)
        .filter_map(|e| e.other_side(profile_id))
        .filter(|other| *other != profile_id)
        .cloned()
        .collect()
}
