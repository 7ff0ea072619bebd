// Unit tests for Crew Match

use crew_match::core::{
    build_exclusion_set, compute_suggestions, fuzzy_ranked_search, score_role_match, SocialGraph,
    SuggestionLimits, WeightedField,
};
use crew_match::models::{
    AssignmentState, BlockEdge, ConnectionEdge, ConnectionStatus, ParticipationEdge, Profile,
    ProfileId, ReasonTag, Role, RoleCategory, RoleRequirements,
};
use std::collections::HashSet;

fn pid(s: &str) -> ProfileId {
    ProfileId::new(s).unwrap()
}

/// Small deterministic generator so graph-shaped checks cover many shapes
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: usize) -> usize {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((self.0 >> 33) as usize) % bound
    }
}

struct RandomGraph {
    directory: Vec<ProfileId>,
    connections: Vec<ConnectionEdge>,
    blocks: Vec<BlockEdge>,
    participations: Vec<ParticipationEdge>,
}

fn random_graph(seed: u64) -> RandomGraph {
    let mut rng = Lcg(seed);
    let size = 4 + rng.next(20);
    let directory: Vec<ProfileId> = (0..size).map(|i| pid(&format!("u{}", i))).collect();
    let any = |rng: &mut Lcg| directory[rng.next(size)].clone();

    let mut connections = Vec::new();
    for _ in 0..rng.next(size * 2) {
        let status = match rng.next(3) {
            0 => ConnectionStatus::Pending,
            1 => ConnectionStatus::Accepted,
            _ => ConnectionStatus::Rejected,
        };
        connections.push(ConnectionEdge::new(any(&mut rng), any(&mut rng), status));
    }

    let mut blocks = Vec::new();
    for _ in 0..rng.next(size / 2 + 1) {
        blocks.push(BlockEdge::new(any(&mut rng), any(&mut rng)));
    }

    let mut participations = Vec::new();
    for _ in 0..rng.next(size * 3) {
        let project = format!("p{}", rng.next(size / 2 + 1));
        participations.push(ParticipationEdge::new(any(&mut rng), project));
    }
    // a dangling participant the directory does not know
    participations.push(ParticipationEdge::new(pid("ghost"), "p0"));

    RandomGraph { directory, connections, blocks, participations }
}

#[test]
fn test_suggestions_never_contain_excluded_ids() {
    for seed in 0..200 {
        let g = random_graph(seed);
        let me = g.directory[0].clone();
        let graph = SocialGraph::new(g.directory.clone(), &g.connections, &g.participations);
        let exclusion = build_exclusion_set(&me, &g.connections, &g.blocks);

        let results = compute_suggestions(&me, &exclusion, &graph, SuggestionLimits::new(3, 10));

        for s in &results {
            assert!(!exclusion.contains(&s.profile_id), "seed {}: excluded id {} returned", seed, s.profile_id);
            assert_ne!(s.profile_id.as_str(), "ghost", "seed {}: dangling id returned", seed);
        }
    }
}

#[test]
fn test_suggestions_are_deduplicated_and_tier_ordered() {
    for seed in 0..200 {
        let g = random_graph(seed);
        let me = g.directory[0].clone();
        let graph = SocialGraph::new(g.directory.clone(), &g.connections, &g.participations);
        let exclusion = build_exclusion_set(&me, &g.connections, &g.blocks);

        let results = compute_suggestions(&me, &exclusion, &graph, SuggestionLimits::new(3, 10));

        let unique: HashSet<&ProfileId> = results.iter().map(|s| &s.profile_id).collect();
        assert_eq!(unique.len(), results.len(), "seed {}: duplicate suggestion", seed);
        assert!(
            results.windows(2).all(|w| w[0].reason <= w[1].reason),
            "seed {}: tiers out of order",
            seed
        );
        assert!(results.len() <= 10);
    }
}

#[test]
fn test_exclusion_always_contains_self() {
    for seed in 0..50 {
        let g = random_graph(seed);
        let me = g.directory[g.directory.len() - 1].clone();
        let exclusion = build_exclusion_set(&me, &g.connections, &g.blocks);
        assert!(exclusion.contains(&me));
    }
}

#[test]
fn test_mutual_connection_beats_former_colleague() {
    let connections = vec![ConnectionEdge::new(pid("a"), pid("b"), ConnectionStatus::Accepted)];
    let participations = vec![
        ParticipationEdge::new(pid("a"), "set"),
        ParticipationEdge::new(pid("x"), "set"),
        ParticipationEdge::new(pid("b"), "other"),
        ParticipationEdge::new(pid("x"), "other"),
    ];
    let graph = SocialGraph::new(vec![pid("a"), pid("b"), pid("x")], &connections, &participations);
    let exclusion = build_exclusion_set(&pid("a"), &connections, &[]);

    let results = compute_suggestions(&pid("a"), &exclusion, &graph, SuggestionLimits::default());

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].reason, ReasonTag::MutualConnection);
}

#[test]
fn test_search_identity_on_empty_query() {
    let items = vec![
        serde_json::json!({"name": "Zoé"}),
        serde_json::json!({"name": "Adam"}),
    ];
    let fields = vec![WeightedField::new("name", 1.0)];

    assert_eq!(fuzzy_ranked_search(items.clone(), &fields, "", 0.4), items);
}

fn sound_role() -> Role {
    Role {
        id: "perchman".to_string(),
        project_id: "film".to_string(),
        title: "Perchman".to_string(),
        category: RoleCategory::Son,
        requirements: RoleRequirements {
            required_skills: ["perche", "mixage", "hf", "protools"].iter().map(|s| s.to_string()).collect(),
            ..RoleRequirements::default()
        },
        assignment: AssignmentState::Open,
        assignee_id: None,
    }
}

#[test]
fn test_score_monotonic_in_matched_skills() {
    let role = sound_role();
    let mut profile = Profile::new(pid("p"), "P");
    profile.primary_category = Some(RoleCategory::Son);

    let mut previous = score_role_match(&profile, &role, None).score;
    for skill in ["perche", "mixage", "hf", "protools"] {
        profile.skills.insert(skill.to_string());
        let score = score_role_match(&profile, &role, None).score;
        assert!(score >= previous, "adding {} lowered score {} -> {}", skill, previous, score);
        previous = score;
    }

    // unrelated skills change nothing
    profile.skills.insert("steadicam".to_string());
    assert_eq!(score_role_match(&profile, &role, None).score, previous);
}

#[test]
fn test_score_always_in_range() {
    let role = sound_role();
    for seed in 0..100u64 {
        let mut rng = Lcg(seed);
        let mut profile = Profile::new(pid("p"), "P");
        profile.primary_category = if rng.next(2) == 0 { Some(RoleCategory::Son) } else { None };
        profile.city = if rng.next(2) == 0 { Some("Paris".to_string()) } else { None };
        profile.participation_count = Some(rng.next(20) as u32);
        for skill in ["perche", "mixage", "hf", "protools", "steadicam"] {
            if rng.next(2) == 0 {
                profile.skills.insert(skill.to_string());
            }
        }

        let result = score_role_match(&profile, &role, None);
        assert!(result.score <= 100);
    }
}
