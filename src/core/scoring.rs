use std::collections::HashSet;

use crate::core::text::{fold, same_text};
use crate::models::{MatchFactor, MatchResult, Profile, Project, Role, ScoringWeights};

/// Calculate a match score (0-100) between a profile and a role
///
/// Scoring formula (default weights):
/// score = (
///     category_match * 40 +        # primary category equals role category
///     skill_overlap * 25 +         # matched / required skills
///     location_match * 20 +        # profile city equals project city
///     experience_match * 10 +      # experience bucket equals requested one
///     availability * 5             # not shooting, project not yet in production
/// )
///
/// A missing attribute on either side scores zero for its factor.
pub fn calculate_match_score(
    profile: &Profile,
    role: &Role,
    project: Option<&Project>,
    weights: &ScoringWeights,
) -> MatchResult {
    let mut total = 0.0;
    let mut factors = Vec::new();

    // Category
    if profile.primary_category == Some(role.category) {
        total += weights.category;
        factors.push(MatchFactor::Category);
    }

    // Skills
    let (matched, required) = skill_overlap(profile, role);
    if matched > 0 {
        total += weights.skills * matched as f64 / required as f64;
        factors.push(MatchFactor::Skills { matched, required });
    }

    // Location: the project's city, else the role's own requirement
    let wanted_city = project
        .and_then(|p| p.city.as_deref())
        .or(role.requirements.location.as_deref());
    if let (Some(wanted), Some(city)) = (wanted_city, profile.city.as_deref()) {
        if same_text(wanted, city) {
            total += weights.location;
            factors.push(MatchFactor::Location);
        }
    }

    // Experience
    if let (Some(wanted), Some(level)) = (role.requirements.experience_level, profile.experience_level()) {
        if wanted == level {
            total += weights.experience;
            factors.push(MatchFactor::Experience);
        }
    }

    // Availability only matters before cameras roll
    let pre_production = project
        .and_then(|p| p.status)
        .is_some_and(|status| !status.is_in_production());
    if pre_production && !profile.is_currently_shooting {
        total += weights.availability;
        factors.push(MatchFactor::Availability);
    }

    MatchResult {
        role_id: role.id.clone(),
        profile_id: profile.id.clone(),
        score: clamp_score(total),
        matched_factors: factors,
    }
}

/// Score with the default weights
pub fn score_role_match(profile: &Profile, role: &Role, project: Option<&Project>) -> MatchResult {
    calculate_match_score(profile, role, project, &ScoringWeights::default())
}

/// Sort descending by score; ties by profile id, then role id
pub fn rank_matches(matches: &mut [MatchResult]) {
    matches.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.profile_id.cmp(&b.profile_id))
            .then_with(|| a.role_id.cmp(&b.role_id))
    });
}

/// (matched, required) skill counts, compared case- and accent-insensitively
#[inline]
fn skill_overlap(profile: &Profile, role: &Role) -> (usize, usize) {
    let required: HashSet<String> = role
        .requirements
        .required_skills
        .iter()
        .map(|s| fold(s))
        .filter(|s| !s.is_empty())
        .collect();
    if required.is_empty() {
        return (0, 0);
    }

    let owned: HashSet<String> = profile.skills.iter().map(|s| fold(s)).collect();
    (required.intersection(&owned).count(), required.len())
}

/// Round and clamp into 0..=100; NaN scores zero
#[inline]
fn clamp_score(total: f64) -> u8 {
    if total.is_nan() {
        return 0;
    }
    total.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AssignmentState, ExperienceLevel, ProfileId, ProjectStatus, RoleCategory, RoleRequirements,
    };

    fn create_test_profile(category: Option<RoleCategory>, city: Option<&str>, skills: &[&str]) -> Profile {
        let mut profile = Profile::new(ProfileId::new("test_user").unwrap(), "Test User");
        profile.primary_category = category;
        profile.city = city.map(str::to_string);
        profile.skills = skills.iter().map(|s| s.to_string()).collect();
        profile
    }

    fn create_test_role(category: RoleCategory, skills: &[&str]) -> Role {
        Role {
            id: "role".to_string(),
            project_id: "project".to_string(),
            title: "Chef opérateur".to_string(),
            category,
            requirements: RoleRequirements {
                required_skills: skills.iter().map(|s| s.to_string()).collect(),
                ..RoleRequirements::default()
            },
            assignment: AssignmentState::Open,
            assignee_id: None,
        }
    }

    fn create_test_project(city: Option<&str>, status: Option<ProjectStatus>) -> Project {
        Project {
            id: "project".to_string(),
            title: "Court métrage".to_string(),
            owner_id: None,
            city: city.map(str::to_string),
            status,
        }
    }

    #[test]
    fn test_full_match_scores_hundred() {
        let mut profile = create_test_profile(Some(RoleCategory::Image), Some("Paris"), &["steadicam"]);
        profile.participation_count = Some(4);
        let mut role = create_test_role(RoleCategory::Image, &["Steadicam"]);
        role.requirements.experience_level = Some(ExperienceLevel::Intermediate);
        let project = create_test_project(Some("paris"), Some(ProjectStatus::PreProduction));

        let result = score_role_match(&profile, &role, Some(&project));

        assert_eq!(result.score, 100);
        assert_eq!(
            result.matched_factors,
            vec![
                MatchFactor::Category,
                MatchFactor::Skills { matched: 1, required: 1 },
                MatchFactor::Location,
                MatchFactor::Experience,
                MatchFactor::Availability,
            ]
        );
    }

    #[test]
    fn test_missing_fields_score_zero() {
        let profile = create_test_profile(None, None, &[]);
        let role = create_test_role(RoleCategory::Son, &[]);

        let result = score_role_match(&profile, &role, None);

        assert_eq!(result.score, 0);
        assert!(result.matched_factors.is_empty());
    }

    #[test]
    fn test_skill_overlap_is_proportional() {
        let role = create_test_role(RoleCategory::Son, &["perche", "mixage", "protools", "hf"]);
        let one = create_test_profile(None, None, &["perche"]);
        let three = create_test_profile(None, None, &["perche", "mixage", "hf"]);

        let one_score = score_role_match(&one, &role, None).score;
        let three_score = score_role_match(&three, &role, None).score;

        assert_eq!(one_score, 6);
        assert_eq!(three_score, 19);
    }

    #[test]
    fn test_availability_only_before_production() {
        let profile = create_test_profile(None, None, &[]);
        let role = create_test_role(RoleCategory::Decor, &[]);

        let shooting = create_test_project(None, Some(ProjectStatus::Shooting));
        let development = create_test_project(None, Some(ProjectStatus::Development));

        assert_eq!(score_role_match(&profile, &role, Some(&shooting)).score, 0);
        assert_eq!(score_role_match(&profile, &role, Some(&development)).score, 5);

        let mut busy = profile.clone();
        busy.is_currently_shooting = true;
        assert_eq!(score_role_match(&busy, &role, Some(&development)).score, 0);
    }

    #[test]
    fn test_role_location_fallback() {
        let profile = create_test_profile(None, Some("Lyon"), &[]);
        let mut role = create_test_role(RoleCategory::Costume, &[]);
        role.requirements.location = Some("Lyon".to_string());

        assert_eq!(score_role_match(&profile, &role, None).score, 20);
    }

    #[test]
    fn test_custom_weights_clamped() {
        let profile = create_test_profile(Some(RoleCategory::Image), None, &[]);
        let role = create_test_role(RoleCategory::Image, &[]);
        let weights = ScoringWeights {
            category: 250.0,
            ..ScoringWeights::default()
        };

        assert_eq!(calculate_match_score(&profile, &role, None, &weights).score, 100);
    }

    #[test]
    fn test_rank_matches_ties_by_profile_id() {
        let mut matches = vec![
            MatchResult { role_id: "r".into(), profile_id: ProfileId::new("b").unwrap(), score: 50, matched_factors: vec![] },
            MatchResult { role_id: "r".into(), profile_id: ProfileId::new("a").unwrap(), score: 50, matched_factors: vec![] },
            MatchResult { role_id: "r".into(), profile_id: ProfileId::new("c").unwrap(), score: 80, matched_factors: vec![] },
        ];

        rank_matches(&mut matches);

        let order: Vec<&str> = matches.iter().map(|m| m.profile_id.as_str()).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }
}
