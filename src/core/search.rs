use std::borrow::Cow;

use crate::core::text::{fold, normalized_distance, tokenize};
use crate::models::{Location, Message, Profile, Project, Role};

/// Default maximum tolerated dissimilarity
pub const DEFAULT_THRESHOLD: f64 = 0.4;

/// Dissimilarity of a query token found inside, but not at the start of, a field token
const INNER_SUBSTRING_PENALTY: f64 = 0.1;

/// Entity whose named text fields can be searched
pub trait Searchable {
    /// Text of `field`, or `None` when the entity has no such field
    fn field_text(&self, field: &str) -> Option<Cow<'_, str>>;
}

/// Field name and its ranking weight
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedField {
    pub name: String,
    pub weight: f64,
}

impl WeightedField {
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}

/// Rank `items` against `query`, keeping only those within `threshold`
///
/// A blank query (nothing alphanumeric once folded) returns `items` untouched,
/// order included. So does a field list with no usable (positive, finite)
/// weight.
pub fn fuzzy_ranked_search<T: Searchable>(
    items: Vec<T>,
    fields: &[WeightedField],
    query: &str,
    threshold: f64,
) -> Vec<T> {
    if is_blank_query(query) || !has_usable_field(fields) {
        return items;
    }

    let ranked = search_with_scores(&items, fields, query, threshold);
    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    ranked
        .into_iter()
        .filter_map(|(index, _)| slots[index].take())
        .collect()
}

/// Indices and relevance (0 to 1) of matching items, best first
///
/// Blank query or no usable field: every index, in order, with relevance 1.
pub fn search_with_scores<T: Searchable>(
    items: &[T],
    fields: &[WeightedField],
    query: &str,
    threshold: f64,
) -> Vec<(usize, f64)> {
    let usable: Vec<&WeightedField> = fields
        .iter()
        .filter(|f| f.weight.is_finite() && f.weight > 0.0)
        .collect();

    if is_blank_query(query) || usable.is_empty() {
        return (0..items.len()).map(|i| (i, 1.0)).collect();
    }

    let threshold = if threshold.is_nan() {
        DEFAULT_THRESHOLD
    } else {
        threshold.clamp(0.0, 1.0)
    };
    let max_weight = usable.iter().map(|f| f.weight).fold(0.0, f64::max);

    let query = fold(query);
    let query_tokens = tokenize(&query);

    let mut scored: Vec<(usize, f64)> = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let relevance = usable
                .iter()
                .filter_map(|field| {
                    let text = item.field_text(&field.name)?;
                    let dissimilarity = field_dissimilarity(&query, &query_tokens, &fold(&text));
                    (dissimilarity <= threshold)
                        .then(|| (1.0 - dissimilarity) * field.weight / max_weight)
                })
                .fold(None, |best: Option<f64>, r| Some(best.map_or(r, |b| b.max(r))))?;
            Some((index, relevance))
        })
        .collect();

    // stable: equal relevance keeps input order
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    tracing::trace!(items = items.len(), hits = scored.len(), "Fuzzy search ranked");
    scored
}

/// Dissimilarity (0 to 1) between a folded query and a folded field
fn field_dissimilarity(query: &str, query_tokens: &[&str], field: &str) -> f64 {
    if field.contains(query) {
        return 0.0;
    }

    let field_tokens = tokenize(field);
    if query_tokens.is_empty() || field_tokens.is_empty() {
        return 1.0;
    }

    let total: f64 = query_tokens
        .iter()
        .map(|q| {
            field_tokens
                .iter()
                .map(|f| token_dissimilarity(q, f))
                .fold(1.0, f64::min)
        })
        .sum();

    total / query_tokens.len() as f64
}

#[inline]
fn token_dissimilarity(query: &str, field: &str) -> f64 {
    if field.starts_with(query) {
        0.0
    } else if field.contains(query) {
        INNER_SUBSTRING_PENALTY
    } else {
        normalized_distance(query, field)
    }
}

/// Nothing left to compare once folded: whitespace, punctuation, lone marks
fn is_blank_query(query: &str) -> bool {
    tokenize(&fold(query)).is_empty()
}

fn has_usable_field(fields: &[WeightedField]) -> bool {
    fields.iter().any(|f| f.weight.is_finite() && f.weight > 0.0)
}

fn join_set(values: &std::collections::BTreeSet<String>) -> Option<Cow<'_, str>> {
    if values.is_empty() {
        None
    } else {
        Some(Cow::Owned(values.iter().map(String::as_str).collect::<Vec<_>>().join(" ")))
    }
}

impl Searchable for Profile {
    fn field_text(&self, field: &str) -> Option<Cow<'_, str>> {
        match field {
            "name" | "displayName" => Some(Cow::Borrowed(self.display_name.as_str())),
            "city" => self.city.as_deref().map(Cow::Borrowed),
            "skills" => join_set(&self.skills),
            "jobTitles" => join_set(&self.job_titles),
            "equipmentTags" => join_set(&self.equipment_tags),
            "category" => self
                .primary_category
                .and_then(|c| serde_json::to_value(c).ok())
                .and_then(|v| v.as_str().map(|s| Cow::Owned(s.replace('_', " ")))),
            _ => None,
        }
    }
}

impl Searchable for Project {
    fn field_text(&self, field: &str) -> Option<Cow<'_, str>> {
        match field {
            "title" => Some(Cow::Borrowed(self.title.as_str())),
            "city" => self.city.as_deref().map(Cow::Borrowed),
            _ => None,
        }
    }
}

impl Searchable for Role {
    fn field_text(&self, field: &str) -> Option<Cow<'_, str>> {
        match field {
            "title" => Some(Cow::Borrowed(self.title.as_str())),
            "skills" | "requiredSkills" => join_set(&self.requirements.required_skills),
            "location" => self.requirements.location.as_deref().map(Cow::Borrowed),
            _ => None,
        }
    }
}

impl Searchable for Message {
    fn field_text(&self, field: &str) -> Option<Cow<'_, str>> {
        match field {
            "body" => Some(Cow::Borrowed(self.body.as_str())),
            "senderName" | "sender" => Some(Cow::Borrowed(self.sender_name.as_str())),
            _ => None,
        }
    }
}

impl Searchable for Location {
    fn field_text(&self, field: &str) -> Option<Cow<'_, str>> {
        match field {
            "city" => Some(Cow::Borrowed(self.city.as_str())),
            "region" => self.region.as_deref().map(Cow::Borrowed),
            "country" => self.country.as_deref().map(Cow::Borrowed),
            _ => None,
        }
    }
}

/// Top-level keys of a JSON object; strings, numbers and arrays of strings
impl Searchable for serde_json::Value {
    fn field_text(&self, field: &str) -> Option<Cow<'_, str>> {
        match self.get(field)? {
            serde_json::Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            serde_json::Value::Number(n) => Some(Cow::Owned(n.to_string())),
            serde_json::Value::Array(values) => {
                let parts: Vec<&str> = values.iter().filter_map(|v| v.as_str()).collect();
                (!parts.is_empty()).then(|| Cow::Owned(parts.join(" ")))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AssignmentState, RoleCategory, RoleRequirements};
    use serde_json::json;

    fn names(items: &[serde_json::Value]) -> Vec<&str> {
        items.iter().filter_map(|v| v["name"].as_str()).collect()
    }

    #[test]
    fn test_blank_query_is_identity() {
        let items = vec![json!({"name": "Zoé"}), json!({"name": "Adam"}), json!({"name": "Marc"})];
        let fields = vec![WeightedField::new("name", 1.0)];

        assert_eq!(fuzzy_ranked_search(items.clone(), &fields, "", 0.4), items);
        assert_eq!(fuzzy_ranked_search(items.clone(), &fields, "   ", 0.4), items);
    }

    #[test]
    fn test_query_without_searchable_text_is_identity() {
        let items = vec![
            json!({"name": "Jean-Pierre Léaud"}),
            json!({"name": "Anna Karina"}),
            json!({"other": "x"}),
        ];
        let fields = vec![WeightedField::new("name", 1.0)];

        assert_eq!(fuzzy_ranked_search(items.clone(), &fields, "-", 0.4), items);
        assert_eq!(fuzzy_ranked_search(items.clone(), &fields, "\u{301}", 0.4), items);
        assert_eq!(fuzzy_ranked_search(items.clone(), &fields, "?!", 1.0), items);

        let scored = search_with_scores(&items, &fields, "-", 0.4);
        assert_eq!(scored.iter().map(|(i, _)| *i).collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn test_tolerates_misspelling() {
        let items = vec![json!({"name": "Jean Dujardin"})];
        let fields = vec![WeightedField::new("name", 2.0)];

        assert_eq!(fuzzy_ranked_search(items.clone(), &fields, "jean dujardan", 0.4).len(), 1);
        assert!(fuzzy_ranked_search(items, &fields, "Marie Curie", 0.4).is_empty());
    }

    #[test]
    fn test_partial_token_and_accents() {
        let items = vec![json!({"name": "Étienne Chéreau"}), json!({"name": "Paul Martin"})];
        let fields = vec![WeightedField::new("name", 1.0)];

        let hits = fuzzy_ranked_search(items, &fields, "etien", 0.3);
        assert_eq!(names(&hits), vec!["Étienne Chéreau"]);
    }

    #[test]
    fn test_field_weight_biases_ranking() {
        let items = vec![
            json!({"name": "desc", "title": "Court métrage", "description": "Tournage à Lyon"}),
            json!({"name": "title", "title": "Tournage à Lyon", "description": "Court métrage"}),
        ];
        let fields = vec![WeightedField::new("title", 3.0), WeightedField::new("description", 1.0)];

        let hits = fuzzy_ranked_search(items, &fields, "tournage", 0.4);
        assert_eq!(names(&hits), vec!["title", "desc"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let items = vec![json!({"name": "Lea B"}), json!({"name": "Lea A"}), json!({"name": "Lea C"})];
        let fields = vec![WeightedField::new("name", 1.0)];

        let hits = fuzzy_ranked_search(items, &fields, "lea", 0.4);
        assert_eq!(names(&hits), vec!["Lea B", "Lea A", "Lea C"]);
    }

    #[test]
    fn test_no_usable_fields_is_noop() {
        let items = vec![json!({"name": "a"}), json!({"name": "b"})];

        assert_eq!(fuzzy_ranked_search(items.clone(), &[], "zzz", 0.4), items);
        let zero = vec![WeightedField::new("name", 0.0), WeightedField::new("name", f64::NAN)];
        assert_eq!(fuzzy_ranked_search(items.clone(), &zero, "zzz", 0.4), items);
    }

    #[test]
    fn test_threshold_zero_requires_containment() {
        let items = vec![json!({"name": "Dujardin"})];
        let fields = vec![WeightedField::new("name", 1.0)];

        assert_eq!(fuzzy_ranked_search(items.clone(), &fields, "dujar", 0.0).len(), 1);
        assert!(fuzzy_ranked_search(items, &fields, "dujardan", 0.0).is_empty());
    }

    #[test]
    fn test_array_fields_and_missing_fields() {
        let items = vec![json!({"skills": ["steadicam", "ronin"]}), json!({"other": 1})];
        let fields = vec![WeightedField::new("skills", 1.0)];

        let hits = search_with_scores(&items, &fields, "steadycam", 0.4);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0, 0);
    }

    #[test]
    fn test_message_search_prefers_sender_hits() {
        let messages = vec![
            Message {
                id: "m1".into(),
                sender_name: "Louis".into(),
                body: "Agnès confirme le plateau lundi".into(),
            },
            Message {
                id: "m2".into(),
                sender_name: "Paul".into(),
                body: "Repérages annulés".into(),
            },
            Message {
                id: "m3".into(),
                sender_name: "Agnès Varda".into(),
                body: "Rendez-vous à 8h".into(),
            },
        ];
        let fields = vec![WeightedField::new("body", 1.0), WeightedField::new("senderName", 2.0)];

        let hits = search_with_scores(&messages, &fields, "agnes", 0.4);
        assert_eq!(hits.iter().map(|(i, _)| *i).collect::<Vec<_>>(), vec![2, 0]);
        assert!(hits[0].1 > hits[1].1);

        let found = fuzzy_ranked_search(messages, &fields, "agnes", 0.4);
        assert_eq!(found.iter().map(|m| m.id.as_str()).collect::<Vec<_>>(), vec!["m3", "m1"]);
    }

    #[test]
    fn test_project_and_role_search() {
        let projects = vec![
            Project {
                id: "p1".into(),
                title: "Les Quatre Cents Coups".into(),
                owner_id: None,
                city: Some("Paris".into()),
                status: None,
            },
            Project {
                id: "p2".into(),
                title: "Cléo de 5 à 7".into(),
                owner_id: None,
                city: Some("Lyon".into()),
                status: None,
            },
        ];
        let hits = fuzzy_ranked_search(projects, &[WeightedField::new("title", 1.0)], "cleo", 0.4);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "p2");

        let roles = vec![
            Role {
                id: "r1".into(),
                project_id: "p1".into(),
                title: "Perchman".into(),
                category: RoleCategory::Son,
                requirements: RoleRequirements::default(),
                assignment: AssignmentState::Open,
                assignee_id: None,
            },
            Role {
                id: "r2".into(),
                project_id: "p1".into(),
                title: "Cadreur".into(),
                category: RoleCategory::Image,
                requirements: RoleRequirements {
                    required_skills: ["steadicam".to_string()].into_iter().collect(),
                    ..RoleRequirements::default()
                },
                assignment: AssignmentState::Open,
                assignee_id: None,
            },
        ];
        let fields = vec![WeightedField::new("title", 2.0), WeightedField::new("skills", 1.0)];
        let hits = fuzzy_ranked_search(roles, &fields, "steadicam", 0.4);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "r2");
    }

    #[test]
    fn test_location_search() {
        let locations = vec![
            Location { city: "Marseille".into(), region: Some("Provence".into()), country: None },
            Location { city: "Paris".into(), region: Some("Île-de-France".into()), country: None },
        ];
        let fields = vec![WeightedField::new("city", 2.0), WeightedField::new("region", 1.0)];

        let hits = fuzzy_ranked_search(locations, &fields, "ile de france", 0.4);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].city, "Paris");
    }
}
