//! Stage 5 (normalize): groups stage-4 mentions into canonical entities.
//!
//! Three steps, in order: reconcile cross-kind span overlaps
//! ([`reconcile::reconcile_overlaps`]), compute each surviving mention's
//! normalization key ([`key::normalization_key`]), then cluster by
//! `(kind, key)` and pick the highest-frequency surface form as the
//! canonical form (ties go to the earliest span).

pub mod key;
pub mod reconcile;

pub use key::normalization_key;
pub use reconcile::reconcile_overlaps;

use docflow_core::kinds::EntityKind;
use docflow_core::{CanonicalEntity, Mention, Span};
use std::collections::HashMap;

struct Cluster {
    kind: EntityKind,
    surface_counts: HashMap<String, (usize, Span)>,
    spans: Vec<Span>,
    count: usize,
}

/// Run stage 5 over a document's raw entity map, producing the canonical
/// entities that populate `Document::normalized_entities`.
#[must_use = "returns the canonical entities, does not mutate anything"]
pub fn normalize(raw_entities: &HashMap<EntityKind, Vec<Mention>>) -> Vec<CanonicalEntity> {
    let flattened: Vec<(EntityKind, Mention)> = raw_entities
        .iter()
        .flat_map(|(kind, mentions)| mentions.iter().map(move |m| (kind.clone(), m.clone())))
        .collect();

    let reconciled = reconcile_overlaps(flattened);

    let mut clusters: HashMap<(EntityKind, String), Cluster> = HashMap::new();
    let mut order: Vec<(EntityKind, String)> = Vec::new();

    for (kind, mention) in reconciled {
        let key = normalization_key(&kind, &mention.text);
        let cluster_key = (kind.clone(), key);

        if !clusters.contains_key(&cluster_key) {
            order.push(cluster_key.clone());
            clusters.insert(
                cluster_key.clone(),
                Cluster {
                    kind: kind.clone(),
                    surface_counts: HashMap::new(),
                    spans: Vec::new(),
                    count: 0,
                },
            );
        }
        let cluster = clusters.get_mut(&cluster_key).unwrap();
        cluster.count += 1;
        cluster.spans.push(mention.span);
        let surface = cluster
            .surface_counts
            .entry(mention.text.clone())
            .or_insert((0, mention.span));
        surface.0 += 1;
        if mention.span.start < surface.1.start {
            surface.1 = mention.span;
        }
    }

    order
        .into_iter()
        .enumerate()
        .map(|(idx, cluster_key)| {
            let cluster = &clusters[&cluster_key];

            let mut surfaces: Vec<(&String, &(usize, Span))> =
                cluster.surface_counts.iter().collect();
            surfaces.sort_by(|a, b| {
                b.1 .0
                    .cmp(&a.1 .0)
                    .then(a.1 .1.start.cmp(&b.1 .1.start))
                    .then(a.0.cmp(b.0))
            });

            let canonical_form = surfaces[0].0.clone();
            let aliases: Vec<String> = surfaces[1..].iter().map(|(s, _)| (*s).clone()).collect();

            let mut spans = cluster.spans.clone();
            spans.sort_by_key(|s| s.start);

            CanonicalEntity {
                id: format!("{}-{}", cluster.kind.as_str().to_lowercase(), idx),
                canonical_form,
                kind: cluster.kind.clone(),
                aliases,
                count: cluster.count,
                spans,
                metadata: HashMap::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mention(start: usize, end: usize, text: &str, kind: EntityKind) -> Mention {
        Mention::new(Span::new(start, end), text, kind)
    }

    #[test]
    fn test_groups_aliases_by_normalization_key() {
        let mut raw = HashMap::new();
        raw.insert(
            EntityKind::Org,
            vec![
                mention(0, 9, "Acme Inc.", EntityKind::Org),
                mention(20, 24, "Acme", EntityKind::Org),
                mention(40, 44, "Acme", EntityKind::Org),
            ],
        );
        let canonicals = normalize(&raw);
        assert_eq!(canonicals.len(), 1);
        assert_eq!(canonicals[0].canonical_form, "Acme");
        assert_eq!(canonicals[0].count, 3);
        assert_eq!(canonicals[0].aliases, vec!["Acme Inc.".to_string()]);
    }

    #[test]
    fn test_tie_breaks_to_earliest_span() {
        let mut raw = HashMap::new();
        raw.insert(
            EntityKind::Org,
            vec![
                mention(0, 4, "Ford", EntityKind::Org),
                mention(20, 24, "FORD", EntityKind::Org),
            ],
        );
        let canonicals = normalize(&raw);
        assert_eq!(canonicals.len(), 1);
        assert_eq!(canonicals[0].canonical_form, "Ford");
    }

    #[test]
    fn test_distinct_kinds_never_merge() {
        let mut raw = HashMap::new();
        raw.insert(EntityKind::Org, vec![mention(0, 6, "Denver", EntityKind::Org)]);
        raw.insert(
            EntityKind::Location,
            vec![mention(50, 56, "Denver", EntityKind::Location)],
        );
        let canonicals = normalize(&raw);
        assert_eq!(canonicals.len(), 2);
    }

    #[test]
    fn test_empty_input_yields_no_canonicals() {
        let raw = HashMap::new();
        assert!(normalize(&raw).is_empty());
    }
}
