//! Cross-kind overlap reconciliation (§4.5): when two mentions of
//! different kinds claim overlapping spans (e.g. an organization automaton
//! hit sitting inside a person candidate's span), the higher
//! [`EntityKind::reconciliation_priority`] wins.

use docflow_core::kinds::EntityKind;
use docflow_core::Mention;

/// Greedily accept mentions ordered by `(priority desc, span length desc,
/// span start asc)`, skipping any mention that overlaps one already
/// accepted. This resolves same-kind duplicate spans (the longer, or
/// earlier, span wins) and cross-kind overlaps (priority wins) with one
/// pass. Returns the survivors sorted by span start.
#[must_use = "returns the reconciled mentions, does not mutate the input"]
pub fn reconcile_overlaps(mut items: Vec<(EntityKind, Mention)>) -> Vec<(EntityKind, Mention)> {
    items.sort_by(|a, b| {
        b.0.reconciliation_priority()
            .cmp(&a.0.reconciliation_priority())
            .then(b.1.span.len().cmp(&a.1.span.len()))
            .then(a.1.span.start.cmp(&b.1.span.start))
    });

    let mut accepted: Vec<(EntityKind, Mention)> = Vec::with_capacity(items.len());
    'candidates: for (kind, mention) in items {
        for (_, existing) in &accepted {
            if existing.span.overlaps(&mention.span) {
                continue 'candidates;
            }
        }
        accepted.push((kind, mention));
    }

    accepted.sort_by_key(|(_, m)| m.span.start);
    accepted
}
