//! Complex expansion: every complex identifier in column A is replaced by
//! all pairwise interactions between its members.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::{Annotations, GoldStandard, InteractionRecord, NormalizedInteraction};

pub const DEFAULT_COMPLEX_MARKER: &str = "complex";

/// Which raw row of a complex supplies the annotations shared by its pairs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepresentativeRule {
    /// First row of the complex in input order.
    #[default]
    First,
    /// Second row in input order, or the first when only one was recorded.
    Second,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexGroup {
    pub key: String,
    /// Distinct partners in order of first appearance.
    pub members: IndexSet<String>,
    /// Annotations of every raw row recorded for the key, in input order.
    pub rows: Vec<Annotations>,
}

impl ComplexGroup {
    fn new(key: String) -> Self {
        Self {
            key,
            members: IndexSet::new(),
            rows: Vec::new(),
        }
    }

    pub fn representative(&self, rule: RepresentativeRule) -> Option<&Annotations> {
        match rule {
            RepresentativeRule::First => self.rows.first(),
            RepresentativeRule::Second => self.rows.get(1).or_else(|| self.rows.first()),
        }
    }

    /// Number of pairs this group expands into, C(k, 2).
    pub fn pair_count(&self) -> usize {
        let k = self.members.len();
        k * k.saturating_sub(1) / 2
    }
}

pub fn is_complex(uid: &str, marker: &str) -> bool {
    uid.contains(marker)
}

/// Splits rows into (complex, plain) by their column A identifier, keeping
/// input order within each side.
pub fn partition(
    rows: Vec<NormalizedInteraction>,
    marker: &str,
) -> (Vec<NormalizedInteraction>, Vec<NormalizedInteraction>) {
    rows.into_iter()
        .partition(|row| is_complex(&row.uid_a, marker))
}

/// Groups complex rows by their column A key. Groups are ordered by the
/// first appearance of their key.
pub fn group_complexes(rows: &[NormalizedInteraction]) -> Vec<ComplexGroup> {
    let mut groups: IndexMap<&str, ComplexGroup> = IndexMap::new();
    for row in rows {
        let group = groups
            .entry(row.uid_a.as_str())
            .or_insert_with(|| ComplexGroup::new(row.uid_a.clone()));
        group.members.insert(row.uid_b.clone());
        group.rows.push(row.annotations.clone());
    }
    groups.into_values().collect()
}

/// All unordered pairs `(items[i], items[j])` with `i < j`.
pub fn pairs<T: Clone>(items: &[T]) -> Vec<(T, T)> {
    let mut out = Vec::with_capacity(items.len() * items.len().saturating_sub(1) / 2);
    for (i, left) in items.iter().enumerate() {
        for right in &items[i + 1..] {
            out.push((left.clone(), right.clone()));
        }
    }
    out
}

pub fn expand_group(group: &ComplexGroup, rule: RepresentativeRule) -> Vec<InteractionRecord> {
    let Some(annotations) = group.representative(rule) else {
        return Vec::new();
    };
    let members: Vec<&str> = group.members.iter().map(String::as_str).collect();
    pairs(&members)
        .into_iter()
        .map(|(a, b)| InteractionRecord::new(a, b, annotations, GoldStandard::Complex))
        .collect()
}

pub fn expand_complexes(
    rows: &[NormalizedInteraction],
    rule: RepresentativeRule,
) -> Vec<InteractionRecord> {
    expand_groups(&group_complexes(rows), rule)
}

pub fn expand_groups(
    groups: &[ComplexGroup],
    rule: RepresentativeRule,
) -> Vec<InteractionRecord> {
    let mut expanded = Vec::new();
    let mut skipped = 0usize;
    for group in groups {
        if group.members.len() < 2 {
            skipped += 1;
            debug!(complex = %group.key, "complex has fewer than two members");
            continue;
        }
        let before = expanded.len();
        expanded.extend(expand_group(group, rule));
        debug!(
            complex = %group.key,
            members = group.members.len(),
            pairs = expanded.len() - before,
            "expanded complex"
        );
    }
    if skipped > 0 {
        warn!(skipped, "complexes with a single member produced no pairs");
    }
    info!(
        complexes = groups.len(),
        pairs = expanded.len(),
        "expanded complexes"
    );
    expanded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaxonId;

    fn row(a: &str, b: &str, method: &str) -> NormalizedInteraction {
        NormalizedInteraction {
            uid_a: a.to_string(),
            uid_b: b.to_string(),
            annotations: Annotations {
                interaction_type: "physical association".to_string(),
                method: method.to_string(),
                host_organism_taxid: TaxonId::new(10090),
            },
        }
    }

    #[test]
    fn pairs_are_combinations() {
        assert_eq!(pairs(&[1, 2, 3]), vec![(1, 2), (1, 3), (2, 3)]);
        assert!(pairs::<u8>(&[]).is_empty());
        assert!(pairs(&[1]).is_empty());
        assert_eq!(pairs(&[1, 2, 3, 4, 5]).len(), 10);
    }

    #[test]
    fn groups_deduplicate_members_in_first_seen_order() {
        let rows = vec![
            row("complex:X", "uniprot:B", "m1"),
            row("complex:Y", "uniprot:Q", "m1"),
            row("complex:X", "uniprot:A", "m2"),
            row("complex:X", "uniprot:B", "m3"),
        ];
        let groups = group_complexes(&rows);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, "complex:X");
        assert_eq!(
            groups[0].members.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["uniprot:B", "uniprot:A"]
        );
        assert_eq!(groups[0].rows.len(), 3);
        assert_eq!(groups[0].pair_count(), 1);
        assert_eq!(groups[1].key, "complex:Y");
    }

    #[test]
    fn representative_rules() {
        let rows = vec![
            row("complex:X", "uniprot:A", "first"),
            row("complex:X", "uniprot:B", "second"),
        ];
        let group = &group_complexes(&rows)[0];
        assert_eq!(
            group.representative(RepresentativeRule::First).unwrap().method,
            "first"
        );
        assert_eq!(
            group.representative(RepresentativeRule::Second).unwrap().method,
            "second"
        );

        let single = &group_complexes(&rows[..1])[0];
        assert_eq!(
            single.representative(RepresentativeRule::Second).unwrap().method,
            "first"
        );
    }

    #[test]
    fn single_member_complex_yields_nothing() {
        let rows = vec![
            row("complex:X", "uniprot:A", "m"),
            row("complex:X", "uniprot:A", "m"),
        ];
        assert!(expand_complexes(&rows, RepresentativeRule::First).is_empty());
    }

    #[test]
    fn expansion_propagates_representative_annotations() {
        let rows = vec![
            row("complex:X", "uniprot:A", "first"),
            row("complex:X", "uniprot:B", "second"),
            row("complex:X", "uniprot:C", "third"),
        ];
        let out = expand_complexes(&rows, RepresentativeRule::First);
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|r| r.method == "first"));
        assert!(out.iter().all(|r| r.gold_standard == GoldStandard::Complex));
        let ids: Vec<(&str, &str)> = out
            .iter()
            .map(|r| (r.uid_a.as_str(), r.uid_b.as_str()))
            .collect();
        assert_eq!(
            ids,
            vec![
                ("uniprot:A", "uniprot:B"),
                ("uniprot:A", "uniprot:C"),
                ("uniprot:B", "uniprot:C"),
            ]
        );
    }

    #[test]
    fn partition_splits_on_case_sensitive_marker() {
        let rows = vec![
            row("uniprot:P1", "uniprot:P2", "m"),
            row("complex:X", "uniprot:A", "m"),
            row("Complex:Y", "uniprot:B", "m"),
        ];
        let (complex, plain) = partition(rows, DEFAULT_COMPLEX_MARKER);
        assert_eq!(complex.len(), 1);
        assert_eq!(plain.len(), 2);
        assert_eq!(plain[1].uid_a, "Complex:Y");
    }
}
