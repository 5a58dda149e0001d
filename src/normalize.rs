use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{Annotations, NO_INFO, NormalizedInteraction, RawInteraction, TaxonId};

// Both patterns are greedy: they span from the first opening delimiter to the
// last closing one on the cell.
static LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((.*)\)").expect("label pattern is valid"));
static TAXON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":(.*)\(").expect("taxon pattern is valid"));

/// Decodes `psi-mi:"MI:0407"(direct interaction)` into `direct interaction`.
/// Cells without a parenthesised value decode to [`NO_INFO`].
pub fn extract_label(raw: &str) -> String {
    LABEL_RE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|value| value.as_str().to_string())
        .unwrap_or_else(|| NO_INFO.to_string())
}

/// Decodes `taxid:10090(Mus musculus)` into `10090`. Anything that is not a
/// positive integer becomes [`TaxonId::ABSENT`].
pub fn extract_taxon(raw: &str) -> TaxonId {
    TAXON_RE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|value| value.as_str().trim().parse::<i64>().ok())
        .filter(|value| *value > 0)
        .map(|value| TaxonId::new(value as u64))
        .unwrap_or(TaxonId::ABSENT)
}

pub fn normalize(raw: RawInteraction) -> NormalizedInteraction {
    NormalizedInteraction {
        uid_a: raw.uid_a,
        uid_b: raw.uid_b,
        annotations: Annotations {
            interaction_type: extract_label(&raw.interaction_type),
            method: extract_label(&raw.method),
            host_organism_taxid: extract_taxon(&raw.host_organism_taxid),
        },
    }
}

pub fn normalize_all(rows: Vec<RawInteraction>) -> Vec<NormalizedInteraction> {
    rows.into_iter().map(normalize).collect()
}
