use std::collections::HashSet;

use tracing::{info, warn};

use crate::domain::{
    GoldStandard, InteractionRecord, NO_INFO, NormalizedInteraction, UNSPECIFIED_METHOD,
};

/// Returns the identifier after the first `:` of `namespace:identifier`.
/// Values without a namespace are returned unchanged.
pub fn strip_namespace(uid: &str) -> &str {
    match uid.split_once(':') {
        Some((_, identifier)) => identifier,
        None => uid,
    }
}

pub fn label(
    rows: Vec<NormalizedInteraction>,
    gold_standard: GoldStandard,
) -> Vec<InteractionRecord> {
    rows.into_iter()
        .map(|row| {
            InteractionRecord::new(row.uid_a, row.uid_b, &row.annotations, gold_standard)
        })
        .collect()
}

/// Concatenates direct interactions followed by complex-derived pairs and
/// strips the namespace prefix from both identifiers.
pub fn combine(
    ppi: Vec<InteractionRecord>,
    complex: Vec<InteractionRecord>,
) -> Vec<InteractionRecord> {
    ppi.into_iter()
        .chain(complex)
        .map(|mut record| {
            record.uid_a = strip_namespace(&record.uid_a).to_string();
            record.uid_b = strip_namespace(&record.uid_b).to_string();
            record
        })
        .collect()
}

/// Values that disqualify a row. Text columns are matched against `text`;
/// the taxon column is matched against its absent value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentinels {
    text: HashSet<String>,
}

impl Default for Sentinels {
    fn default() -> Self {
        Self::new(Vec::<String>::new())
    }
}

impl Sentinels {
    pub fn new<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut text: HashSet<String> = [NO_INFO, UNSPECIFIED_METHOD, "0"]
            .into_iter()
            .map(str::to_string)
            .collect();
        text.extend(extra.into_iter().map(Into::into));
        Self { text }
    }

    pub fn contains_text(&self, value: &str) -> bool {
        self.text.contains(value)
    }

    pub fn is_disqualified(&self, record: &InteractionRecord) -> bool {
        record.host_organism_taxid.is_absent()
            || record
                .text_cells()
                .iter()
                .any(|cell| self.contains_text(cell))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    pub kept: Vec<InteractionRecord>,
    pub dropped: usize,
}

pub fn retain_informative(
    records: Vec<InteractionRecord>,
    sentinels: &Sentinels,
) -> FilterOutcome {
    let total = records.len();
    let kept: Vec<InteractionRecord> = records
        .into_iter()
        .filter(|record| !sentinels.is_disqualified(record))
        .collect();
    let dropped = total - kept.len();
    if dropped > 0 && kept.is_empty() {
        warn!(dropped, "every row carried a sentinel value");
    }
    info!(kept = kept.len(), dropped, "filtered uninformative rows");
    FilterOutcome { kept, dropped }
}
