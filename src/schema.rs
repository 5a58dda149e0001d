//! Column contract for iRefIndex MITAB input and the cleaned output table.

use csv::ByteRecord;

use crate::error::IrefError;

pub const SCHEMA_VERSION: u32 = 1;

pub const UID_A: &str = "uidA";
pub const UID_B: &str = "uidB";
pub const INTERACTION_TYPE: &str = "interactionType";
pub const METHOD: &str = "method";
pub const HOST_ORGANISM_TAXID: &str = "Host_organism_taxid";
pub const GOLD_STANDARD: &str = "Gold_Standard";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Header as it appears in the source file.
    pub source: &'static str,
    /// Name used in the cleaned table.
    pub name: &'static str,
}

/// Required input columns, in the order [`ColumnIndex`] stores them.
pub const COLUMNS: [ColumnSpec; 5] = [
    ColumnSpec {
        source: "#uidA",
        name: UID_A,
    },
    ColumnSpec {
        source: UID_B,
        name: UID_B,
    },
    ColumnSpec {
        source: INTERACTION_TYPE,
        name: INTERACTION_TYPE,
    },
    ColumnSpec {
        source: METHOD,
        name: METHOD,
    },
    ColumnSpec {
        source: HOST_ORGANISM_TAXID,
        name: HOST_ORGANISM_TAXID,
    },
];

pub const OUTPUT_COLUMNS: [&str; 6] = [
    UID_A,
    UID_B,
    INTERACTION_TYPE,
    METHOD,
    HOST_ORGANISM_TAXID,
    GOLD_STANDARD,
];

/// Positions of the required columns within a source header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    positions: [usize; 5],
}

impl ColumnIndex {
    pub fn resolve(headers: &ByteRecord) -> Result<Self, IrefError> {
        let mut positions = [0usize; 5];
        let mut missing = Vec::new();
        for (slot, column) in COLUMNS.iter().enumerate() {
            let found = headers
                .iter()
                .position(|header| header == column.source.as_bytes());
            match found {
                Some(position) => positions[slot] = position,
                None => missing.push(column.source),
            }
        }
        if !missing.is_empty() {
            return Err(IrefError::MissingColumns(missing.join(", ")));
        }
        Ok(Self { positions })
    }

    pub fn position(&self, slot: usize) -> usize {
        self.positions[slot]
    }

    /// Widest position any required column occupies.
    pub fn max_position(&self) -> usize {
        self.positions.iter().copied().max().unwrap_or(0)
    }
}
