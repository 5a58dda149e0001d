use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IrefError;

/// Placeholder for an interaction type or method that could not be decoded.
pub const NO_INFO: &str = "No_info";

/// Method label iRefIndex uses when the detection method was not recorded.
pub const UNSPECIFIED_METHOD: &str = "unspecified method";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxonId(u64);

impl TaxonId {
    pub const ABSENT: TaxonId = TaxonId(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    pub fn is_absent(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for TaxonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GoldStandard {
    #[serde(rename = "PPI")]
    Ppi,
    #[serde(rename = "Complex")]
    Complex,
}

impl GoldStandard {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoldStandard::Ppi => "PPI",
            GoldStandard::Complex => "Complex",
        }
    }
}

impl fmt::Display for GoldStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GoldStandard {
    type Err = IrefError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "PPI" => Ok(GoldStandard::Ppi),
            "Complex" => Ok(GoldStandard::Complex),
            _ => Err(IrefError::InvalidGoldStandard(value.to_string())),
        }
    }
}

/// One row of the source table restricted to the columns the cleaner reads.
/// Annotation cells are kept verbatim, e.g. `psi-mi:"MI:0915"(physical association)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawInteraction {
    pub uid_a: String,
    pub uid_b: String,
    pub interaction_type: String,
    pub method: String,
    pub host_organism_taxid: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Annotations {
    pub interaction_type: String,
    pub method: String,
    pub host_organism_taxid: TaxonId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedInteraction {
    pub uid_a: String,
    pub uid_b: String,
    pub annotations: Annotations,
}

/// A row of the cleaned output table. Field names serialize to the output header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionRecord {
    #[serde(rename = "uidA")]
    pub uid_a: String,
    #[serde(rename = "uidB")]
    pub uid_b: String,
    #[serde(rename = "interactionType")]
    pub interaction_type: String,
    pub method: String,
    #[serde(rename = "Host_organism_taxid")]
    pub host_organism_taxid: TaxonId,
    #[serde(rename = "Gold_Standard")]
    pub gold_standard: GoldStandard,
}

impl InteractionRecord {
    pub fn new(
        uid_a: impl Into<String>,
        uid_b: impl Into<String>,
        annotations: &Annotations,
        gold_standard: GoldStandard,
    ) -> Self {
        Self {
            uid_a: uid_a.into(),
            uid_b: uid_b.into(),
            interaction_type: annotations.interaction_type.clone(),
            method: annotations.method.clone(),
            host_organism_taxid: annotations.host_organism_taxid,
            gold_standard,
        }
    }

    /// Text-valued cells, in output column order.
    pub fn text_cells(&self) -> [&str; 4] {
        [
            &self.uid_a,
            &self.uid_b,
            &self.interaction_type,
            &self.method,
        ]
    }
}
