use assert_matches::assert_matches;

use iref_clean::domain::{Annotations, GoldStandard, InteractionRecord, TaxonId};
use iref_clean::error::IrefError;

#[test]
fn parse_gold_standard() {
    assert_eq!("PPI".parse::<GoldStandard>().unwrap(), GoldStandard::Ppi);
    assert_eq!(
        "Complex".parse::<GoldStandard>().unwrap(),
        GoldStandard::Complex
    );
    assert_eq!(GoldStandard::Complex.to_string(), "Complex");
}

#[test]
fn parse_gold_standard_invalid() {
    let err = "ppi".parse::<GoldStandard>().unwrap_err();
    assert_matches!(err, IrefError::InvalidGoldStandard(_));
}

#[test]
fn taxon_absent() {
    assert!(TaxonId::ABSENT.is_absent());
    assert!(!TaxonId::new(9606).is_absent());
    assert_eq!(TaxonId::new(9606).to_string(), "9606");
}

#[test]
fn record_copies_annotations() {
    let annotations = Annotations {
        interaction_type: "direct interaction".to_string(),
        method: "x-ray crystallography".to_string(),
        host_organism_taxid: TaxonId::new(4932),
    };
    let record = InteractionRecord::new("P1", "P2", &annotations, GoldStandard::Complex);
    assert_eq!(
        record.text_cells(),
        ["P1", "P2", "direct interaction", "x-ray crystallography"]
    );
    assert_eq!(record.host_organism_taxid.get(), 4932);
}
