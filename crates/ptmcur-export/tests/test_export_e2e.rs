//! End-to-end export over a small JSON snapshot and curation list.

use ptmcur_common::{Curation, ModType, PtmcurError, RegulationFamily, Statement};
use ptmcur_export::{run_export, write_csv, CommentParser, ExportJob, ExportScope};
use serde_json::json;

fn job() -> ExportJob {
    ExportJob {
        scope: ExportScope::new(
            ModType::Dephosphorylation,
            [RegulationFamily::Activity, RegulationFamily::Amount],
        ),
        curation_source: Some("signor_dephos".into()),
    }
}

fn snapshot() -> Vec<Statement> {
    serde_json::from_value(json!([
        {
            "type": "Dephosphorylation",
            "enz": {"name": "PPP2CA", "db_refs": {"UP": "P67775", "HGNC": "9299"}},
            "sub": {"name": "AKT1", "db_refs": {"UP": "P31749"}},
            "residue": "S",
            "position": "473",
            "matches_hash": 101,
            "evidence": [
                {"source_api": "reach", "pmid": "12345", "source_hash": 1001,
                 "text": "PP2A dephosphorylates  AKT1 at Ser473 [XREF_BIBR]."}
            ]
        },
        {
            "type": "Inhibition",
            "subj": {"name": "PPP2CA", "db_refs": {"UP": "P67775"}},
            "obj": {"name": "AKT1", "db_refs": {"UP": "P31749"}},
            "matches_hash": 202,
            "evidence": [
                {"source_api": "sparser", "pmid": "12345", "source_hash": 2002,
                 "text": "PP2A inhibits AKT1."}
            ]
        }
    ]))
    .unwrap()
}

fn curations(reg_comment: &str) -> Vec<Curation> {
    serde_json::from_value(json!([
        {"pa_hash": 101, "source_hash": 1001, "tag": "correct", "source": "signor_dephos",
         "text": "", "curator": "b.jones@lab.org"},
        {"pa_hash": 202, "source_hash": "2002", "tag": "correct", "source": "signor_dephos",
         "text": reg_comment, "curator": "a.lee@lab.org"},
        {"pa_hash": 202, "source_hash": 9999, "tag": "correct", "source": "signor_dephos",
         "text": "", "curator": "a.lee@lab.org"},
        {"pa_hash": 101, "source_hash": 1001, "tag": "correct", "source": "other_batch",
         "text": "EFFECT:up-regulates", "curator": "z@lab.org"}
    ]))
    .unwrap()
}

#[test]
fn test_modification_and_regulation_yield_one_row() {
    let result = run_export(&job(), &snapshot(), &curations(""), &CommentParser::new()).unwrap();

    assert_eq!(result.stats.curations_selected, 3);
    assert_eq!(result.stats.curations_unmatched, 1);
    assert_eq!(result.rows.len(), 1);

    let row = &result.rows[0];
    assert_eq!(row.entity_a, "PPP2CA");
    assert_eq!(row.id_a, "P67775");
    assert_eq!(row.database_a, "UNIPROT");
    assert_eq!(row.entity_b, "AKT1");
    assert_eq!(row.residue, "S473");
    assert_eq!(row.effect, "down-regulates");
    assert_eq!(row.mechanism, "dephosphorylation");
    assert_eq!(row.pmid, "12345");
    assert_eq!(row.tax_id, "9606");
    assert_eq!(row.direct, "YES");
    assert_eq!(row.annotator, "alee");
    assert_eq!(
        row.sentence,
        "PP2A dephosphorylates AKT1 at Ser473 .|PP2A inhibits AKT1."
    );
}

#[test]
fn test_comment_overrides_effect_and_organism() {
    let result = run_export(
        &job(),
        &snapshot(),
        &curations("EFFECT:down-regulates activity;TAXID:10090;CELL:BTO:0000007"),
        &CommentParser::new(),
    )
    .unwrap();

    let row = &result.rows[0];
    assert_eq!(row.effect, "down-regulates activity");
    assert_eq!(row.tax_id, "10090");
    assert_eq!(row.cell_data, "BTO:0000007");
}

#[test]
fn test_conflicting_effects_abort_the_run() {
    let err = run_export(
        &job(),
        &snapshot(),
        &curations("EFFECT:up-regulates;EFFECT:down-regulates"),
        &CommentParser::new(),
    )
    .unwrap_err();
    assert!(matches!(err, PtmcurError::MultipleEffects { .. }));
}

#[test]
fn test_csv_written_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dephos.csv");
    let result = run_export(&job(), &snapshot(), &curations(""), &CommentParser::new()).unwrap();
    write_csv(&path, &result.rows).unwrap();

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    assert_eq!(rdr.headers().unwrap().len(), 26);
    let records: Vec<_> = rdr.records().collect::<Result<_, _>>().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(&records[0][10], "S473");
    assert_eq!(&records[0][21], "12345");
}
