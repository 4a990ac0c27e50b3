//! Candidate job over a tiny gzipped corpus, followed by an export of the
//! resulting snapshot.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;
use ptmcur_common::{Curation, ModType, RegulationFamily};
use ptmcur_export::{run_export, CommentParser, ExportJob, ExportScope};
use ptmcur_ingestion::curations::write_curations;
use ptmcur_ingestion::{
    read_snapshot, run_candidates, CandidateJob, CurationFile, GeneList, SemanticConstraint,
};

fn agent(name: &str, hgnc: &str) -> serde_json::Value {
    serde_json::json!({"name": name, "db_refs": {"HGNC": hgnc, "UP": format!("UP_{name}")}})
}

fn dephos(enz: &str, sub: &str, pos: Option<&str>, api: &str, pmid: &str, source_hash: i64) -> String {
    serde_json::json!({
        "type": "Dephosphorylation",
        "enz": agent(enz, "1"),
        "sub": agent(sub, "2"),
        "residue": pos.map(|_| "Y"),
        "position": pos,
        "evidence": [{"source_api": api, "pmid": pmid, "source_hash": source_hash,
                      "text": format!("{enz} dephosphorylates {sub}.")}]
    })
    .to_string()
}

fn inhibition(subj: &str, obj: &str, pmid: &str, source_hash: i64) -> String {
    serde_json::json!({
        "type": "Inhibition",
        "subj": agent(subj, "1"),
        "obj": agent(obj, "2"),
        "evidence": [{"source_api": "reach", "pmid": pmid, "source_hash": source_hash,
                      "text": format!("{subj} inhibits {obj}.")}]
    })
    .to_string()
}

fn write_corpus(path: &Path, rows: &[(i64, String)]) {
    let gz = GzEncoder::new(File::create(path).unwrap(), Compression::default());
    let mut wtr = csv::WriterBuilder::new().delimiter(b'\t').from_writer(gz);
    for (hash, json) in rows {
        wtr.write_record([hash.to_string(), json.clone()]).unwrap();
    }
    wtr.into_inner().unwrap().finish().unwrap().flush().unwrap();
}

#[test]
fn test_candidates_then_export() {
    let dir = tempfile::tempdir().unwrap();
    let corpus_path = dir.path().join("processed_statements.tsv.gz");
    write_corpus(
        &corpus_path,
        &[
            // Novel site, same paper as the inhibition
            (11, dephos("PTPN1", "INSR", Some("1150"), "reach", "100", 1001)),
            (11, dephos("PTPN1", "INSR", Some("1150"), "sparser", "100", 1002)),
            (22, inhibition("PTPN1", "INSR", "100", 2001)),
            // Already in SIGNOR
            (33, dephos("PTPN1", "INSR", Some("1146"), "signor", "5", 3001)),
            (34, dephos("PTPN1", "INSR", Some("1146"), "reach", "100", 3002)),
            // Not a phosphatase
            (44, dephos("AKT1", "INSR", Some("999"), "reach", "100", 4001)),
            // Self-modification
            (55, dephos("INSR", "INSR", Some("1"), "reach", "100", 5001)),
        ],
    );

    let curations_path = dir.path().join("curations.json");
    let curations: Vec<Curation> = serde_json::from_value(serde_json::json!([
        {"pa_hash": 11, "source_hash": 1001, "tag": "correct", "source": "signor_dephos",
         "text": "", "curator": "m.chen@lab.org"},
        {"pa_hash": 22, "source_hash": 2001, "tag": "correct", "source": "signor_dephos",
         "text": "EFFECT:down-regulates activity", "curator": "m.chen@lab.org"}
    ]))
    .unwrap();
    write_curations(&curations_path, &curations).unwrap();

    let scope = ExportScope::new(ModType::Dephosphorylation, [RegulationFamily::Activity]);
    let job = CandidateJob {
        scope: scope.clone(),
        corpus_path,
        snapshot_path: dir.path().join(CandidateJob::default_snapshot_name(&scope)),
    };
    let constraint = SemanticConstraint::Phosphatase(GeneList::from_text("PTPN1\nPTPN2\n"));

    let summary = run_candidates(&job, Some(&constraint), &CurationFile::new(&curations_path)).unwrap();
    assert_eq!(summary.corpus.rows, 7);
    assert_eq!(summary.corpus.kept, 5);
    assert_eq!(summary.candidates.unique, 2);
    assert!(job.snapshot_path.ends_with("dephosphorylations_with_reg_sorted.json"));

    let snapshot = read_snapshot(&job.snapshot_path).unwrap();
    let hashes: Vec<i64> = snapshot.iter().map(|s| s.hash).collect();
    assert_eq!(hashes, vec![11, 22]);
    assert_eq!(snapshot[0].evidence.len(), 2);

    let export = run_export(
        &ExportJob { scope, curation_source: Some("signor_dephos".into()) },
        &snapshot,
        &curations,
        &CommentParser::new(),
    )
    .unwrap();
    assert_eq!(export.rows.len(), 1);
    let row = &export.rows[0];
    assert_eq!((row.entity_a.as_str(), row.entity_b.as_str()), ("PTPN1", "INSR"));
    assert_eq!(row.id_a, "UP_PTPN1");
    assert_eq!(row.residue, "Y1150");
    assert_eq!(row.effect, "down-regulates activity");
    assert_eq!(row.annotator, "mchen");
    assert_eq!(row.sentence, "PTPN1 dephosphorylates INSR.|PTPN1 inhibits INSR.");
}
