//! CSV serialisation of export rows.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use ptmcur_common::Result;
use tracing::info;

use crate::row::{ExportRow, HEADER};

/// Write the header and all rows. The header is written even with no rows.
pub fn write_rows<W: Write>(writer: W, rows: &[ExportRow]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b',')
        .quote(b'"')
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(HEADER)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_csv(path: &Path, rows: &[ExportRow]) -> Result<()> {
    let file = File::create(path)?;
    write_rows(file, rows)?;
    info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_line() {
        let mut buf = Vec::new();
        write_rows(&mut buf, &[]).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(
            out.trim_end(),
            "ENTITYA,TYPEA,IDA,DATABASEA,ENTITYB,TYPEB,IDB,DATABASEB,EFFECT,MECHANISM,\
             RESIDUE,SEQUENCE,TAX_ID,CELL_DATA,TISSUE_DATA,MODULATOR_COMPLEX,TARGET_COMPLEX,\
             MODIFICATIONA,MODASEQ,MODIFICATIONB,MODBSEQ,PMID,DIRECT,NOTES,ANNOTATOR,SENTENCE"
        );
    }

    #[test]
    fn test_rows_follow_header_order_and_quote() {
        let row = ExportRow {
            entity_a: "PPP2CA".into(),
            entity_b: "AKT1".into(),
            effect: "down-regulates".into(),
            residue: "S473".into(),
            sentence: "PP2A, a phosphatase, acts on \"AKT\"".into(),
            ..Default::default()
        };
        let mut buf = Vec::new();
        write_rows(&mut buf, &[row]).unwrap();

        let mut rdr = csv::Reader::from_reader(buf.as_slice());
        let headers = rdr.headers().unwrap().clone();
        assert_eq!(headers.len(), 26);
        let record = rdr.records().next().unwrap().unwrap();
        assert_eq!(record.len(), 26);
        assert_eq!(&record[0], "PPP2CA");
        assert_eq!(&record[4], "AKT1");
        assert_eq!(&record[8], "down-regulates");
        assert_eq!(&record[10], "S473");
        assert_eq!(&record[25], "PP2A, a phosphatase, acts on \"AKT\"");
    }
}
