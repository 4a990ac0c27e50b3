//! Candidate snapshot: the statements put up for curation, as a JSON array.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use ptmcur_common::{Result, Statement};
use tracing::info;

pub fn write_snapshot(path: &Path, statements: &[Statement]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, statements)?;
    writer.flush()?;
    info!("Wrote {} statements to {}", statements.len(), path.display());
    Ok(())
}

pub fn read_snapshot(path: &Path) -> Result<Vec<Statement>> {
    let reader = BufReader::new(File::open(path)?);
    let statements: Vec<Statement> = serde_json::from_reader(reader)?;
    info!("Loaded {} statements from {}", statements.len(), path.display());
    Ok(statements)
}
