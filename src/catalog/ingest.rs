//! CSV ingestion. Turns the movie dataset export into [`MovieRecord`]s.
//!
//! Every column is read as text. Missing columns and empty cells become
//! empty strings; malformed rows are skipped with a warning.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::AppError;

use super::{MovieRecord, MovieRow};

/// Read every record from the CSV file at `path`.
pub fn load_csv(path: &Path) -> Result<Vec<MovieRecord>, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::Catalog(format!("cannot read {}: {e}", path.display())))?;
    let records = load_csv_from_reader(file)?;
    debug!(path = %path.display(), records = records.len(), "catalog csv parsed");
    Ok(records)
}

/// Read every record from headered CSV text.
pub fn load_csv_from_reader<R: Read>(reader: R) -> Result<Vec<MovieRecord>, AppError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    rdr.headers()
        .map_err(|e| AppError::Catalog(format!("cannot read csv header: {e}")))?;

    let mut records = Vec::new();
    for (line, row) in rdr.deserialize::<MovieRow>().enumerate() {
        match row {
            Ok(row) => records.push(MovieRecord::new(row)),
            Err(e) => warn!(row = line + 1, error = %e, "skipping malformed catalog row"),
        }
    }
    Ok(records)
}
