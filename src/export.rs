use crate::models::{Clipping, CSV_HEADER};
use std::fs::File;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to create output file: {0}")]
    Io(#[from] io::Error),
}

pub fn write_csv<W: io::Write>(writer: W, clippings: &[Clipping]) -> Result<(), ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    writer.write_record(CSV_HEADER)?;
    for clipping in clippings {
        writer.serialize(clipping)?;
    }
    writer.flush()?;

    Ok(())
}

pub fn save_to_csv(path: &Path, clippings: &[Clipping]) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_csv(file, clippings)?;

    info!("Wrote {} rows to {}", clippings.len(), path.display());
    Ok(())
}
