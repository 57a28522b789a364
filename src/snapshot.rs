use crate::model::JobRecord;
use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::Path;

/// Writes the raw extraction output to a CSV snapshot, creating parent
/// directories as needed.
pub fn save<P: AsRef<Path>>(path: P, records: &[JobRecord]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {:?}", parent))?;
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to open snapshot {:?}", path))?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    info!("Saved {} raw records to {:?}.", records.len(), path);
    Ok(())
}

/// Reloads a snapshot, parsing the two timestamp columns back into their
/// typed form.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<JobRecord>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open snapshot {:?}", path))?;

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: JobRecord = row.context("malformed snapshot row")?;
        records.push(record);
    }

    info!("Loaded {} raw records from {:?}.", records.len(), path);
    Ok(records)
}
