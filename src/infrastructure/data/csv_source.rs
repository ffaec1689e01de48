//! Reads historical applications from a delimited file with a header row.

use crate::domain::applicant::ApplicantRecord;
use crate::domain::errors::PipelineError;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::info;

pub fn read_records<R: Read>(reader: R) -> Result<Vec<ApplicantRecord>, PipelineError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in rdr.deserialize() {
        let record: ApplicantRecord = result?;
        records.push(record);
    }
    Ok(records)
}

pub fn read_records_from_path(path: &Path) -> Result<Vec<ApplicantRecord>, PipelineError> {
    info!("Loading applications from {:?}", path);
    let file = File::open(path)?;
    let records = read_records(BufReader::new(file))?;
    info!("Read {} application records", records.len());
    Ok(records)
}
