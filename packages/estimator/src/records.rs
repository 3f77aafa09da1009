//! Property record source: CSV ingestion and question assembly.
//!
//! Reads the property list (address, city, state, zip5, zip4, qpid, all as
//! strings), normalizes the zip code, and builds one question per property
//! by prefixing a caller-supplied prompt to the full address. A row whose
//! address cannot be assembled becomes a missing-input record.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{EstimatorError, Result};
use crate::types::QuestionRecord;

/// One row of the property list.
///
/// All columns are read as strings; empty CSV fields deserialize to `None`.
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyRecord {
    /// Stable property identifier
    pub qpid: String,

    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip5: Option<String>,
    pub zip4: Option<String>,
}

impl PropertyRecord {
    /// Assemble `"{address}, {city}, {state}, {zip5}-{zip4}"`.
    ///
    /// Returns `None` when any component is absent or empty.
    pub fn full_address(&self) -> Option<String> {
        let address = non_empty(self.address.as_deref())?;
        let city = non_empty(self.city.as_deref())?;
        let state = non_empty(self.state.as_deref())?;
        let zip5 = non_empty(self.zip5.as_deref())?;
        let zip4 = non_empty(self.zip4.as_deref())?;

        Some(format!(
            "{}, {}, {}, {}-{}",
            address,
            city,
            state,
            pad_zip5(zip5),
            zip4
        ))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Left-pad a zip code with zeros to five digits.
///
/// CSV sources routinely strip leading zeros from northeastern zip codes.
fn pad_zip5(zip5: &str) -> String {
    format!("{:0>5}", zip5)
}

/// Read property records from a CSV file.
pub fn read_property_records(path: impl AsRef<Path>) -> Result<Vec<PropertyRecord>> {
    let reader = csv::Reader::from_path(path.as_ref())?;
    collect_records(reader)
}

/// Read property records from any reader (useful for tests and in-memory data).
pub fn read_property_records_from_reader(input: impl Read) -> Result<Vec<PropertyRecord>> {
    collect_records(csv::Reader::from_reader(input))
}

fn collect_records<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<PropertyRecord>> {
    let mut records = Vec::new();
    for (i, row) in reader.deserialize().enumerate() {
        let record: PropertyRecord = row?;
        if record.qpid.trim().is_empty() {
            return Err(EstimatorError::Records(format!("row {} has no qpid", i + 1)));
        }
        records.push(record);
    }
    debug!(count = records.len(), "read property records");
    Ok(records)
}

/// Build question records by prefixing `prompt` to each full address.
///
/// Rows without an assemblable address become missing-input records, which
/// the estimator skips without issuing a request.
pub fn build_question_records(records: &[PropertyRecord], prompt: &str) -> Vec<QuestionRecord> {
    records
        .iter()
        .map(|record| match record.full_address() {
            Some(full_address) => {
                QuestionRecord::new(record.qpid.as_str(), format!("{}{}", prompt, full_address))
            }
            None => QuestionRecord::missing(record.qpid.as_str()),
        })
        .collect()
}

/// Read a property CSV and build question records in one step.
pub fn read_question_records(
    path: impl AsRef<Path>,
    prompt: &str,
) -> Result<Vec<QuestionRecord>> {
    let records = read_property_records(path)?;
    Ok(build_question_records(&records, prompt))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
qpid,address,city,state,zip5,zip4
P1,12 Oak St,Newark,NJ,7102,1234
P2,34 Elm Ave,Trenton,NJ,08608,5678
P3,,Camden,NJ,08102,9012
";

    #[test]
    fn test_read_records_from_reader() {
        let records = read_property_records_from_reader(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].qpid, "P1");
        assert_eq!(records[2].address, None);
    }

    #[test]
    fn test_zip5_padding() {
        assert_eq!(pad_zip5("7102"), "07102");
        assert_eq!(pad_zip5("08608"), "08608");
        assert_eq!(pad_zip5("2"), "00002");
    }

    #[test]
    fn test_full_address_assembly() {
        let records = read_property_records_from_reader(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(
            records[0].full_address().unwrap(),
            "12 Oak St, Newark, NJ, 07102-1234"
        );
    }

    #[test]
    fn test_missing_component_yields_no_address() {
        let records = read_property_records_from_reader(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(records[2].full_address(), None);
    }

    #[test]
    fn test_build_question_records() {
        let records = read_property_records_from_reader(SAMPLE_CSV.as_bytes()).unwrap();
        let questions =
            build_question_records(&records, "How many bedrooms and bathrooms are at ");

        assert_eq!(questions.len(), 3);
        assert_eq!(
            questions[0].question.as_deref(),
            Some("How many bedrooms and bathrooms are at 12 Oak St, Newark, NJ, 07102-1234")
        );
        assert!(questions[2].is_missing());
        assert_eq!(questions[2].qpid, "P3");
    }

    #[test]
    fn test_row_without_qpid_is_an_error() {
        let csv = "qpid,address,city,state,zip5,zip4\n,12 Oak St,Newark,NJ,07102,1234\n";
        let err = read_property_records_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, crate::EstimatorError::Records(_)));
    }

    #[test]
    fn test_whitespace_only_component_is_missing() {
        let csv = "qpid,address,city,state,zip5,zip4\nP9,  ,Camden,NJ,08102,9012\n";
        let records = read_property_records_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(records[0].full_address(), None);
    }
}
