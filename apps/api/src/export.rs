use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::batch::ResumeRecord;

pub const CSV_HEADER: [&str; 3] = ["Filename", "Name", "Email"];
pub const CSV_FILENAME: &str = "parsed_resumes.csv";

/// Writes records as CSV with a fixed `Filename,Name,Email` header.
/// The header is written even when `records` is empty.
pub fn write_records<W: Write>(writer: W, records: &[ResumeRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    for record in records {
        wtr.write_record([&record.filename, &record.name, &record.email])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn records_to_csv(records: &[ResumeRecord]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_records(&mut buf, records)?;
    Ok(buf)
}

pub fn write_csv_file(path: &Path, records: &[ResumeRecord]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create CSV file '{}'", path.display()))?;
    write_records(file, records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(filename: &str, name: &str, email: &str) -> ResumeRecord {
        ResumeRecord {
            filename: filename.to_string(),
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn header_only_for_empty_batch() {
        let csv = records_to_csv(&[]).unwrap();
        assert_eq!(String::from_utf8(csv).unwrap(), "Filename,Name,Email\n");
    }

    #[test]
    fn joined_emails_are_quoted() {
        let csv = records_to_csv(&[
            record("jane.pdf", "Jane Doe", "a@b.com, c@d.org"),
            record("x.docx", "N/A", "N/A"),
        ])
        .unwrap();
        assert_eq!(
            String::from_utf8(csv).unwrap(),
            "Filename,Name,Email\n\
             jane.pdf,Jane Doe,\"a@b.com, c@d.org\"\n\
             x.docx,N/A,N/A\n"
        );
    }

    #[test]
    fn embedded_quotes_are_escaped() {
        let csv = records_to_csv(&[record("my \"best\" cv.pdf", "N/A", "N/A")]).unwrap();
        let text = String::from_utf8(csv).unwrap();
        assert!(text.contains("\"my \"\"best\"\" cv.pdf\",N/A,N/A"));
    }

    #[test]
    fn file_output_matches_buffer_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CSV_FILENAME);
        let records = vec![record("a.pdf", "Amy Able", "amy@example.com")];

        write_csv_file(&path, &records).unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), records_to_csv(&records).unwrap());
    }
}
