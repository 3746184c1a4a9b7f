//! Contact list parsing
//!
//! Turns CSV bytes with a header row into [`ContactRecord`]s. Rows with fewer cells
//! than the header are padded with empty values; surplus cells are dropped.

use crate::domain::models::ContactRecord;
use crate::error::{AppError, Result};
use std::io::Read;

/// Iterator over the data rows of a contact list
///
/// To read the rows again, build a new reader over the same bytes.
pub struct ContactRows<R: Read> {
    reader: csv::Reader<R>,
    headers: Vec<String>,
    record: csv::StringRecord,
    row: usize,
}

impl<R: Read> ContactRows<R> {
    /// Reads the header row and prepares to iterate the data rows
    pub fn new(input: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(input);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| AppError::Parse(format!("Failed to read header row: {}", e)))?
            .iter()
            .map(str::to_string)
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(AppError::Parse("Missing header row".to_string()));
        }

        Ok(Self {
            reader,
            headers,
            record: csv::StringRecord::new(),
            row: 1,
        })
    }

    fn to_contact(&self) -> ContactRecord {
        let cells = self.record.len();
        if cells != self.headers.len() {
            log::warn!(
                "Contact row {} has {} cells, header has {} columns; {}",
                self.row,
                cells,
                self.headers.len(),
                if cells < self.headers.len() {
                    "padding with empty values"
                } else {
                    "dropping surplus cells"
                }
            );
        }

        self.headers
            .iter()
            .enumerate()
            .map(|(i, column)| (column.clone(), self.record.get(i).unwrap_or("").to_string()))
            .collect()
    }
}

impl<R: Read> Iterator for ContactRows<R> {
    type Item = Result<ContactRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.row += 1;
        match self.reader.read_record(&mut self.record) {
            Ok(true) => Some(Ok(self.to_contact())),
            Ok(false) => None,
            Err(e) => Some(Err(AppError::Parse(format!(
                "Row {} could not be read: {}",
                self.row, e
            )))),
        }
    }
}

/// Parses a whole contact list, skipping rows that cannot be decoded
pub fn parse_contacts(bytes: &[u8]) -> Result<Vec<ContactRecord>> {
    let rows = ContactRows::new(bytes)?;
    let mut contacts = Vec::new();

    for row in rows {
        match row {
            Ok(contact) => contacts.push(contact),
            Err(e) => log::warn!("Skipping contact row: {}", e),
        }
    }

    log::debug!("Parsed {} contact rows", contacts.len());
    Ok(contacts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_only_yields_no_contacts() {
        let contacts = parse_contacts(b"name,email\n").unwrap();
        assert!(contacts.is_empty());
    }

    #[test]
    fn test_single_contact() {
        let contacts = parse_contacts(b"name,email\nAlice,alice@example.com\n").unwrap();
        assert_eq!(contacts.len(), 1);

        let expected: ContactRecord = [("name", "Alice"), ("email", "alice@example.com")]
            .into_iter()
            .collect();
        assert_eq!(contacts[0], expected);
    }

    #[test]
    fn test_rows_keep_file_order() {
        let csv = b"name,email\nAlice,a@example.com\nBob,b@example.com\nCarol,c@example.com\n";
        let names: Vec<String> = parse_contacts(csv)
            .unwrap()
            .iter()
            .map(|c| c.get("name").unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn test_short_row_is_padded() {
        let contacts = parse_contacts(b"name,email,team\nAlice,alice@example.com\n").unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].get("team"), Some(""));
        assert_eq!(contacts[0].email(), Some("alice@example.com"));
    }

    #[test]
    fn test_long_row_is_truncated() {
        let contacts = parse_contacts(b"name,email\nAlice,alice@example.com,extra,more\n").unwrap();
        assert_eq!(contacts[0].len(), 2);
        assert_eq!(contacts[0].get("email"), Some("alice@example.com"));
    }

    #[test]
    fn test_bad_row_does_not_abort_parse() {
        let mut csv = b"name,email\nAlice,alice@example.com\n".to_vec();
        csv.extend_from_slice(b"\xff\xfe,broken@example.com\n");
        csv.extend_from_slice(b"Bob,bob@example.com\n");

        let contacts = parse_contacts(&csv).unwrap();
        let emails: Vec<&str> = contacts.iter().filter_map(|c| c.email()).collect();
        assert_eq!(emails, vec!["alice@example.com", "bob@example.com"]);
    }

    #[test]
    fn test_quoted_fields_and_trimmed_headers() {
        let contacts =
            parse_contacts(b" name , email \n\"Doe, Jane\",jane@example.com\n").unwrap();
        assert_eq!(contacts[0].get("name"), Some("Doe, Jane"));
        assert_eq!(contacts[0].email(), Some("jane@example.com"));
    }

    #[test]
    fn test_empty_input_is_parse_error() {
        let result = parse_contacts(b"");
        assert!(matches!(result, Err(AppError::Parse(_))));
    }

    #[test]
    fn test_rows_can_be_recomputed() {
        let csv: &[u8] = b"name,email\nAlice,alice@example.com\n";
        let first: Vec<_> = ContactRows::new(csv).unwrap().collect::<Result<_>>().unwrap();
        let second: Vec<_> = ContactRows::new(csv).unwrap().collect::<Result<_>>().unwrap();
        assert_eq!(first, second);
    }
}
