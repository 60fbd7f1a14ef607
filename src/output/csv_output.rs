//! CSV persistence for scraped records
//!
//! The target file is overwritten on every run. Downstream consumers depend
//! on the exact column order, so the header row is written explicitly and
//! `BookRecord`'s field order must match it.

use crate::scraper::BookRecord;
use crate::ScrapeError;
use std::path::Path;

const HEADER: [&str; 7] = [
    "id",
    "title",
    "price",
    "availability",
    "rating",
    "category",
    "image_url",
];

/// Writes all records to `path` in the order received, UTF-8 encoded, one
/// header row first. The header is written even for an empty record set.
pub fn write_csv(records: &[BookRecord], path: &Path) -> Result<(), ScrapeError> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(path)?;

    writer.write_record(HEADER)?;

    for record in records {
        writer.serialize(record)?;
    }

    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_record(id: u64, title: &str) -> BookRecord {
        BookRecord {
            id,
            title: title.to_string(),
            price: 51.77,
            availability: 22,
            rating: 3.0,
            category: "Travel".to_string(),
            image_url: "https://books.example.com/media/cache/ab/book.jpg".to_string(),
        }
    }

    #[test]
    fn test_header_and_row_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("books.csv");

        let records = vec![sample_record(1, "First"), sample_record(2, "Second")];
        write_csv(&records, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();

        assert_eq!(
            lines.next(),
            Some("id,title,price,availability,rating,category,image_url")
        );
        assert!(lines.next().unwrap().starts_with("1,First,51.77,22,3.0,"));
        assert!(lines.next().unwrap().starts_with("2,Second,"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("books.csv");

        write_csv(&[sample_record(1, "Old"), sample_record(2, "Older")], &path).unwrap();
        write_csv(&[sample_record(1, "New")], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2); // header + one row
        assert!(content.contains("New"));
        assert!(!content.contains("Old"));
    }

    #[test]
    fn test_empty_record_set_still_writes_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("books.csv");

        write_csv(&[], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content.trim_end(),
            "id,title,price,availability,rating,category,image_url"
        );
    }

    #[test]
    fn test_title_with_comma_is_quoted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("books.csv");

        write_csv(&[sample_record(1, "One, Two, Three")], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains(r#""One, Two, Three""#));
    }
}
