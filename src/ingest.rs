// CSV ingestion: turn a CSV stream into a Table. The first record is the
// header row; every cell goes through the Table's normalization, so this is
// the only place raw file data enters the crate.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::error::{Error, Result};
use crate::table::Table;

pub fn read_table_from_path(path: &Path) -> Result<Table> {
    let file = File::open(path).map_err(|source| Error::FileNotReadable {
        path: path.to_path_buf(),
        source,
    })?;
    read_table_from_reader(file)
}

/// Read headered CSV into a Table. Empty input reports `NoColumns`; a
/// header-only stream yields a zero-row table (derivation rejects it later
/// as `EmptyTable`).
pub fn read_table_from_reader<R: Read>(input: R) -> Result<Table> {
    let mut reader = csv::Reader::from_reader(input);

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    if headers.is_empty() {
        return Err(Error::NoColumns);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(|cell| cell.to_string()).collect());
    }

    Table::from_rows(headers, rows)
}

pub fn read_table_from_stdin() -> Result<Table> {
    read_table_from_reader(io::stdin().lock())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_reads_csv_with_headers() {
        let data = "Type,Hours\nA,3\nB,\n";
        let table = read_table_from_reader(data.as_bytes()).unwrap();
        assert_eq!(table.column_names(), vec!["Type", "Hours"]);
        assert_eq!(table.row_count(), 2);

        let hours = table.column("Hours").unwrap();
        assert!(hours.is_numeric());
        assert_eq!(hours.numbers(), vec![Some(3.0), None]);
    }

    #[test]
    fn test_header_only_yields_zero_rows() {
        let table = read_table_from_reader("a,b\n".as_bytes()).unwrap();
        assert_eq!(table.column_names(), vec!["a", "b"]);
        assert_eq!(table.row_count(), 0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_empty_input_is_no_columns() {
        let result = read_table_from_reader("".as_bytes());
        assert!(matches!(result, Err(Error::NoColumns)));
    }

    #[test]
    fn test_ragged_rows_surface_csv_error() {
        let result = read_table_from_reader("a,b\n1\n".as_bytes());
        assert!(matches!(result, Err(Error::Csv(_))));
    }

    #[test]
    fn test_unicode_cells_kept_verbatim() {
        let data = "名前,score\nπ,3.14\n";
        let table = read_table_from_reader(data.as_bytes()).unwrap();
        let names = table.column("名前").unwrap();
        assert_eq!(names.labels(), vec!["π"]);
    }

    #[test]
    fn test_reads_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.csv");
        fs::write(&path, "Status,n\nopen,1\nclosed,2\n").unwrap();

        let table = read_table_from_path(&path).unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column("Status").unwrap().labels(), vec!["open", "closed"]);
    }

    #[test]
    fn test_missing_file_is_file_not_readable() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_table_from_path(&dir.path().join("absent.csv"));
        assert!(matches!(result, Err(Error::FileNotReadable { .. })));
    }
}
