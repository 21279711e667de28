//! CSV table backed by a single exclusively-owned file handle
//!
//! The header is parsed from the first line that is neither a comment nor
//! blank. Rows are produced lazily, one line at a time, from the same handle.
//!
//! # Single-writer invariant
//!
//! A `CsvTable` owns its cursor. `save` moves that cursor to export the file
//! and restores it afterwards, so only one reader or writer may use a table
//! instance at a time. Nothing here locks the file; callers that share a
//! table across threads must serialize access themselves.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::errors::{CsvError, CsvResult};
use crate::observability::{log_event_with_fields, Event};

use super::delimit::split_trimmed;
use super::header::HeaderIndex;
use super::{Row, TableFormat, TableSource, EOL};

/// Name reported for a table that was never loaded
const NO_NAME: &str = "No Name";

/// A delimited text file treated as a table
#[derive(Debug, Default)]
pub struct CsvTable {
    /// Backing file path, set by `load`
    path: Option<PathBuf>,
    /// Open handle, `None` until a load succeeds or after `close`
    reader: Option<BufReader<File>>,
    format: TableFormat,
    header: HeaderIndex,
    /// Message of the most recent failed load
    error: Option<String>,
}

impl CsvTable {
    /// Creates an unloaded table using the default format
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an unloaded table with the given delimiter and comment marker
    pub fn with_format(format: TableFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    /// Opens `path` and parses its header.
    ///
    /// Any previously open handle is closed first. On failure the error is
    /// also recorded and can be read back through `last_error`.
    pub fn load(&mut self, path: impl AsRef<Path>) -> CsvResult<()> {
        let path = path.as_ref();
        self.close();
        self.header.clear();
        self.error = None;
        self.path = Some(path.to_path_buf());
        let display = path.display().to_string();

        match self.open_with_header(path) {
            Ok(reader) => {
                self.reader = Some(reader);
                let columns = self.header.len().to_string();
                log_event_with_fields(
                    Event::TableLoaded,
                    &[("path", display.as_str()), ("columns", columns.as_str())],
                );
                Ok(())
            }
            Err(e) => {
                let message = e.to_string();
                log_event_with_fields(
                    Event::TableLoadFailed,
                    &[("path", display.as_str()), ("error", message.as_str())],
                );
                self.error = Some(message);
                Err(e)
            }
        }
    }

    fn open_with_header(&mut self, path: &Path) -> CsvResult<BufReader<File>> {
        let mut reader = open_reader(path)?;
        if let Some(line) = read_content_line(&mut reader, &self.format)? {
            for label in split_trimmed(&line, self.format.delimiter) {
                self.header.push(label);
            }
        }
        Ok(reader)
    }

    /// Releases the file handle. The header and path are kept.
    pub fn close(&mut self) {
        self.reader = None;
    }

    /// Returns true while a file handle is open
    pub fn is_open(&self) -> bool {
        self.reader.is_some()
    }

    fn ready_check(&self) -> CsvResult<()> {
        if self.reader.is_none() {
            return Err(CsvError::UninitializedTable);
        }
        Ok(())
    }

    /// Restarts row iteration at the first line after the header.
    ///
    /// The file is closed and reopened; the header is preserved as loaded.
    pub fn reset(&mut self) -> CsvResult<()> {
        self.ready_check()?;
        let path = self.path.clone().ok_or(CsvError::UninitializedTable)?;
        self.close();

        let mut reader = open_reader(&path).map_err(|e| {
            self.error = Some(e.to_string());
            e
        })?;
        // Skip the header line
        read_content_line(&mut reader, &self.format)?;
        self.reader = Some(reader);

        let name = self.name();
        log_event_with_fields(Event::TableReset, &[("table", name.as_str())]);
        Ok(())
    }

    /// Reads the next content row, skipping comment and blank lines.
    ///
    /// Returns `Ok(None)` at end of input.
    pub fn next_row(&mut self) -> CsvResult<Option<Row>> {
        let format = self.format;
        let reader = self.reader.as_mut().ok_or(CsvError::UninitializedTable)?;
        let line = read_content_line(reader, &format)?;
        Ok(line.map(|l| split_trimmed(&l, format.delimiter)))
    }

    /// Iterator over the remaining rows.
    ///
    /// The first I/O error is yielded once and iteration stops.
    pub fn rows(&mut self) -> CsvResult<Rows<'_>> {
        self.ready_check()?;
        Ok(Rows {
            table: self,
            done: false,
        })
    }

    /// Current byte position of the row cursor
    pub fn tell(&mut self) -> CsvResult<u64> {
        let reader = self.reader.as_mut().ok_or(CsvError::UninitializedTable)?;
        reader
            .stream_position()
            .map_err(|e| CsvError::io("Failed to read table position", e))
    }

    /// Moves the row cursor to a position previously returned by `tell`
    pub fn seek(&mut self, position: u64) -> CsvResult<()> {
        let reader = self.reader.as_mut().ok_or(CsvError::UninitializedTable)?;
        reader
            .seek(SeekFrom::Start(position))
            .map_err(|e| CsvError::io("Failed to restore table position", e))?;
        Ok(())
    }

    /// Writes the header and every row to a different path.
    ///
    /// The table's own cursor is saved before the export and restored on
    /// every exit path, including a failed write.
    pub fn save(&mut self, path: impl AsRef<Path>) -> CsvResult<()> {
        self.ready_check()?;
        let target = path.as_ref();
        let source = self.path.clone().ok_or(CsvError::UninitializedTable)?;
        if is_same_file(&source, target) {
            return Err(CsvError::SelfOverwrite(target.to_path_buf()));
        }

        let position = self.tell()?;
        let exported = self.export_to(target);
        let restored = self.seek(position);
        let rows = exported?;
        restored?;

        let display = target.display().to_string();
        let rows = rows.to_string();
        log_event_with_fields(
            Event::TableExported,
            &[("path", display.as_str()), ("rows", rows.as_str())],
        );
        Ok(())
    }

    fn export_to(&mut self, target: &Path) -> CsvResult<usize> {
        let format = self.format;
        let delimiter = format.delimiter.to_string();
        let reader = self.reader.as_mut().ok_or(CsvError::UninitializedTable)?;
        reader
            .seek(SeekFrom::Start(0))
            .map_err(|e| CsvError::io("Failed to rewind table", e))?;

        let file = File::create(target).map_err(|e| {
            CsvError::io(format!("Failed to create {}", target.display()), e)
        })?;
        let mut out = BufWriter::new(file);
        let write_err =
            |e: std::io::Error| CsvError::io(format!("Failed to write {}", target.display()), e);

        writeln!(out, "{}", self.header.labels().join(&delimiter)).map_err(write_err)?;

        // Header line
        read_content_line(reader, &format)?;

        let mut rows = 0;
        while let Some(line) = read_content_line(reader, &format)? {
            let row = split_trimmed(&line, format.delimiter);
            writeln!(out, "{}", row.join(&delimiter)).map_err(write_err)?;
            rows += 1;
        }
        out.flush().map_err(write_err)?;

        Ok(rows)
    }

    /// Header labels in file order
    pub fn header(&self) -> &[String] {
        self.header.labels()
    }

    /// Offset of `label` within the header
    pub fn header_index(&self, label: &str) -> Option<usize> {
        self.header.offset(label)
    }

    /// Appends a header label, rebuilding the index.
    ///
    /// The label survives `reset` and is written out by `save`.
    pub fn add_header_label(&mut self, label: impl Into<String>) {
        self.header.push(label);
    }

    /// Value of column `label` in `row`
    pub fn get_value_from_row<'r>(&self, label: &str, row: &'r [String]) -> CsvResult<&'r str> {
        let offset = self.header.require(label)?;
        row.get(offset)
            .map(String::as_str)
            .ok_or(CsvError::InvalidRowIndex(offset))
    }

    /// File name up to the first `.`, or "No Name" when never loaded
    pub fn name(&self) -> String {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map(|s| {
                let s = s.to_string_lossy();
                s.split('.').next().unwrap_or_default().to_string()
            })
            .unwrap_or_else(|| NO_NAME.to_string())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn format(&self) -> TableFormat {
        self.format
    }

    /// Message of the most recent failed load, if any
    pub fn last_error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl TableSource for CsvTable {
    fn header(&self) -> &[String] {
        CsvTable::header(self)
    }

    fn header_index(&self, label: &str) -> Option<usize> {
        CsvTable::header_index(self, label)
    }

    fn next_row(&mut self) -> CsvResult<Option<Row>> {
        CsvTable::next_row(self)
    }

    fn reset(&mut self) -> CsvResult<()> {
        CsvTable::reset(self)
    }
}

/// Row iterator borrowed from a table
pub struct Rows<'a> {
    table: &'a mut CsvTable,
    done: bool,
}

impl Iterator for Rows<'_> {
    type Item = CsvResult<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.table.next_row() {
            Ok(Some(row)) => Some(Ok(row)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

fn open_reader(path: &Path) -> CsvResult<BufReader<File>> {
    let file = File::open(path)
        .map_err(|e| CsvError::io(format!("Failed to open {}", path.display()), e))?;
    Ok(BufReader::new(file))
}

/// Reads lines until one is neither a comment nor blank.
///
/// The returned line still carries its terminator.
fn read_content_line<R: BufRead>(reader: &mut R, format: &TableFormat) -> CsvResult<Option<String>> {
    loop {
        let mut line = String::new();
        let read = reader
            .read_line(&mut line)
            .map_err(|e| CsvError::io("Failed to read table line", e))?;
        if read == 0 {
            return Ok(None);
        }
        if line.starts_with(format.comment) || line.starts_with(EOL) {
            continue;
        }
        return Ok(Some(line));
    }
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_table(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_skips_comments_and_blank_lines() {
        let tmp = TempDir::new().unwrap();
        let path = write_table(&tmp, "people.csv", "# comment\n\n id , name \n1,Alice\n");

        let mut table = CsvTable::new();
        table.load(&path).unwrap();

        assert_eq!(table.header(), &["id", "name"]);
        assert_eq!(table.header_index("name"), Some(1));
        assert_eq!(table.next_row().unwrap(), Some(vec!["1".into(), "Alice".into()]));
        assert_eq!(table.next_row().unwrap(), None);
    }

    #[test]
    fn test_crlf_blank_lines_skipped() {
        let tmp = TempDir::new().unwrap();
        let path = write_table(&tmp, "t.csv", "a,b\r\n\r\n1,2\r\n");

        let mut table = CsvTable::new();
        table.load(&path).unwrap();
        let rows: Vec<Row> = table.rows().unwrap().map(Result::unwrap).collect();
        assert_eq!(rows, vec![vec!["1".to_string(), "2".to_string()]]);
    }

    #[test]
    fn test_unloaded_table_is_uninitialized() {
        let mut table = CsvTable::new();
        assert!(matches!(table.next_row(), Err(CsvError::UninitializedTable)));
        assert!(matches!(table.reset(), Err(CsvError::UninitializedTable)));
        assert!(table.rows().is_err());
        assert_eq!(table.name(), "No Name");
    }

    #[test]
    fn test_failed_load_records_error() {
        let tmp = TempDir::new().unwrap();
        let mut table = CsvTable::new();

        let err = table.load(tmp.path().join("missing.csv")).unwrap_err();
        assert_eq!(err.code(), "CSVDB_IO_ERROR");
        assert!(table.last_error().is_some());
        assert!(!table.is_open());
    }

    #[test]
    fn test_reset_restarts_after_header() {
        let tmp = TempDir::new().unwrap();
        let path = write_table(&tmp, "t.csv", "x,y\n1,2\n3,4\n");

        let mut table = CsvTable::new();
        table.load(&path).unwrap();
        let first: Vec<Row> = table.rows().unwrap().map(Result::unwrap).collect();
        assert_eq!(first.len(), 2);
        assert_eq!(table.next_row().unwrap(), None);

        table.reset().unwrap();
        let second: Vec<Row> = table.rows().unwrap().map(Result::unwrap).collect();
        assert_eq!(first, second);
        assert_eq!(table.header(), &["x", "y"]);
    }

    #[test]
    fn test_close_then_reset_fails() {
        let tmp = TempDir::new().unwrap();
        let path = write_table(&tmp, "t.csv", "x\n1\n");

        let mut table = CsvTable::new();
        table.load(&path).unwrap();
        table.close();
        assert!(matches!(table.reset(), Err(CsvError::UninitializedTable)));
        assert_eq!(table.header(), &["x"]);
    }

    #[test]
    fn test_get_value_from_row() {
        let tmp = TempDir::new().unwrap();
        let path = write_table(&tmp, "t.csv", "a,b,c\n");
        let mut table = CsvTable::new();
        table.load(&path).unwrap();

        let row: Row = vec!["1".into(), "2".into()];
        assert_eq!(table.get_value_from_row("b", &row).unwrap(), "2");
        assert!(matches!(
            table.get_value_from_row("c", &row),
            Err(CsvError::InvalidRowIndex(2))
        ));
        assert!(matches!(
            table.get_value_from_row("z", &row),
            Err(CsvError::UnknownLabel(_))
        ));
    }

    #[test]
    fn test_name_strips_extension() {
        let tmp = TempDir::new().unwrap();
        let path = write_table(&tmp, "sales.2020.csv", "a\n");
        let mut table = CsvTable::new();
        table.load(&path).unwrap();
        assert_eq!(table.name(), "sales");
    }

    #[test]
    fn test_custom_format() {
        let tmp = TempDir::new().unwrap();
        let path = write_table(&tmp, "t.psv", "; note\na|b\n1|2\n");
        let mut table = CsvTable::with_format(TableFormat {
            delimiter: '|',
            comment: ';',
        });
        table.load(&path).unwrap();
        assert_eq!(table.header(), &["a", "b"]);
        assert_eq!(table.next_row().unwrap(), Some(vec!["1".into(), "2".into()]));
    }

    #[test]
    fn test_save_restores_cursor() {
        let tmp = TempDir::new().unwrap();
        let path = write_table(&tmp, "t.csv", "# c\nx,y\n1,2\n\n3,4\n");
        let out = tmp.path().join("copy.csv");

        let mut table = CsvTable::new();
        table.load(&path).unwrap();
        table.next_row().unwrap();
        let before = table.tell().unwrap();

        table.save(&out).unwrap();

        assert_eq!(table.tell().unwrap(), before);
        assert_eq!(table.next_row().unwrap(), Some(vec!["3".into(), "4".into()]));
        assert_eq!(fs::read_to_string(&out).unwrap(), "x,y\n1,2\n3,4\n");
    }

    #[test]
    fn test_added_label_survives_reset_and_save() {
        let tmp = TempDir::new().unwrap();
        let path = write_table(&tmp, "t.csv", "x,y\n1,2\n");
        let mut table = CsvTable::new();
        table.load(&path).unwrap();

        table.add_header_label("z");
        table.reset().unwrap();
        assert_eq!(table.header(), &["x", "y", "z"]);
        assert_eq!(table.header_index("z"), Some(2));

        let out = tmp.path().join("out.txt");
        table.save(&out).unwrap();
        assert_eq!(fs::read_to_string(&out).unwrap(), "x,y,z\n1,2\n");
    }

    #[test]
    fn test_save_refuses_own_path() {
        let tmp = TempDir::new().unwrap();
        let path = write_table(&tmp, "t.csv", "x\n1\n");
        let mut table = CsvTable::new();
        table.load(&path).unwrap();

        assert!(matches!(table.save(&path), Err(CsvError::SelfOverwrite(_))));
    }
}
