//! Directory of tables
//!
//! Every regular file whose name ends with the configured extension is
//! loaded once, at construction, into a `CsvTable` keyed by its full file
//! name. Files added to the directory later are not seen until the database
//! is opened again.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::DatabaseConfig;
use crate::errors::{CsvError, CsvResult};
use crate::observability::{log_event_with_fields, Event};
use crate::table::CsvTable;

/// All tables found in one directory
#[derive(Debug)]
pub struct Database {
    /// Root directory
    path: PathBuf,
    /// Table file extension, including the dot
    extension: String,
    /// Tables keyed by file name, extension included
    tables: BTreeMap<String, CsvTable>,
}

impl Database {
    /// Opens `path` with the default configuration (`.csv` tables).
    pub fn open(path: impl AsRef<Path>) -> CsvResult<Self> {
        Self::open_with_config(path, &DatabaseConfig::default())
    }

    /// Opens `path`, loading every matching table file.
    ///
    /// Fails with `InvalidConfig` for an invalid configuration, and with
    /// `InvalidDatabase` when the path does not exist or is not a directory. A table whose load fails is still kept; its error is
    /// available from `CsvTable::last_error` and every later operation on it
    /// fails with `UninitializedTable`.
    pub fn open_with_config(path: impl AsRef<Path>, config: &DatabaseConfig) -> CsvResult<Self> {
        config.validate()?;
        let path = path.as_ref();
        if !path.exists() {
            return Err(CsvError::InvalidDatabase(format!(
                "Path not found: {}",
                path.display()
            )));
        }
        if !path.is_dir() {
            return Err(CsvError::InvalidDatabase(format!(
                "Path is not a directory: {}",
                path.display()
            )));
        }

        let mut database = Self {
            path: path.to_path_buf(),
            extension: config.extension.clone(),
            tables: BTreeMap::new(),
        };
        database.read(config)?;

        let display = path.display().to_string();
        let count = database.tables.len().to_string();
        log_event_with_fields(
            Event::DatabaseOpened,
            &[("path", display.as_str()), ("tables", count.as_str())],
        );

        Ok(database)
    }

    fn read(&mut self, config: &DatabaseConfig) -> CsvResult<()> {
        let entries = fs::read_dir(&self.path).map_err(|e| {
            CsvError::io(format!("Failed to read directory {}", self.path.display()), e)
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| {
                CsvError::io(format!("Failed to read entry in {}", self.path.display()), e)
            })?;

            let file_name = entry.file_name().to_string_lossy().into_owned();
            if !file_name.ends_with(&self.extension) || !entry.path().is_file() {
                continue;
            }

            let mut table = CsvTable::with_format(config.table_format());
            // Failure is recorded on the table and logged by `load`
            let _ = table.load(entry.path());
            self.tables.insert(file_name, table);
        }

        Ok(())
    }

    /// Finds a table by logical name (file name without the extension)
    pub fn get_table(&self, name: &str) -> Option<&CsvTable> {
        self.key_for(name).and_then(|key| self.tables.get(key))
    }

    /// Mutable variant of `get_table`; queries need a mutable table
    pub fn get_table_mut(&mut self, name: &str) -> Option<&mut CsvTable> {
        let key = self.key_for(name)?.to_string();
        self.tables.get_mut(&key)
    }

    fn key_for(&self, name: &str) -> Option<&str> {
        self.tables
            .keys()
            .map(String::as_str)
            .find(|key| key.strip_suffix(self.extension.as_str()) == Some(name))
    }

    /// Logical table names in sorted order
    pub fn table_names(&self) -> Vec<&str> {
        self.tables
            .keys()
            .filter_map(|key| key.strip_suffix(self.extension.as_str()))
            .collect()
    }

    /// Tables in file name order
    pub fn iter(&self) -> impl Iterator<Item = &CsvTable> {
        self.tables.values()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
