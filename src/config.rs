//! Database configuration
//!
//! Every field has a default, so a config file is optional:
//!
//! ```json
//! {
//!   "extension": ".csv",
//!   "delimiter": ",",
//!   "comment": "#",
//!   "log_level": "warn"
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CsvError, CsvResult};
use crate::observability::Severity;
use crate::table::{TableFormat, DEFAULT_COMMENT, DEFAULT_DELIMITER, DOUBLE_QUOTE};

/// Default table file extension
pub const DEFAULT_EXTENSION: &str = ".csv";

/// Configuration for opening a database directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// File name suffix identifying table files (default ".csv")
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Field delimiter (default ',')
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Comment marker at the start of a line (default '#')
    #[serde(default = "default_comment")]
    pub comment: char,

    /// Minimum log severity: trace, info, warn or error (default "warn")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}
fn default_delimiter() -> char {
    DEFAULT_DELIMITER
}
fn default_comment() -> char {
    DEFAULT_COMMENT
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            delimiter: default_delimiter(),
            comment: default_comment(),
            log_level: default_log_level(),
        }
    }
}

impl DatabaseConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> CsvResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CsvError::InvalidConfig(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config: DatabaseConfig = serde_json::from_str(&content)
            .map_err(|e| CsvError::InvalidConfig(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Rejects settings that would make table files unparseable
    pub fn validate(&self) -> CsvResult<()> {
        if self.extension.is_empty() {
            return Err(CsvError::InvalidConfig("extension must not be empty".into()));
        }
        if self.delimiter == DOUBLE_QUOTE || self.comment == DOUBLE_QUOTE {
            return Err(CsvError::InvalidConfig(
                "delimiter and comment must not be a double quote".into(),
            ));
        }
        if self.delimiter == self.comment {
            return Err(CsvError::InvalidConfig(format!(
                "delimiter and comment are both '{}'",
                self.delimiter
            )));
        }
        self.severity()?;
        Ok(())
    }

    /// Row format shared by every table in the database
    pub fn table_format(&self) -> TableFormat {
        TableFormat {
            delimiter: self.delimiter,
            comment: self.comment,
        }
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> CsvResult<Severity> {
        self.log_level.parse().map_err(CsvError::InvalidConfig)
    }
}
