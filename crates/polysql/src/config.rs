//! Builder configuration.

use crate::builder::DEFAULT_LOG_SQL_LENGTH;
use crate::dialect::DialectKind;
use crate::error::SqlResult;
use serde::Deserialize;

/// Options shared by every builder a [`SqlBuilderFactory`](crate::SqlBuilderFactory)
/// hands out.
///
/// Missing TOML keys fall back to [`SqlOptions::default`]:
///
/// ```rust
/// use polysql::{DialectKind, SqlOptions};
///
/// let options = SqlOptions::from_toml_str(
///     r#"
///     dialect = "postgres"
///     soft_delete = true
///     "#,
/// )
/// .unwrap();
/// assert_eq!(options.dialect, DialectKind::PgSql);
/// assert!(options.soft_delete);
/// assert_eq!(options.log_max_sql_length, Some(200));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SqlOptions {
    /// Target database vendor.
    pub dialect: DialectKind,
    /// Register the soft-delete filter.
    pub soft_delete: bool,
    /// Soft-delete column assumed for entities whose metadata names none.
    pub soft_delete_column: Option<String>,
    /// Truncate SQL in log events to this many bytes (`None` logs it whole).
    pub log_max_sql_length: Option<usize>,
}

impl Default for SqlOptions {
    fn default() -> Self {
        Self {
            dialect: DialectKind::default(),
            soft_delete: false,
            soft_delete_column: None,
            log_max_sql_length: Some(DEFAULT_LOG_SQL_LENGTH),
        }
    }
}

impl SqlOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from a TOML document.
    pub fn from_toml_str(raw: &str) -> SqlResult<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Set the target dialect.
    pub fn dialect(mut self, dialect: DialectKind) -> Self {
        self.dialect = dialect;
        self
    }

    /// Enable the soft-delete filter.
    pub fn soft_delete(mut self) -> Self {
        self.soft_delete = true;
        self
    }

    /// Enable the soft-delete filter with a default column.
    pub fn soft_delete_column(mut self, column: impl Into<String>) -> Self {
        self.soft_delete = true;
        self.soft_delete_column = Some(column.into());
        self
    }

    /// Set the SQL truncation length for log events.
    pub fn log_max_sql_length(mut self, max: usize) -> Self {
        self.log_max_sql_length = Some(max);
        self
    }

    /// Log SQL without truncation.
    pub fn no_log_truncation(mut self) -> Self {
        self.log_max_sql_length = None;
        self
    }
}
