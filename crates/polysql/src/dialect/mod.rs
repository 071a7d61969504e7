//! Vendor-specific SQL rendering.
//!
//! A [`Dialect`] is a stateless adapter that knows how a database quotes
//! identifiers, marks parameters, paginates, and spells literals. One instance is
//! shared (`Arc<dyn Dialect>`) by every builder created for that database.
//!
//! ```rust
//! use polysql::dialect::DialectKind;
//!
//! let dialect = DialectKind::SqlServer.dialect();
//! assert_eq!(dialect.quote_identifier("a.Name"), "[a].[Name]");
//! ```

mod mysql;
mod oracle;
mod postgres;
mod sqlite;
mod sqlserver;

pub use mysql::MySqlDialect;
pub use oracle::OracleDialect;
pub use postgres::PgSqlDialect;
pub use sqlite::SqliteDialect;
pub use sqlserver::SqlServerDialect;

use crate::error::SqlError;
use crate::value::Value;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Rendering rules of one database vendor.
pub trait Dialect: Send + Sync + fmt::Debug {
    /// Which vendor this dialect renders for.
    fn kind(&self) -> DialectKind;

    /// Vendor name used in logs.
    fn name(&self) -> &'static str {
        self.kind().as_str()
    }

    /// Opening identifier quote.
    fn opening_quote(&self) -> char;

    /// Closing identifier quote.
    fn closing_quote(&self) -> char;

    /// Parameter marker prefix (e.g. `@` or `:`).
    fn param_prefix(&self) -> &'static str {
        "@"
    }

    /// Render the LIMIT/OFFSET fragment for the given parameter markers.
    fn render_limit(&self, offset_param: &str, limit_param: &str) -> String;

    /// Literal used for booleans in debug SQL and filter predicates.
    fn bool_literal(&self, value: bool) -> &'static str {
        if value { "1" } else { "0" }
    }

    /// Quote a single identifier part, stripping any quotes already present.
    fn quote_name(&self, name: &str) -> String {
        let name = strip_quotes(name.trim());
        if name == "*" {
            return name.to_string();
        }
        let close = self.closing_quote();
        let mut out = String::with_capacity(name.len() + 2);
        out.push(self.opening_quote());
        for ch in name.chars() {
            if ch == close {
                out.push(close);
            }
            out.push(ch);
        }
        out.push(close);
        out
    }

    /// Quote a possibly dotted identifier (`schema.table`, `alias.column`).
    fn quote_identifier(&self, name: &str) -> String {
        split_dotted(name)
            .iter()
            .map(|part| self.quote_name(part))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Render a parameter marker for `name` (prefix added when missing).
    fn parameter_marker(&self, name: &str) -> String {
        let prefix = self.param_prefix();
        if name.starts_with(prefix) {
            name.to_string()
        } else {
            format!("{prefix}{name}")
        }
    }

    /// Render `table alias` for FROM/JOIN items.
    fn render_table_alias(&self, table: &str, alias: &str) -> String {
        format!("{table} AS {alias}")
    }

    /// Render a date literal.
    fn date_literal(&self, date: &NaiveDate) -> String {
        format!("'{}'", date.format("%Y-%m-%d"))
    }

    /// Render a timestamp literal.
    fn datetime_literal(&self, datetime: &NaiveDateTime) -> String {
        format!("'{}'", datetime.format("%Y-%m-%d %H:%M:%S%.f"))
    }

    /// Render a bound value as an inline literal (debug SQL, filter predicates).
    fn render_literal(&self, value: &Value) -> String {
        match value {
            Value::Null => "NULL".to_string(),
            Value::Bool(v) => self.bool_literal(*v).to_string(),
            Value::Int(v) => v.to_string(),
            Value::Float(v) => v.to_string(),
            Value::Text(s) => quote_string(s),
            Value::Date(d) => self.date_literal(d),
            Value::DateTime(dt) => self.datetime_literal(dt),
            Value::DateTimeUtc(dt) => self.datetime_literal(&dt.naive_utc()),
            Value::Uuid(u) => quote_string(&u.to_string()),
            Value::Json(j) => quote_string(&j.to_string()),
            Value::List(items) => {
                let parts: Vec<String> = items.iter().map(|v| self.render_literal(v)).collect();
                format!("({})", parts.join(","))
            }
        }
    }
}

/// Supported database vendors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    #[default]
    #[serde(alias = "mssql")]
    SqlServer,
    MySql,
    #[serde(alias = "postgres", alias = "postgresql")]
    PgSql,
    Sqlite,
    Oracle,
}

impl DialectKind {
    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            DialectKind::SqlServer => "sqlserver",
            DialectKind::MySql => "mysql",
            DialectKind::PgSql => "pgsql",
            DialectKind::Sqlite => "sqlite",
            DialectKind::Oracle => "oracle",
        }
    }

    /// Construct the shared dialect instance for this vendor.
    pub fn dialect(self) -> Arc<dyn Dialect> {
        match self {
            DialectKind::SqlServer => Arc::new(SqlServerDialect),
            DialectKind::MySql => Arc::new(MySqlDialect),
            DialectKind::PgSql => Arc::new(PgSqlDialect),
            DialectKind::Sqlite => Arc::new(SqliteDialect),
            DialectKind::Oracle => Arc::new(OracleDialect),
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DialectKind {
    type Err = SqlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlserver" | "mssql" => Ok(DialectKind::SqlServer),
            "mysql" => Ok(DialectKind::MySql),
            "pgsql" | "postgres" | "postgresql" => Ok(DialectKind::PgSql),
            "sqlite" => Ok(DialectKind::Sqlite),
            "oracle" => Ok(DialectKind::Oracle),
            other => Err(SqlError::config(format!("unknown dialect '{other}'"))),
        }
    }
}

/// Quote a string literal, doubling embedded single quotes.
pub fn quote_string(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

fn strip_quotes(name: &str) -> &str {
    let mut chars = name.chars();
    match (chars.next(), chars.next_back()) {
        (Some('['), Some(']')) | (Some('"'), Some('"')) | (Some('`'), Some('`'))
            if name.len() >= 2 =>
        {
            &name[1..name.len() - 1]
        }
        _ => name,
    }
}

/// Split on dots that are not inside quotes.
fn split_dotted(name: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut quote: Option<char> = None;
    for (i, ch) in name.char_indices() {
        match (quote, ch) {
            (None, '[') => quote = Some(']'),
            (None, '"') | (None, '`') => quote = Some(ch),
            (Some(close), c) if c == close => quote = None,
            (None, '.') => {
                parts.push(&name[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&name[start..]);
    parts
}
