use super::{Dialect, DialectKind};
use chrono::{NaiveDate, NaiveDateTime};

/// Oracle: `:name` markers, no `AS` before table aliases, typed date literals.
#[derive(Debug, Clone, Copy, Default)]
pub struct OracleDialect;

impl Dialect for OracleDialect {
    fn kind(&self) -> DialectKind {
        DialectKind::Oracle
    }

    fn opening_quote(&self) -> char {
        '"'
    }

    fn closing_quote(&self) -> char {
        '"'
    }

    fn param_prefix(&self) -> &'static str {
        ":"
    }

    fn render_limit(&self, offset_param: &str, limit_param: &str) -> String {
        format!("OFFSET {offset_param} ROWS FETCH NEXT {limit_param} ROWS ONLY")
    }

    fn render_table_alias(&self, table: &str, alias: &str) -> String {
        format!("{table} {alias}")
    }

    fn date_literal(&self, date: &NaiveDate) -> String {
        format!("DATE '{}'", date.format("%Y-%m-%d"))
    }

    fn datetime_literal(&self, datetime: &NaiveDateTime) -> String {
        format!("TIMESTAMP '{}'", datetime.format("%Y-%m-%d %H:%M:%S%.f"))
    }
}
