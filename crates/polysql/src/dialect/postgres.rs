use super::{Dialect, DialectKind};
use chrono::NaiveDateTime;

/// PostgreSQL: double-quote quoting, `true`/`false` literals, LIMIT/OFFSET paging.
#[derive(Debug, Clone, Copy, Default)]
pub struct PgSqlDialect;

impl Dialect for PgSqlDialect {
    fn kind(&self) -> DialectKind {
        DialectKind::PgSql
    }

    fn opening_quote(&self) -> char {
        '"'
    }

    fn closing_quote(&self) -> char {
        '"'
    }

    fn render_limit(&self, offset_param: &str, limit_param: &str) -> String {
        format!("LIMIT {limit_param} OFFSET {offset_param}")
    }

    fn bool_literal(&self, value: bool) -> &'static str {
        if value { "true" } else { "false" }
    }

    fn datetime_literal(&self, datetime: &NaiveDateTime) -> String {
        format!("'{}'::timestamp", datetime.format("%Y-%m-%d %H:%M:%S%.f"))
    }
}
