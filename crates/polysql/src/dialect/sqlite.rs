use super::{Dialect, DialectKind};

/// SQLite: double-quote quoting, LIMIT/OFFSET paging.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDialect;

impl Dialect for SqliteDialect {
    fn kind(&self) -> DialectKind {
        DialectKind::Sqlite
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
}
