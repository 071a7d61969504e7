use super::{Dialect, DialectKind};

/// MySQL: backtick quoting, `LIMIT offset, count` paging.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlDialect;

impl Dialect for MySqlDialect {
    fn kind(&self) -> DialectKind {
        DialectKind::MySql
    }

    fn opening_quote(&self) -> char {
        '`'
    }

    fn closing_quote(&self) -> char {
        '`'
    }

    fn render_limit(&self, offset_param: &str, limit_param: &str) -> String {
        format!("LIMIT {offset_param}, {limit_param}")
    }
}
