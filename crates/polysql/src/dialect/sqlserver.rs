use super::{Dialect, DialectKind};

/// Microsoft SQL Server: `[name]` quoting, `@name` markers, OFFSET/FETCH paging.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlServerDialect;

impl Dialect for SqlServerDialect {
    fn kind(&self) -> DialectKind {
        DialectKind::SqlServer
    }

    fn opening_quote(&self) -> char {
        '['
    }

    fn closing_quote(&self) -> char {
        ']'
    }

    fn render_limit(&self, offset_param: &str, limit_param: &str) -> String {
        format!("OFFSET {offset_param} ROWS FETCH NEXT {limit_param} ROWS ONLY")
    }
}
