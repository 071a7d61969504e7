use super::RenderContext;
use crate::ident::SqlItem;

/// SELECT list.
#[derive(Debug, Clone, Default)]
pub struct SelectClause {
    items: Vec<SqlItem>,
    distinct: bool,
}

impl SelectClause {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one column or expression.
    pub fn add(&mut self, item: SqlItem) -> &mut Self {
        self.items.push(item);
        self
    }

    /// Append a raw expression, emitted unchanged.
    pub fn add_raw(&mut self, sql: &str) -> &mut Self {
        if !sql.trim().is_empty() {
            self.items.push(SqlItem::raw(sql.trim()));
        }
        self
    }

    /// Emit `SELECT DISTINCT`.
    pub fn distinct(&mut self) -> &mut Self {
        self.distinct = true;
        self
    }

    pub fn items(&self) -> &[SqlItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Render `SELECT ...`; empty when no item was added.
    pub fn to_sql(&self, ctx: &RenderContext<'_>) -> String {
        if self.items.is_empty() {
            return String::new();
        }
        let columns: Vec<String> = self.items.iter().map(|item| ctx.column(item)).collect();
        let keyword = if self.distinct {
            "SELECT DISTINCT"
        } else {
            "SELECT"
        };
        format!("{keyword} {}", columns.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alias::AliasRegister;
    use crate::dialect::{MySqlDialect, SqlServerDialect};
    use crate::entity::EntityResolver;

    #[test]
    fn renders_items_in_order() {
        let aliases = AliasRegister::new();
        let resolver = EntityResolver::default();
        let ctx = RenderContext::new(&SqlServerDialect, &aliases, &resolver);

        let mut select = SelectClause::new();
        assert_eq!(select.to_sql(&ctx), "");
        select
            .add(SqlItem::parse("Id").unwrap())
            .add(SqlItem::parse("u.Name as n").unwrap())
            .add_raw("Count(*) AS Total");
        assert_eq!(
            select.to_sql(&ctx),
            "SELECT [Id], [u].[Name] AS [n], Count(*) AS Total"
        );

        let ctx = RenderContext::new(&MySqlDialect, &aliases, &resolver);
        select.distinct();
        assert_eq!(
            select.to_sql(&ctx),
            "SELECT DISTINCT `Id`, `u`.`Name` AS `n`, Count(*) AS Total"
        );
    }
}
