use super::RenderContext;
use crate::condition::Condition;
use crate::ident::SqlItem;

/// GROUP BY list with an optional HAVING predicate.
#[derive(Debug, Clone, Default)]
pub struct GroupByClause {
    items: Vec<SqlItem>,
    having: Condition,
}

impl GroupByClause {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: SqlItem) -> &mut Self {
        self.items.push(item);
        self
    }

    /// AND a predicate into HAVING.
    pub fn having(&mut self, condition: Condition) -> &mut Self {
        let current = std::mem::take(&mut self.having);
        self.having = current.and(condition);
        self
    }

    /// Whether any grouping column was added.
    pub fn is_group(&self) -> bool {
        !self.items.is_empty()
    }

    /// Render `GROUP BY ... [HAVING ...]`; HAVING alone renders nothing.
    pub fn to_sql(&self, ctx: &RenderContext<'_>) -> String {
        if self.items.is_empty() {
            return String::new();
        }
        let columns: Vec<String> = self.items.iter().map(|item| ctx.column(item)).collect();
        let mut sql = format!("GROUP BY {}", columns.join(", "));
        let having = self.having.render(ctx);
        if !having.is_empty() {
            sql.push_str(" HAVING ");
            sql.push_str(&having);
        }
        sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alias::AliasRegister;
    use crate::dialect::SqlServerDialect;
    use crate::entity::EntityResolver;

    #[test]
    fn group_with_having() {
        let aliases = AliasRegister::new();
        let resolver = EntityResolver::default();
        let ctx = RenderContext::new(&SqlServerDialect, &aliases, &resolver);

        let mut group = GroupByClause::new();
        group.having(Condition::raw("Count(*) > 1"));
        assert!(!group.is_group());
        assert_eq!(group.to_sql(&ctx), "");

        group
            .add(SqlItem::parse("u.Name").unwrap())
            .add(SqlItem::parse("Age").unwrap());
        assert!(group.is_group());
        assert_eq!(
            group.to_sql(&ctx),
            "GROUP BY [u].[Name], [Age] HAVING Count(*) > 1"
        );
    }
}
