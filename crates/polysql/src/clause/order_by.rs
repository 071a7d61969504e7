use super::RenderContext;
use crate::error::{SqlError, SqlResult};
use crate::ident::{SqlItem, split_list};

/// Sort direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    fn to_sql(self) -> &'static str {
        match self {
            SortDir::Asc => "ASC",
            SortDir::Desc => "DESC",
        }
    }
}

/// A single ORDER BY item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderItem {
    Column { column: SqlItem, dir: SortDir },
    /// Raw SQL, emitted unchanged.
    Raw(String),
}

impl OrderItem {
    pub fn new(column: SqlItem, dir: SortDir) -> Self {
        Self::Column { column, dir }
    }

    pub fn raw(sql: impl Into<String>) -> Self {
        Self::Raw(sql.into())
    }

    /// Parse `column [ASC|DESC]`.
    pub fn parse(text: &str) -> SqlResult<Self> {
        let text = text.trim();
        let (body, dir) = match text.rsplit_once(char::is_whitespace) {
            Some((body, last)) if last.eq_ignore_ascii_case("desc") => (body.trim(), SortDir::Desc),
            Some((body, last)) if last.eq_ignore_ascii_case("asc") => (body.trim(), SortDir::Asc),
            _ => (text, SortDir::Asc),
        };
        Ok(Self::new(SqlItem::parse(body)?, dir))
    }

    fn to_sql(&self, ctx: &RenderContext<'_>) -> String {
        match self {
            OrderItem::Column { column, dir } => format!("{} {}", ctx.column(column), dir.to_sql()),
            OrderItem::Raw(sql) => sql.trim().to_string(),
        }
    }
}

/// ORDER BY list.
#[derive(Debug, Clone, Default)]
pub struct OrderByClause {
    items: Vec<OrderItem>,
}

impl OrderByClause {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: OrderItem) -> &mut Self {
        self.items.push(item);
        self
    }

    /// Parse and append a comma-separated list such as `Name desc, Id`.
    pub fn add_list(&mut self, text: &str) -> SqlResult<()> {
        for part in split_list(text) {
            self.items.push(OrderItem::parse(part)?);
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Fail when limiting without any ORDER BY item.
    pub fn validate(&self, is_limit: bool) -> SqlResult<()> {
        if is_limit && self.is_empty() {
            return Err(SqlError::construction(
                "ORDER BY clause is required when paging",
            ));
        }
        Ok(())
    }

    pub fn to_sql(&self, ctx: &RenderContext<'_>) -> String {
        if self.items.is_empty() {
            return String::new();
        }
        let items: Vec<String> = self.items.iter().map(|item| item.to_sql(ctx)).collect();
        format!("ORDER BY {}", items.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alias::AliasRegister;
    use crate::dialect::SqlServerDialect;
    use crate::entity::EntityResolver;

    fn render(order: &OrderByClause) -> String {
        let aliases = AliasRegister::new();
        let resolver = EntityResolver::default();
        order.to_sql(&RenderContext::new(&SqlServerDialect, &aliases, &resolver))
    }

    #[test]
    fn order_by_single_asc() {
        let mut order = OrderByClause::new();
        order.add_list("Name").unwrap();
        assert_eq!(render(&order), "ORDER BY [Name] ASC");
    }

    #[test]
    fn order_by_multiple() {
        let mut order = OrderByClause::new();
        order.add_list("u.Name DESC, Id asc").unwrap();
        order.add(OrderItem::raw("NEWID()"));
        assert_eq!(render(&order), "ORDER BY [u].[Name] DESC, [Id] ASC, NEWID()");
    }

    #[test]
    fn order_by_expression() {
        let item = OrderItem::parse("Count(*) desc").unwrap();
        assert_eq!(
            item,
            OrderItem::new(SqlItem::raw("Count(*)"), SortDir::Desc)
        );
    }

    #[test]
    fn order_by_empty() {
        let order = OrderByClause::new();
        assert!(order.is_empty());
        assert_eq!(render(&order), "");
        assert!(order.validate(false).is_ok());
        assert!(order.validate(true).unwrap_err().is_construction());
    }

    #[test]
    fn order_by_rejects_blank_column() {
        assert!(OrderItem::parse("  ").is_err());
    }
}
