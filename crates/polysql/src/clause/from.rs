use super::{RenderContext, TableRef};
use crate::error::{SqlError, SqlResult};

/// FROM clause: the single primary table of the query.
#[derive(Debug, Clone, Default)]
pub struct FromClause {
    table: Option<TableRef>,
}

impl FromClause {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the primary table (replacing any previous one).
    pub fn set(&mut self, table: TableRef) -> &mut Self {
        self.table = Some(table);
        self
    }

    pub fn table(&self) -> Option<&TableRef> {
        self.table.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        match &self.table {
            None => true,
            Some(TableRef::Raw(sql)) => sql.trim().is_empty(),
            Some(TableRef::Entity { entity, .. }) => entity.trim().is_empty(),
        }
    }

    /// Fail when no table was set.
    pub fn validate(&self) -> SqlResult<()> {
        if self.is_empty() {
            return Err(SqlError::construction("FROM clause is required"));
        }
        Ok(())
    }

    pub fn to_sql(&self, ctx: &RenderContext<'_>) -> String {
        match &self.table {
            Some(table) if !self.is_empty() => format!("FROM {}", table.to_sql(ctx)),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alias::AliasRegister;
    use crate::dialect::PgSqlDialect;
    use crate::entity::EntityResolver;

    #[test]
    fn empty_from_fails_validation() {
        let from = FromClause::new();
        let err = from.validate().unwrap_err();
        assert!(err.is_construction());
        assert!(err.to_string().contains("FROM"));

        let mut raw = FromClause::new();
        raw.set(TableRef::raw("  "));
        assert!(raw.validate().is_err());
    }

    #[test]
    fn renders_table() {
        let aliases = AliasRegister::new();
        let resolver = EntityResolver::default();
        let ctx = RenderContext::new(&PgSqlDialect, &aliases, &resolver);

        let mut from = FromClause::new();
        from.set(TableRef::entity("User", Some("u".into())));
        assert!(from.validate().is_ok());
        assert_eq!(from.to_sql(&ctx), "FROM \"User\" AS \"u\"");

        from.set(TableRef::entity("Order", None));
        assert_eq!(from.to_sql(&ctx), "FROM \"Order\"");
    }
}
