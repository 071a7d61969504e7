//! Clause objects composed by [`SqlBuilder`](crate::SqlBuilder).
//!
//! Each clause owns structured state (items, join specs, predicates) and renders
//! on demand. Clauses never point back at the builder: anything they need to
//! render (dialect, aliases, entity names) arrives through a [`RenderContext`],
//! which is what lets a cloned builder render its clauses against its own alias
//! register.

mod from;
mod group_by;
mod join;
mod order_by;
mod select;
mod where_clause;

pub use from::FromClause;
pub use group_by::GroupByClause;
pub use join::{JoinClause, JoinItem, JoinKind};
pub use order_by::{OrderByClause, OrderItem, SortDir};
pub use select::SelectClause;
pub use where_clause::WhereClause;

use crate::alias::AliasRegister;
use crate::dialect::Dialect;
use crate::entity::EntityResolver;
use crate::ident::SqlItem;

/// Everything a clause needs to render itself.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub dialect: &'a dyn Dialect,
    pub aliases: &'a AliasRegister,
    pub resolver: &'a EntityResolver,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        dialect: &'a dyn Dialect,
        aliases: &'a AliasRegister,
        resolver: &'a EntityResolver,
    ) -> Self {
        Self {
            dialect,
            aliases,
            resolver,
        }
    }

    /// Render a column reference.
    ///
    /// When the prefix names a registered entity, the prefix becomes the entity's
    /// alias and the name is mapped through entity metadata.
    pub fn column(&self, item: &SqlItem) -> String {
        match item.prefix() {
            Some(entity) if !item.is_raw() && self.aliases.contains(entity) => {
                let mut mapped =
                    SqlItem::qualified(entity, self.resolver.column(entity, item.name()));
                if let Some(alias) = item.alias() {
                    mapped = mapped.with_alias(alias);
                }
                mapped.to_sql_with(self.dialect, self.aliases)
            }
            _ => item.to_sql_with(self.dialect, self.aliases),
        }
    }
}

/// A table reference in FROM or JOIN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRef {
    /// An entity, resolved to its table at render time.
    Entity {
        entity: String,
        /// Alias rendered after the table; `None` when the table name is the alias.
        alias: Option<String>,
    },
    /// Raw SQL such as a subquery, emitted unchanged.
    Raw(String),
}

impl TableRef {
    pub fn entity(entity: impl Into<String>, alias: Option<String>) -> Self {
        TableRef::Entity {
            entity: entity.into(),
            alias,
        }
    }

    pub fn raw(sql: impl Into<String>) -> Self {
        TableRef::Raw(sql.into())
    }

    pub fn to_sql(&self, ctx: &RenderContext<'_>) -> String {
        match self {
            TableRef::Entity { entity, alias } => {
                let table = ctx.dialect.quote_identifier(&ctx.resolver.table(entity));
                match alias {
                    Some(alias) => ctx
                        .dialect
                        .render_table_alias(&table, &ctx.dialect.quote_name(alias)),
                    None => table,
                }
            }
            TableRef::Raw(sql) => sql.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{OracleDialect, SqlServerDialect};
    use crate::entity::{EntityDef, MetadataRegistry};
    use std::sync::Arc;

    const USER: EntityDef = EntityDef::new("User", "users")
        .with_schema("dbo")
        .with_columns(&[("Name", "user_name")]);

    #[test]
    fn table_refs_resolve_through_metadata() {
        let resolver = EntityResolver::new(Arc::new(MetadataRegistry::new().with(USER)));
        let aliases = AliasRegister::new();
        let ctx = RenderContext::new(&SqlServerDialect, &aliases, &resolver);

        assert_eq!(TableRef::entity("User", None).to_sql(&ctx), "[dbo].[users]");
        assert_eq!(
            TableRef::entity("User", Some("u".into())).to_sql(&ctx),
            "[dbo].[users] AS [u]"
        );
        assert_eq!(TableRef::raw(" (SELECT 1) x ").to_sql(&ctx), "(SELECT 1) x");

        let ctx = RenderContext::new(&OracleDialect, &aliases, &resolver);
        assert_eq!(
            TableRef::entity("User", Some("u".into())).to_sql(&ctx),
            "\"dbo\".\"users\" \"u\""
        );
    }

    #[test]
    fn columns_map_entity_prefix_to_alias() {
        let resolver = EntityResolver::new(Arc::new(MetadataRegistry::new().with(USER)));
        let mut aliases = AliasRegister::new();
        aliases.register("User", "u");
        let ctx = RenderContext::new(&SqlServerDialect, &aliases, &resolver);

        let item = SqlItem::parse("User.Name as n").unwrap();
        assert_eq!(ctx.column(&item), "[u].[user_name] AS [n]");
        let item = SqlItem::parse("x.Name").unwrap();
        assert_eq!(ctx.column(&item), "[x].[Name]");
    }
}
