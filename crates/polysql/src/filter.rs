//! Global filters: predicates attached to every query a builder produces.
//!
//! Filters are registered once on a [`FilterChain`] (usually through
//! [`SqlBuilderFactory::with_filter`](crate::SqlBuilderFactory::with_filter)) and
//! run the first time a builder renders its WHERE clause. A filter only sees a
//! [`SqlContext`]: it can read the registered tables and append predicates, but it
//! cannot bind parameters, so anything it adds is a literal rendered by the
//! dialect.
//!
//! ```rust
//! use polysql::filter::{FilterChain, SqlContext};
//! use polysql::Condition;
//!
//! let chain = FilterChain::new().with(|ctx: &mut SqlContext<'_>| {
//!     if let Some(alias) = ctx.aliases.get("Order") {
//!         let column = ctx.dialect.quote_identifier(&format!("{alias}.TenantId"));
//!         ctx.where_clause.and(Condition::equal(column, "42"));
//!     }
//! });
//! assert_eq!(chain.len(), 1);
//! ```

use crate::alias::AliasRegister;
use crate::clause::WhereClause;
use crate::condition::Condition;
use crate::dialect::Dialect;
use crate::entity::EntityMetadata;
use std::fmt;
use std::sync::Arc;

/// View handed to each global filter.
pub struct SqlContext<'a> {
    /// Entities registered by FROM/JOIN and their aliases.
    pub aliases: &'a AliasRegister,
    /// The WHERE clause being built; the only thing a filter may change.
    pub where_clause: &'a mut WhereClause,
    pub metadata: &'a dyn EntityMetadata,
    pub dialect: &'a dyn Dialect,
}

/// A global filter.
pub trait SqlFilter: Send + Sync {
    fn filter(&self, ctx: &mut SqlContext<'_>);
}

impl<F> SqlFilter for F
where
    F: Fn(&mut SqlContext<'_>) + Send + Sync,
{
    fn filter(&self, ctx: &mut SqlContext<'_>) {
        self(ctx)
    }
}

/// Ordered list of global filters.
#[derive(Clone, Default)]
pub struct FilterChain {
    filters: Vec<Arc<dyn SqlFilter>>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter (consuming builder).
    pub fn with(mut self, filter: impl SqlFilter + 'static) -> Self {
        self.filters.push(Arc::new(filter));
        self
    }

    /// Append an already shared filter.
    pub fn with_shared(mut self, filter: Arc<dyn SqlFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Run every filter in registration order.
    pub fn apply(&self, ctx: &mut SqlContext<'_>) {
        for filter in &self.filters {
            filter.filter(ctx);
        }
    }
}

impl fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterChain")
            .field("len", &self.filters.len())
            .finish()
    }
}

/// Excludes soft-deleted rows of every registered entity.
///
/// An entity is soft-deletable when its metadata names a soft-delete column, or,
/// failing that, when its known columns include the configured default column.
/// Each such entity gets `alias.column = <false>`.
#[derive(Debug, Clone, Default)]
pub struct SoftDeleteFilter {
    default_column: Option<String>,
}

impl SoftDeleteFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also treat entities whose columns include `column` as soft-deletable.
    pub fn with_default_column(mut self, column: impl Into<String>) -> Self {
        self.default_column = Some(column.into());
        self
    }

    fn column_of(&self, metadata: &dyn EntityMetadata, entity: &str) -> Option<String> {
        if let Some(column) = metadata.soft_delete_column(entity) {
            return Some(column);
        }
        let default = self.default_column.as_deref()?;
        metadata
            .columns(entity)?
            .into_iter()
            .find(|c| c.eq_ignore_ascii_case(default))
    }
}

impl SqlFilter for SoftDeleteFilter {
    fn filter(&self, ctx: &mut SqlContext<'_>) {
        let predicates: Vec<Condition> = ctx
            .aliases
            .entries()
            .filter_map(|(entity, alias)| {
                let column = self.column_of(ctx.metadata, entity)?;
                let column = format!(
                    "{}.{}",
                    ctx.dialect.quote_name(alias),
                    ctx.dialect.quote_name(&column)
                );
                Some(Condition::equal(column, ctx.dialect.bool_literal(false)))
            })
            .collect();
        for predicate in predicates {
            ctx.where_clause.and(predicate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::RenderContext;
    use crate::dialect::{PgSqlDialect, SqlServerDialect};
    use crate::entity::{EntityDef, EntityResolver, MetadataRegistry, NoMetadata};

    const USER: EntityDef = EntityDef::new("User", "users").with_soft_delete("IsDeleted");
    const ORDER: EntityDef =
        EntityDef::new("Order", "orders").with_columns(&[("Id", "Id"), ("Deleted", "Deleted")]);
    const ROLE: EntityDef = EntityDef::new("Role", "roles");

    fn registry() -> MetadataRegistry {
        MetadataRegistry::new().with(USER).with(ORDER).with(ROLE)
    }

    #[test]
    fn soft_delete_uses_metadata_column() {
        let mut aliases = AliasRegister::new();
        aliases.register("User", "u");
        aliases.register("Role", "r");
        let mut where_clause = WhereClause::new();
        let metadata = registry();
        let mut ctx = SqlContext {
            aliases: &aliases,
            where_clause: &mut where_clause,
            metadata: &metadata,
            dialect: &SqlServerDialect,
        };
        SoftDeleteFilter::new().filter(&mut ctx);
        let resolver = EntityResolver::default();
        let render = RenderContext::new(&SqlServerDialect, &aliases, &resolver);
        assert_eq!(where_clause.condition(&render), "[u].[IsDeleted]=0");
    }

    #[test]
    fn soft_delete_covers_each_table_instance() {
        let mut aliases = AliasRegister::new();
        aliases.register("User", "users");
        aliases.register("User", "t1");
        let mut where_clause = WhereClause::new();
        let metadata = registry();
        let mut ctx = SqlContext {
            aliases: &aliases,
            where_clause: &mut where_clause,
            metadata: &metadata,
            dialect: &SqlServerDialect,
        };
        SoftDeleteFilter::new().filter(&mut ctx);
        let resolver = EntityResolver::default();
        let render = RenderContext::new(&SqlServerDialect, &aliases, &resolver);
        assert_eq!(
            where_clause.condition(&render),
            "[users].[IsDeleted]=0 AND [t1].[IsDeleted]=0"
        );
    }

    #[test]
    fn soft_delete_default_column() {
        let mut aliases = AliasRegister::new();
        aliases.register("Order", "o");
        let mut where_clause = WhereClause::new();
        let metadata = registry();
        let mut ctx = SqlContext {
            aliases: &aliases,
            where_clause: &mut where_clause,
            metadata: &metadata,
            dialect: &PgSqlDialect,
        };
        SoftDeleteFilter::new()
            .with_default_column("deleted")
            .filter(&mut ctx);
        let resolver = EntityResolver::default();
        let render = RenderContext::new(&PgSqlDialect, &aliases, &resolver);
        assert_eq!(where_clause.condition(&render), "\"o\".\"Deleted\"=false");
    }

    #[test]
    fn chain_runs_in_order() {
        let chain = FilterChain::new()
            .with(|ctx: &mut SqlContext<'_>| {
                ctx.where_clause.append("a=1");
            })
            .with(|ctx: &mut SqlContext<'_>| {
                ctx.where_clause.append("b=2");
            });
        let aliases = AliasRegister::new();
        let mut where_clause = WhereClause::new();
        let mut ctx = SqlContext {
            aliases: &aliases,
            where_clause: &mut where_clause,
            metadata: &NoMetadata,
            dialect: &SqlServerDialect,
        };
        chain.apply(&mut ctx);
        let resolver = EntityResolver::default();
        let render = RenderContext::new(&SqlServerDialect, &aliases, &resolver);
        assert_eq!(where_clause.to_sql(&render), "WHERE a=1 AND b=2");
        assert_eq!(format!("{chain:?}"), "FilterChain { len: 2 }");
    }
}
