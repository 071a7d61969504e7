//! Process-wide builder factory.

use crate::builder::SqlBuilder;
use crate::config::SqlOptions;
use crate::dialect::Dialect;
use crate::entity::EntityMetadata;
use crate::filter::{FilterChain, SoftDeleteFilter, SqlFilter};
use std::sync::Arc;

/// Hands out builders that share one dialect, metadata provider and filter chain.
///
/// Configure it once at startup; [`create`](Self::create) is cheap afterwards.
///
/// ```rust
/// use std::sync::Arc;
/// use polysql::entity::{EntityDef, MetadataRegistry};
/// use polysql::{DialectKind, SqlBuilderFactory, SqlOptions};
///
/// let metadata = MetadataRegistry::new()
///     .with(EntityDef::new("User", "users").with_soft_delete("IsDeleted"));
/// let factory = SqlBuilderFactory::new(
///     SqlOptions::new().dialect(DialectKind::MySql).soft_delete(),
///     Arc::new(metadata),
/// );
///
/// let mut builder = factory.create();
/// builder.select("*").from("User");
/// assert_eq!(
///     builder.to_sql().unwrap(),
///     "SELECT *\nFROM `users`\nWHERE `users`.`IsDeleted`=0"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct SqlBuilderFactory {
    options: SqlOptions,
    dialect: Arc<dyn Dialect>,
    metadata: Arc<dyn EntityMetadata>,
    filters: Arc<FilterChain>,
}

impl SqlBuilderFactory {
    pub fn new(options: SqlOptions, metadata: Arc<dyn EntityMetadata>) -> Self {
        let mut chain = FilterChain::new();
        if options.soft_delete {
            let filter = match &options.soft_delete_column {
                Some(column) => SoftDeleteFilter::new().with_default_column(column.clone()),
                None => SoftDeleteFilter::new(),
            };
            chain = chain.with(filter);
        }
        Self {
            dialect: options.dialect.dialect(),
            options,
            metadata,
            filters: Arc::new(chain),
        }
    }

    /// Register a global filter. Filters run in registration order.
    pub fn with_filter(mut self, filter: impl SqlFilter + 'static) -> Self {
        let chain = Arc::unwrap_or_clone(self.filters);
        self.filters = Arc::new(chain.with(filter));
        self
    }

    /// Replace the built-in dialect selected by the options.
    pub fn with_dialect(mut self, dialect: Arc<dyn Dialect>) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn options(&self) -> &SqlOptions {
        &self.options
    }

    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    pub fn filters(&self) -> &FilterChain {
        &self.filters
    }

    /// A new, empty builder.
    pub fn create(&self) -> SqlBuilder {
        SqlBuilder::new(Arc::clone(&self.dialect))
            .with_metadata(Arc::clone(&self.metadata))
            .with_filters(Arc::clone(&self.filters))
            .with_log_max_sql_length(self.options.log_max_sql_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::DialectKind;
    use crate::entity::{EntityDef, MetadataRegistry, NoMetadata};
    use crate::filter::SqlContext;

    #[test]
    fn create_uses_configured_dialect() {
        let factory = SqlBuilderFactory::new(
            SqlOptions::new().dialect(DialectKind::Oracle),
            Arc::new(NoMetadata),
        );
        let builder = factory.create();
        assert_eq!(builder.dialect().kind(), DialectKind::Oracle);
        assert!(factory.filters().is_empty());
    }

    #[test]
    fn soft_delete_option_registers_filter() {
        let factory = SqlBuilderFactory::new(SqlOptions::new().soft_delete(), Arc::new(NoMetadata));
        assert_eq!(factory.filters().len(), 1);
    }

    #[test]
    fn custom_filters_follow_soft_delete() {
        let metadata = MetadataRegistry::new()
            .with(EntityDef::new("User", "users").with_soft_delete("IsDeleted"));
        let factory = SqlBuilderFactory::new(SqlOptions::new().soft_delete(), Arc::new(metadata))
            .with_filter(|ctx: &mut SqlContext<'_>| {
                ctx.where_clause.append("[users].[TenantId]=7");
            });
        assert_eq!(factory.filters().len(), 2);

        let mut builder = factory.create();
        builder.select("Id").from("User");
        assert_eq!(
            builder.to_sql().unwrap(),
            "SELECT [Id]\nFROM [users]\nWHERE [users].[IsDeleted]=0 AND [users].[TenantId]=7"
        );
    }

    #[test]
    fn builders_are_independent() {
        let factory = SqlBuilderFactory::new(SqlOptions::default(), Arc::new(NoMetadata));
        let mut a = factory.create();
        a.select("Id").from("A").equal("Id", 1);
        let b = factory.create();
        assert_eq!(a.params().len(), 1);
        assert!(b.params().is_empty());
    }
}
