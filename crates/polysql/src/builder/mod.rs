//! The SQL builder.
//!
//! [`SqlBuilder`] owns one of each clause (created on first use), the parameter
//! table, the alias register and the paging state. Mutation is fluent
//! (`&mut self -> &mut Self`); column/table arguments are parsed eagerly and any
//! parse failure is reported by the next [`to_sql`](SqlBuilder::to_sql). Failures
//! belong to the clause that caused them, so clearing that clause drops them.
//!
//! ## SQL assembly
//!
//! `to_sql()` applies the pager's order, validates (SELECT and FROM required,
//! ORDER BY required when limiting), applies global filters once, then renders
//! select, from, join, where, group-by, order-by and limit in that order, one
//! fragment per line.
//!
//! # Example
//! ```rust
//! use polysql::{DialectKind, SqlBuilder};
//!
//! let mut builder = SqlBuilder::for_dialect(DialectKind::SqlServer);
//! builder
//!     .select("Id, Name")
//!     .from("User")
//!     .less_equal("Age", 30)
//!     .order_by("Name")
//!     .take(10);
//!
//! assert_eq!(
//!     builder.to_sql()?,
//!     "SELECT [Id], [Name]\n\
//!      FROM [User]\n\
//!      WHERE [Age]<=@_p_0\n\
//!      ORDER BY [Name] ASC\n\
//!      OFFSET @_p_2 ROWS FETCH NEXT @_p_1 ROWS ONLY"
//! );
//! # Ok::<(), polysql::SqlError>(())
//! ```

mod debug;


use crate::alias::AliasRegister;
use crate::clause::{
    FromClause, GroupByClause, JoinClause, JoinKind, OrderByClause, OrderItem, RenderContext,
    SelectClause, TableRef, WhereClause,
};
use crate::condition::{Condition, Operator};
use crate::dialect::{Dialect, DialectKind};
use crate::entity::{EntityMetadata, EntityResolver};
use crate::error::{SqlError, SqlResult};
use crate::filter::{FilterChain, SqlContext};
use crate::ident::{SqlItem, split_list};
use crate::pager::Pager;
use crate::param::ParameterManager;
use crate::value::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, trace, warn};

pub(crate) const LOG_TARGET: &str = "polysql.sql";

/// Default truncation of SQL in log events (in bytes).
pub const DEFAULT_LOG_SQL_LENGTH: usize = 200;

/// Clause a recorded construction error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part {
    Select,
    From,
    Join,
    Where,
    GroupBy,
    OrderBy,
}

/// Dialect-aware SELECT builder.
///
/// `Clone` is a deep copy: clauses, aliases, parameters and paging state are
/// copied by value, while the dialect, metadata and filter chain (all immutable)
/// are shared.
#[derive(Debug, Clone)]
pub struct SqlBuilder {
    dialect: Arc<dyn Dialect>,
    resolver: EntityResolver,
    filters: Arc<FilterChain>,
    log_max_sql_length: Option<usize>,
    params: ParameterManager,
    aliases: AliasRegister,
    select: Option<SelectClause>,
    from: Option<FromClause>,
    join: Option<JoinClause>,
    where_clause: Option<WhereClause>,
    group_by: Option<GroupByClause>,
    order_by: Option<OrderByClause>,
    pager: Option<Pager>,
    offset_param: Option<String>,
    limit_param: Option<String>,
    filters_applied: bool,
    build_errors: Vec<(Part, SqlError)>,
}

impl SqlBuilder {
    /// Create an empty builder without metadata or global filters.
    pub fn new(dialect: Arc<dyn Dialect>) -> Self {
        let params = ParameterManager::new(dialect.param_prefix());
        Self {
            dialect,
            resolver: EntityResolver::default(),
            filters: Arc::new(FilterChain::new()),
            log_max_sql_length: Some(DEFAULT_LOG_SQL_LENGTH),
            params,
            aliases: AliasRegister::new(),
            select: None,
            from: None,
            join: None,
            where_clause: None,
            group_by: None,
            order_by: None,
            pager: None,
            offset_param: None,
            limit_param: None,
            filters_applied: false,
            build_errors: Vec::new(),
        }
    }

    /// Create an empty builder for a built-in dialect.
    pub fn for_dialect(kind: DialectKind) -> Self {
        Self::new(kind.dialect())
    }

    /// Resolve entity names through `metadata`.
    pub fn with_metadata(mut self, metadata: Arc<dyn EntityMetadata>) -> Self {
        self.resolver = EntityResolver::new(metadata);
        self
    }

    /// Use `filters` as the global filter chain.
    pub fn with_filters(mut self, filters: Arc<FilterChain>) -> Self {
        self.filters = filters;
        self
    }

    /// Truncate SQL in log events to `max` bytes (`None` disables truncation).
    pub fn with_log_max_sql_length(mut self, max: Option<usize>) -> Self {
        self.log_max_sql_length = max;
        self
    }

    /// A fresh, empty builder with the same dialect, metadata and filters.
    pub fn new_builder(&self) -> Self {
        Self::new(Arc::clone(&self.dialect))
            .with_metadata(self.resolver.metadata_arc())
            .with_filters(Arc::clone(&self.filters))
            .with_log_max_sql_length(self.log_max_sql_length)
    }

    // ==================== Accessors ====================

    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    pub fn aliases(&self) -> &AliasRegister {
        &self.aliases
    }

    pub fn resolver(&self) -> &EntityResolver {
        &self.resolver
    }

    pub fn pager(&self) -> Option<&Pager> {
        self.pager.as_ref()
    }

    /// Name of the cached offset parameter.
    pub fn offset_param(&self) -> Option<&str> {
        self.offset_param.as_deref()
    }

    /// Name of the cached limit parameter.
    pub fn limit_param(&self) -> Option<&str> {
        self.limit_param.as_deref()
    }

    /// Whether a GROUP BY column was added.
    pub fn is_group(&self) -> bool {
        self.group_by.as_ref().is_some_and(GroupByClause::is_group)
    }

    /// Whether a row limit is bound.
    pub fn is_limit(&self) -> bool {
        self.limit_param
            .as_deref()
            .is_some_and(|name| self.params.contains(name))
    }

    pub fn select_clause(&mut self) -> &mut SelectClause {
        self.select.get_or_insert_with(SelectClause::new)
    }

    pub fn from_clause(&mut self) -> &mut FromClause {
        self.from.get_or_insert_with(FromClause::new)
    }

    pub fn join_clause(&mut self) -> &mut JoinClause {
        self.join.get_or_insert_with(JoinClause::new)
    }

    pub fn where_clause(&mut self) -> &mut WhereClause {
        self.where_clause.get_or_insert_with(WhereClause::new)
    }

    pub fn group_by_clause(&mut self) -> &mut GroupByClause {
        self.group_by.get_or_insert_with(GroupByClause::new)
    }

    pub fn order_by_clause(&mut self) -> &mut OrderByClause {
        self.order_by.get_or_insert_with(OrderByClause::new)
    }

    fn ctx(&self) -> RenderContext<'_> {
        RenderContext::new(self.dialect.as_ref(), &self.aliases, &self.resolver)
    }

    /// Record a construction error against `part`; `to_sql` reports the oldest.
    fn fail(&mut self, part: Part, err: SqlError) {
        self.build_errors.push((part, err));
    }

    fn forget_errors(&mut self, part: Part) {
        self.build_errors.retain(|(p, _)| *p != part);
    }

    /// Parse a column reference; it is resolved against the aliases at render time.
    fn parse_column(&mut self, part: Part, column: &str) -> SqlItem {
        SqlItem::parse(column).unwrap_or_else(|err| {
            self.fail(part, err);
            SqlItem::raw("")
        })
    }

    /// Rendered `alias.column` of an entity property.
    pub fn column_of(&self, entity: &str, property: &str) -> String {
        self.ctx().column(&SqlItem::qualified(entity, property))
    }

    // ==================== SELECT ====================

    /// Append a comma-separated column list (`Id, u.Name as n, Count(*)`).
    pub fn select(&mut self, columns: &str) -> &mut Self {
        for part in split_list(columns) {
            match SqlItem::parse(part) {
                Ok(item) => {
                    self.select_clause().add(item);
                }
                Err(err) => self.fail(Part::Select, err),
            }
        }
        self
    }

    /// Append a raw SELECT expression.
    pub fn select_raw(&mut self, sql: &str) -> &mut Self {
        self.select_clause().add_raw(sql);
        self
    }

    /// Append `entity.*`.
    pub fn select_all(&mut self, entity: &str) -> &mut Self {
        self.select_clause().add(SqlItem::qualified(entity, "*"));
        self
    }

    /// Append every column the metadata knows for `entity`.
    pub fn select_columns(&mut self, entity: &str) -> &mut Self {
        let columns = self.resolver.columns(entity);
        if columns.is_empty() {
            return self.select_all(entity);
        }
        for column in columns {
            self.select_clause().add(SqlItem::qualified(entity, column));
        }
        self
    }

    pub fn distinct(&mut self) -> &mut Self {
        self.select_clause().distinct();
        self
    }

    // ==================== FROM / JOIN ====================

    /// Register `entity` and produce the table reference to render.
    ///
    /// An explicit alias is used as given and must not be taken yet. Without one
    /// the table name serves as the alias, unless the entity or that name is
    /// already in use, in which case a `tN` alias is generated and rendered.
    fn table_ref(&mut self, part: Part, entity: &str, alias: Option<&str>) -> Option<TableRef> {
        let entity = entity.trim();
        if entity.is_empty() {
            self.fail(part, SqlError::argument("table name cannot be blank"));
            return None;
        }
        match alias.map(str::trim).filter(|a| !a.is_empty()) {
            Some(alias) => {
                if !self.aliases.register(entity, alias) {
                    self.fail(
                        part,
                        SqlError::argument(format!("alias '{alias}' is already used")),
                    );
                    return None;
                }
                Some(TableRef::entity(entity, Some(alias.to_string())))
            }
            None => {
                let table = self.resolver.table_name(entity);
                if !self.aliases.contains(entity) && self.aliases.register(entity, &table) {
                    return Some(TableRef::entity(entity, None));
                }
                let alias = self.aliases.generate();
                self.aliases.register(entity, &alias);
                Some(TableRef::entity(entity, Some(alias)))
            }
        }
    }

    pub fn from(&mut self, table: &str) -> &mut Self {
        self.from_as(table, None)
    }

    pub fn from_as(&mut self, table: &str, alias: Option<&str>) -> &mut Self {
        if let Some(table) = self.table_ref(Part::From, table, alias) {
            self.from_clause().set(table);
        }
        self
    }

    /// Use raw SQL (e.g. a subquery) as the FROM source.
    pub fn from_raw(&mut self, sql: &str) -> &mut Self {
        self.from_clause().set(TableRef::raw(sql));
        self
    }

    /// Add a join of the given kind.
    pub fn join_with(&mut self, kind: JoinKind, table: &str, alias: Option<&str>) -> &mut Self {
        if let Some(table) = self.table_ref(Part::Join, table, alias) {
            self.join_clause().join(kind, table);
        }
        self
    }

    pub fn join(&mut self, table: &str) -> &mut Self {
        self.join_with(JoinKind::Inner, table, None)
    }

    pub fn join_as(&mut self, table: &str, alias: &str) -> &mut Self {
        self.join_with(JoinKind::Inner, table, Some(alias))
    }

    pub fn left_join(&mut self, table: &str) -> &mut Self {
        self.join_with(JoinKind::Left, table, None)
    }

    pub fn left_join_as(&mut self, table: &str, alias: &str) -> &mut Self {
        self.join_with(JoinKind::Left, table, Some(alias))
    }

    pub fn right_join(&mut self, table: &str) -> &mut Self {
        self.join_with(JoinKind::Right, table, None)
    }

    pub fn right_join_as(&mut self, table: &str, alias: &str) -> &mut Self {
        self.join_with(JoinKind::Right, table, Some(alias))
    }

    /// `ON left = right` for the most recent join.
    pub fn on(&mut self, left: &str, right: &str) -> &mut Self {
        let left = self.parse_column(Part::Join, left);
        let right = self.parse_column(Part::Join, right);
        self.on_condition(Condition::equal(left, right))
    }

    /// AND a prebuilt condition into the most recent join's ON predicate.
    pub fn on_condition(&mut self, condition: Condition) -> &mut Self {
        if !self.join_clause().on(condition) {
            self.fail(Part::Join, SqlError::argument("ON requires a preceding join"));
        }
        self
    }

    /// Append raw join SQL.
    pub fn append_join(&mut self, sql: &str) -> &mut Self {
        self.join_clause().append(sql);
        self
    }

    // ==================== WHERE ====================

    fn build_condition(&mut self, column: &str, op: Operator, value: Value) -> Condition {
        let column = self.parse_column(Part::Where, column);
        match op {
            Operator::In | Operator::NotIn => {
                let values = match value {
                    Value::List(items) => items,
                    Value::Null => Vec::new(),
                    other => vec![other],
                };
                let markers: Vec<String> = values.into_iter().map(|v| self.params.bind(v)).collect();
                if op == Operator::In {
                    Condition::in_list(column, markers)
                } else {
                    Condition::not_in(column, markers)
                }
            }
            Operator::Equal if value.is_null() => Condition::is_null(column),
            Operator::NotEqual if value.is_null() => Condition::is_not_null(column),
            _ => {
                let marker = self.params.bind(op.prepare_value(value));
                Condition::compare(column, op, marker)
            }
        }
    }

    /// AND `column <op> value`, binding `value` to a generated parameter.
    pub fn where_(&mut self, column: &str, op: Operator, value: impl Into<Value>) -> &mut Self {
        let condition = self.build_condition(column, op, value.into());
        self.where_clause().and(condition);
        self
    }

    /// Like [`where_`](Self::where_), but skipped when the value is null, blank
    /// text or an empty list.
    pub fn where_if_not_empty(
        &mut self,
        column: &str,
        op: Operator,
        value: impl Into<Value>,
    ) -> &mut Self {
        let value = value.into();
        if value.is_empty() {
            return self;
        }
        self.where_(column, op, value)
    }

    /// OR `column <op> value` with the whole current predicate.
    pub fn or_where(&mut self, column: &str, op: Operator, value: impl Into<Value>) -> &mut Self {
        let condition = self.build_condition(column, op, value.into());
        self.where_clause().or(condition);
        self
    }

    /// AND a prebuilt condition.
    pub fn where_condition(&mut self, condition: Condition) -> &mut Self {
        self.where_clause().and(condition);
        self
    }

    /// AND a raw SQL predicate.
    pub fn append_where(&mut self, sql: &str) -> &mut Self {
        self.where_clause().append(sql);
        self
    }

    pub fn equal(&mut self, column: &str, value: impl Into<Value>) -> &mut Self {
        self.where_(column, Operator::Equal, value)
    }

    pub fn not_equal(&mut self, column: &str, value: impl Into<Value>) -> &mut Self {
        self.where_(column, Operator::NotEqual, value)
    }

    pub fn greater(&mut self, column: &str, value: impl Into<Value>) -> &mut Self {
        self.where_(column, Operator::Greater, value)
    }

    pub fn greater_equal(&mut self, column: &str, value: impl Into<Value>) -> &mut Self {
        self.where_(column, Operator::GreaterEqual, value)
    }

    pub fn less(&mut self, column: &str, value: impl Into<Value>) -> &mut Self {
        self.where_(column, Operator::Less, value)
    }

    pub fn less_equal(&mut self, column: &str, value: impl Into<Value>) -> &mut Self {
        self.where_(column, Operator::LessEqual, value)
    }

    /// `column LIKE %value%`
    pub fn contains(&mut self, column: &str, value: impl Into<Value>) -> &mut Self {
        self.where_(column, Operator::Contains, value)
    }

    /// `column LIKE value%`
    pub fn starts(&mut self, column: &str, value: impl Into<Value>) -> &mut Self {
        self.where_(column, Operator::Starts, value)
    }

    /// `column LIKE %value`
    pub fn ends(&mut self, column: &str, value: impl Into<Value>) -> &mut Self {
        self.where_(column, Operator::Ends, value)
    }

    /// `column IN (...)`; an empty list matches nothing.
    pub fn in_list<I, V>(&mut self, column: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values = Value::List(values.into_iter().map(Into::into).collect());
        self.where_(column, Operator::In, values)
    }

    /// `column NOT IN (...)`; an empty list adds nothing.
    pub fn not_in<I, V>(&mut self, column: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values = Value::List(values.into_iter().map(Into::into).collect());
        self.where_(column, Operator::NotIn, values)
    }

    pub fn is_null(&mut self, column: &str) -> &mut Self {
        let column = self.parse_column(Part::Where, column);
        self.where_condition(Condition::is_null(column))
    }

    pub fn is_not_null(&mut self, column: &str) -> &mut Self {
        let column = self.parse_column(Part::Where, column);
        self.where_condition(Condition::is_not_null(column))
    }

    /// `column BETWEEN low AND high`; a missing bound becomes `>=`/`<=`.
    pub fn between<V: Into<Value>>(
        &mut self,
        column: &str,
        low: Option<V>,
        high: Option<V>,
    ) -> &mut Self {
        let column = self.parse_column(Part::Where, column);
        let low = low.map(|v| self.params.bind(v));
        let high = high.map(|v| self.params.bind(v));
        self.where_condition(Condition::between(column, low, high))
    }

    // ==================== GROUP BY / ORDER BY ====================

    /// Append a comma-separated GROUP BY list.
    pub fn group_by(&mut self, columns: &str) -> &mut Self {
        for part in split_list(columns) {
            match SqlItem::parse(part) {
                Ok(item) => {
                    self.group_by_clause().add(item);
                }
                Err(err) => self.fail(Part::GroupBy, err),
            }
        }
        self
    }

    /// AND a raw predicate into HAVING.
    pub fn having(&mut self, sql: &str) -> &mut Self {
        self.group_by_clause().having(Condition::raw(sql));
        self
    }

    /// Append an ORDER BY list such as `Name desc, Id`.
    pub fn order_by(&mut self, columns: &str) -> &mut Self {
        if let Err(err) = self.order_by_clause().add_list(columns) {
            self.fail(Part::OrderBy, err);
        }
        self
    }

    /// Append a raw ORDER BY expression.
    pub fn order_by_raw(&mut self, sql: &str) -> &mut Self {
        if !sql.trim().is_empty() {
            self.order_by_clause().add(OrderItem::raw(sql));
        }
        self
    }

    // ==================== Parameters ====================

    /// Bind `value` under `name` (the dialect prefix is added when missing).
    pub fn add_param(&mut self, name: &str, value: impl Into<Value>) -> SqlResult<&mut Self> {
        self.params.add(name, value)?;
        Ok(self)
    }

    /// Bind `value` to a generated name and return its marker.
    pub fn bind(&mut self, value: impl Into<Value>) -> String {
        let name = self.params.bind(value);
        self.dialect.parameter_marker(&name)
    }

    /// All bound parameters, ordered by name.
    pub fn params(&self) -> &BTreeMap<String, Value> {
        self.params.params()
    }

    /// The value bound to `name` (prefix optional).
    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params.get(name)
    }

    // ==================== Paging ====================

    fn offset_name(&mut self) -> String {
        if let Some(name) = &self.offset_param {
            return name.clone();
        }
        let name = self.params.generate_name();
        self.params.set(&name, 0);
        self.offset_param = Some(name.clone());
        name
    }

    fn limit_name(&mut self) -> String {
        if let Some(name) = &self.limit_param {
            return name.clone();
        }
        let name = self.params.generate_name();
        self.limit_param = Some(name.clone());
        name
    }

    /// Skip `count` rows. Repeated calls rebind the same parameter.
    pub fn skip(&mut self, count: i64) -> &mut Self {
        let name = self.offset_name();
        self.params.set(&name, count);
        self
    }

    /// Take at most `count` rows. Repeated calls rebind the same parameter;
    /// the pager's page size follows `count`.
    pub fn take(&mut self, count: i64) -> &mut Self {
        let name = self.limit_name();
        self.params.set(&name, count);
        self.pager.get_or_insert_with(Pager::default).page_size = count;
        self
    }

    /// Adopt `pager` and page accordingly; `None` leaves the builder untouched.
    pub fn page(&mut self, pager: Option<&Pager>) -> &mut Self {
        let Some(pager) = pager else {
            return self;
        };
        self.pager = Some(pager.clone());
        self.skip(pager.skip_count()).take(pager.page_size)
    }

    fn limit_sql(&mut self) -> String {
        let Some(limit) = self
            .limit_param
            .clone()
            .filter(|name| self.params.contains(name))
        else {
            return String::new();
        };
        let offset = match self.offset_param.clone() {
            Some(name) if self.params.contains(&name) => name,
            Some(name) => {
                self.params.set(&name, 0);
                name
            }
            None => self.offset_name(),
        };
        self.dialect.render_limit(
            &self.dialect.parameter_marker(&offset),
            &self.dialect.parameter_marker(&limit),
        )
    }

    // ==================== Assembly ====================

    /// Copy the pager's order into ORDER BY when no order was given.
    fn init(&mut self) {
        let Some(order) = self.pager.as_ref().and_then(|p| p.order.clone()) else {
            return;
        };
        if !self.order_by.as_ref().is_none_or(OrderByClause::is_empty) {
            return;
        }
        if let Err(err) = self.order_by_clause().add_list(&order) {
            self.fail(Part::OrderBy, err);
        }
    }

    fn validate(&self) -> SqlResult<()> {
        if let Some((_, err)) = self.build_errors.first() {
            return Err(err.clone());
        }
        if self.select.as_ref().is_none_or(SelectClause::is_empty) {
            return Err(SqlError::construction("SELECT clause is required"));
        }
        let empty_from = FromClause::new();
        self.from.as_ref().unwrap_or(&empty_from).validate()?;
        let empty_order = OrderByClause::new();
        self.order_by
            .as_ref()
            .unwrap_or(&empty_order)
            .validate(self.is_limit())
    }

    fn apply_filters(&mut self) {
        if self.filters_applied {
            return;
        }
        self.filters_applied = true;
        if self.filters.is_empty() {
            return;
        }
        let where_clause = self.where_clause.get_or_insert_with(WhereClause::new);
        let mut ctx = SqlContext {
            aliases: &self.aliases,
            where_clause,
            metadata: self.resolver.metadata(),
            dialect: self.dialect.as_ref(),
        };
        self.filters.apply(&mut ctx);
        trace!(
            target: LOG_TARGET,
            filter_count = self.filters.len(),
            entity_count = self.aliases.len(),
            "applied global filters"
        );
    }

    /// The WHERE fragment. Global filters run on the first call only.
    pub fn get_where(&mut self) -> String {
        self.apply_filters();
        let ctx = self.ctx();
        self.where_clause
            .as_ref()
            .map(|w| w.to_sql(&ctx))
            .unwrap_or_default()
    }

    /// The WHERE predicate without the keyword. Global filters run once.
    pub fn get_condition(&mut self) -> String {
        self.apply_filters();
        let ctx = self.ctx();
        self.where_clause
            .as_ref()
            .map(|w| w.condition(&ctx))
            .unwrap_or_default()
    }

    /// Render the statement.
    pub fn to_sql(&mut self) -> SqlResult<String> {
        self.init();
        if let Err(err) = self.validate() {
            warn!(
                target: LOG_TARGET,
                dialect = self.dialect.name(),
                error = %err,
                "rejected SQL builder"
            );
            return Err(err);
        }

        let where_sql = self.get_where();
        let limit_sql = self.limit_sql();
        let ctx = self.ctx();
        let fragments = [
            self.select.as_ref().map(|c| c.to_sql(&ctx)),
            self.from.as_ref().map(|c| c.to_sql(&ctx)),
            self.join.as_ref().map(|c| c.to_sql(&ctx)),
            Some(where_sql),
            self.group_by.as_ref().map(|c| c.to_sql(&ctx)),
            self.order_by.as_ref().map(|c| c.to_sql(&ctx)),
            Some(limit_sql),
        ];

        let mut sql = String::new();
        for fragment in fragments.into_iter().flatten() {
            let fragment = fragment.trim();
            if fragment.is_empty() {
                continue;
            }
            sql.push_str(fragment);
            sql.push('\n');
        }
        let sql = sql.trim().to_string();

        debug!(
            target: LOG_TARGET,
            dialect = self.dialect.name(),
            param_count = self.params.len(),
            sql = %self.truncate_sql(&sql),
            "built SQL"
        );
        Ok(sql)
    }

    /// Render the statement with every parameter replaced by its literal value.
    ///
    /// For logging and troubleshooting only; never execute the result.
    pub fn to_debug_sql(&mut self) -> SqlResult<String> {
        let sql = self.to_sql()?;
        debug::inline_params(&sql, self.params.params(), self.dialect.as_ref())
    }

    fn truncate_sql(&self, sql: &str) -> String {
        match self.log_max_sql_length {
            Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
            _ => sql.to_string(),
        }
    }

    // ==================== Reset ====================

    /// Reset every clause, the aliases, the parameters and the paging state.
    pub fn clear(&mut self) -> &mut Self {
        self.aliases = AliasRegister::new();
        self.build_errors.clear();
        self.clear_select()
            .clear_from()
            .clear_join()
            .clear_where()
            .clear_group_by()
            .clear_order_by()
            .clear_sql_params()
            .clear_page_params()
    }

    pub fn clear_select(&mut self) -> &mut Self {
        self.forget_errors(Part::Select);
        self.select = None;
        self
    }

    pub fn clear_from(&mut self) -> &mut Self {
        self.forget_errors(Part::From);
        self.from = None;
        self
    }

    pub fn clear_join(&mut self) -> &mut Self {
        self.forget_errors(Part::Join);
        self.join = None;
        self
    }

    /// Reset WHERE; global filters run again on the next render.
    pub fn clear_where(&mut self) -> &mut Self {
        self.forget_errors(Part::Where);
        self.where_clause = None;
        self.filters_applied = false;
        self
    }

    pub fn clear_group_by(&mut self) -> &mut Self {
        self.forget_errors(Part::GroupBy);
        self.group_by = None;
        self
    }

    pub fn clear_order_by(&mut self) -> &mut Self {
        self.forget_errors(Part::OrderBy);
        self.order_by = None;
        self
    }

    /// Drop every parameter binding. Cached paging names survive and are
    /// rebound by the next `skip`/`take`.
    pub fn clear_sql_params(&mut self) -> &mut Self {
        self.params.clear();
        self
    }

    /// Forget the pager and the cached offset/limit names.
    pub fn clear_page_params(&mut self) -> &mut Self {
        self.pager = None;
        self.offset_param = None;
        self.limit_param = None;
        self
    }
}

fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}
