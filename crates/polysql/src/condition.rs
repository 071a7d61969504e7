//! WHERE/ON predicate primitives.
//!
//! A [`Condition`] references parameters by marker (`@Age`), never by value: the
//! values themselves live in the builder's [`ParameterManager`](crate::param::ParameterManager).
//! Columns are [`SqlItem`]s: entity prefixes resolve against the aliases in
//! force when the statement renders through [`Condition::render`]. Plain strings
//! convert to raw items and are emitted unchanged.
//!
//! ```rust
//! use polysql::Condition;
//!
//! assert_eq!(Condition::less_equal("Age", "@Age").to_sql(), "Age<=@Age");
//! ```

use crate::clause::RenderContext;
use crate::ident::SqlItem;
use crate::value::Value;

/// Comparison operator used by the builder's `where_` helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equal,
    NotEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    /// LIKE `%value%`
    Contains,
    /// LIKE `value%`
    Starts,
    /// LIKE `%value`
    Ends,
    In,
    NotIn,
}

impl Operator {
    /// SQL symbol of the operator.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::NotEqual => "<>",
            Operator::Greater => ">",
            Operator::GreaterEqual => ">=",
            Operator::Less => "<",
            Operator::LessEqual => "<=",
            Operator::Contains | Operator::Starts | Operator::Ends => "LIKE",
            Operator::In => "IN",
            Operator::NotIn => "NOT IN",
        }
    }

    /// Whether this is one of the LIKE operators.
    pub fn is_like(self) -> bool {
        matches!(self, Operator::Contains | Operator::Starts | Operator::Ends)
    }

    /// Adapt a value before binding (adds `%` wildcards for LIKE operators).
    pub fn prepare_value(self, value: Value) -> Value {
        let wrap = |s: String| match self {
            Operator::Contains => format!("%{s}%"),
            Operator::Starts => format!("{s}%"),
            Operator::Ends => format!("%{s}"),
            _ => s,
        };
        match value {
            Value::Text(s) if self.is_like() => Value::Text(wrap(s)),
            other => other,
        }
    }
}

/// A predicate tree over columns and parameter markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// `column <op> value`, where `value` is a marker or another column.
    Compare {
        column: SqlItem,
        op: &'static str,
        value: SqlItem,
    },
    /// `column [NOT] IN (markers...)`
    In {
        column: SqlItem,
        values: Vec<String>,
        negated: bool,
    },
    /// `column IS [NOT] NULL`
    Null { column: SqlItem, negated: bool },
    /// `column BETWEEN low AND high`; a missing bound degrades to `>=`/`<=`.
    Between {
        column: SqlItem,
        low: Option<String>,
        high: Option<String>,
    },
    /// Raw SQL predicate (escape hatch).
    Raw(String),
    And(Vec<Condition>),
    Or(Vec<Condition>),
}

impl Condition {
    pub fn compare(column: impl Into<SqlItem>, op: Operator, value: impl Into<SqlItem>) -> Self {
        Condition::Compare {
            column: column.into(),
            op: op.symbol(),
            value: value.into(),
        }
    }

    pub fn equal(column: impl Into<SqlItem>, value: impl Into<SqlItem>) -> Self {
        Self::compare(column, Operator::Equal, value)
    }

    pub fn not_equal(column: impl Into<SqlItem>, value: impl Into<SqlItem>) -> Self {
        Self::compare(column, Operator::NotEqual, value)
    }

    pub fn greater(column: impl Into<SqlItem>, value: impl Into<SqlItem>) -> Self {
        Self::compare(column, Operator::Greater, value)
    }

    pub fn greater_equal(column: impl Into<SqlItem>, value: impl Into<SqlItem>) -> Self {
        Self::compare(column, Operator::GreaterEqual, value)
    }

    pub fn less(column: impl Into<SqlItem>, value: impl Into<SqlItem>) -> Self {
        Self::compare(column, Operator::Less, value)
    }

    pub fn less_equal(column: impl Into<SqlItem>, value: impl Into<SqlItem>) -> Self {
        Self::compare(column, Operator::LessEqual, value)
    }

    /// `column LIKE marker` (wildcards belong to the bound value).
    pub fn like(column: impl Into<SqlItem>, value: impl Into<SqlItem>) -> Self {
        Self::compare(column, Operator::Contains, value)
    }

    pub fn in_list(column: impl Into<SqlItem>, values: Vec<String>) -> Self {
        Condition::In {
            column: column.into(),
            values,
            negated: false,
        }
    }

    pub fn not_in(column: impl Into<SqlItem>, values: Vec<String>) -> Self {
        Condition::In {
            column: column.into(),
            values,
            negated: true,
        }
    }

    pub fn is_null(column: impl Into<SqlItem>) -> Self {
        Condition::Null {
            column: column.into(),
            negated: false,
        }
    }

    pub fn is_not_null(column: impl Into<SqlItem>) -> Self {
        Condition::Null {
            column: column.into(),
            negated: true,
        }
    }

    pub fn between(column: impl Into<SqlItem>, low: Option<String>, high: Option<String>) -> Self {
        Condition::Between {
            column: column.into(),
            low,
            high,
        }
    }

    pub fn raw(sql: impl Into<String>) -> Self {
        Condition::Raw(sql.into())
    }

    /// Combine with AND, flattening nested conjunctions.
    pub fn and(self, other: Condition) -> Condition {
        match (self, other) {
            (a, b) if a.is_empty() => b,
            (a, b) if b.is_empty() => a,
            (Condition::And(mut left), Condition::And(right)) => {
                left.extend(right);
                Condition::And(left)
            }
            (Condition::And(mut left), b) => {
                left.push(b);
                Condition::And(left)
            }
            (a, b) => Condition::And(vec![a, b]),
        }
    }

    /// Combine with OR, flattening nested disjunctions.
    pub fn or(self, other: Condition) -> Condition {
        match (self, other) {
            (a, b) if a.is_empty() => b,
            (a, b) if b.is_empty() => a,
            (Condition::Or(mut left), Condition::Or(right)) => {
                left.extend(right);
                Condition::Or(left)
            }
            (Condition::Or(mut left), b) => {
                left.push(b);
                Condition::Or(left)
            }
            (a, b) => Condition::Or(vec![a, b]),
        }
    }

    /// Whether this condition renders to nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            Condition::Raw(sql) => sql.trim().is_empty(),
            Condition::In {
                values, negated, ..
            } => values.is_empty() && *negated,
            Condition::Between { low, high, .. } => low.is_none() && high.is_none(),
            Condition::And(items) | Condition::Or(items) => items.iter().all(Condition::is_empty),
            Condition::Compare { .. } | Condition::Null { .. } => false,
        }
    }

    /// Render the predicate with columns as written (empty string when
    /// [`is_empty`](Self::is_empty)).
    pub fn to_sql(&self) -> String {
        self.render_with(&|item: &SqlItem| item.to_string())
    }

    /// Render the predicate, quoting columns and resolving entity prefixes
    /// through `ctx`.
    pub fn render(&self, ctx: &RenderContext<'_>) -> String {
        self.render_with(&|item: &SqlItem| ctx.column(item))
    }

    fn render_with(&self, col: &dyn Fn(&SqlItem) -> String) -> String {
        match self {
            Condition::Compare { column, op, value } => {
                let (column, value) = (col(column), col(value));
                if op.chars().all(|c| !c.is_alphabetic()) {
                    format!("{column}{op}{value}")
                } else {
                    format!("{column} {op} {value}")
                }
            }
            Condition::In {
                column,
                values,
                negated,
            } => {
                // An empty IN matches nothing; an empty NOT IN filters nothing.
                if values.is_empty() {
                    return if *negated { String::new() } else { "1=0".to_string() };
                }
                let keyword = if *negated { "NOT IN" } else { "IN" };
                format!("{} {keyword} ({})", col(column), values.join(","))
            }
            Condition::Null { column, negated } => {
                if *negated {
                    format!("{} IS NOT NULL", col(column))
                } else {
                    format!("{} IS NULL", col(column))
                }
            }
            Condition::Between { column, low, high } => match (low, high) {
                (Some(low), Some(high)) => format!("{} BETWEEN {low} AND {high}", col(column)),
                (Some(low), None) => format!("{}>={low}", col(column)),
                (None, Some(high)) => format!("{}<={high}", col(column)),
                (None, None) => String::new(),
            },
            Condition::Raw(sql) => sql.trim().to_string(),
            Condition::And(items) => join(items, " AND ", false, col),
            Condition::Or(items) => {
                let inner = join(items, " OR ", true, col);
                let rendered = items.iter().filter(|c| !c.is_empty()).count();
                if rendered > 1 {
                    format!("({inner})")
                } else {
                    inner
                }
            }
        }
    }
}

impl Default for Condition {
    /// The empty conjunction, which renders to nothing.
    fn default() -> Self {
        Condition::And(Vec::new())
    }
}

fn join(
    items: &[Condition],
    sep: &str,
    wrap_and: bool,
    col: &dyn Fn(&SqlItem) -> String,
) -> String {
    items
        .iter()
        .filter(|c| !c.is_empty())
        .map(|c| match c {
            Condition::And(inner) if wrap_and && inner.iter().filter(|c| !c.is_empty()).count() > 1 => {
                format!("({})", c.render_with(col))
            }
            _ => c.render_with(col),
        })
        .collect::<Vec<_>>()
        .join(sep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alias::AliasRegister;
    use crate::dialect::SqlServerDialect;
    use crate::entity::{EntityDef, EntityResolver, MetadataRegistry};
    use std::sync::Arc;

    #[test]
    fn less_equal_condition() {
        let condition = Condition::less_equal("Age", "@Age");
        assert_eq!(condition.to_sql(), "Age<=@Age");
    }

    #[test]
    fn comparison_symbols() {
        assert_eq!(Condition::equal("a", "@a").to_sql(), "a=@a");
        assert_eq!(Condition::not_equal("a", "@a").to_sql(), "a<>@a");
        assert_eq!(Condition::greater("a", "@a").to_sql(), "a>@a");
        assert_eq!(Condition::greater_equal("a", "@a").to_sql(), "a>=@a");
        assert_eq!(Condition::less("a", "@a").to_sql(), "a<@a");
        assert_eq!(Condition::like("Name", "@n").to_sql(), "Name LIKE @n");
    }

    #[test]
    fn in_lists() {
        let c = Condition::in_list("Id", vec!["@a".into(), "@b".into()]);
        assert_eq!(c.to_sql(), "Id IN (@a,@b)");
        assert_eq!(Condition::in_list("Id", vec![]).to_sql(), "1=0");
        let empty_not_in = Condition::not_in("Id", vec![]);
        assert!(empty_not_in.is_empty());
        assert_eq!(empty_not_in.to_sql(), "");
    }

    #[test]
    fn null_checks() {
        assert_eq!(Condition::is_null("a").to_sql(), "a IS NULL");
        assert_eq!(Condition::is_not_null("a").to_sql(), "a IS NOT NULL");
    }

    #[test]
    fn between_bounds() {
        let both = Condition::between("Age", Some("@lo".into()), Some("@hi".into()));
        assert_eq!(both.to_sql(), "Age BETWEEN @lo AND @hi");
        assert_eq!(Condition::between("Age", Some("@lo".into()), None).to_sql(), "Age>=@lo");
        assert_eq!(Condition::between("Age", None, Some("@hi".into())).to_sql(), "Age<=@hi");
        assert!(Condition::between("Age", None, None).is_empty());
    }

    #[test]
    fn and_or_composition() {
        let c = Condition::equal("a", "@a")
            .and(Condition::equal("b", "@b"))
            .or(Condition::equal("c", "@c"));
        assert_eq!(c.to_sql(), "((a=@a AND b=@b) OR c=@c)");

        let c = Condition::equal("a", "@a").and(Condition::equal("b", "@b").or(Condition::equal("c", "@c")));
        assert_eq!(c.to_sql(), "a=@a AND (b=@b OR c=@c)");
    }

    #[test]
    fn empty_parts_are_skipped() {
        let c = Condition::And(vec![]).and(Condition::equal("a", "@a"));
        assert_eq!(c, Condition::equal("a", "@a"));
        let c = Condition::equal("a", "@a").and(Condition::not_in("b", vec![]));
        assert_eq!(c.to_sql(), "a=@a");
    }

    #[test]
    fn like_values_get_wildcards() {
        assert_eq!(
            Operator::Contains.prepare_value(Value::from("bob")),
            Value::from("%bob%")
        );
        assert_eq!(Operator::Starts.prepare_value(Value::from("bob")), Value::from("bob%"));
        assert_eq!(Operator::Ends.prepare_value(Value::from("bob")), Value::from("%bob"));
        assert_eq!(Operator::Equal.prepare_value(Value::from("bob")), Value::from("bob"));
    }

    #[test]
    fn render_resolves_entity_columns() {
        let user = EntityDef::new("User", "users").with_columns(&[("Name", "user_name")]);
        let resolver = EntityResolver::new(Arc::new(MetadataRegistry::new().with(user)));
        let mut aliases = AliasRegister::new();
        let c = Condition::equal(SqlItem::qualified("User", "Name"), "@n")
            .and(Condition::is_null(SqlItem::parse("Age").unwrap()));
        assert_eq!(c.to_sql(), "User.Name=@n AND Age IS NULL");

        aliases.register("User", "u");
        let ctx = RenderContext::new(&SqlServerDialect, &aliases, &resolver);
        assert_eq!(c.render(&ctx), "[u].[user_name]=@n AND [Age] IS NULL");
    }
}
