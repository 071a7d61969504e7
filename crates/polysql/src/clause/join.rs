use super::{RenderContext, TableRef};
use crate::condition::Condition;

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinKind {
    #[default]
    Inner,
    Left,
    Right,
    Full,
}

impl JoinKind {
    fn to_sql(self) -> &'static str {
        match self {
            JoinKind::Inner => "JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Full => "FULL OUTER JOIN",
        }
    }
}

/// One joined table with its ON predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinItem {
    Table {
        kind: JoinKind,
        table: TableRef,
        on: Condition,
    },
    /// Raw join SQL (`INNER JOIN x ON ...`), emitted unchanged.
    Raw(String),
}

impl JoinItem {
    fn to_sql(&self, ctx: &RenderContext<'_>) -> String {
        match self {
            JoinItem::Table { kind, table, on } => {
                let mut sql = format!("{} {}", kind.to_sql(), table.to_sql(ctx));
                let on = on.render(ctx);
                if !on.is_empty() {
                    sql.push_str(" ON ");
                    sql.push_str(&on);
                }
                sql
            }
            JoinItem::Raw(sql) => sql.trim().to_string(),
        }
    }
}

/// Ordered list of joins, rendered in insertion order.
#[derive(Debug, Clone, Default)]
pub struct JoinClause {
    items: Vec<JoinItem>,
}

impl JoinClause {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new join; later [`on`](Self::on) calls attach to it.
    pub fn join(&mut self, kind: JoinKind, table: TableRef) -> &mut Self {
        self.items.push(JoinItem::Table {
            kind,
            table,
            on: Condition::And(Vec::new()),
        });
        self
    }

    /// AND `condition` into the ON predicate of the most recent join.
    ///
    /// Returns `false` when there is no join to attach to.
    pub fn on(&mut self, condition: Condition) -> bool {
        match self.items.last_mut() {
            Some(JoinItem::Table { on, .. }) => {
                let current = std::mem::replace(on, Condition::And(Vec::new()));
                *on = current.and(condition);
                true
            }
            _ => false,
        }
    }

    /// Append raw join SQL.
    pub fn append(&mut self, sql: &str) -> &mut Self {
        if !sql.trim().is_empty() {
            self.items.push(JoinItem::Raw(sql.to_string()));
        }
        self
    }

    pub fn items(&self) -> &[JoinItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Render one line per join.
    pub fn to_sql(&self, ctx: &RenderContext<'_>) -> String {
        self.items
            .iter()
            .map(|item| item.to_sql(ctx))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
