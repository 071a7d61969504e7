use super::RenderContext;
use crate::condition::Condition;

/// WHERE predicate.
///
/// Columns resolve against the context passed at render time, so a predicate
/// added before FROM/JOIN still picks up the aliases registered later.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WhereClause {
    condition: Condition,
}

impl WhereClause {
    pub fn new() -> Self {
        Self::default()
    }

    /// AND a condition into the predicate.
    pub fn and(&mut self, condition: Condition) -> &mut Self {
        let current = std::mem::take(&mut self.condition);
        self.condition = current.and(condition);
        self
    }

    /// OR a condition with the whole current predicate.
    pub fn or(&mut self, condition: Condition) -> &mut Self {
        let current = std::mem::take(&mut self.condition);
        self.condition = current.or(condition);
        self
    }

    /// AND a raw SQL predicate.
    pub fn append(&mut self, sql: &str) -> &mut Self {
        self.and(Condition::raw(sql))
    }

    pub fn is_empty(&self) -> bool {
        self.condition.is_empty()
    }

    /// The predicate without the `WHERE` keyword.
    pub fn condition(&self, ctx: &RenderContext<'_>) -> String {
        self.condition.render(ctx)
    }

    /// Structured access to the predicate.
    pub fn predicate(&self) -> &Condition {
        &self.condition
    }

    /// Render `WHERE ...`; empty when no predicate was added.
    pub fn to_sql(&self, ctx: &RenderContext<'_>) -> String {
        let condition = self.condition(ctx);
        if condition.is_empty() {
            return String::new();
        }
        format!("WHERE {condition}")
    }
}
