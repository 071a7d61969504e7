//! Column and table references.
//!
//! [`SqlItem`] is the structured form of a reference such as `u.Name AS n`:
//! an optional prefix (table alias or schema), a name, and an optional alias.
//! Quoting is deferred to render time so the same item renders correctly for
//! any [`Dialect`].
//!
//! Anything that does not look like a plain (dotted) identifier, e.g.
//! `COUNT(*)` or `a + b`, is kept as a raw expression and emitted unchanged.
//!
//! # Example
//! ```rust
//! use polysql::ident::SqlItem;
//! use polysql::dialect::SqlServerDialect;
//!
//! let item = SqlItem::parse("u.Name as UserName")?;
//! assert_eq!(item.to_sql(&SqlServerDialect), "[u].[Name] AS [UserName]");
//! # Ok::<(), polysql::SqlError>(())
//! ```

use crate::alias::AliasRegister;
use crate::dialect::Dialect;
use crate::error::{SqlError, SqlResult};
use std::fmt;

/// A parsed column or table reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlItem {
    prefix: Option<String>,
    name: String,
    alias: Option<String>,
    raw: bool,
}

impl SqlItem {
    /// Parse `prefix.name [AS alias]`, falling back to a raw expression.
    pub fn parse(text: &str) -> SqlResult<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SqlError::argument("SQL item cannot be empty"));
        }

        let (body, alias) = split_alias(text);
        if body.is_empty() {
            return Err(SqlError::argument(format!("invalid SQL item '{text}'")));
        }

        if is_expression(body) {
            return Ok(Self {
                prefix: None,
                name: body.to_string(),
                alias,
                raw: true,
            });
        }

        let (prefix, name) = match body.rfind('.') {
            Some(idx) if !ends_in_quotes(body, idx) => {
                (Some(body[..idx].to_string()), body[idx + 1..].to_string())
            }
            _ => (None, body.to_string()),
        };
        if name.is_empty() || prefix.as_deref() == Some("") {
            return Err(SqlError::argument(format!("invalid SQL item '{text}'")));
        }

        Ok(Self {
            prefix,
            name,
            alias,
            raw: false,
        })
    }

    /// A raw expression, emitted as-is.
    pub fn raw(expr: impl Into<String>) -> Self {
        Self {
            prefix: None,
            name: expr.into(),
            alias: None,
            raw: true,
        }
    }

    /// A column qualified by a table alias.
    pub fn qualified(prefix: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            name: name.into(),
            alias: None,
            raw: false,
        }
    }

    /// Attach an output alias.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// The prefix (table alias/schema), if any.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// The bare name (or the expression text for raw items).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The output alias, if any.
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Whether this item is a raw expression.
    pub fn is_raw(&self) -> bool {
        self.raw
    }

    /// Render with the dialect's quoting.
    pub fn to_sql(&self, dialect: &dyn Dialect) -> String {
        self.render(dialect, None)
    }

    /// Render, replacing a prefix that names a registered entity with its alias.
    pub fn to_sql_with(&self, dialect: &dyn Dialect, aliases: &AliasRegister) -> String {
        self.render(dialect, Some(aliases))
    }

    fn render(&self, dialect: &dyn Dialect, aliases: Option<&AliasRegister>) -> String {
        let mut out = if self.raw {
            self.name.clone()
        } else {
            let name = dialect.quote_name(&self.name);
            match self.prefix.as_deref() {
                Some(prefix) => {
                    let prefix = aliases
                        .and_then(|a| a.get(prefix))
                        .unwrap_or(prefix);
                    format!("{}.{}", dialect.quote_identifier(prefix), name)
                }
                None => name,
            }
        };
        if let Some(alias) = &self.alias {
            out.push_str(" AS ");
            out.push_str(&dialect.quote_name(alias));
        }
        out
    }
}

impl fmt::Display for SqlItem {
    /// The reference as written, without dialect quoting.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.prefix, self.raw) {
            (Some(prefix), false) => write!(f, "{prefix}.{}", self.name)?,
            _ => f.write_str(&self.name)?,
        }
        if let Some(alias) = &self.alias {
            write!(f, " AS {alias}")?;
        }
        Ok(())
    }
}

impl From<&str> for SqlItem {
    fn from(sql: &str) -> Self {
        SqlItem::raw(sql.trim())
    }
}

impl From<String> for SqlItem {
    fn from(sql: String) -> Self {
        SqlItem::raw(sql.trim())
    }
}

/// Split a comma-separated list, ignoring commas inside parentheses or quotes.
///
/// Empty entries are dropped.
pub fn split_list(text: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, ch) in text.char_indices() {
        match (quote, ch) {
            (None, '[') => quote = Some(']'),
            (None, '"') | (None, '`') | (None, '\'') => quote = Some(ch),
            (Some(close), c) if c == close => quote = None,
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                items.push(text[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    items.push(text[start..].trim());
    items.retain(|s| !s.is_empty());
    items
}

/// Split a trailing `AS alias` (case-insensitive) off an item.
fn split_alias(text: &str) -> (&str, Option<String>) {
    let lower = text.to_ascii_lowercase();
    match lower.rfind(" as ") {
        Some(idx) => {
            let alias = text[idx + 4..].trim();
            let body = text[..idx].trim();
            // `CAST(x AS int)` keeps its AS: the alias must be a single bare word.
            if alias.is_empty() || alias.contains(|c: char| c.is_whitespace() || c == ')') {
                (text, None)
            } else {
                (body, Some(alias.to_string()))
            }
        }
        None => (text, None),
    }
}

fn is_expression(body: &str) -> bool {
    let mut quote: Option<char> = None;
    for ch in body.chars() {
        match (quote, ch) {
            (None, '[') => quote = Some(']'),
            (None, '"') | (None, '`') => quote = Some(ch),
            (Some(close), c) if c == close => quote = None,
            (None, c) if !(c.is_alphanumeric() || c == '_' || c == '.' || c == '$' || c == '*') => {
                return true;
            }
            _ => {}
        }
    }
    false
}

/// `true` when the dot at `idx` sits inside a quoted part.
fn ends_in_quotes(body: &str, idx: usize) -> bool {
    let before = &body[..idx];
    let opens = before.matches('[').count();
    let closes = before.matches(']').count();
    opens > closes || before.matches('"').count() % 2 == 1 || before.matches('`').count() % 2 == 1
}
