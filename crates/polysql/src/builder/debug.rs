//! Debug SQL: parameters inlined as literals.

use crate::dialect::Dialect;
use crate::error::{SqlError, SqlResult};
use crate::value::Value;
use regex::{Captures, Regex};
use std::collections::BTreeMap;

/// Replace every parameter marker in `sql` with the literal of its value.
///
/// All markers are matched by one alternation (longest name first, each ending
/// on a word boundary), so `@_p_1` never matches inside `@_p_10` and text
/// produced by a substitution is never scanned again.
pub(super) fn inline_params(
    sql: &str,
    params: &BTreeMap<String, Value>,
    dialect: &dyn Dialect,
) -> SqlResult<String> {
    if params.is_empty() {
        return Ok(sql.to_string());
    }

    let mut names: Vec<&str> = params.keys().map(String::as_str).collect();
    names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    let pattern = names
        .iter()
        .map(|name| format!(r"{}\b", regex::escape(name)))
        .collect::<Vec<_>>()
        .join("|");
    let re = Regex::new(&pattern)
        .map_err(|e| SqlError::Consistency(format!("invalid parameter pattern: {e}")))?;

    let inlined = re.replace_all(sql, |caps: &Captures<'_>| {
        let marker = &caps[0];
        params
            .get(marker)
            .map(|value| dialect.render_literal(value))
            .unwrap_or_else(|| marker.to_string())
    });
    Ok(inlined.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{OracleDialect, SqlServerDialect};

    fn params(entries: &[(&str, Value)]) -> BTreeMap<String, Value> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn replaces_whole_markers_only() {
        let params = params(&[("@_p_1", Value::from(1)), ("@_p_10", Value::from(10))]);
        let sql = "a=@_p_1 AND b=@_p_10 AND c=@_p_100";
        assert_eq!(
            inline_params(sql, &params, &SqlServerDialect).unwrap(),
            "a=1 AND b=10 AND c=@_p_100"
        );
    }

    #[test]
    fn substituted_text_is_not_rescanned() {
        let params = params(&[("@a", Value::from("@b")), ("@b", Value::from(2))]);
        assert_eq!(
            inline_params("x=@a AND y=@b", &params, &SqlServerDialect).unwrap(),
            "x='@b' AND y=2"
        );
    }

    #[test]
    fn oracle_markers() {
        let params = params(&[(":Name", Value::from("O'Neil"))]);
        assert_eq!(
            inline_params("Name=:Name", &params, &OracleDialect).unwrap(),
            "Name='O''Neil'"
        );
    }

    #[test]
    fn no_params_is_identity() {
        let sql = "SELECT 1";
        assert_eq!(
            inline_params(sql, &BTreeMap::new(), &SqlServerDialect).unwrap(),
            sql
        );
    }
}
