//! Filter to SQL translation
//!
//! Record fields live in the JSON `body` column and are addressed with
//! `json_extract`. The reserved field `id` maps to the indexed id column.
//! An `IN` list binds as one JSON array expanded with `json_each`, so the
//! number of keys is not bounded by SQLite's variable limit.

use crm_core::errors::{CrmError, Result};
use crm_core::Filter;
use rusqlite::types::Value as SqlValue;
use serde_json::Value;

/// A WHERE clause with its positional parameters
#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

/// Compile a filter into a WHERE clause
///
/// # Errors
///
/// Returns `InvalidFilter` for field names that are not plain identifiers and
/// for values that are arrays or objects.
pub fn compile(filter: &Filter) -> Result<WhereClause> {
    let mut clause = WhereClause {
        sql: String::new(),
        params: Vec::new(),
    };
    write_filter(filter, &mut clause)?;
    Ok(clause)
}

fn write_filter(filter: &Filter, out: &mut WhereClause) -> Result<()> {
    match filter {
        Filter::All => out.sql.push('1'),
        Filter::Eq { field, value } => {
            let column = column_expr(field)?;
            if value.is_null() {
                out.sql.push_str(&format!("{} IS NULL", column));
            } else {
                out.params.push(to_sql_value(field, value)?);
                out.sql.push_str(&format!("{} = ?", column));
            }
        }
        Filter::In { field, values } => {
            let column = column_expr(field)?;
            let mut members = Vec::new();
            for value in values.iter().filter(|v| !v.is_null()) {
                to_sql_value(field, value)?;
                members.push(value.clone());
            }
            if members.is_empty() {
                out.sql.push('0');
            } else {
                out.params.push(SqlValue::Text(Value::Array(members).to_string()));
                out.sql.push_str(&format!("{} IN (SELECT value FROM json_each(?))", column));
            }
        }
        Filter::And(parts) => {
            if parts.is_empty() {
                out.sql.push('1');
            }
            for (i, part) in parts.iter().enumerate() {
                if i > 0 {
                    out.sql.push_str(" AND ");
                }
                out.sql.push('(');
                write_filter(part, out)?;
                out.sql.push(')');
            }
        }
    }
    Ok(())
}

fn column_expr(field: &str) -> Result<String> {
    if field == "id" {
        return Ok("id".to_string());
    }

    let mut chars = field.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(CrmError::InvalidFilter {
            reason: format!("field name {:?} is not an identifier", field),
        });
    }

    Ok(format!("json_extract(body, '$.{}')", field))
}

fn to_sql_value(field: &str, value: &Value) -> Result<SqlValue> {
    match value {
        Value::String(s) => Ok(SqlValue::Text(s.clone())),
        Value::Bool(b) => Ok(SqlValue::Integer(i64::from(*b))),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => Ok(SqlValue::Integer(i)),
            (None, Some(f)) => Ok(SqlValue::Real(f)),
            _ => Err(CrmError::InvalidFilter {
                reason: format!("number {} for field {} is out of range", n, field),
            }),
        },
        Value::Null => Ok(SqlValue::Null),
        Value::Array(_) | Value::Object(_) => Err(CrmError::InvalidFilter {
            reason: format!("field {} cannot be compared with {}", field, value),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all() {
        assert_eq!(compile(&Filter::All).unwrap().sql, "1");
    }

    #[test]
    fn test_id_uses_column() {
        let clause = compile(&Filter::eq("id", "001a")).unwrap();
        assert_eq!(clause.sql, "id = ?");
        assert_eq!(clause.params, vec![SqlValue::Text("001a".to_string())]);
    }

    #[test]
    fn test_eq_null_is_null_check() {
        let clause = compile(&Filter::eq("industry", Value::Null)).unwrap();
        assert_eq!(clause.sql, "json_extract(body, '$.industry') IS NULL");
        assert!(clause.params.is_empty());
    }

    #[test]
    fn test_in_skips_nulls_and_handles_empty() {
        let clause = compile(&Filter::is_in("name", vec![Value::Null, "A".into()])).unwrap();
        assert_eq!(
            clause.sql,
            "json_extract(body, '$.name') IN (SELECT value FROM json_each(?))"
        );
        assert_eq!(clause.params, vec![SqlValue::Text(r#"["A"]"#.to_string())]);

        let clause = compile(&Filter::is_in("name", Vec::<String>::new())).unwrap();
        assert_eq!(clause.sql, "0");
    }

    #[test]
    fn test_and_is_parenthesized() {
        let filter = Filter::eq("account_id", "001a").and(Filter::is_in("name", ["A", "B"]));
        let clause = compile(&filter).unwrap();
        assert_eq!(
            clause.sql,
            "(json_extract(body, '$.account_id') = ?) AND \
             (json_extract(body, '$.name') IN (SELECT value FROM json_each(?)))"
        );
        assert_eq!(clause.params.len(), 2);
    }

    #[test]
    fn test_in_binds_one_parameter_for_any_list_size() {
        let keys: Vec<String> = (0..40_000).map(|i| format!("Key {}", i)).collect();
        let clause = compile(&Filter::is_in("name", keys)).unwrap();
        assert_eq!(clause.params.len(), 1);

        let nested = compile(&Filter::is_in("name", vec![serde_json::json!(["A"])]));
        assert!(matches!(nested, Err(CrmError::InvalidFilter { .. })));
    }

    #[test]
    fn test_rejects_injection_in_field_name() {
        let result = compile(&Filter::eq("name') OR 1=1 --", "x"));
        assert!(matches!(result, Err(CrmError::InvalidFilter { .. })));
    }
}
