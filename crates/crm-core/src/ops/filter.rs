//! Query filters
//!
//! Filters address records through their serialized field names. The
//! reserved field `id` addresses the store-assigned identifier.

use serde_json::Value;

/// Predicate over a record's serialized fields
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Matches every record
    All,
    /// Field equals value; a `null` value matches absent fields too
    Eq { field: String, value: Value },
    /// Field equals one of the (non-null) values
    In { field: String, values: Vec<Value> },
    /// Every inner filter matches
    And(Vec<Filter>),
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn is_in<I, V>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Filter::In {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Conjunction of `self` and `other`, flattening nested `And`s and dropping `All`
    pub fn and(self, other: Filter) -> Self {
        let mut parts = Vec::new();
        for f in [self, other] {
            match f {
                Filter::All => {}
                Filter::And(inner) => parts.extend(inner),
                f => parts.push(f),
            }
        }
        match parts.len() {
            0 => Filter::All,
            1 => parts.remove(0),
            _ => Filter::And(parts),
        }
    }

    /// Evaluate against a serialized record
    pub fn matches(&self, row: &Value) -> bool {
        match self {
            Filter::All => true,
            Filter::Eq { field, value } => row.get(field).unwrap_or(&Value::Null) == value,
            Filter::In { field, values } => match row.get(field) {
                None | Some(Value::Null) => false,
                Some(v) => values.contains(v),
            },
            Filter::And(parts) => parts.iter().all(|f| f.matches(row)),
        }
    }

    /// Every field name the filter refers to
    pub fn fields(&self) -> Vec<&str> {
        match self {
            Filter::All => Vec::new(),
            Filter::Eq { field, .. } | Filter::In { field, .. } => vec![field.as_str()],
            Filter::And(parts) => parts.iter().flat_map(|f| f.fields()).collect(),
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Filter::All => f.write_str("*"),
            Filter::Eq { field, value } => write!(f, "{} = {}", field, value),
            Filter::In { field, values } => {
                write!(f, "{} IN (", field)?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                f.write_str(")")
            }
            Filter::And(parts) => {
                for (i, p) in parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" AND ")?;
                    }
                    write!(f, "{}", p)?;
                }
                Ok(())
            }
        }
    }
}

/// A filter plus an optional result-size limit
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub filter: Filter,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new(filter: Filter) -> Self {
        Self {
            filter,
            limit: None,
        }
    }

    /// Every record of a kind
    pub fn all() -> Self {
        Self::new(Filter::All)
    }

    /// The record with the given id
    pub fn by_id(id: &crm_core_types::RecordId) -> Self {
        Self::new(Filter::eq("id", id.as_str()))
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_eq_is_case_sensitive() {
        let row = json!({ "name": "Acme" });
        assert!(Filter::eq("name", "Acme").matches(&row));
        assert!(!Filter::eq("name", "acme").matches(&row));
    }

    #[test]
    fn test_eq_null_matches_missing_field() {
        let row = json!({ "name": "Acme" });
        assert!(Filter::eq("industry", Value::Null).matches(&row));
    }

    #[test]
    fn test_in_ignores_null() {
        let row = json!({ "name": null });
        assert!(!Filter::is_in("name", vec![Value::Null]).matches(&row));

        let row = json!({ "name": "B" });
        assert!(Filter::is_in("name", ["A", "B"]).matches(&row));
        assert!(!Filter::is_in("name", Vec::<String>::new()).matches(&row));
    }

    #[test]
    fn test_and_flattens() {
        let f = Filter::All
            .and(Filter::eq("a", 1))
            .and(Filter::eq("b", 2).and(Filter::eq("c", 3)));

        match &f {
            Filter::And(parts) => assert_eq!(parts.len(), 3),
            other => panic!("Expected And, got {:?}", other),
        }
        assert_eq!(f.fields(), vec!["a", "b", "c"]);
        assert_eq!(Filter::All.and(Filter::All), Filter::All);
    }

    #[test]
    fn test_display() {
        let f = Filter::eq("account_id", "001x").and(Filter::is_in("name", ["A", "B"]));
        assert_eq!(f.to_string(), r#"account_id = "001x" AND name IN ("A", "B")"#);
    }
}
