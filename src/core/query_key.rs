use crate::domain::model::DatabaseType;
use std::fmt;

/// 查詢鍵的一段：字串、整數或空值（未指定的篩選條件）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyPart {
    Str(String),
    Int(i64),
    Null,
}

impl From<&str> for KeyPart {
    fn from(value: &str) -> Self {
        KeyPart::Str(value.to_string())
    }
}

impl From<i64> for KeyPart {
    fn from(value: i64) -> Self {
        KeyPart::Int(value)
    }
}

impl From<Option<i64>> for KeyPart {
    fn from(value: Option<i64>) -> Self {
        value.map(KeyPart::Int).unwrap_or(KeyPart::Null)
    }
}

impl From<DatabaseType> for KeyPart {
    fn from(value: DatabaseType) -> Self {
        KeyPart::Str(value.as_str().to_string())
    }
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyPart::Str(s) => write!(f, "{:?}", s),
            KeyPart::Int(i) => write!(f, "{}", i),
            KeyPart::Null => f.write_str("null"),
        }
    }
}

/// Composite cache key, e.g. `["campaigns", "postgres", 4]`.
///
/// Invalidation works on prefixes: `["campaigns", "postgres"]` matches every
/// campaigns query for that backend regardless of its filters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<KeyPart>);

impl QueryKey {
    pub fn new(scope: &str) -> Self {
        Self(vec![KeyPart::from(scope)])
    }

    pub fn with(mut self, part: impl Into<KeyPart>) -> Self {
        self.0.push(part.into());
        self
    }

    pub fn parts(&self) -> &[KeyPart] {
        &self.0
    }

    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", part)?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_matching() {
        let key = QueryKey::new("campaigns")
            .with(DatabaseType::Postgres)
            .with(Some(4i64));
        let prefix = QueryKey::new("campaigns").with(DatabaseType::Postgres);

        assert!(key.starts_with(&prefix));
        assert!(key.starts_with(&key));
        assert!(!prefix.starts_with(&key));
        assert!(!key.starts_with(&QueryKey::new("campaigns").with(DatabaseType::Duckdb)));
        assert!(!key.starts_with(&QueryKey::new("campaignApplications")));
    }

    #[test]
    fn test_display() {
        let key = QueryKey::new("applications")
            .with(DatabaseType::Scylla)
            .with(None::<i64>)
            .with(7i64);
        assert_eq!(key.to_string(), r#"["applications", "scylla", null, 7]"#);
    }
}
