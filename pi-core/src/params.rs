//! Flag-level input handed to generators
use crate::{Error, Result};
use std::collections::BTreeMap;

/// A single parameter value as extracted from the command line
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamValue {
    /// A scalar string flag or positional argument
    Str(String),
    /// An integer flag
    Int(i64),
    /// A repeatable string flag
    List(Vec<String>),
    /// Pre-split key/value pairs
    Pairs(Vec<(String, String)>),
}

impl ParamValue {
    fn variant(&self) -> &'static str {
        match self {
            ParamValue::Str(_) => "a string",
            ParamValue::Int(_) => "an integer",
            ParamValue::List(_) => "a list",
            ParamValue::Pairs(_) => "key/value pairs",
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        ParamValue::List(value)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(value: Vec<&str>) -> Self {
        ParamValue::List(value.into_iter().map(String::from).collect())
    }
}

impl From<Vec<(String, String)>> for ParamValue {
    fn from(value: Vec<(String, String)>) -> Self {
        ParamValue::Pairs(value)
    }
}

/// Named parameters for one generator invocation
///
/// Built once by the command tree with [`GeneratorParams::with`], then only read.
/// Keys are the flag names (`name`, `tcp`, `clusterip`, `node-port`, ...).
///
/// ```
/// use pi_core::GeneratorParams;
/// let params = GeneratorParams::new()
///     .with("name", "my-cs")
///     .with("tcp", vec!["5678:8080"]);
/// assert_eq!(params.str("name").unwrap(), Some("my-cs"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GeneratorParams(BTreeMap<String, ParamValue>);

impl GeneratorParams {
    /// Create an empty set of parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any previous value for the key
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    /// Set a parameter only when a value is present
    #[must_use]
    pub fn with_opt<V: Into<ParamValue>>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.with(key, v),
            None => self,
        }
    }

    /// Raw access to a parameter
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    /// Iterate over all parameters in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// A string parameter, if set
    pub fn str(&self, key: &str) -> Result<Option<&str>> {
        match self.get(key) {
            None => Ok(None),
            Some(ParamValue::Str(s)) => Ok(Some(s)),
            Some(other) => Err(wrong_type(key, "a string", other)),
        }
    }

    /// A string parameter that must be set and non-empty
    pub fn require_str(&self, key: &str) -> Result<&str> {
        match self.str(key)? {
            Some(s) if !s.is_empty() => Ok(s),
            _ => Err(Error::validation(key, "is required")),
        }
    }

    /// A string parameter, empty when unset
    pub fn str_or_empty(&self, key: &str) -> Result<&str> {
        Ok(self.str(key)?.unwrap_or_default())
    }

    /// An integer parameter, if set
    ///
    /// Numeric strings are accepted as well since some callers only deal in strings.
    pub fn int(&self, key: &str) -> Result<Option<i64>> {
        match self.get(key) {
            None => Ok(None),
            Some(ParamValue::Int(i)) => Ok(Some(*i)),
            Some(ParamValue::Str(s)) => s
                .parse()
                .map(Some)
                .map_err(|_| Error::validation(key, format!("{s:?} is not an integer"))),
            Some(other) => Err(wrong_type(key, "an integer", other)),
        }
    }

    /// A list parameter, empty when unset
    ///
    /// A scalar string is treated as a one element list.
    pub fn list(&self, key: &str) -> Result<Vec<String>> {
        match self.get(key) {
            None => Ok(vec![]),
            Some(ParamValue::List(l)) => Ok(l.clone()),
            Some(ParamValue::Str(s)) => Ok(vec![s.clone()]),
            Some(other) => Err(wrong_type(key, "a list", other)),
        }
    }

    /// Key/value pairs for a parameter, empty when unset
    ///
    /// Lists of `key=value` strings are split at the first `=`, so values may
    /// themselves contain `=`. Entries without a key and repeated keys are
    /// rejected with errors naming `key`.
    pub fn pairs(&self, key: &str) -> Result<Vec<(String, String)>> {
        let pairs = match self.get(key) {
            None => return Ok(vec![]),
            Some(ParamValue::Pairs(p)) => p.clone(),
            Some(ParamValue::List(l)) => l
                .iter()
                .map(|entry| {
                    split_literal(entry).ok_or_else(|| Error::InvalidKeyValue {
                        field: key.to_string(),
                        entry: entry.clone(),
                    })
                })
                .collect::<Result<_>>()?,
            Some(other) => return Err(wrong_type(key, "key/value pairs", other)),
        };
        for (i, (k, _)) in pairs.iter().enumerate() {
            if pairs[..i].iter().any(|(seen, _)| seen == k) {
                return Err(Error::DuplicateKey {
                    field: key.to_string(),
                    key: k.clone(),
                });
            }
        }
        Ok(pairs)
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for GeneratorParams {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Split `key=value` into exactly one non-empty key and a (possibly empty) value
pub(crate) fn split_key_value(entry: &str) -> Option<(String, String)> {
    let (key, value) = entry.split_once('=')?;
    if key.is_empty() || value.contains('=') {
        return None;
    }
    Some((key.to_string(), value.to_string()))
}

/// Split `key=value` at the first `=`, keeping any further `=` in the value
pub(crate) fn split_literal(entry: &str) -> Option<(String, String)> {
    let (key, value) = entry.split_once('=')?;
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), value.to_string()))
}

fn wrong_type(key: &str, expected: &str, got: &ParamValue) -> Error {
    Error::validation(key, format!("expected {expected}, got {}", got.variant()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_accessors() {
        let params = GeneratorParams::new()
            .with("name", "foo")
            .with("node-port", 30001i64)
            .with("tcp", vec!["80", "443:8443"])
            .with("empty", "");

        assert_eq!(params.str("name").unwrap(), Some("foo"));
        assert_eq!(params.require_str("name").unwrap(), "foo");
        assert_eq!(params.int("node-port").unwrap(), Some(30001));
        assert_eq!(params.list("tcp").unwrap(), vec!["80", "443:8443"]);
        assert_eq!(params.list("missing").unwrap(), Vec::<String>::new());
        assert_eq!(params.str("missing").unwrap(), None);
        assert_eq!(params.str_or_empty("missing").unwrap(), "");
        assert!(matches!(
            params.require_str("empty"),
            Err(Error::Validation { field, .. }) if field == "empty"
        ));
        assert!(matches!(
            params.require_str("missing"),
            Err(Error::Validation { field, .. }) if field == "missing"
        ));
    }

    #[test]
    fn wrong_variant_names_the_key() {
        let params = GeneratorParams::new().with("name", vec!["a", "b"]).with("port", "abc");
        assert!(matches!(
            params.str("name"),
            Err(Error::Validation { field, .. }) if field == "name"
        ));
        assert!(matches!(
            params.int("port"),
            Err(Error::Validation { field, .. }) if field == "port"
        ));
    }

    #[test]
    fn pairs_from_lists() {
        let params = GeneratorParams::new()
            .with("good", vec!["a=1", "b=", "c=x y", "token=YWJj==", "dsn=host=db"])
            .with("bad", vec!["a=1", "nokey"])
            .with("nameless", vec!["=1"])
            .with("dup", vec!["a=1", "a=2"]);
        assert_eq!(params.pairs("good").unwrap(), vec![
            ("a".to_string(), "1".to_string()),
            ("b".to_string(), "".to_string()),
            ("c".to_string(), "x y".to_string()),
            ("token".to_string(), "YWJj==".to_string()),
            ("dsn".to_string(), "host=db".to_string()),
        ]);
        assert_eq!(params.pairs("bad").unwrap_err(), Error::InvalidKeyValue {
            field: "bad".into(),
            entry: "nokey".into(),
        });
        assert_eq!(params.pairs("nameless").unwrap_err(), Error::InvalidKeyValue {
            field: "nameless".into(),
            entry: "=1".into(),
        });
        assert_eq!(params.pairs("dup").unwrap_err(), Error::DuplicateKey {
            field: "dup".into(),
            key: "a".into(),
        });
    }

    #[test]
    fn split_key_value_shapes() {
        for (entry, expected, msg) in &[
            ("a=b", Some(("a", "b")), "simple pair"),
            ("a=", Some(("a", "")), "empty value"),
            ("=b", None, "empty key"),
            ("ab", None, "no separator"),
            ("a=b=c", None, "two separators"),
        ] {
            let expected = expected.map(|(k, v)| (k.to_string(), v.to_string()));
            assert_eq!(split_key_value(entry), expected, "{msg}");
        }
    }

    #[test]
    fn split_literal_shapes() {
        for (entry, expected, msg) in &[
            ("a=b", Some(("a", "b")), "simple pair"),
            ("a=", Some(("a", "")), "empty value"),
            ("a=b=c", Some(("a", "b=c")), "separator in value"),
            ("token=YWJj==", Some(("token", "YWJj==")), "base64 padding"),
            ("=b", None, "empty key"),
            ("ab", None, "no separator"),
        ] {
            let expected = expected.map(|(k, v)| (k.to_string(), v.to_string()));
            assert_eq!(split_literal(entry), expected, "{msg}");
        }
    }
}
