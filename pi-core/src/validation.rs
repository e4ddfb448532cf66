//! Syntax checks shared by the generators
//!
//! These mirror the checks the API server performs so that bad input fails
//! before anything is sent.
use crate::{Error, Result};
use std::{fmt, net::IpAddr, ops::RangeInclusive, str::FromStr};

/// Maximum length of a DNS-1123 subdomain and of an object name
pub const DNS1123_SUBDOMAIN_MAX_LENGTH: usize = 253;
/// Maximum length of a single DNS-1123 label
pub const DNS1123_LABEL_MAX_LENGTH: usize = 63;
/// Maximum length of an IANA service name (a named target port)
pub const IANA_SVC_NAME_MAX_LENGTH: usize = 15;

fn is_lower_alnum(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit()
}

/// Check an object name for kinds that do not allow dots
///
/// Lowercase alphanumerics and `-`, at most 253 characters, starting and
/// ending with an alphanumeric character.
pub fn validate_name(field: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::validation(field, "is required"));
    }
    if name.len() > DNS1123_SUBDOMAIN_MAX_LENGTH {
        return Err(Error::validation(
            field,
            format!("{name:?} must be no more than {DNS1123_SUBDOMAIN_MAX_LENGTH} characters"),
        ));
    }
    if !label_chars_ok(name) {
        return Err(Error::validation(
            field,
            format!(
                "{name:?} must consist of lower case alphanumeric characters or '-', \
                 and must start and end with an alphanumeric character"
            ),
        ));
    }
    Ok(())
}

/// Check that `value` fits in a label value
///
/// Label values are limited to 63 characters; callers stamping a name into a
/// label check it here in addition to the name rules.
pub fn validate_label_value(field: &str, value: &str) -> Result<()> {
    if value.len() > DNS1123_LABEL_MAX_LENGTH {
        return Err(Error::validation(
            field,
            format!("{value:?} must be no more than {DNS1123_LABEL_MAX_LENGTH} characters to be used as a label value"),
        ));
    }
    Ok(())
}

/// Check an object name for kinds that accept a DNS-1123 subdomain
pub fn validate_subdomain_name(field: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::validation(field, "is required"));
    }
    subdomain_problem(name).map_or(Ok(()), |reason| Err(Error::validation(field, reason)))
}

/// Check that `value` is a syntactically valid DNS hostname
///
/// Dot-separated labels of at most 63 lowercase alphanumerics or `-`,
/// each starting and ending alphanumeric, at most 253 characters overall.
pub fn validate_dns_name(value: &str) -> Result<()> {
    match subdomain_problem(value) {
        None => Ok(()),
        Some(reason) => Err(Error::InvalidDnsName {
            value: value.to_string(),
            reason,
        }),
    }
}

fn label_chars_ok(label: &str) -> bool {
    let starts = label.chars().next().is_some_and(is_lower_alnum);
    let ends = label.chars().last().is_some_and(is_lower_alnum);
    starts && ends && label.chars().all(|c| is_lower_alnum(c) || c == '-')
}

fn subdomain_problem(value: &str) -> Option<String> {
    if value.is_empty() {
        return Some("must not be empty".into());
    }
    if value.len() > DNS1123_SUBDOMAIN_MAX_LENGTH {
        return Some(format!(
            "must be no more than {DNS1123_SUBDOMAIN_MAX_LENGTH} characters"
        ));
    }
    for label in value.split('.') {
        if label.len() > DNS1123_LABEL_MAX_LENGTH {
            return Some(format!(
                "label {label:?} must be no more than {DNS1123_LABEL_MAX_LENGTH} characters"
            ));
        }
        if !label_chars_ok(label) {
            return Some(format!(
                "label {label:?} must consist of lower case alphanumeric characters or '-', \
                 and must start and end with an alphanumeric character"
            ));
        }
    }
    None
}

/// Check a service IP field: `None` for headless, empty for unset, otherwise an IP literal
///
/// Returns the value to store in the object.
pub fn validate_service_ip(field: &str, value: &str) -> Result<Option<String>> {
    match value {
        "" => Ok(None),
        "None" => Ok(Some(value.to_string())),
        ip => parse_ip(field, ip).map(|_| Some(ip.to_string())),
    }
}

/// Parse an IPv4 or IPv6 literal
pub fn parse_ip(field: &str, value: &str) -> Result<IpAddr> {
    value.parse().map_err(|_| Error::InvalidIp {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Check a named target port: an IANA service name
pub fn is_iana_svc_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= IANA_SVC_NAME_MAX_LENGTH
        && name.chars().all(|c| is_lower_alnum(c) || c == '-')
        && name.chars().any(|c| c.is_ascii_lowercase())
        && !name.starts_with('-')
        && !name.ends_with('-')
        && !name.contains("--")
}

/// Check a ConfigMap or Secret data key
pub fn validate_config_key(field: &str, key: &str) -> Result<()> {
    let ok = !key.is_empty()
        && key.len() <= DNS1123_SUBDOMAIN_MAX_LENGTH
        && key.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        && key != "."
        && key != ".."
        && !key.starts_with("..");
    if ok {
        Ok(())
    } else {
        Err(Error::validation(
            field,
            format!("{key:?} is not a valid key: must consist of alphanumeric characters, '-', '_' or '.'"),
        ))
    }
}

/// An inclusive range of node ports the cluster accepts
///
/// Parsed from `low-high`, e.g. `30000-32767`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodePortRange(RangeInclusive<i32>);

impl NodePortRange {
    /// Create a range from inclusive bounds
    pub fn new(low: i32, high: i32) -> Self {
        Self(low..=high)
    }

    /// Whether `port` lies within the range
    pub fn contains(&self, port: i64) -> bool {
        i32::try_from(port).is_ok_and(|p| self.0.contains(&p))
    }
}

impl fmt::Display for NodePortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.0.start(), self.0.end())
    }
}

impl FromStr for NodePortRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::validation("node-port-range", format!("{s:?} is not of the form low-high"));
        let (low, high) = s.split_once('-').ok_or_else(invalid)?;
        let low: i32 = low.trim().parse().map_err(|_| invalid())?;
        let high: i32 = high.trim().parse().map_err(|_| invalid())?;
        if low < 1 || high > 65535 || low > high {
            return Err(invalid());
        }
        Ok(Self::new(low, high))
    }
}

/// Check a requested node port; `0` asks the cluster to allocate one
///
/// Returns the port to store, if any.
pub fn validate_node_port(port: i64, range: Option<&NodePortRange>) -> Result<Option<i32>> {
    if port == 0 {
        return Ok(None);
    }
    if !(1..=65535).contains(&port) {
        return Err(Error::InvalidNodePort {
            port,
            reason: "must be between 1 and 65535".into(),
        });
    }
    if let Some(range) = range {
        if !range.contains(port) {
            return Err(Error::InvalidNodePort {
                port,
                reason: format!("must be within the node port range {range}"),
            });
        }
    }
    // range checked above
    Ok(Some(port as i32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        for (name, ok, msg) in &[
            ("my-cs", true, "dashed name"),
            ("a", true, "single char"),
            ("0abc9", true, "digits at edges"),
            ("", false, "empty"),
            ("-abc", false, "leading dash"),
            ("abc-", false, "trailing dash"),
            ("My-cs", false, "uppercase"),
            ("my.cs", false, "dots"),
            ("my_cs", false, "underscore"),
        ] {
            assert_eq!(validate_name("name", name).is_ok(), *ok, "{msg}");
        }
        assert!(validate_name("name", &"a".repeat(253)).is_ok());
        assert!(validate_name("name", &"a".repeat(254)).is_err());
    }

    #[test]
    fn label_values() {
        assert!(validate_label_value("name", "").is_ok());
        assert!(validate_label_value("name", &"a".repeat(63)).is_ok());
        let err = validate_label_value("name", &"a".repeat(64)).unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "name"));
    }

    #[test]
    fn name_errors_name_the_field() {
        let err = validate_name("name", "Bad").unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "name"));
    }

    #[test]
    fn dns_names() {
        for (value, ok, msg) in &[
            ("bar.com", true, "two labels"),
            ("a-b.c-d.example", true, "dashed labels"),
            ("localhost", true, "single label"),
            ("bad_name!", false, "punctuation"),
            ("Bar.com", false, "uppercase"),
            ("bar..com", false, "empty label"),
            ("bar.com.", false, "trailing dot"),
            ("-bar.com", false, "leading dash"),
            ("", false, "empty"),
        ] {
            assert_eq!(validate_dns_name(value).is_ok(), *ok, "{msg}");
        }
        let long_label = format!("{}.com", "a".repeat(64));
        assert!(validate_dns_name(&long_label).is_err());
        let long_name = vec!["a".repeat(63); 4].join(".");
        assert_eq!(long_name.len(), 255);
        assert!(matches!(
            validate_dns_name(&long_name),
            Err(Error::InvalidDnsName { .. })
        ));
    }

    #[test]
    fn service_ips() {
        assert_eq!(validate_service_ip("clusterip", "").unwrap(), None);
        assert_eq!(validate_service_ip("clusterip", "None").unwrap(), Some("None".into()));
        assert_eq!(
            validate_service_ip("clusterip", "10.0.0.1").unwrap(),
            Some("10.0.0.1".into())
        );
        assert_eq!(validate_service_ip("clusterip", "fd00::1").unwrap(), Some("fd00::1".into()));
        assert_eq!(validate_service_ip("clusterip", "10.0.0.256").unwrap_err(), Error::InvalidIp {
            field: "clusterip".into(),
            value: "10.0.0.256".into(),
        });
        assert!(validate_service_ip("clusterip", "none").is_err());
    }

    #[test]
    fn iana_names() {
        for (name, ok) in &[
            ("http", true),
            ("http-alt", true),
            ("h2c", true),
            ("8080", false),
            ("-http", false),
            ("http-", false),
            ("ht--tp", false),
            ("HTTP", false),
            ("averyveryverylongname", false),
        ] {
            assert_eq!(is_iana_svc_name(name), *ok, "{name}");
        }
    }

    #[test]
    fn config_keys() {
        assert!(validate_config_key("from-literal", "app.properties").is_ok());
        assert!(validate_config_key("from-literal", "KEY_1-x").is_ok());
        assert!(validate_config_key("from-literal", "..hidden").is_err());
        assert!(validate_config_key("from-literal", "a/b").is_err());
        assert!(validate_config_key("from-literal", "").is_err());
    }

    #[test]
    fn node_ports() {
        let range: NodePortRange = "30000-32767".parse().unwrap();
        assert_eq!(range.to_string(), "30000-32767");
        assert_eq!(validate_node_port(0, Some(&range)).unwrap(), None);
        assert_eq!(validate_node_port(30080, Some(&range)).unwrap(), Some(30080));
        assert_eq!(validate_node_port(8080, None).unwrap(), Some(8080));
        assert!(matches!(
            validate_node_port(8080, Some(&range)),
            Err(Error::InvalidNodePort { port: 8080, .. })
        ));
        assert!(matches!(
            validate_node_port(-1, None),
            Err(Error::InvalidNodePort { port: -1, .. })
        ));
        assert!(matches!(
            validate_node_port(70000, None),
            Err(Error::InvalidNodePort { port: 70000, .. })
        ));
    }

    #[test]
    fn node_port_range_parsing() {
        assert!("32767-30000".parse::<NodePortRange>().is_err());
        assert!("0-100".parse::<NodePortRange>().is_err());
        assert!("30000".parse::<NodePortRange>().is_err());
        assert!("a-b".parse::<NodePortRange>().is_err());
        assert_eq!("1-65535".parse::<NodePortRange>().unwrap(), NodePortRange::new(1, 65535));
    }
}
