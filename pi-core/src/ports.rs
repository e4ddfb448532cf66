//! Parsing of `port[:targetPort][/protocol]` specs
use crate::{validation::is_iana_svc_name, Error, Result};
use k8s_openapi::{api::core::v1::ServicePort, apimachinery::pkg::util::intstr::IntOrString};
use std::{fmt, str::FromStr};

/// Transport protocol of a service port
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Protocol {
    /// TCP, the default
    #[default]
    Tcp,
    /// UDP
    Udp,
}

impl Protocol {
    /// The name the API uses for this protocol
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Tcp => "TCP",
            Protocol::Udp => "UDP",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("tcp") {
            Ok(Protocol::Tcp)
        } else if s.eq_ignore_ascii_case("udp") {
            Ok(Protocol::Udp)
        } else {
            Err(format!("unsupported protocol {s:?}, must be TCP or UDP"))
        }
    }
}

/// An exposed port and where traffic for it is sent
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortPair {
    /// The port exposed by the service
    pub port: i32,
    /// The port (or named container port) traffic is forwarded to
    pub target_port: IntOrString,
    /// Transport protocol
    pub protocol: Protocol,
}

impl PortPair {
    /// The port name used in generated services: `<port>-<target>`, suffixed for non-TCP
    pub fn name(&self) -> String {
        let target = match &self.target_port {
            IntOrString::Int(i) => i.to_string(),
            IntOrString::String(s) => s.clone(),
        };
        match self.protocol {
            Protocol::Tcp => format!("{}-{target}", self.port),
            other => format!("{}-{target}-{}", self.port, other.as_str().to_ascii_lowercase()),
        }
    }
}

impl From<PortPair> for ServicePort {
    fn from(pair: PortPair) -> Self {
        ServicePort {
            name: Some(pair.name()),
            port: pair.port,
            target_port: Some(pair.target_port),
            protocol: Some(pair.protocol.as_str().to_string()),
            ..ServicePort::default()
        }
    }
}

impl FromStr for PortPair {
    type Err = Error;

    fn from_str(spec: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidPortSpec {
            spec: spec.to_string(),
            reason: reason.to_string(),
        };

        let (ports, protocol) = match spec.split_once('/') {
            None => (spec, Protocol::default()),
            Some((_, proto)) if proto.contains('/') => {
                return Err(invalid("at most one /protocol suffix is allowed"))
            }
            Some((ports, proto)) => (ports, proto.parse().map_err(|e: String| invalid(&e))?),
        };

        let mut parts = ports.split(':');
        let port = match parts.next() {
            Some("") | None => return Err(invalid("missing port")),
            Some(p) => parse_port_number(p).ok_or_else(|| invalid("port must be a number between 1 and 65535"))?,
        };
        let target_port = match parts.next() {
            None => IntOrString::Int(port),
            Some("") => return Err(invalid("missing target port after ':'")),
            Some(t) if t.bytes().all(|b| b.is_ascii_digit() || b == b'-') => IntOrString::Int(
                parse_port_number(t).ok_or_else(|| invalid("target port must be between 1 and 65535"))?,
            ),
            Some(t) if is_iana_svc_name(t) => IntOrString::String(t.to_string()),
            Some(_) => return Err(invalid("named target port must be a valid IANA service name")),
        };
        if parts.next().is_some() {
            return Err(invalid("expected port[:targetPort][/protocol]"));
        }

        Ok(PortPair {
            port,
            target_port,
            protocol,
        })
    }
}

fn parse_port_number(s: &str) -> Option<i32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<i32>().ok().filter(|p| (1..=65535).contains(p))
}

/// Parse a sequence of port specs, preserving order and duplicates
pub fn parse_ports<S: AsRef<str>>(specs: &[S]) -> Result<Vec<PortPair>> {
    specs.iter().map(|s| s.as_ref().parse()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_specs() {
        for (spec, port, target, protocol) in &[
            ("80", 80, IntOrString::Int(80), Protocol::Tcp),
            ("5678:8080", 5678, IntOrString::Int(8080), Protocol::Tcp),
            ("5678:8080/TCP", 5678, IntOrString::Int(8080), Protocol::Tcp),
            ("53:5353/UDP", 53, IntOrString::Int(5353), Protocol::Udp),
            ("53/udp", 53, IntOrString::Int(53), Protocol::Udp),
            ("443:https", 443, IntOrString::String("https".into()), Protocol::Tcp),
        ] {
            let pair: PortPair = spec.parse().unwrap();
            assert_eq!(pair.port, *port, "{spec}");
            assert_eq!(&pair.target_port, target, "{spec}");
            assert_eq!(pair.protocol, *protocol, "{spec}");
        }
    }

    #[test]
    fn invalid_specs() {
        for spec in &[
            "", ":80", "abc", "0", "-1", "65536", "80:", "80:0", "80:70000", "80:-5",
            "80:Bad_Name", "80:8080/SCTP", "80:8080/TCP/UDP", "80:8080:9090", "1.5",
            "+80", "+80:8080", "80:+80", " 80",
        ] {
            assert!(
                matches!(spec.parse::<PortPair>(), Err(Error::InvalidPortSpec { spec: ref s, .. }) if s == spec),
                "{spec:?} should be rejected"
            );
        }
    }

    #[test]
    fn order_and_duplicates_are_preserved() {
        let pairs = parse_ports(&["443", "80:8080", "443"]).unwrap();
        let ports: Vec<i32> = pairs.iter().map(|p| p.port).collect();
        assert_eq!(ports, vec![443, 80, 443]);
        assert!(parse_ports::<&str>(&[]).unwrap().is_empty());
    }

    #[test]
    fn first_failure_aborts() {
        let err = parse_ports(&["80", "nope", "also-bad"]).unwrap_err();
        assert!(matches!(err, Error::InvalidPortSpec { ref spec, .. } if spec == "nope"));
    }

    #[test]
    fn service_port_names() {
        let tcp: ServicePort = "5678:8080".parse::<PortPair>().unwrap().into();
        assert_eq!(tcp.name.as_deref(), Some("5678-8080"));
        assert_eq!(tcp.protocol.as_deref(), Some("TCP"));
        let udp: ServicePort = "53/UDP".parse::<PortPair>().unwrap().into();
        assert_eq!(udp.name.as_deref(), Some("53-53-udp"));
        let named: ServicePort = "443:https".parse::<PortPair>().unwrap().into();
        assert_eq!(named.target_port, Some(IntOrString::String("https".into())));
    }
}
