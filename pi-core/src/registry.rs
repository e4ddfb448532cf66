//! Lookup of generators by name
use crate::{
    generate::{
        ConfigMapGeneratorV1, FromParams, NamespaceGeneratorV1, SecretGenericGeneratorV1,
        ServiceClusterIpGeneratorV1, ServiceExternalNameGeneratorV1, ServiceLoadBalancerGeneratorV1,
        ServiceNodePortGeneratorV1, StructuredGenerator,
    },
    Error, GeneratorParams, Result,
};
use std::{fmt, str::FromStr};

/// Builds a generator from parameters
pub type Factory = fn(&GeneratorParams) -> Result<Box<dyn StructuredGenerator>>;

/// Every generator pi knows about
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeneratorName {
    /// `service-clusterip/v1`
    ServiceClusterIpV1,
    /// `service-nodeport/v1`
    ServiceNodePortV1,
    /// `service-loadbalancer/v1`
    ServiceLoadBalancerV1,
    /// `service-externalname/v1`
    ServiceExternalNameV1,
    /// `configmap/v1`
    ConfigMapV1,
    /// `secret/v1`
    SecretV1,
    /// `namespace/v1`
    NamespaceV1,
}

impl GeneratorName {
    /// All generator names, in registration order
    pub const ALL: [GeneratorName; 7] = [
        GeneratorName::ServiceClusterIpV1,
        GeneratorName::ServiceNodePortV1,
        GeneratorName::ServiceLoadBalancerV1,
        GeneratorName::ServiceExternalNameV1,
        GeneratorName::ConfigMapV1,
        GeneratorName::SecretV1,
        GeneratorName::NamespaceV1,
    ];

    /// The name users pass to `--generator`
    pub fn as_str(&self) -> &'static str {
        match self {
            GeneratorName::ServiceClusterIpV1 => "service-clusterip/v1",
            GeneratorName::ServiceNodePortV1 => "service-nodeport/v1",
            GeneratorName::ServiceLoadBalancerV1 => "service-loadbalancer/v1",
            GeneratorName::ServiceExternalNameV1 => "service-externalname/v1",
            GeneratorName::ConfigMapV1 => "configmap/v1",
            GeneratorName::SecretV1 => "secret/v1",
            GeneratorName::NamespaceV1 => "namespace/v1",
        }
    }
}

impl fmt::Display for GeneratorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeneratorName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        GeneratorName::ALL
            .into_iter()
            .find(|n| n.as_str() == s)
            .ok_or_else(|| Error::UnsupportedGenerator { name: s.to_string() })
    }
}

static GENERATORS: &[(GeneratorName, Factory)] = &[
    (GeneratorName::ServiceClusterIpV1, ServiceClusterIpGeneratorV1::boxed as Factory),
    (GeneratorName::ServiceNodePortV1, ServiceNodePortGeneratorV1::boxed as Factory),
    (GeneratorName::ServiceLoadBalancerV1, ServiceLoadBalancerGeneratorV1::boxed as Factory),
    (GeneratorName::ServiceExternalNameV1, ServiceExternalNameGeneratorV1::boxed as Factory),
    (GeneratorName::ConfigMapV1, ConfigMapGeneratorV1::boxed as Factory),
    (GeneratorName::SecretV1, SecretGenericGeneratorV1::boxed as Factory),
    (GeneratorName::NamespaceV1, NamespaceGeneratorV1::boxed as Factory),
];

/// The static table of generators
///
/// Registration happens at compile time; the registry is immutable and can be
/// shared freely.
///
/// ```
/// use pi_core::{GeneratorParams, Registry};
/// let factory = Registry::resolve("service-clusterip/v1").unwrap();
/// let params = GeneratorParams::new().with("name", "my-cs").with("tcp", vec!["5678:8080"]);
/// let service = factory(&params).unwrap().generate().unwrap();
/// assert_eq!(service.kind(), "Service");
///
/// assert!(Registry::resolve("nonexistent").is_err());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Registry;

impl Registry {
    /// Find the factory for a generator name
    pub fn resolve(name: &str) -> Result<Factory> {
        Self::get(name.parse()?).ok_or_else(|| Error::UnsupportedGenerator { name: name.to_string() })
    }

    /// Find the factory for a generator name a particular command accepts
    ///
    /// Known generators outside `accepted` are reported as unsupported.
    pub fn resolve_for(name: &str, accepted: &[GeneratorName]) -> Result<Factory> {
        let generator: GeneratorName = name.parse()?;
        if !accepted.contains(&generator) {
            return Err(Error::UnsupportedGenerator { name: name.to_string() });
        }
        Self::resolve(name)
    }

    /// Look up a factory by typed name
    pub fn get(name: GeneratorName) -> Option<Factory> {
        GENERATORS.iter().find(|(n, _)| *n == name).map(|(_, f)| *f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Object;

    #[test]
    fn every_name_is_registered() {
        for name in GeneratorName::ALL {
            assert!(Registry::get(name).is_some(), "{name} has no factory");
            assert_eq!(name.as_str().parse::<GeneratorName>().unwrap(), name);
        }
    }

    #[test]
    fn unknown_generator() {
        assert_eq!(Registry::resolve("nonexistent").unwrap_err(), Error::UnsupportedGenerator {
            name: "nonexistent".into()
        });
        assert!(Registry::resolve("service-clusterip/v2").is_err());
    }

    #[test]
    fn generators_outside_the_command() {
        let accepted = [GeneratorName::ServiceClusterIpV1];
        assert!(Registry::resolve_for("service-clusterip/v1", &accepted).is_ok());
        assert_eq!(
            Registry::resolve_for("configmap/v1", &accepted).unwrap_err(),
            Error::UnsupportedGenerator {
                name: "configmap/v1".into()
            }
        );
    }

    fn generate(name: &str, params: GeneratorParams) -> Result<Object> {
        Registry::resolve(name)?(&params)?.generate()
    }

    #[test]
    fn cluster_ip_scenario() {
        let params = GeneratorParams::new()
            .with("name", "my-cs")
            .with("tcp", vec!["5678:8080"]);
        let Object::Service(svc) = generate("service-clusterip/v1", params).unwrap() else {
            panic!("expected a service")
        };
        let spec = svc.spec.unwrap();
        assert_eq!(spec.cluster_ip, None);
        let ports = spec.ports.unwrap();
        assert_eq!(ports.len(), 1);
        assert_eq!(ports[0].port, 5678);
        assert_eq!(
            ports[0].target_port,
            Some(k8s_openapi::apimachinery::pkg::util::intstr::IntOrString::Int(8080))
        );
        assert_eq!(ports[0].protocol.as_deref(), Some("TCP"));
    }

    #[test]
    fn node_port_scenario() {
        let params = GeneratorParams::new()
            .with("name", "my-ns")
            .with("tcp", vec!["5678:8080"])
            .with("node-port", 0i64);
        let Object::Service(svc) = generate("service-nodeport/v1", params).unwrap() else {
            panic!("expected a service")
        };
        assert_eq!(svc.spec.unwrap().ports.unwrap()[0].node_port, None);
    }

    #[test]
    fn load_balancer_scenario() {
        let params = GeneratorParams::new()
            .with("name", "my-lbs")
            .with("tcp", vec!["5678:8080"])
            .with("loadbalancerip", "1.2.3.4")
            .with("selector", vec!["role=web", "zone=us-a"]);
        let Object::Service(svc) = generate("service-loadbalancer/v1", params).unwrap() else {
            panic!("expected a service")
        };
        let spec = svc.spec.unwrap();
        assert_eq!(spec.load_balancer_ip.as_deref(), Some("1.2.3.4"));
        let selector = spec.selector.unwrap();
        assert!(selector.contains_key("role") && selector.contains_key("zone"));
    }

    #[test]
    fn factories_type_check_params() {
        let params = GeneratorParams::new().with("name", 42i64);
        assert!(matches!(
            generate("namespace/v1", params),
            Err(Error::Validation { field, .. }) if field == "name"
        ));
    }
}
