use super::{named_meta, FromParams, StructuredGenerator};
use crate::{
    params::split_key_value,
    ports::parse_ports,
    validation::{
        parse_ip, validate_dns_name, validate_label_value, validate_name, validate_node_port,
        validate_service_ip,
        NodePortRange,
    },
    Error, GeneratorParams, Object, Result,
};
use k8s_openapi::api::core::v1::{Service, ServicePort, ServiceSpec};
use std::collections::BTreeMap;
use tracing::trace;

type Labels = BTreeMap<String, String>;

fn app_labels(name: &str) -> Labels {
    [("app".to_string(), name.to_string())].into()
}

fn service_ports(tcp: &[String], node_port: Option<i32>) -> Result<Option<Vec<ServicePort>>> {
    let ports: Vec<ServicePort> = parse_ports(tcp)?
        .into_iter()
        .map(|pair| ServicePort {
            node_port,
            ..ServicePort::from(pair)
        })
        .collect();
    Ok((!ports.is_empty()).then_some(ports))
}

/// Service names also become the `app` label value
fn validate_service_name(name: &str) -> Result<()> {
    validate_name("name", name)?;
    validate_label_value("name", name)
}

fn service(name: &str, spec: ServiceSpec) -> Object {
    let svc = Service {
        metadata: named_meta(name, app_labels(name)),
        spec: Some(spec),
        ..Service::default()
    };
    trace!(?svc, "generated service");
    svc.into()
}

fn parse_selector(entries: &[String]) -> Result<Labels> {
    let mut selector = Labels::new();
    for entry in entries {
        let (key, value) = split_key_value(entry).ok_or_else(|| Error::InvalidSelector {
            entry: entry.clone(),
        })?;
        if selector.contains_key(&key) {
            return Err(Error::DuplicateSelectorKey { key });
        }
        selector.insert(key, value);
    }
    Ok(selector)
}

/// Generates a `ClusterIP` service
///
/// Setting `cluster_ip` to `None` creates a headless service.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServiceClusterIpGeneratorV1 {
    /// Service name
    pub name: String,
    /// Port specs, see [`PortPair`](crate::PortPair)
    pub tcp: Vec<String>,
    /// Requested cluster IP, `None` for headless, empty to let the cluster pick
    pub cluster_ip: String,
}

impl FromParams for ServiceClusterIpGeneratorV1 {
    fn from_params(params: &GeneratorParams) -> Result<Self> {
        Ok(Self {
            name: params.str_or_empty("name")?.to_string(),
            tcp: params.list("tcp")?,
            cluster_ip: params.str_or_empty("clusterip")?.to_string(),
        })
    }
}

impl StructuredGenerator for ServiceClusterIpGeneratorV1 {
    fn generate(&self) -> Result<Object> {
        validate_service_name(&self.name)?;
        let ports = service_ports(&self.tcp, None)?;
        let cluster_ip = validate_service_ip("clusterip", &self.cluster_ip)?;
        Ok(service(&self.name, ServiceSpec {
            type_: Some("ClusterIP".into()),
            cluster_ip,
            ports,
            selector: Some(app_labels(&self.name)),
            ..ServiceSpec::default()
        }))
    }
}

/// Generates a `NodePort` service
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServiceNodePortGeneratorV1 {
    /// Service name
    pub name: String,
    /// Port specs, see [`PortPair`](crate::PortPair)
    pub tcp: Vec<String>,
    /// Port to open on every node, `0` to let the cluster allocate one
    pub node_port: i64,
    /// Node ports the cluster accepts; unchecked when unset
    pub node_port_range: Option<NodePortRange>,
}

impl FromParams for ServiceNodePortGeneratorV1 {
    fn from_params(params: &GeneratorParams) -> Result<Self> {
        Ok(Self {
            name: params.str_or_empty("name")?.to_string(),
            tcp: params.list("tcp")?,
            node_port: params.int("node-port")?.unwrap_or_default(),
            node_port_range: params
                .str("node-port-range")?
                .filter(|r| !r.is_empty())
                .map(str::parse)
                .transpose()?,
        })
    }
}

impl StructuredGenerator for ServiceNodePortGeneratorV1 {
    fn generate(&self) -> Result<Object> {
        validate_service_name(&self.name)?;
        let node_port = validate_node_port(self.node_port, self.node_port_range.as_ref())?;
        let ports = service_ports(&self.tcp, node_port)?;
        if node_port.is_some() && ports.is_none() {
            return Err(Error::validation("node-port", "requires at least one port in tcp"));
        }
        Ok(service(&self.name, ServiceSpec {
            type_: Some("NodePort".into()),
            ports,
            selector: Some(app_labels(&self.name)),
            ..ServiceSpec::default()
        }))
    }
}

/// Generates a `LoadBalancer` service
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServiceLoadBalancerGeneratorV1 {
    /// Service name
    pub name: String,
    /// Port specs, see [`PortPair`](crate::PortPair)
    pub tcp: Vec<String>,
    /// Requested load balancer IP, empty to let the provider pick
    pub load_balancer_ip: String,
    /// `key=value` pod selector entries; defaults to `app=<name>` when empty
    pub selector: Vec<String>,
}

impl FromParams for ServiceLoadBalancerGeneratorV1 {
    fn from_params(params: &GeneratorParams) -> Result<Self> {
        Ok(Self {
            name: params.str_or_empty("name")?.to_string(),
            tcp: params.list("tcp")?,
            load_balancer_ip: params.str_or_empty("loadbalancerip")?.to_string(),
            selector: params.list("selector")?,
        })
    }
}

impl StructuredGenerator for ServiceLoadBalancerGeneratorV1 {
    fn generate(&self) -> Result<Object> {
        validate_service_name(&self.name)?;
        let ports = service_ports(&self.tcp, None)?;
        let load_balancer_ip = match self.load_balancer_ip.as_str() {
            "" => None,
            ip => parse_ip("loadbalancerip", ip).map(|_| Some(ip.to_string()))?,
        };
        let selector = match parse_selector(&self.selector)? {
            s if s.is_empty() => app_labels(&self.name),
            s => s,
        };
        Ok(service(&self.name, ServiceSpec {
            type_: Some("LoadBalancer".into()),
            load_balancer_ip,
            ports,
            selector: Some(selector),
            ..ServiceSpec::default()
        }))
    }
}

/// Generates an `ExternalName` service, an alias for a DNS name outside the cluster
///
/// These services have no cluster IP, no ports and no selector.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServiceExternalNameGeneratorV1 {
    /// Service name
    pub name: String,
    /// The DNS name the service resolves to
    pub external_name: String,
}

impl FromParams for ServiceExternalNameGeneratorV1 {
    fn from_params(params: &GeneratorParams) -> Result<Self> {
        Ok(Self {
            name: params.str_or_empty("name")?.to_string(),
            external_name: params.str_or_empty("external-name")?.to_string(),
        })
    }
}

impl StructuredGenerator for ServiceExternalNameGeneratorV1 {
    fn generate(&self) -> Result<Object> {
        validate_service_name(&self.name)?;
        if self.external_name.is_empty() {
            return Err(Error::validation("external-name", "is required"));
        }
        validate_dns_name(&self.external_name)?;
        Ok(service(&self.name, ServiceSpec {
            type_: Some("ExternalName".into()),
            external_name: Some(self.external_name.clone()),
            ..ServiceSpec::default()
        }))
    }
}
