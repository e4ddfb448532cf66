//! The `pi` command tree
//!
//! Each create subcommand turns its flags into [`GeneratorParams`] and names
//! the generators it accepts; everything after that is shared.
use clap::{Args, Parser, Subcommand};
use pi_client::{ClientOptions, CreateOptions, OutputFormat};
use pi_core::{validation::NodePortRange, GeneratorName, GeneratorParams};
use std::{path::PathBuf, time::Duration};

/// Create Kubernetes resources from the command line
#[derive(Parser, Debug)]
#[command(name = "pi", version)]
pub struct App {
    /// Connection and defaulting flags
    #[command(flatten)]
    pub global: GlobalArgs,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Flags accepted by every command
#[derive(Args, Clone, Debug, Default)]
pub struct GlobalArgs {
    /// Path to the kubeconfig file to use
    #[arg(long, global = true, value_name = "PATH")]
    pub kubeconfig: Option<PathBuf>,

    /// Name of the kubeconfig context to use
    #[arg(long, global = true)]
    pub context: Option<String>,

    /// Name of the kubeconfig cluster to use
    #[arg(long, global = true)]
    pub cluster: Option<String>,

    /// Name of the kubeconfig user to use
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// Namespace for namespaced objects
    #[arg(short, long, global = true)]
    pub namespace: Option<String>,

    /// Seconds to wait for a single API server response
    #[arg(long, global = true, value_name = "SECS")]
    pub request_timeout: Option<u64>,

    /// Node ports the cluster allocates from; unchecked when unset
    #[arg(long, global = true, value_name = "LOW-HIGH")]
    pub node_port_range: Option<NodePortRange>,
}

impl GlobalArgs {
    /// Options for connecting to the cluster
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            kubeconfig: self.kubeconfig.clone(),
            context: self.context.clone(),
            cluster: self.cluster.clone(),
            user: self.user.clone(),
            request_timeout: self.request_timeout.map(Duration::from_secs),
        }
    }
}

/// Top level commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a resource
    Create {
        /// Kind of resource to create
        #[command(subcommand)]
        kind: CreateKind,
    },
}

/// Flags shared by every create subcommand
#[derive(Args, Clone, Debug, Default)]
pub struct CreateArgs {
    /// Only print the object that would be sent
    #[arg(long)]
    pub dry_run: bool,

    /// Print the created object as json, yaml or name
    #[arg(short, long, value_name = "FORMAT")]
    pub output: Option<OutputFormat>,

    /// Record the configuration in the last-applied-configuration annotation
    #[arg(long)]
    pub save_config: bool,

    /// Generator to use instead of the subcommand's own
    #[arg(long)]
    pub generator: Option<String>,
}

/// Resource kinds `pi create` knows
#[derive(Subcommand, Debug)]
pub enum CreateKind {
    /// Create a service
    #[command(alias = "svc")]
    Service {
        /// Type of service
        #[command(subcommand)]
        kind: ServiceKind,
    },

    /// Create a configmap from literal values
    #[command(name = "configmap", alias = "cm")]
    ConfigMap {
        /// Name of the configmap
        name: String,

        /// A `key=value` pair to store, repeatable
        #[arg(long, value_name = "KEY=VALUE")]
        from_literal: Vec<String>,

        /// Flags shared by every create subcommand
        #[command(flatten)]
        create: CreateArgs,
    },

    /// Create a secret
    Secret {
        /// Type of secret
        #[command(subcommand)]
        kind: SecretKind,
    },

    /// Create a namespace
    #[command(alias = "ns")]
    Namespace {
        /// Name of the namespace
        name: String,

        /// Flags shared by every create subcommand
        #[command(flatten)]
        create: CreateArgs,
    },
}

/// Flags shared by the service subcommands
#[derive(Args, Clone, Debug, Default)]
pub struct ServiceArgs {
    /// Name of the service
    pub name: String,

    /// Port pairs as `port[:targetPort][/protocol]`, repeatable or comma separated
    #[arg(long, value_delimiter = ',', value_name = "PORT:TARGET")]
    pub tcp: Vec<String>,

    /// Flags shared by every create subcommand
    #[command(flatten)]
    pub create: CreateArgs,
}

/// Service types `pi create service` knows
#[derive(Subcommand, Debug)]
pub enum ServiceKind {
    /// Create a ClusterIP service
    #[command(name = "clusterip")]
    ClusterIp {
        /// Name and ports
        #[command(flatten)]
        service: ServiceArgs,

        /// Cluster IP to request, `None` for a headless service
        #[arg(long, value_name = "IP")]
        clusterip: Option<String>,
    },

    /// Create a NodePort service
    #[command(name = "nodeport")]
    NodePort {
        /// Name and ports
        #[command(flatten)]
        service: ServiceArgs,

        /// Port to expose on every node, `0` to let the cluster pick
        #[arg(long, default_value_t = 0)]
        node_port: i64,
    },

    /// Create a LoadBalancer service
    #[command(name = "loadbalancer")]
    LoadBalancer {
        /// Name and ports
        #[command(flatten)]
        service: ServiceArgs,

        /// Load balancer IP to request
        #[arg(short = 'f', long, value_name = "IP")]
        loadbalancerip: Option<String>,

        /// Selector entries as `key=value`, repeatable or comma separated
        #[arg(short = 'l', long, value_delimiter = ',', value_name = "KEY=VALUE")]
        selector: Vec<String>,
    },

    /// Create an ExternalName service
    #[command(name = "externalname")]
    ExternalName {
        /// Name of the service
        name: String,

        /// DNS name the service points to
        #[arg(long, value_name = "DNS")]
        external_name: String,

        /// Flags shared by every create subcommand
        #[command(flatten)]
        create: CreateArgs,
    },
}

/// Secret types `pi create secret` knows
#[derive(Subcommand, Debug)]
pub enum SecretKind {
    /// Create a secret from literal values
    Generic {
        /// Name of the secret
        name: String,

        /// A `key=value` pair to store, repeatable
        #[arg(long, value_name = "KEY=VALUE")]
        from_literal: Vec<String>,

        /// Secret type, `Opaque` when unset
        #[arg(long = "type", value_name = "TYPE")]
        type_: Option<String>,

        /// Flags shared by every create subcommand
        #[command(flatten)]
        create: CreateArgs,
    },
}

/// A create subcommand reduced to what the runner needs
#[derive(Clone, Debug)]
pub struct CreateRequest {
    /// Generator name to resolve
    pub generator: String,
    /// The subcommand's own generator
    pub default: GeneratorName,
    /// Parameters for the generator
    pub params: GeneratorParams,
    /// Policy for the runner
    pub options: CreateOptions,
}

fn request(
    default: GeneratorName,
    params: GeneratorParams,
    create: &CreateArgs,
    global: &GlobalArgs,
) -> CreateRequest {
    CreateRequest {
        generator: create.generator.clone().unwrap_or_else(|| default.to_string()),
        default,
        params,
        options: CreateOptions {
            dry_run: create.dry_run,
            namespace: global.namespace.clone(),
            apply_annotation: create.save_config,
            output: create.output,
        },
    }
}

impl CreateRequest {
    /// Generators this subcommand accepts
    ///
    /// Each subcommand has exactly one generator version today.
    pub fn accepted(&self) -> &[GeneratorName] {
        std::slice::from_ref(&self.default)
    }
}

fn service_params(service: &ServiceArgs) -> GeneratorParams {
    GeneratorParams::new()
        .with("name", service.name.as_str())
        .with("tcp", service.tcp.clone())
}

impl CreateKind {
    /// Reduce the parsed subcommand to a [`CreateRequest`]
    pub fn request(&self, global: &GlobalArgs) -> CreateRequest {
        match self {
            CreateKind::Service { kind } => kind.request(global),
            CreateKind::ConfigMap {
                name,
                from_literal,
                create,
            } => {
                let params = GeneratorParams::new()
                    .with("name", name.as_str())
                    .with("from-literal", from_literal.clone());
                request(GeneratorName::ConfigMapV1, params, create, global)
            }
            CreateKind::Secret {
                kind:
                    SecretKind::Generic {
                        name,
                        from_literal,
                        type_,
                        create,
                    },
            } => {
                let params = GeneratorParams::new()
                    .with("name", name.as_str())
                    .with("from-literal", from_literal.clone())
                    .with_opt("type", type_.as_deref());
                request(GeneratorName::SecretV1, params, create, global)
            }
            CreateKind::Namespace { name, create } => {
                let params = GeneratorParams::new().with("name", name.as_str());
                request(GeneratorName::NamespaceV1, params, create, global)
            }
        }
    }
}

impl ServiceKind {
    fn request(&self, global: &GlobalArgs) -> CreateRequest {
        match self {
            ServiceKind::ClusterIp { service, clusterip } => {
                let params = service_params(service).with_opt("clusterip", clusterip.as_deref());
                request(GeneratorName::ServiceClusterIpV1, params, &service.create, global)
            }
            ServiceKind::NodePort { service, node_port } => {
                let params = service_params(service).with("node-port", *node_port).with_opt(
                    "node-port-range",
                    global.node_port_range.as_ref().map(ToString::to_string),
                );
                request(GeneratorName::ServiceNodePortV1, params, &service.create, global)
            }
            ServiceKind::LoadBalancer {
                service,
                loadbalancerip,
                selector,
            } => {
                let params = service_params(service)
                    .with_opt("loadbalancerip", loadbalancerip.as_deref())
                    .with("selector", selector.clone());
                request(GeneratorName::ServiceLoadBalancerV1, params, &service.create, global)
            }
            ServiceKind::ExternalName {
                name,
                external_name,
                create,
            } => {
                let params = GeneratorParams::new()
                    .with("name", name.as_str())
                    .with("external-name", external_name.as_str());
                request(GeneratorName::ServiceExternalNameV1, params, create, global)
            }
        }
    }
}

impl App {
    /// The create request this invocation describes
    pub fn create_request(&self) -> CreateRequest {
        match &self.command {
            Command::Create { kind } => kind.request(&self.global),
        }
    }
}
