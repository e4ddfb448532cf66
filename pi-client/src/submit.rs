//! Handing generated objects to the cluster
use k8s_openapi::api::core::v1::{ConfigMap, Namespace, Secret, Service};
use kube::{
    api::{Api, PostParams},
    Client,
};
use pi_core::Object;
use std::future::Future;
use tracing::debug;

/// Field manager recorded on objects created by pi
pub const FIELD_MANAGER: &str = "pi-create";

/// Something that can create objects in a cluster
pub trait Submitter {
    /// Error returned when creation fails
    type Error: std::error::Error + Send + Sync + 'static;

    /// Namespace to use when the command does not name one
    fn default_namespace(&self) -> &str;

    /// Create `object` in `namespace`, returning the object as stored
    ///
    /// `namespace` is ignored for cluster scoped objects.
    fn create(&self, namespace: &str, object: &Object) -> impl Future<Output = Result<Object, Self::Error>>;
}

/// A [`Submitter`] backed by a [`kube::Client`]
#[derive(Clone)]
pub struct KubeSubmitter {
    client: Client,
    params: PostParams,
}

impl KubeSubmitter {
    /// Submit through `client`
    pub fn new(client: Client) -> Self {
        Self {
            client,
            params: PostParams {
                field_manager: Some(FIELD_MANAGER.to_string()),
                ..PostParams::default()
            },
        }
    }
}

impl Submitter for KubeSubmitter {
    type Error = kube::Error;

    fn default_namespace(&self) -> &str {
        self.client.default_namespace()
    }

    async fn create(&self, namespace: &str, object: &Object) -> Result<Object, Self::Error> {
        let client = self.client.clone();
        let pp = &self.params;
        debug!(kind = object.kind(), name = object.name(), namespace, "creating object");
        let created: Object = match object {
            Object::Service(o) => Api::<Service>::namespaced(client, namespace).create(pp, o).await?.into(),
            Object::ConfigMap(o) => Api::<ConfigMap>::namespaced(client, namespace).create(pp, o).await?.into(),
            Object::Secret(o) => Api::<Secret>::namespaced(client, namespace).create(pp, o).await?.into(),
            Object::Namespace(o) => Api::<Namespace>::all(client).create(pp, o).await?.into(),
        };
        Ok(created)
    }
}
