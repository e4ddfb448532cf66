//! The API objects generators produce
use k8s_openapi::{
    api::core::v1::{ConfigMap, Namespace, Secret, Service},
    apimachinery::pkg::apis::meta::v1::ObjectMeta,
    Metadata, Resource,
};
use serde::{Deserialize, Serialize};

/// A generated API object, ready for submission or printing
///
/// Serializes as the wrapped resource, including its `apiVersion` and `kind`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Object {
    /// A core/v1 Service
    Service(Service),
    /// A core/v1 ConfigMap
    ConfigMap(ConfigMap),
    /// A core/v1 Secret
    Secret(Secret),
    /// A core/v1 Namespace
    Namespace(Namespace),
}

impl Object {
    /// The API kind, e.g. `Service`
    pub fn kind(&self) -> &'static str {
        match self {
            Object::Service(_) => Service::KIND,
            Object::ConfigMap(_) => ConfigMap::KIND,
            Object::Secret(_) => Secret::KIND,
            Object::Namespace(_) => Namespace::KIND,
        }
    }

    /// The name from the object metadata, empty if unset
    pub fn name(&self) -> &str {
        self.metadata().name.as_deref().unwrap_or_default()
    }

    /// The namespace from the object metadata
    pub fn namespace(&self) -> Option<&str> {
        self.metadata().namespace.as_deref()
    }

    /// Whether objects of this kind live inside a namespace
    pub fn is_namespaced(&self) -> bool {
        !matches!(self, Object::Namespace(_))
    }

    /// Object metadata
    pub fn metadata(&self) -> &ObjectMeta {
        match self {
            Object::Service(o) => o.metadata(),
            Object::ConfigMap(o) => o.metadata(),
            Object::Secret(o) => o.metadata(),
            Object::Namespace(o) => o.metadata(),
        }
    }

    /// Mutable object metadata
    pub fn metadata_mut(&mut self) -> &mut ObjectMeta {
        match self {
            Object::Service(o) => o.metadata_mut(),
            Object::ConfigMap(o) => o.metadata_mut(),
            Object::Secret(o) => o.metadata_mut(),
            Object::Namespace(o) => o.metadata_mut(),
        }
    }
}

impl From<Service> for Object {
    fn from(value: Service) -> Self {
        Object::Service(value)
    }
}

impl From<ConfigMap> for Object {
    fn from(value: ConfigMap) -> Self {
        Object::ConfigMap(value)
    }
}

impl From<Secret> for Object {
    fn from(value: Secret) -> Self {
        Object::Secret(value)
    }
}

impl From<Namespace> for Object {
    fn from(value: Namespace) -> Self {
        Object::Namespace(value)
    }
}
