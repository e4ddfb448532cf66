//! Structured generators: typed input in, validated API object out
//!
//! Each generator owns the fields it needs, filled from [`GeneratorParams`]
//! by its `from_params` constructor. [`StructuredGenerator::generate`] validates
//! every field before building anything, so an error never comes with a
//! partially built object.
use crate::{GeneratorParams, Object, Result};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use std::{collections::BTreeMap, fmt::Debug};

mod config;
pub use config::{ConfigMapGeneratorV1, SecretGenericGeneratorV1};

mod namespace;
pub use namespace::NamespaceGeneratorV1;

mod service;
pub use service::{
    ServiceClusterIpGeneratorV1, ServiceExternalNameGeneratorV1, ServiceLoadBalancerGeneratorV1,
    ServiceNodePortGeneratorV1,
};

/// Something that can produce one API object from its own fields
///
/// Generators are pure: the same fields always produce an equal object.
pub trait StructuredGenerator: Debug + Send + Sync {
    /// Validate the inputs and build the object
    fn generate(&self) -> Result<Object>;
}

/// Construct a boxed generator from parameters
pub trait FromParams: StructuredGenerator + Sized + 'static {
    /// Read and type-check the parameters this generator needs
    fn from_params(params: &GeneratorParams) -> Result<Self>;

    /// [`FromParams::from_params`], boxed for the registry
    fn boxed(params: &GeneratorParams) -> Result<Box<dyn StructuredGenerator>> {
        Ok(Box::new(Self::from_params(params)?))
    }
}

/// Metadata carrying just a name and, when non-empty, labels
fn named_meta(name: &str, labels: BTreeMap<String, String>) -> ObjectMeta {
    ObjectMeta {
        name: Some(name.to_string()),
        labels: (!labels.is_empty()).then_some(labels),
        ..ObjectMeta::default()
    }
}
