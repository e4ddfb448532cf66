use super::{named_meta, FromParams, StructuredGenerator};
use crate::{validation::validate_name, GeneratorParams, Object, Result};
use k8s_openapi::api::core::v1::Namespace;
use std::collections::BTreeMap;

/// Generates a Namespace
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NamespaceGeneratorV1 {
    /// Namespace name
    pub name: String,
}

impl FromParams for NamespaceGeneratorV1 {
    fn from_params(params: &GeneratorParams) -> Result<Self> {
        Ok(Self {
            name: params.str_or_empty("name")?.to_string(),
        })
    }
}

impl StructuredGenerator for NamespaceGeneratorV1 {
    fn generate(&self) -> Result<Object> {
        validate_name("name", &self.name)?;
        Ok(Namespace {
            metadata: named_meta(&self.name, BTreeMap::new()),
            ..Namespace::default()
        }
        .into())
    }
}
