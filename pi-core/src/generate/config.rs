use super::{named_meta, FromParams, StructuredGenerator};
use crate::{
    validation::{validate_config_key, validate_subdomain_name},
    GeneratorParams, Object, Result,
};
use k8s_openapi::{
    api::core::v1::{ConfigMap, Secret},
    ByteString,
};
use std::collections::BTreeMap;

/// Default type for generic secrets
pub const SECRET_TYPE_OPAQUE: &str = "Opaque";

fn literal_data(name: &str, literals: &[(String, String)]) -> Result<BTreeMap<String, String>> {
    validate_subdomain_name("name", name)?;
    for (key, _) in literals {
        validate_config_key("from-literal", key)?;
    }
    Ok(literals.iter().cloned().collect())
}

/// Generates a ConfigMap from literal `key=value` pairs
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigMapGeneratorV1 {
    /// ConfigMap name
    pub name: String,
    /// Data entries, keys must be unique
    pub literals: Vec<(String, String)>,
}

impl FromParams for ConfigMapGeneratorV1 {
    fn from_params(params: &GeneratorParams) -> Result<Self> {
        Ok(Self {
            name: params.str_or_empty("name")?.to_string(),
            literals: params.pairs("from-literal")?,
        })
    }
}

impl StructuredGenerator for ConfigMapGeneratorV1 {
    fn generate(&self) -> Result<Object> {
        let data = literal_data(&self.name, &self.literals)?;
        Ok(ConfigMap {
            metadata: named_meta(&self.name, BTreeMap::new()),
            data: (!data.is_empty()).then_some(data),
            ..ConfigMap::default()
        }
        .into())
    }
}

/// Generates a generic secret from literal `key=value` pairs
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SecretGenericGeneratorV1 {
    /// Secret name
    pub name: String,
    /// Data entries, keys must be unique
    pub literals: Vec<(String, String)>,
    /// Secret type, `Opaque` when empty
    pub type_: String,
}

impl FromParams for SecretGenericGeneratorV1 {
    fn from_params(params: &GeneratorParams) -> Result<Self> {
        Ok(Self {
            name: params.str_or_empty("name")?.to_string(),
            literals: params.pairs("from-literal")?,
            type_: params.str_or_empty("type")?.to_string(),
        })
    }
}

impl StructuredGenerator for SecretGenericGeneratorV1 {
    fn generate(&self) -> Result<Object> {
        let data: BTreeMap<String, ByteString> = literal_data(&self.name, &self.literals)?
            .into_iter()
            .map(|(k, v)| (k, ByteString(v.into_bytes())))
            .collect();
        let type_ = match self.type_.as_str() {
            "" => SECRET_TYPE_OPAQUE,
            t => t,
        };
        Ok(Secret {
            metadata: named_meta(&self.name, BTreeMap::new()),
            data: (!data.is_empty()).then_some(data),
            type_: Some(type_.to_string()),
            ..Secret::default()
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn config_map_from_literals() {
        let params = GeneratorParams::new()
            .with("name", "app.config")
            .with("from-literal", vec!["mode=prod", "empty="]);
        let obj = ConfigMapGeneratorV1::from_params(&params).unwrap().generate().unwrap();
        assert_eq!(obj.kind(), "ConfigMap");
        let Object::ConfigMap(cm) = obj else { panic!("expected a configmap") };
        let data = cm.data.unwrap();
        assert_eq!(data["mode"], "prod");
        assert_eq!(data["empty"], "");
    }

    #[test]
    fn literal_values_may_contain_separators() {
        let params = GeneratorParams::new()
            .with("name", "app.config")
            .with("from-literal", vec!["dsn=host=db port=5432"]);
        let Object::ConfigMap(cm) = ConfigMapGeneratorV1::from_params(&params).unwrap().generate().unwrap()
        else {
            panic!("expected a configmap")
        };
        assert_eq!(cm.data.unwrap()["dsn"], "host=db port=5432");

        let params = GeneratorParams::new()
            .with("name", "creds")
            .with("from-literal", vec!["token=YWJj==", "dsn=host=db"]);
        let Object::Secret(secret) = SecretGenericGeneratorV1::from_params(&params).unwrap().generate().unwrap()
        else {
            panic!("expected a secret")
        };
        let data = secret.data.unwrap();
        assert_eq!(data["token"], ByteString(b"YWJj==".to_vec()));
        assert_eq!(data["dsn"], ByteString(b"host=db".to_vec()));
    }

    #[test]
    fn config_map_without_data() {
        let gen = ConfigMapGeneratorV1 {
            name: "empty".into(),
            literals: vec![],
        };
        let Object::ConfigMap(cm) = gen.generate().unwrap() else { panic!("expected a configmap") };
        assert_eq!(cm.data, None);
    }

    #[test]
    fn config_map_rejects_bad_keys_and_names() {
        let bad_key = ConfigMapGeneratorV1 {
            name: "cfg".into(),
            literals: vec![("a/b".into(), "1".into())],
        };
        assert!(matches!(
            bad_key.generate(),
            Err(Error::Validation { field, .. }) if field == "from-literal"
        ));
        let bad_name = ConfigMapGeneratorV1 {
            name: "Cfg".into(),
            literals: vec![],
        };
        assert!(matches!(bad_name.generate(), Err(Error::Validation { field, .. }) if field == "name"));
    }

    #[test]
    fn config_map_rejects_duplicate_literals() {
        let params = GeneratorParams::new()
            .with("name", "cfg")
            .with("from-literal", vec!["a=1", "a=2"]);
        assert_eq!(ConfigMapGeneratorV1::from_params(&params).unwrap_err(), Error::DuplicateKey {
            field: "from-literal".into(),
            key: "a".into(),
        });
    }

    #[test]
    fn generic_secret() {
        let gen = SecretGenericGeneratorV1 {
            name: "creds".into(),
            literals: vec![("password".into(), "hunter2".into())],
            type_: "".into(),
        };
        let obj = gen.generate().unwrap();
        let json = serde_json::to_value(&obj).unwrap();
        // bytes are base64 encoded on the wire
        assert_eq!(json["data"]["password"], "aHVudGVyMg==");
        assert_eq!(json["type"], "Opaque");

        let typed = SecretGenericGeneratorV1 {
            type_: "kubernetes.io/basic-auth".into(),
            ..gen
        };
        let Object::Secret(secret) = typed.generate().unwrap() else { panic!("expected a secret") };
        assert_eq!(secret.type_.as_deref(), Some("kubernetes.io/basic-auth"));
    }
}
