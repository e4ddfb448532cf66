//! Loading the cluster configuration the commands talk to
use crate::{Error, Result};
use kube::{
    config::{KubeConfigOptions, Kubeconfig},
    Client, Config,
};
use std::{path::PathBuf, time::Duration};
use tracing::{debug, warn};

/// Connection options shared by every command
///
/// Mirrors the global kubeconfig flags. Anything left unset falls back to
/// the usual kubeconfig and in-cluster discovery.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientOptions {
    /// Explicit kubeconfig file, instead of `$KUBECONFIG` or `~/.kube/config`
    pub kubeconfig: Option<PathBuf>,
    /// Context to use instead of the current context
    pub context: Option<String>,
    /// Cluster to use instead of the one named by the context
    pub cluster: Option<String>,
    /// User to use instead of the one named by the context
    pub user: Option<String>,
    /// Timeout for a single request to the API server
    pub request_timeout: Option<Duration>,
}

impl ClientOptions {
    fn kubeconfig_options(&self) -> KubeConfigOptions {
        KubeConfigOptions {
            context: self.context.clone(),
            cluster: self.cluster.clone(),
            user: self.user.clone(),
        }
    }

    fn has_overrides(&self) -> bool {
        self.context.is_some() || self.cluster.is_some() || self.user.is_some()
    }

    /// Resolve the [`Config`] these options describe
    pub async fn config(&self) -> Result<Config> {
        let options = self.kubeconfig_options();
        let mut config = if let Some(path) = &self.kubeconfig {
            debug!(path = %path.display(), "loading kubeconfig");
            let kubeconfig = Kubeconfig::read_from(path).map_err(Error::Kubeconfig)?;
            Config::from_custom_kubeconfig(kubeconfig, &options)
                .await
                .map_err(Error::Kubeconfig)?
        } else if self.has_overrides() {
            Config::from_kubeconfig(&options).await.map_err(Error::Kubeconfig)?
        } else {
            Config::infer().await.map_err(Error::InferConfig)?
        };
        if let Some(timeout) = self.request_timeout {
            config.read_timeout = Some(timeout);
        }
        debug!(cluster_url = %config.cluster_url, namespace = %config.default_namespace, "resolved config");
        Ok(config)
    }

    /// Namespace the resolved config defaults to
    ///
    /// Falls back to `default` when no config can be loaded, so dry runs work
    /// without a reachable cluster.
    pub async fn default_namespace(&self) -> String {
        match self.config().await {
            Ok(config) => config.default_namespace,
            Err(e) => {
                warn!("no usable cluster config, assuming the default namespace: {e}");
                "default".to_string()
            }
        }
    }

    /// Build a [`Client`] from these options
    pub async fn client(&self) -> Result<Client> {
        Client::try_from(self.config().await?).map_err(Error::Client)
    }
}
