//! Error handling in [`pi_client`][crate]
use thiserror::Error;

pub use crate::printer::PrintError;

/// Type erased error from a [`Submitter`](crate::Submitter)
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Possible errors when running a subcommand
#[derive(Error, Debug)]
pub enum Error {
    /// Generation or validation failed before anything was sent
    #[error(transparent)]
    Core(#[from] pi_core::Error),

    /// The cluster rejected the object, or could not be reached
    #[error("failed to create {kind} {name:?}: {source}")]
    Submission {
        /// Kind of the object that was submitted
        kind: &'static str,
        /// Name of the object that was submitted
        name: String,
        /// Error from the submitter
        #[source]
        source: BoxError,
    },

    /// The object could not be serialized for annotation
    #[error("failed to serialize {kind}: {source}")]
    Serialize {
        /// Kind of the object
        kind: &'static str,
        /// Serialization error
        #[source]
        source: serde_json::Error,
    },

    /// Writing output failed
    #[error("failed to print: {0}")]
    Print(#[source] PrintError),

    /// Loading a kubeconfig file failed
    #[error("error loading kubeconfig: {0}")]
    Kubeconfig(#[source] kube::config::KubeconfigError),

    /// Neither a kubeconfig nor an in-cluster environment was found
    #[error("unable to infer cluster config: {0}")]
    InferConfig(#[source] kube::config::InferConfigError),

    /// The client could not be built from the loaded config
    #[error("failed to create client: {0}")]
    Client(#[source] kube::Error),
}

impl Error {
    /// Process exit code for this error
    ///
    /// `2` for invocation problems (such as an unsupported generator), `1` otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Core(e) if e.is_usage() => 2,
            _ => 1,
        }
    }
}
