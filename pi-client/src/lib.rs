//! Crate for running pi subcommands against a cluster
//!
//! A generated object goes through [`run_create`], which applies the policy
//! every create subcommand shares (namespace defaulting, annotation stamping,
//! dry run) and then hands the object to a [`Submitter`] and a [`Printer`].
//!
//! # Example
//!
//! ```rust,no_run
//! use pi_client::{ClientOptions, CreateOptions, KubeSubmitter, StreamPrinter};
//! use pi_core::{GeneratorParams, Registry};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ClientOptions::default().client().await?;
//!     let params = GeneratorParams::new()
//!         .with("name", "web")
//!         .with("tcp", vec!["80:8080"]);
//!     let generator = Registry::resolve("service-clusterip/v1")?(&params)?;
//!
//!     let mut printer = StreamPrinter::new(std::io::stdout());
//!     let options = CreateOptions::default();
//!     pi_client::run_create(generator.as_ref(), &options, &KubeSubmitter::new(client), &mut printer).await?;
//!     Ok(())
//! }
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub use config::ClientOptions;

pub mod printer;
pub use printer::{OutputFormat, Printer, StreamPrinter};

pub mod runner;
pub use runner::{create_object, print_dry_run, run_create, CreateOptions, LAST_APPLIED_CONFIG_ANNOTATION};

pub mod submit;
pub use submit::{KubeSubmitter, Submitter};

mod error;
pub use error::{BoxError, Error, PrintError};

/// Convenient alias for `Result<T, Error>`
pub type Result<T, E = Error> = std::result::Result<T, E>;
