//! Create Kubernetes resources from the command line
//!
//! This crate is the `pi` binary's command tree and its execution, plus
//! re-exports of the two library crates it is built from:
//!
//! - [`core`] (`pi-core`): generators, validation and the generator registry,
//!   with no cluster access
//! - `pi-client`: the create pipeline, printing and cluster submission,
//!   re-exported at the crate root
//!
//! ```
//! use pi::{core::{GeneratorParams, Registry}, CreateOptions, StreamPrinter};
//!
//! let params = GeneratorParams::new().with("name", "team-b");
//! let generator = Registry::resolve("namespace/v1").unwrap()(&params).unwrap();
//! let ns = generator.generate().unwrap();
//! assert_eq!(ns.kind(), "Namespace");
//! # let _ = (CreateOptions::default(), StreamPrinter::new(Vec::new()));
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod cli;
pub mod exec;

#[doc(inline)]
pub use pi_core as core;

#[doc(inline)]
pub use pi_client::{
    run_create, ClientOptions, CreateOptions, Error, KubeSubmitter, OutputFormat, Printer, Result,
    StreamPrinter, Submitter,
};
