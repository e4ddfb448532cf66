//! Crate with the client-less half of pi: turning command line input into API objects
//!
//! Input arrives as [`GeneratorParams`], a [`Registry`] lookup picks the
//! [`StructuredGenerator`] for the requested generator name, and the generator
//! validates its fields and produces an [`Object`].
//!
//! Nothing in here touches the network or the filesystem; the same input
//! always yields the same object.
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod generate;
pub use generate::{FromParams, StructuredGenerator};

pub mod object;
pub use object::Object;

pub mod params;
pub use params::{GeneratorParams, ParamValue};

pub mod ports;
pub use ports::{PortPair, Protocol};

pub mod registry;
pub use registry::{Factory, GeneratorName, Registry};

pub mod validation;

mod error;
pub use error::Error;

/// Convenient alias for `Result<T, Error>`
pub type Result<T, E = Error> = std::result::Result<T, E>;
