//! The create pipeline shared by every `pi create` subcommand
//!
//! Per invocation the object moves through
//! `generated -> validated -> (dry run printed | submitted -> printed)`,
//! and any failure along the way aborts the whole command.
use crate::{
    printer::{OutputFormat, Printer},
    submit::Submitter,
    Error, Result,
};
use pi_core::{Object, StructuredGenerator};
use tracing::{debug, info, trace};

/// Annotation holding the configuration an object was created with
pub const LAST_APPLIED_CONFIG_ANNOTATION: &str = "kubectl.kubernetes.io/last-applied-configuration";

/// Options common to every create subcommand
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CreateOptions {
    /// Only print the object that would be created
    pub dry_run: bool,
    /// Target namespace, the submitter's default when unset
    pub namespace: Option<String>,
    /// Record the object's configuration in [`LAST_APPLIED_CONFIG_ANNOTATION`]
    pub apply_annotation: bool,
    /// Print the full object in this format instead of a confirmation line
    pub output: Option<OutputFormat>,
}

/// Generate and validate the object a generator describes
///
/// Needs no cluster access, so input errors surface before any config is loaded.
pub fn validate(generator: &dyn StructuredGenerator) -> Result<Object> {
    let object = generator.generate()?;
    debug!(kind = object.kind(), name = object.name(), "validated object");
    Ok(object)
}

/// Generate, validate and create one object
///
/// Returns the object as printed: the submitter's response, or the generated
/// object on a dry run. Dry runs never reach the submitter.
pub async fn run_create<S, P>(
    generator: &dyn StructuredGenerator,
    options: &CreateOptions,
    submitter: &S,
    printer: &mut P,
) -> Result<Object>
where
    S: Submitter,
    P: Printer + ?Sized,
{
    create_object(validate(generator)?, options, submitter, printer).await
}

/// Create an already validated object
pub async fn create_object<S, P>(
    object: Object,
    options: &CreateOptions,
    submitter: &S,
    printer: &mut P,
) -> Result<Object>
where
    S: Submitter,
    P: Printer + ?Sized,
{
    if options.dry_run {
        return print_dry_run(object, options, submitter.default_namespace(), printer);
    }
    let (object, namespace) = prepare(object, options, submitter.default_namespace())?;
    let created = submitter
        .create(&namespace, &object)
        .await
        .map_err(|e| Error::Submission {
            kind: object.kind(),
            name: object.name().to_string(),
            source: Box::new(e),
        })?;
    info!(kind = created.kind(), name = created.name(), %namespace, "created");
    print(printer, &created, options.output, false)?;
    Ok(created)
}

/// Print a validated object as a dry run, without any submitter
///
/// `default_namespace` applies when `options` name none.
pub fn print_dry_run<P: Printer + ?Sized>(
    object: Object,
    options: &CreateOptions,
    default_namespace: &str,
    printer: &mut P,
) -> Result<Object> {
    let (object, _) = prepare(object, options, default_namespace)?;
    debug!(kind = object.kind(), name = object.name(), "dry run, skipping submission");
    print(printer, &object, options.output, true)?;
    Ok(object)
}

fn prepare(mut object: Object, options: &CreateOptions, default_namespace: &str) -> Result<(Object, String)> {
    let namespace = options
        .namespace
        .clone()
        .unwrap_or_else(|| default_namespace.to_string());
    if object.is_namespaced() {
        object.metadata_mut().namespace = Some(namespace.clone());
    }
    if options.apply_annotation {
        stamp_last_applied(&mut object)?;
    }
    trace!(?object, "prepared object");
    Ok((object, namespace))
}

fn stamp_last_applied(object: &mut Object) -> Result<()> {
    let applied = serde_json::to_string(object).map_err(|source| Error::Serialize {
        kind: object.kind(),
        source,
    })?;
    object
        .metadata_mut()
        .annotations
        .get_or_insert_with(Default::default)
        .insert(LAST_APPLIED_CONFIG_ANNOTATION.to_string(), applied);
    Ok(())
}

fn print<P: Printer + ?Sized>(
    printer: &mut P,
    object: &Object,
    output: Option<OutputFormat>,
    dry_run: bool,
) -> Result<()> {
    match output {
        Some(format) => printer.print_object(object, format),
        None => printer.print_success(object, dry_run),
    }
    .map_err(Error::Print)
}
