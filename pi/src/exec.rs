//! Running a parsed command line
use crate::cli::App;
use pi_client::{runner, KubeSubmitter, StreamPrinter};
use pi_core::{Object, Registry};
use std::io::Write;
use tracing::debug;

/// Run the command `app` describes, printing results to `out`
///
/// The object is generated and validated before any cluster config is
/// loaded. Dry runs never need a client; without a usable config they
/// assume the `default` namespace.
pub async fn run<W: Write>(app: &App, out: W) -> anyhow::Result<Object> {
    let request = app.create_request();
    debug!(generator = %request.generator, "resolving generator");
    let generator = Registry::resolve_for(&request.generator, request.accepted())?(&request.params)?;
    let object = runner::validate(generator.as_ref())?;

    let mut printer = StreamPrinter::new(out);
    let client_options = app.global.client_options();
    if request.options.dry_run {
        let namespace = match &request.options.namespace {
            Some(ns) => ns.clone(),
            None => client_options.default_namespace().await,
        };
        return Ok(runner::print_dry_run(object, &request.options, &namespace, &mut printer)?);
    }

    let submitter = KubeSubmitter::new(client_options.client().await?);
    Ok(runner::create_object(object, &request.options, &submitter, &mut printer).await?)
}

/// Process exit code for a failed run
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(e) = err.downcast_ref::<pi_client::Error>() {
        e.exit_code()
    } else if let Some(e) = err.downcast_ref::<pi_core::Error>() {
        if e.is_usage() { 2 } else { 1 }
    } else {
        1
    }
}

/// The line reported for a failed run
///
/// Error messages already embed their causes, so only the outermost one is
/// rendered.
pub fn error_message(err: &anyhow::Error) -> String {
    format!("error: {err}")
}
