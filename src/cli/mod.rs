pub mod hooks;
pub mod pre_push;

/// Print an error to stderr through miette's report handler.
fn report(error: impl miette::Diagnostic + Send + Sync + 'static) {
    eprintln!("{:?}", miette::Report::new(error));
}
