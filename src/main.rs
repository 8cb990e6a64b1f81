//! hgd-validate CLI entry point.

use std::process::ExitCode;

use hgd_validate::checks::{catalog, with_quiet_panics};
use hgd_validate::cli::Cli;
use hgd_validate::config::ValidatorConfig;
use hgd_validate::runner::ValidationRunner;
use hgd_validate::ui::{ConsoleReporter, Reporter};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by `RUST_LOG`; the default only shows warnings.
/// Logs go to stderr so they never interleave with the report on stdout.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hgd_validate=warn"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    init_tracing();

    let cli = match Cli::parse_lenient() {
        Ok(cli) => cli,
        Err(info) => {
            // --help or --version
            if let Err(e) = info.print() {
                tracing::warn!(error = %e, "failed to print usage");
            }
            return ExitCode::SUCCESS;
        }
    };
    tracing::debug!("hgd-validate starting with args: {:?}", cli);

    let config = match ValidatorConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("{}; using defaults", e);
            ValidatorConfig::default()
        }
    };
    tracing::debug!(python = %config.python, "resolved configuration");

    let groups = catalog::hgd_groups(&config);
    let mut reporter = ConsoleReporter::stdout();
    let report = with_quiet_panics(|| {
        ValidationRunner::new(catalog::TITLE).run(&groups, &mut reporter)
    });
    reporter.summary(report.verdict());

    tracing::debug!(
        failed_required = ?report.failed_required(),
        failed_advisory = ?report.failed_advisory(),
        skipped = ?report.skipped(),
        "validation complete"
    );

    ExitCode::from(report.exit_code())
}
