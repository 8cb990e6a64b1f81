//! CLI argument definitions.
//!
//! The validator takes no options: the check set is fixed at build time.
//! Parsing still runs so `--help` and `--version` work. Anything else on the
//! command line is ignored with a warning so a report is always produced.

use std::ffi::OsString;

use clap::error::ErrorKind;
use clap::Parser;

/// Verify that HGD and its dependencies are correctly installed.
///
/// Environment overrides: HGD_PYTHON selects the interpreter;
/// HGD_VALIDATE_TOOL_TIMEOUT, HGD_VALIDATE_IMPORT_TIMEOUT and
/// HGD_VALIDATE_SMOKE_TIMEOUT adjust deadlines in seconds; NO_COLOR
/// disables color.
#[derive(Debug, Default, Parser)]
#[command(name = "hgd-validate")]
#[command(author, version, about, long_about)]
pub struct Cli {}

impl Cli {
    /// Parse the process arguments, ignoring anything unrecognised.
    ///
    /// Returns `Err` only for `--help` and `--version`, whose output the
    /// caller should print before exiting successfully.
    pub fn parse_lenient() -> Result<Self, clap::Error> {
        Self::parse_lenient_from(std::env::args_os())
    }

    /// [`Cli::parse_lenient`] over an explicit argument list.
    pub fn parse_lenient_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Self::try_parse_from(args) {
            Ok(cli) => Ok(cli),
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                Err(e)
            }
            Err(e) => {
                tracing::warn!(kind = ?e.kind(), "ignoring unexpected command-line arguments");
                Ok(Self::default())
            }
        }
    }
}
