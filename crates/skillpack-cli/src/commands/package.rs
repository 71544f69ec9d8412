//! `skill-package` command implementation

use crate::CliError;
use crate::cli::{ArchiverKind, PackageCli};
use crate::output::ConsoleReporter;
use crate::prompt::TerminalCollector;
use skillpack_core::{Archiver, EnvCollector, EnvironmentCollector, NativeZip, Packager, ZipCommand};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::debug;

/// Execute the packaging workflow, returning the archive path.
pub fn run(args: &PackageCli) -> Result<PathBuf, CliError> {
    debug!("Using {} archiver", args.archiver);
    let archiver: Box<dyn Archiver> = match args.archiver {
        ArchiverKind::Zip => Box::new(ZipCommand::new(&args.zip_program)),
        ArchiverKind::Native => Box::new(NativeZip),
    };

    let interactive = !args.no_input && std::io::stdin().is_terminal();
    if !args.no_input && !interactive {
        debug!("stdin is not a terminal, using current environment values");
    }
    let collector: Box<dyn EnvCollector> = if interactive {
        Box::new(TerminalCollector::new())
    } else {
        Box::new(EnvironmentCollector::new())
    };

    let mut packager = Packager::from_boxed(archiver, collector);
    let mut reporter = ConsoleReporter::new();
    let archive = packager.package(&args.skill_dir, args.output_dir.as_deref(), &mut reporter)?;
    Ok(archive)
}
