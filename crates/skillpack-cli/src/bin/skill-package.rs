//! Package a skill folder into a .skill archive

use skillpack_cli::cli::{PackageCli, parse_or_exit};
use skillpack_cli::output::print_error;
use skillpack_cli::{commands, init_logging};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli: PackageCli = parse_or_exit();
    init_logging(cli.verbose);

    match commands::package::run(&cli) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            ExitCode::FAILURE
        }
    }
}
