//! Validate a skill folder's SKILL.md

use skillpack_cli::cli::{ValidateCli, parse_or_exit};
use skillpack_cli::{commands, init_logging};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli: ValidateCli = parse_or_exit();
    init_logging(cli.verbose);

    match commands::validate::run(&cli.skill_dir) {
        Ok(message) => {
            println!("{}", message);
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("{}", e);
            ExitCode::FAILURE
        }
    }
}
